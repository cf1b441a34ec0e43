//! Sequential scenario execution.
//!
//! A [`Runner`] borrows a [`StepRegistry`] and runs scenarios one step at a
//! time against a fresh [`ScenarioContext`]. The first failing step aborts
//! its scenario; [`Runner::run`] records the remaining steps as skipped while
//! [`Runner::execute`] returns the error directly.

mod error;

use std::time::Instant;

use stepwise_patterns::StepKeyword;

use crate::config::RunnerConfig;
use crate::context::ScenarioContext;
use crate::registry::{ResolveError, StepRegistry};
use crate::reporting::{RunReport, ScenarioRecord, Status, StepRecord};
use crate::scenario::{Scenario, ScenarioStep};

pub use error::{ExecutionError, StepSite};

/// Runs scenarios against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Runner<'r> {
    registry: &'r StepRegistry,
    config: RunnerConfig,
}

impl<'r> Runner<'r> {
    /// Create a runner with the default configuration.
    #[must_use]
    pub fn new(registry: &'r StepRegistry) -> Self {
        Self::with_config(registry, RunnerConfig::default())
    }

    /// Create a runner with an explicit configuration.
    #[must_use]
    pub fn with_config(registry: &'r StepRegistry, config: RunnerConfig) -> Self {
        Self { registry, config }
    }

    /// The registry steps are dispatched to.
    #[must_use]
    pub fn registry(&self) -> &'r StepRegistry {
        self.registry
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> RunnerConfig {
        self.config
    }

    /// Run every step of `scenario`, stopping at the first failure.
    ///
    /// Handlers are always invoked, whatever the dry-run setting. On success
    /// the scenario's context is handed back for inspection.
    ///
    /// # Errors
    /// Returns the [`ExecutionError`] of the first step that could not be
    /// dispatched or whose handler failed.
    pub fn execute(&self, scenario: &Scenario) -> Result<ScenarioContext, ExecutionError> {
        let mut ctx = ScenarioContext::new();
        for (index, (keyword, step)) in scenario.resolved_steps().enumerate() {
            self.dispatch(&mut ctx, scenario, index, keyword, step)?;
        }
        Ok(ctx)
    }

    /// Run `scenario` and record the outcome of every step.
    ///
    /// Steps after a failure are recorded as skipped. In a dry run no handler
    /// is invoked and every step is checked: resolvable steps are recorded as
    /// skipped, unmatched ones as undefined and ambiguous ones as failed.
    #[must_use]
    pub fn run(&self, scenario: &Scenario) -> ScenarioRecord {
        log::debug!("running scenario '{}'", scenario.name());
        let mut ctx = ScenarioContext::new();
        let mut aborted = false;
        let mut records = Vec::with_capacity(scenario.steps().len());
        for (index, (keyword, step)) in scenario.resolved_steps().enumerate() {
            let record = if aborted {
                StepRecord::new(step.keyword, step.text.as_str(), Status::Skipped)
            } else if self.config.dry_run() {
                self.check(scenario, index, keyword, step)
            } else {
                self.record_step(&mut ctx, scenario, index, keyword, step)
            };
            aborted |= !self.config.dry_run() && record.status().is_failure();
            records.push(record.resolved_as(keyword));
        }
        ScenarioRecord::new(scenario, records)
    }

    /// Run `scenarios` in order and collect their records.
    ///
    /// With [`RunnerConfig::stop_on_failure`] every scenario after the first
    /// failing one is recorded as untested.
    #[must_use]
    pub fn run_all(&self, scenarios: &[Scenario]) -> RunReport {
        let mut stopped = false;
        let mut records = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            if stopped {
                records.push(ScenarioRecord::untested(scenario));
                continue;
            }
            let record = self.run(scenario);
            if self.config.stop_on_failure() && record.status().is_failure() {
                log::warn!(
                    "scenario '{}' failed; remaining scenarios are not run",
                    scenario.name()
                );
                stopped = true;
            }
            records.push(record);
        }
        RunReport::new(records)
    }

    fn record_step(
        &self,
        ctx: &mut ScenarioContext,
        scenario: &Scenario,
        index: usize,
        keyword: StepKeyword,
        step: &ScenarioStep,
    ) -> StepRecord {
        let output_start = ctx.output().len();
        let started = Instant::now();
        let outcome = self.dispatch(ctx, scenario, index, keyword, step);
        let duration = started.elapsed();
        let output = ctx
            .output()
            .get(output_start..)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let record = match outcome {
            Ok(()) => StepRecord::new(step.keyword, step.text.as_str(), Status::Passed),
            Err(err) => {
                log::warn!("{err}");
                failed_record(step, &err)
            }
        };
        record.with_duration(duration).with_output(output)
    }

    fn check(
        &self,
        scenario: &Scenario,
        index: usize,
        keyword: StepKeyword,
        step: &ScenarioStep,
    ) -> StepRecord {
        match self.registry.find(keyword, &step.text) {
            Ok(_) => StepRecord::new(step.keyword, step.text.as_str(), Status::Skipped),
            Err(err) => failed_record(step, &unresolved(err, site(scenario, index, keyword, step))),
        }
    }

    fn dispatch(
        &self,
        ctx: &mut ScenarioContext,
        scenario: &Scenario,
        index: usize,
        keyword: StepKeyword,
        step: &ScenarioStep,
    ) -> Result<(), ExecutionError> {
        let found = self
            .registry
            .find(keyword, &step.text)
            .map_err(|err| unresolved(err, site(scenario, index, keyword, step)))?;
        log::debug!(
            "step {index} '{keyword} {}' matched '{}'",
            step.text,
            found.definition().pattern()
        );
        match found.invoke(ctx) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(ExecutionError::HandlerFailed {
                step: site(scenario, index, keyword, step),
                source,
            }),
            Err(source) => Err(ExecutionError::InvalidArguments {
                step: site(scenario, index, keyword, step),
                source,
            }),
        }
    }
}

fn site(scenario: &Scenario, index: usize, keyword: StepKeyword, step: &ScenarioStep) -> StepSite {
    StepSite {
        index,
        keyword,
        text: step.text.clone(),
        scenario: scenario.name().to_owned(),
    }
}

fn unresolved(err: ResolveError, step: StepSite) -> ExecutionError {
    match err {
        ResolveError::NotFound { .. } => ExecutionError::StepNotFound { step },
        ResolveError::Ambiguous { candidates, .. } => {
            ExecutionError::Ambiguous { step, candidates }
        }
    }
}

fn failed_record(step: &ScenarioStep, err: &ExecutionError) -> StepRecord {
    let status = if err.is_undefined() {
        Status::Undefined
    } else {
        Status::Failed
    };
    StepRecord::new(step.keyword, step.text.as_str(), status).with_error(err.reason())
}
