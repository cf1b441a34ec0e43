//! Per-step and per-scenario result records.

use std::time::Duration;

use stepwise_patterns::StepKeyword;

use super::Status;
use crate::scenario::Scenario;

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    keyword: StepKeyword,
    resolved: StepKeyword,
    text: String,
    status: Status,
    duration: Duration,
    error: Option<String>,
    output: Vec<String>,
}

impl StepRecord {
    /// Record a step with no duration, error or output.
    ///
    /// # Examples
    /// ```
    /// use stepwise::StepKeyword;
    /// use stepwise::reporting::{Status, StepRecord};
    ///
    /// let record = StepRecord::new(StepKeyword::When, "I switch the blender on", Status::Skipped);
    /// assert_eq!(record.name(), "I switch the blender on");
    /// assert!(record.error().is_none());
    /// ```
    #[must_use]
    pub fn new(keyword: StepKeyword, text: impl Into<String>, status: Status) -> Self {
        Self {
            keyword,
            resolved: keyword,
            text: text.into(),
            status,
            duration: Duration::ZERO,
            error: None,
            output: Vec::new(),
        }
    }

    /// Set the keyword a conjunction resolved to.
    #[must_use]
    pub fn resolved_as(mut self, keyword: StepKeyword) -> Self {
        self.resolved = keyword;
        self
    }

    /// Attach the time spent in the step.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Attach the failure message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Attach output emitted while the step ran.
    #[must_use]
    pub fn with_output(mut self, output: Vec<String>) -> Self {
        self.output = output;
        self
    }

    /// Keyword as written in the scenario.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Keyword the step was dispatched under; differs from
    /// [`keyword`](Self::keyword) for `And` and `But`.
    #[must_use]
    pub fn resolved_keyword(&self) -> StepKeyword {
        self.resolved
    }

    /// Step text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.text
    }

    /// Step outcome.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Time spent in the step; zero when it did not run.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Failure message, if the step failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Lines emitted while the step ran.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRecord {
    name: String,
    feature_name: String,
    feature_path: String,
    line: u32,
    tags: Vec<String>,
    status: Status,
    steps: Vec<StepRecord>,
}

impl ScenarioRecord {
    /// Record `scenario` with the given step outcomes; the scenario status is
    /// aggregated from them.
    #[must_use]
    pub fn new(scenario: &Scenario, steps: Vec<StepRecord>) -> Self {
        Self {
            name: scenario.name().to_owned(),
            feature_name: scenario.feature_name().to_owned(),
            feature_path: scenario.feature_path().to_owned(),
            line: scenario.line(),
            tags: scenario.tags().to_vec(),
            status: Status::aggregate(steps.iter().map(StepRecord::status)),
            steps,
        }
    }

    /// Record `scenario` as not run, with every step untested.
    #[must_use]
    pub fn untested(scenario: &Scenario) -> Self {
        let steps = scenario
            .resolved_steps()
            .map(|(resolved, step)| {
                StepRecord::new(step.keyword, step.text.clone(), Status::Untested)
                    .resolved_as(resolved)
            })
            .collect();
        let mut record = Self::new(scenario, steps);
        record.status = Status::Untested;
        record
    }

    /// Scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the feature the scenario belongs to.
    #[must_use]
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// Path of the feature file.
    #[must_use]
    pub fn feature_path(&self) -> &str {
        &self.feature_path
    }

    /// Line the scenario starts on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// `path:line` of the scenario.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.feature_path, self.line)
    }

    /// Scenario tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Scenario outcome.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Step outcomes in order.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// The step that ended the scenario, if any.
    #[must_use]
    pub fn failed_step(&self) -> Option<&StepRecord> {
        self.steps.iter().find(|step| step.status().is_failure())
    }

    /// Total time spent in the scenario's steps.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(StepRecord::duration).sum()
    }
}
