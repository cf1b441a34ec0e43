//! Behave-style result records and report writers.
//!
//! The [`Runner`](crate::Runner) produces a [`ScenarioRecord`] per scenario
//! and a [`RunReport`] per batch. Writers render a report as plain text,
//! behave-compatible JSON (with the `json` feature) or `JUnit` XML.

use std::fmt;

/// JSON report writer for run outcomes.
#[cfg(feature = "json")]
pub mod json;
/// `JUnit` XML writer for run outcomes.
pub mod junit;
mod record;
/// Plain-text writer for run outcomes.
pub mod text;

pub use record::{ScenarioRecord, StepRecord};

/// Outcome of a step, scenario or feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Everything ran and succeeded.
    Passed,
    /// A handler failed or a step could not be dispatched.
    Failed,
    /// Not run because an earlier step failed, or because of a dry run.
    Skipped,
    /// Not run because the run stopped early.
    Untested,
    /// No step definition matched.
    Undefined,
}

impl Status {
    /// Every status, in report order.
    pub const ALL: [Self; 5] = [
        Self::Passed,
        Self::Failed,
        Self::Skipped,
        Self::Untested,
        Self::Undefined,
    ];

    /// Lowercase label used in reports.
    ///
    /// # Examples
    /// ```
    /// use stepwise::reporting::Status;
    ///
    /// assert_eq!(Status::Untested.label(), "untested");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Untested => "untested",
            Self::Undefined => "undefined",
        }
    }

    /// Whether this is [`Status::Passed`].
    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Whether this status fails a run.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Undefined)
    }

    /// Combine child outcomes into the outcome of their parent.
    ///
    /// Any failure or undefined child fails the parent. A parent whose
    /// children were all skipped or all untested takes that status, and an
    /// empty parent passes.
    #[must_use]
    pub fn aggregate(children: impl IntoIterator<Item = Self>) -> Self {
        let mut all_skipped = true;
        let mut all_untested = true;
        let mut any = false;
        for status in children {
            if status.is_failure() {
                return Self::Failed;
            }
            any = true;
            all_skipped &= status == Self::Skipped;
            all_untested &= status == Self::Untested;
        }
        match (any, all_skipped, all_untested) {
            (true, true, _) => Self::Skipped,
            (true, _, true) => Self::Untested,
            _ => Self::Passed,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scenarios of one feature, in run order.
#[derive(Debug, Clone)]
pub struct FeatureGroup<'a> {
    name: &'a str,
    path: &'a str,
    scenarios: Vec<&'a ScenarioRecord>,
}

impl<'a> FeatureGroup<'a> {
    /// Feature name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Feature file path.
    #[must_use]
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Records belonging to the feature.
    #[must_use]
    pub fn scenarios(&self) -> &[&'a ScenarioRecord] {
        &self.scenarios
    }

    /// Aggregated status of the feature.
    #[must_use]
    pub fn status(&self) -> Status {
        Status::aggregate(self.scenarios.iter().map(|record| record.status()))
    }
}

/// Records of a batch of scenarios.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    scenarios: Vec<ScenarioRecord>,
}

impl RunReport {
    /// Wrap the given records.
    #[must_use]
    pub fn new(scenarios: Vec<ScenarioRecord>) -> Self {
        Self { scenarios }
    }

    /// Records in run order.
    #[must_use]
    pub fn scenarios(&self) -> &[ScenarioRecord] {
        &self.scenarios
    }

    /// Number of scenarios with `status`.
    #[must_use]
    pub fn scenario_count(&self, status: Status) -> usize {
        self.scenarios
            .iter()
            .filter(|record| record.status() == status)
            .count()
    }

    /// Number of steps with `status` across all scenarios.
    #[must_use]
    pub fn step_count(&self, status: Status) -> usize {
        self.scenarios
            .iter()
            .flat_map(ScenarioRecord::steps)
            .filter(|step| step.status() == status)
            .count()
    }

    /// Whether no scenario failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self
            .scenarios
            .iter()
            .any(|record| record.status().is_failure())
    }

    /// Group the records by feature, keeping first-appearance order.
    #[must_use]
    pub fn features(&self) -> Vec<FeatureGroup<'_>> {
        let mut groups: Vec<FeatureGroup<'_>> = Vec::new();
        for record in &self.scenarios {
            let existing = groups.iter_mut().find(|group| {
                group.path == record.feature_path() && group.name == record.feature_name()
            });
            match existing {
                Some(group) => group.scenarios.push(record),
                None => groups.push(FeatureGroup {
                    name: record.feature_name(),
                    path: record.feature_path(),
                    scenarios: vec![record],
                }),
            }
        }
        groups
    }
}

impl FromIterator<ScenarioRecord> for RunReport {
    fn from_iter<I: IntoIterator<Item = ScenarioRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
