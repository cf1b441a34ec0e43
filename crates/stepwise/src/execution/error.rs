//! Error types for step execution failures.

use std::fmt;

use stepwise_patterns::StepKeyword;
use thiserror::Error;

use crate::error::StepError;
use crate::step_args::StepArgsError;

/// Where in a scenario a failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSite {
    /// Zero-based position of the step in the scenario.
    pub index: usize,
    /// Effective keyword the step was dispatched under.
    pub keyword: StepKeyword,
    /// Step text.
    pub text: String,
    /// Name of the scenario.
    pub scenario: String,
}

impl fmt::Display for StepSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {} '{} {}' of scenario '{}'",
            self.index, self.keyword, self.text, self.scenario
        )
    }
}

/// Error type for step execution failures.
///
/// The handler's own [`StepError`] is kept unchanged as the source of
/// [`HandlerFailed`](Self::HandlerFailed).
///
/// # Examples
///
/// ```
/// use stepwise::{ExecutionError, StepError, StepKeyword, StepSite};
///
/// let err = ExecutionError::HandlerFailed {
///     step: StepSite {
///         index: 1,
///         keyword: StepKeyword::Then,
///         text: r#"It should print "world""#.into(),
///         scenario: "echo".into(),
///     },
///     source: StepError::mismatch("hello", "world"),
/// };
/// assert_eq!(err.reason(), "Text mismatch: hello != world");
/// assert_eq!(err.handler_error(), Some(&StepError::mismatch("hello", "world")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// No step definition matched.
    #[error("no step definition for {step}")]
    StepNotFound {
        /// The unmatched step.
        step: StepSite,
    },
    /// Several equally specific definitions matched.
    #[error("{step} is ambiguous: {}", .candidates.join(", "))]
    Ambiguous {
        /// The ambiguous step.
        step: StepSite,
        /// Patterns of the competing definitions.
        candidates: Vec<String>,
    },
    /// Captured values did not convert into the handler's arguments.
    #[error("invalid arguments for {step}: {source}")]
    InvalidArguments {
        /// The step whose captures were rejected.
        step: StepSite,
        /// Conversion failure.
        #[source]
        source: StepArgsError,
    },
    /// The step handler returned an error.
    #[error("{step} failed: {source}")]
    HandlerFailed {
        /// The failing step.
        step: StepSite,
        /// Error returned by the handler.
        #[source]
        source: StepError,
    },
}

impl ExecutionError {
    /// The step the error refers to.
    #[must_use]
    pub fn step(&self) -> &StepSite {
        match self {
            Self::StepNotFound { step }
            | Self::Ambiguous { step, .. }
            | Self::InvalidArguments { step, .. }
            | Self::HandlerFailed { step, .. } => step,
        }
    }

    /// The handler's error, for [`HandlerFailed`](Self::HandlerFailed).
    #[must_use]
    pub fn handler_error(&self) -> Option<&StepError> {
        match self {
            Self::HandlerFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether no definition matched the step.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::StepNotFound { .. })
    }

    /// The failure without the step location, as shown in step records.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::StepNotFound { .. } => "undefined step".to_owned(),
            Self::Ambiguous { candidates, .. } => {
                format!("ambiguous step: {}", candidates.join(", "))
            }
            Self::InvalidArguments { source, .. } => source.to_string(),
            Self::HandlerFailed { source, .. } => source.to_string(),
        }
    }
}
