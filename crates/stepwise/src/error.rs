//! Failures raised by step handlers.

use thiserror::Error;

/// Outcome of a step handler.
pub type StepResult = Result<(), StepError>;

/// Error returned by a step handler.
///
/// Any error aborts the scenario at the failing step; the runner wraps it in
/// [`ExecutionError::HandlerFailed`](crate::ExecutionError::HandlerFailed)
/// without altering it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepError {
    /// An observed value differs from the expected one.
    #[error("Text mismatch: {actual} != {expected}")]
    Mismatch {
        /// Value found in the scenario.
        actual: String,
        /// Value the step asked for.
        expected: String,
    },
    /// A lookup table has no entry for `key`.
    #[error("no entry for '{key}' in {table}")]
    Lookup {
        /// Description of the table that was consulted.
        table: &'static str,
        /// Key that was not found.
        key: String,
    },
    /// A step read a context value that no earlier step stored.
    #[error("no value stored under '{key}'")]
    MissingValue {
        /// Context key name.
        key: &'static str,
    },
    /// A context value exists but has another type.
    #[error("value under '{key}' is a {found}, not a {expected}")]
    WrongType {
        /// Context key name.
        key: &'static str,
        /// Type requested by the reader.
        expected: &'static str,
        /// Type stored by the writer.
        found: &'static str,
    },
    /// Free-form failure.
    #[error("{message}")]
    Failed {
        /// Human-readable reason.
        message: String,
    },
}

impl StepError {
    /// Build a [`StepError::Mismatch`].
    ///
    /// # Examples
    /// ```
    /// use stepwise::StepError;
    ///
    /// let err = StepError::mismatch("hello", "world");
    /// assert_eq!(err.to_string(), "Text mismatch: hello != world");
    /// ```
    #[must_use]
    pub fn mismatch(actual: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Mismatch {
            actual: actual.into(),
            expected: expected.into(),
        }
    }

    /// Build a [`StepError::Lookup`].
    #[must_use]
    pub fn lookup(table: &'static str, key: impl Into<String>) -> Self {
        Self::Lookup {
            table,
            key: key.into(),
        }
    }

    /// Build a [`StepError::Failed`].
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Whether this is a [`StepError::Mismatch`].
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }

    /// Whether this is a [`StepError::Lookup`].
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}
