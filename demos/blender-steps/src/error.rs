//! Errors raised while configuring a run or rendering its report.
//!
//! Registration and I/O failures in the binary go straight to `eyre`.

use thiserror::Error;

/// Failures while configuring the run or rendering its report.
#[derive(Debug, Error)]
pub enum DemoError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rendering a text or JUnit report failed.
    #[error("failed to render report")]
    Render(#[from] std::fmt::Error),

    /// Rendering a JSON report failed.
    #[error("failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),
}
