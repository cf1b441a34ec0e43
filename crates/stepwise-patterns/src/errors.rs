//! Errors raised while turning step patterns into regular expressions.

use std::fmt;
use thiserror::Error;

/// Where and why a placeholder failed to parse.
///
/// `position` is the byte offset of the opening brace, or of the stray brace
/// for unbalanced patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderErrorInfo {
    /// Short reason for the failure.
    pub message: &'static str,
    /// Zero-based byte offset into the pattern.
    pub position: usize,
    /// Placeholder name, absent for positional placeholders and stray braces.
    pub placeholder: Option<String>,
}

impl PlaceholderErrorInfo {
    /// Describe a placeholder failure.
    #[must_use]
    pub fn new(message: &'static str, position: usize, placeholder: Option<String>) -> Self {
        Self {
            message,
            position,
            placeholder,
        }
    }
}

impl fmt::Display for PlaceholderErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)?;
        if let Some(name) = &self.placeholder {
            write!(f, " for placeholder `{name}`")?;
        }
        write!(f, " at byte {} (zero-based)", self.position)
    }
}

/// Failure to compile a step pattern.
///
/// # Examples
/// ```
/// use stepwise_patterns::{PatternError, build_regex_from_pattern};
///
/// let outcome = build_regex_from_pattern("I put {thing in a blender");
/// let Err(PatternError::Placeholder(info)) = outcome else {
///     panic!("unclosed placeholder is rejected");
/// };
/// assert_eq!(info.placeholder.as_deref(), Some("thing"));
/// assert_eq!(info.position, 6);
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The placeholder syntax is malformed.
    #[error("{0}")]
    Placeholder(PlaceholderErrorInfo),
    /// The generated expression was rejected by the regex engine.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn placeholder_error(
    message: &'static str,
    position: usize,
    placeholder: Option<String>,
) -> PatternError {
    PatternError::Placeholder(PlaceholderErrorInfo::new(message, position, placeholder))
}
