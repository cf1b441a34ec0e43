//! Step-pattern lexing and compilation.

mod compiler;
pub(crate) mod lexer;
mod placeholder;
#[cfg(test)]
pub(crate) mod test_support;

use crate::errors::PatternError;
use regex::Regex;

pub use compiler::build_regex_from_pattern;

/// A placeholder declared in a step pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Declared name; `None` for positional `{}` placeholders.
    pub name: Option<String>,
    /// Optional type hint such as `u32`.
    pub hint: Option<String>,
}

/// Build and compile a regular expression from a step pattern.
///
/// # Errors
/// Returns [`PatternError`] when placeholder parsing fails or the generated
/// source is rejected by the regex engine.
pub fn compile_regex_from_pattern(pat: &str) -> Result<Regex, PatternError> {
    let source = build_regex_from_pattern(pat)?;
    Ok(Regex::new(&source)?)
}

/// List the placeholders of `pat` in capture order.
///
/// # Errors
/// Returns [`PatternError`] when the pattern is malformed.
///
/// # Examples
/// ```
/// use stepwise_patterns::placeholders;
/// let found = placeholders(r#"it should transform into "{other_thing}""#)
///     .expect("pattern is well formed");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name.as_deref(), Some("other_thing"));
/// ```
pub fn placeholders(pat: &str) -> Result<Vec<Placeholder>, PatternError> {
    compiler::compile_tokens(pat).map(|compiled| compiled.placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_literal_pattern() {
        let regex = compile_regex_from_pattern("I switch the blender on")
            .unwrap_or_else(|err| panic!("pattern should compile: {err}"));
        assert_eq!(regex.as_str(), "^I switch the blender on$");
        assert!(!regex.is_match("I switch the blender off"));
    }

    #[test]
    fn surfaces_regex_size_errors() {
        let heavy = format!("prefix {}", "{value:f64}".repeat(20_000));
        let Err(err) = compile_regex_from_pattern(&heavy) else {
            panic!("pattern should be too large");
        };
        assert!(matches!(
            err,
            PatternError::Regex(regex::Error::CompiledTooBig(_))
        ));
    }

    #[test]
    fn literal_pattern_has_no_placeholders() {
        let found = placeholders("I switch the blender on")
            .unwrap_or_else(|err| panic!("pattern should parse: {err}"));
        assert!(found.is_empty());
    }

    #[test]
    fn placeholders_reports_malformed_patterns() {
        assert!(placeholders("{thing").is_err());
    }
}
