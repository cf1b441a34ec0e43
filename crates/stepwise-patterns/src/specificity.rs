//! Ranking of overlapping step patterns.
//!
//! When several patterns match one step line, the registry keeps the most
//! specific one: more literal text, then fewer placeholders, then more typed
//! placeholders.

use crate::PatternError;
use crate::pattern::lexer::{Token, lex_pattern};
use std::cmp::Ordering;

/// Specificity of a step pattern. Higher compares as more specific.
///
/// # Examples
///
/// ```
/// use stepwise_patterns::SpecificityScore;
///
/// let exact = SpecificityScore::calculate(r#"I put "apples" in a blender"#)
///     .expect("valid pattern");
/// let generic = SpecificityScore::calculate(r#"I put "{thing}" in a blender"#)
///     .expect("valid pattern");
/// assert!(exact > generic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Literal characters (not bytes) in the pattern.
    pub literal_chars: usize,
    /// Placeholders of any kind.
    pub placeholder_count: usize,
    /// Placeholders carrying a type hint.
    pub typed_placeholder_count: usize,
}

impl SpecificityScore {
    /// Score `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern cannot be lexed.
    pub fn calculate(pattern: &str) -> Result<Self, PatternError> {
        let mut score = Self::default();
        for token in lex_pattern(pattern)? {
            match token {
                Token::Literal(text) => score.literal_chars += text.chars().count(),
                Token::Placeholder { hint, .. } => {
                    score.placeholder_count += 1;
                    if hint.is_some() {
                        score.typed_placeholder_count += 1;
                    }
                }
                Token::OpenBrace { .. } | Token::CloseBrace { .. } => score.literal_chars += 1,
            }
        }
        Ok(score)
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.literal_chars
            .cmp(&other.literal_chars)
            .then_with(|| other.placeholder_count.cmp(&self.placeholder_count))
            .then_with(|| {
                self.typed_placeholder_count
                    .cmp(&other.typed_placeholder_count)
            })
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(pattern: &str) -> SpecificityScore {
        SpecificityScore::calculate(pattern)
            .unwrap_or_else(|err| panic!("pattern {pattern:?} should score: {err}"))
    }

    #[test]
    fn literal_pattern_beats_placeholder() {
        assert!(score("I put apples in a blender") > score("I put {thing} in a blender"));
    }

    #[test]
    fn fewer_placeholders_win_on_equal_literals() {
        let a = score("ab {x}");
        let b = score("a {x} {y}");
        assert_eq!(a.literal_chars, b.literal_chars);
        assert!(a > b);
    }

    #[test]
    fn typed_placeholder_breaks_ties() {
        assert!(score("count is {n:u32}") > score("count is {n}"));
    }

    #[test]
    fn positional_and_named_placeholders_score_alike() {
        assert_eq!(score(r#"I type in "{}""#), score(r#"I type in "{text}""#));
    }

    #[test]
    fn escaped_braces_count_as_literals() {
        let escaped = score("value is {{x}}");
        assert_eq!(escaped.literal_chars, 12);
        assert_eq!(escaped.placeholder_count, 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(score("café {value}").literal_chars, 5);
    }
}
