//! Compiled step patterns.
//! `StepPattern` keeps the pattern text together with its regex, declared
//! placeholders and specificity so lookups never recompile.

use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use stepwise_patterns::{
    PatternError, Placeholder, SpecificityScore, compile_regex_from_pattern,
    extract_captured_values, placeholders,
};

/// Pattern text used to match a step line.
#[derive(Debug, Clone)]
pub struct StepPattern {
    text: String,
    regex: Regex,
    placeholders: Vec<Placeholder>,
    specificity: SpecificityScore,
}

// Equality and hashing use the pattern text only.
impl PartialEq for StepPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for StepPattern {}

impl Hash for StepPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl StepPattern {
    /// Compile `text` into a pattern.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the placeholders are malformed or the
    /// generated regex is rejected.
    ///
    /// # Examples
    /// ```
    /// use stepwise::StepPattern;
    ///
    /// let pattern = StepPattern::compile(r#"I put "{thing}" in a blender"#)
    ///     .expect("valid pattern");
    /// assert_eq!(
    ///     pattern.captures(r#"I put "apples" in a blender"#),
    ///     Some(vec!["apples".to_string()])
    /// );
    /// assert!(pattern.captures("I switch the blender on").is_none());
    /// ```
    pub fn compile(text: impl Into<String>) -> Result<Self, PatternError> {
        let text = text.into();
        let regex = compile_regex_from_pattern(&text)?;
        let placeholders = placeholders(&text)?;
        let specificity = SpecificityScore::calculate(&text)?;
        Ok(Self {
            text,
            regex,
            placeholders,
            specificity,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The anchored regular expression generated from the pattern.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Placeholders in capture order.
    #[must_use]
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Ranking used when several patterns match the same text.
    #[must_use]
    pub fn specificity(&self) -> SpecificityScore {
        self.specificity
    }

    /// Whether the pattern has no placeholders.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.placeholders.is_empty()
    }

    /// Captured placeholder values when `text` matches the whole pattern.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        extract_captured_values(&self.regex, text)
    }
}

impl fmt::Display for StepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
