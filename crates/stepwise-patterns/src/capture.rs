//! Capture extraction for compiled step patterns.

use regex::Regex;

/// Collect placeholder captures when `text` matches `re`.
///
/// Returns `None` on a mismatch so callers can distinguish "no match" from "a
/// match with no placeholders". Group 0 is skipped; groups that did not take
/// part in the match become empty strings so positions stay aligned with the
/// placeholders.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use stepwise_patterns::extract_captured_values;
/// let regex = Regex::new(r#"^I put "(.+?)" in a blender$"#)
///     .expect("example regex compiles");
/// let values = extract_captured_values(&regex, r#"I put "apples" in a blender"#);
/// assert_eq!(values, Some(vec!["apples".to_string()]));
/// assert!(extract_captured_values(&regex, "I switch the blender on").is_none());
/// ```
#[must_use]
pub fn extract_captured_values(re: &Regex, text: &str) -> Option<Vec<String>> {
    let caps = re.captures(text)?;
    let values = caps
        .iter()
        .skip(1)
        .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
        .collect();
    Some(values)
}
