//! Integration tests for pattern compilation and capture extraction.

#![expect(clippy::expect_used, reason = "tests assert on the success path")]

use regex::Regex;

use stepwise_patterns::{
    PatternError, build_regex_from_pattern, compile_regex_from_pattern, extract_captured_values,
    placeholders,
};

#[test]
fn compiled_patterns_match_step_text() {
    let regex = compile_regex_from_pattern(r#"I put "{thing}" in a blender"#)
        .expect("pattern should compile");
    assert!(regex.is_match(r#"I put "Red Tree Frog" in a blender"#));
    assert!(!regex.is_match(r#"I put "apples" in a toaster"#));
}

#[test]
fn extracts_positional_capture() {
    let source = build_regex_from_pattern(r#"I type in "{}""#).expect("pattern should compile");
    let regex = Regex::new(&source).expect("regex should compile");
    let values = extract_captured_values(&regex, r#"I type in "hello""#)
        .expect("step text should match");
    assert_eq!(values, vec!["hello".to_string()]);
}

#[test]
fn typed_placeholder_rejects_non_numeric_text() {
    let regex =
        compile_regex_from_pattern("I have {count:u32} apples").expect("pattern should compile");
    assert!(extract_captured_values(&regex, "I have many apples").is_none());
    assert_eq!(
        extract_captured_values(&regex, "I have 12 apples"),
        Some(vec!["12".to_string()])
    );
}

#[test]
fn placeholder_listing_matches_capture_count() {
    let pattern = r#"move "{}" from {from} to {to:u8}"#;
    let listed = placeholders(pattern).expect("pattern should parse");
    let regex = compile_regex_from_pattern(pattern).expect("pattern should compile");
    assert_eq!(listed.len(), regex.captures_len() - 1);
}

#[test]
fn exposes_placeholder_error_details() {
    let Err(err) = build_regex_from_pattern("{value:}") else {
        panic!("expected placeholder error");
    };
    let info = match err {
        PatternError::Placeholder(info) => info,
        PatternError::Regex(other) => panic!("expected placeholder error, got {other}"),
    };
    assert_eq!(info.placeholder.as_deref(), Some("value"));
    assert_eq!(info.position, 0);
}

#[test]
fn rejects_hint_with_whitespace() {
    let Err(err) = build_regex_from_pattern("{value:bad hint}") else {
        panic!("expected placeholder error");
    };
    assert!(err.to_string().contains("invalid placeholder"));
}
