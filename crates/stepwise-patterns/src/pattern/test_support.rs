//! Helpers for asserting placeholder parser outcomes.
use super::placeholder::{PlaceholderSpec, parse_placeholder};
use crate::errors::PatternError;

pub(crate) fn parse_ok(pattern: &str) -> (usize, PlaceholderSpec) {
    match parse_placeholder(pattern.as_bytes(), 0) {
        Ok(result) => result,
        Err(err) => panic!("placeholder {pattern:?} should parse: {err}"),
    }
}

pub(crate) fn parse_err(pattern: &str) -> PatternError {
    match parse_placeholder(pattern.as_bytes(), 0) {
        Ok(_) => panic!("placeholder {pattern:?} should fail to parse"),
        Err(err) => err,
    }
}
