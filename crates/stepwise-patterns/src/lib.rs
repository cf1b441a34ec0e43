//! Step-pattern parsing for `stepwise`.
//!
//! A step pattern such as `I put "{thing}" in a blender` is lexed into literal
//! text and placeholders, then compiled into an anchored regular expression
//! whose capture groups follow the placeholders in declaration order. The
//! runtime crate builds its registry on top of these helpers.

mod capture;
mod errors;
mod hint;
mod keyword;
mod pattern;
mod specificity;

pub use capture::extract_captured_values;
pub use errors::{PatternError, PlaceholderErrorInfo};
pub use hint::get_type_pattern;
pub use keyword::{StepKeyword, StepKeywordParseError};
pub use pattern::{
    Placeholder, build_regex_from_pattern, compile_regex_from_pattern, placeholders,
};
pub use specificity::SpecificityScore;
