//! Placeholder type hints.

/// Regex fragment matched by a placeholder carrying `type_hint`.
///
/// Integer and float hints narrow the match so that `{count:u32}` cannot
/// swallow neighbouring words; anything else (including no hint) matches
/// lazily.
///
/// # Examples
/// ```
/// use stepwise_patterns::get_type_pattern;
/// assert_eq!(get_type_pattern(Some("u32")), r"\d+");
/// assert_eq!(get_type_pattern(Some("String")), ".+?");
/// assert_eq!(get_type_pattern(None), ".+?");
/// ```
#[must_use]
pub fn get_type_pattern(type_hint: Option<&str>) -> &'static str {
    match type_hint {
        Some("u8" | "u16" | "u32" | "u64" | "u128" | "usize") => r"\d+",
        Some("i8" | "i16" | "i32" | "i64" | "i128" | "isize") => r"[+-]?\d+",
        Some("f32" | "f64") => {
            r"(?i:(?:[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?|nan|inf|infinity))"
        }
        Some("bool") => r"(?:true|false)",
        _ => r".+?",
    }
}
