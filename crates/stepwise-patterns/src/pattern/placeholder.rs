//! Parsing of a single `{name:hint}` placeholder.

use crate::errors::{PatternError, placeholder_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderSpec {
    pub name: Option<String>,
    pub hint: Option<String>,
    pub start: usize,
}

fn find_closing_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes.get(start..)?.iter().enumerate() {
        match b {
            b'{' => depth = depth.saturating_add(1),
            b'}' if depth == 0 => return Some(start + offset),
            b'}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn named(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_owned())
}

/// Parse the placeholder opening at `start`, returning the index just past
/// its closing brace.
///
/// `{}` and `{:hint}` are positional placeholders and carry no name.
pub(crate) fn parse_placeholder(
    bytes: &[u8],
    start: usize,
) -> Result<(usize, PlaceholderSpec), PatternError> {
    let invalid = |name: &str| {
        placeholder_error("invalid placeholder in step pattern", start, named(name))
    };
    let unclosed =
        |name: &str| placeholder_error("missing closing '}' for placeholder", start, named(name));

    let mut index = start + 1;
    let mut name = String::new();
    while let Some(&b) = bytes.get(index) {
        if b.is_ascii_alphanumeric() || b == b'_' {
            name.push(char::from(b));
            index += 1;
        } else {
            break;
        }
    }

    if bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
        let ws_end = bytes
            .get(index..)
            .and_then(|rest| rest.iter().position(|b| !b.is_ascii_whitespace()))
            .map_or(bytes.len(), |offset| index + offset);
        if matches!(bytes.get(ws_end), Some(b':' | b'}')) {
            return Err(invalid(&name));
        }
        index = ws_end;
    }

    let mut hint = None;
    if bytes.get(index) == Some(&b':') {
        index += 1;
        let hint_start = index;
        while bytes.get(index).is_some_and(|&b| b != b'}') {
            index += 1;
        }
        let raw = bytes
            .get(hint_start..index)
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .ok_or_else(|| invalid(&name))?;
        if raw.is_empty() || raw.contains(|c: char| c.is_ascii_whitespace() || c == '{') {
            return Err(invalid(&name));
        }
        hint = Some(raw.to_owned());
    } else {
        index = find_closing_brace(bytes, index).ok_or_else(|| unclosed(&name))?;
    }

    if bytes.get(index) != Some(&b'}') {
        return Err(unclosed(&name));
    }

    Ok((
        index + 1,
        PlaceholderSpec {
            name: named(&name),
            hint,
            start,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{parse_err, parse_ok};

    #[test]
    fn parses_named_placeholder() {
        let (next, spec) = parse_ok("{thing}");
        assert_eq!(next, 7);
        assert_eq!(spec.name.as_deref(), Some("thing"));
        assert_eq!(spec.hint, None);
    }

    #[test]
    fn parses_type_hint() {
        let (next, spec) = parse_ok("{count:u32}");
        assert_eq!(next, 11);
        assert_eq!(spec.name.as_deref(), Some("count"));
        assert_eq!(spec.hint.as_deref(), Some("u32"));
    }

    #[test]
    fn empty_braces_are_positional() {
        let (next, spec) = parse_ok("{}");
        assert_eq!(next, 2);
        assert_eq!(spec.name, None);
        assert_eq!(spec.hint, None);
    }

    #[test]
    fn positional_placeholder_may_carry_a_hint() {
        let (_, spec) = parse_ok("{:i64}");
        assert_eq!(spec.name, None);
        assert_eq!(spec.hint.as_deref(), Some("i64"));
    }

    #[test]
    fn nested_braces_stay_inside_placeholder() {
        let (next, spec) = parse_ok("{outer {inner}}");
        assert_eq!(next, 15);
        assert_eq!(spec.name.as_deref(), Some("outer"));
    }

    #[test]
    fn reports_missing_closing_brace() {
        let err = parse_err("{thing");
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn rejects_whitespace_before_hint() {
        let err = parse_err("{count :u32}");
        assert!(err.to_string().contains("invalid placeholder in step pattern"));
    }

    #[test]
    fn rejects_empty_hint() {
        let err = parse_err("{count:}");
        assert!(err.to_string().contains("`count`"));
    }
}
