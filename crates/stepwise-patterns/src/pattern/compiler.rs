//! Convert lexed tokens into an anchored regular-expression source.

use crate::errors::{PatternError, placeholder_error};
use crate::hint::get_type_pattern;

use super::Placeholder;
use super::lexer::{Token, lex_pattern};

/// Regex source plus the placeholders it captures, in capture order.
pub(crate) struct Compiled {
    pub source: String,
    pub placeholders: Vec<Placeholder>,
}

pub(crate) fn compile_tokens(pat: &str) -> Result<Compiled, PatternError> {
    let tokens = lex_pattern(pat)?;
    let mut source = String::with_capacity(pat.len().saturating_mul(2) + 2);
    let mut placeholders = Vec::new();
    let mut stray_depth = 0usize;
    source.push('^');

    for token in tokens {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(&text)),
            Token::Placeholder { name, hint, .. } => {
                source.push('(');
                source.push_str(get_type_pattern(hint.as_deref()));
                source.push(')');
                placeholders.push(Placeholder { name, hint });
            }
            Token::OpenBrace { .. } => {
                stray_depth = stray_depth.saturating_add(1);
                source.push_str(r"\{");
            }
            Token::CloseBrace { index } => {
                if stray_depth == 0 {
                    return Err(placeholder_error(
                        "unmatched closing brace '}' in step pattern",
                        index,
                        None,
                    ));
                }
                stray_depth -= 1;
                source.push_str(r"\}");
            }
        }
    }

    if stray_depth != 0 {
        return Err(placeholder_error(
            "unbalanced braces in step pattern",
            pat.len(),
            None,
        ));
    }

    source.push('$');
    Ok(Compiled {
        source,
        placeholders,
    })
}

/// Build an anchored regular-expression source from a step pattern.
///
/// # Errors
/// Returns [`PatternError`] when a placeholder is malformed or braces are
/// unbalanced.
///
/// # Examples
/// ```
/// use stepwise_patterns::build_regex_from_pattern;
/// let source = build_regex_from_pattern("I have {count:u32} apples")
///     .expect("pattern is well formed");
/// assert_eq!(source, r"^I have (\d+) apples$");
/// ```
pub fn build_regex_from_pattern(pat: &str) -> Result<String, PatternError> {
    compile_tokens(pat).map(|compiled| compiled.source)
}
