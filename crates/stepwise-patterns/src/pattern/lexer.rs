//! Pattern lexer splitting a step pattern into literals and placeholders.

use crate::errors::PatternError;

use super::placeholder::{PlaceholderSpec, parse_placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Placeholder {
        start: usize,
        name: Option<String>,
        hint: Option<String>,
    },
    OpenBrace {
        index: usize,
    },
    CloseBrace {
        index: usize,
    },
}

fn opens_placeholder(next: u8) -> bool {
    next.is_ascii_alphabetic() || matches!(next, b'_' | b':' | b'}')
}

pub(crate) fn lex_pattern(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut literal: Vec<u8> = Vec::new();
    let mut pos = 0;

    // Literal runs are buffered as bytes so multi-byte characters survive.
    let flush = |literal: &mut Vec<u8>, tokens: &mut Vec<Token>| {
        if !literal.is_empty() {
            let text = String::from_utf8_lossy(literal).into_owned();
            literal.clear();
            tokens.push(Token::Literal(text));
        }
    };

    while let Some(&b) = bytes.get(pos) {
        let next = bytes.get(pos + 1).copied();
        match (b, next) {
            (b'\\', Some(escaped)) => {
                literal.push(escaped);
                pos += 2;
            }
            (b'{', Some(b'{')) | (b'}', Some(b'}')) => {
                literal.push(b);
                pos += 2;
            }
            (b'{', Some(n)) if opens_placeholder(n) => {
                flush(&mut literal, &mut tokens);
                let (next_pos, PlaceholderSpec { start, name, hint }) =
                    parse_placeholder(bytes, pos)?;
                tokens.push(Token::Placeholder { start, name, hint });
                pos = next_pos;
            }
            (b'{', _) => {
                flush(&mut literal, &mut tokens);
                tokens.push(Token::OpenBrace { index: pos });
                pos += 1;
            }
            (b'}', _) => {
                flush(&mut literal, &mut tokens);
                tokens.push(Token::CloseBrace { index: pos });
                pos += 1;
            }
            _ => {
                literal.push(b);
                pos += 1;
            }
        }
    }

    flush(&mut literal, &mut tokens);
    Ok(tokens)
}
