//! JSON grammar as parser rules.
//!
//! Rules never recurse into nested values. Opening a container pushes it on
//! the [`JsonTree`], and `after_value` consults the innermost open container
//! to pick the next rule.

use crate::tree::{Container, JsonNode, JsonTree};
use lexer_example::json::{self, Json};
use parser_framework::{ParseContext, Rule, Token, TokenType};
use pipeline_core::{Pipeline, PipelineError};
use thiserror::Error;

type Next = Option<Rule<Json, JsonTree>>;

const VALUE_START: [Json; 7] = [
    Json::BraceOpen,
    Json::BracketOpen,
    Json::String,
    Json::Number,
    Json::True,
    Json::False,
    Json::Null,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("unexpected end of input, {0} unclosed container(s)")]
    Unclosed(usize),

    #[error("empty document")]
    Empty,
}

/// Parses a complete JSON document.
pub fn parse_document(input: impl Into<Vec<u8>>) -> Result<JsonNode, DocumentError> {
    let tree = Pipeline::new(json::lexer(input), start(), [Json::Error])
        .skip([Json::Whitespace])
        .run()?;
    if tree.depth() > 0 {
        return Err(DocumentError::Unclosed(tree.depth()));
    }
    tree.into_root().ok_or(DocumentError::Empty)
}

/// The rule a JSON document starts with.
pub fn start() -> Rule<Json, JsonTree> {
    Rule::new(value)
}

fn value(p: &mut dyn ParseContext<Json, JsonTree>) -> Next {
    let token = p.accept(&VALUE_START)?;
    match token.ty {
        Json::BraceOpen => {
            p.tree().open(Container::Object);
            Some(Rule::new(object_start))
        }
        Json::BracketOpen => {
            p.tree().open(Container::Array);
            Some(Rule::new(array_start))
        }
        _ => {
            let node = scalar(p, token)?;
            p.tree().value(node);
            Some(Rule::new(after_value))
        }
    }
}

fn object_start(p: &mut dyn ParseContext<Json, JsonTree>) -> Next {
    if p.peek().is_some_and(|t| t.ty == Json::BraceClose) {
        p.next();
        p.tree().close();
        return Some(Rule::new(after_value));
    }
    Some(Rule::new(member))
}

fn member(p: &mut dyn ParseContext<Json, JsonTree>) -> Next {
    let key = p.accept(&[Json::String])?;
    let key = string(p, &key)?;
    p.tree().key(key);
    p.accept(&[Json::Colon])?;
    Some(Rule::new(value))
}

fn array_start(p: &mut dyn ParseContext<Json, JsonTree>) -> Next {
    if p.peek().is_some_and(|t| t.ty == Json::BracketClose) {
        p.next();
        p.tree().close();
        return Some(Rule::new(after_value));
    }
    Some(Rule::new(value))
}

fn after_value(p: &mut dyn ParseContext<Json, JsonTree>) -> Next {
    match p.tree().innermost() {
        Some(Container::Object) => {
            let token = p.accept(&[Json::Comma, Json::BraceClose])?;
            if token.ty == Json::Comma {
                return Some(Rule::new(member));
            }
        }
        Some(Container::Array) => {
            let token = p.accept(&[Json::Comma, Json::BracketClose])?;
            if token.ty == Json::Comma {
                return Some(Rule::new(value));
            }
        }
        None => {
            if let Some(token) = p.next() {
                p.error(format!(
                    "unexpected '{}' after the document at pos {}",
                    token.ty.name(),
                    token.offset
                ));
            }
            return None;
        }
    }
    p.tree().close();
    Some(Rule::new(after_value))
}

fn scalar(p: &mut dyn ParseContext<Json, JsonTree>, token: Token<Json>) -> Option<JsonNode> {
    match token.ty {
        Json::True => Some(JsonNode::Bool(true)),
        Json::False => Some(JsonNode::Bool(false)),
        Json::Null => Some(JsonNode::Null),
        Json::String => string(p, &token).map(JsonNode::String),
        _ => match token.text.parse() {
            Ok(number) => Some(JsonNode::Number(number)),
            Err(_) => {
                p.error(format!(
                    "invalid number '{}' at pos {}",
                    token.text, token.offset
                ));
                None
            }
        },
    }
}

fn string(p: &mut dyn ParseContext<Json, JsonTree>, token: &Token<Json>) -> Option<String> {
    let decoded = unescape(&token.text);
    if decoded.is_none() {
        p.error(format!("invalid string literal at pos {}", token.offset));
    }
    decoded
}

/// Decodes a quoted JSON string literal. Unpaired surrogates become U+FFFD.
fn unescape(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(at) = rest.find('\\') {
        out.push_str(&rest[..at]);
        let escape = &rest[at + 1..];
        let consumed = match escape.chars().next()? {
            'u' => {
                let high = hex4(&escape[1..])?;
                let low = escape
                    .get(5..)
                    .and_then(|s| s.strip_prefix("\\u"))
                    .and_then(hex4)
                    .filter(|low| (0xDC00..0xE000).contains(low));
                match low {
                    Some(low) if (0xD800..0xDC00).contains(&high) => {
                        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        11
                    }
                    _ => {
                        out.push(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
                        5
                    }
                }
            }
            c => {
                out.push(simple_escape(c)?);
                1
            }
        };
        rest = &escape[consumed..];
    }
    out.push_str(rest);
    Some(out)
}

fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        _ => return None,
    })
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#""plain""#).as_deref(), Some("plain"));
        assert_eq!(unescape(r#""a\"b\\c\/""#).as_deref(), Some("a\"b\\c/"));
        assert_eq!(unescape(r#""\n\t\r\b\f""#).as_deref(), Some("\n\t\r\u{8}\u{c}"));
        assert_eq!(unescape(r#""\u00fd""#).as_deref(), Some("\u{fd}"));
        assert_eq!(unescape(r#""\ud83e\udd80!""#).as_deref(), Some("\u{1F980}!"));
        assert_eq!(unescape(r#""\ud83e""#).as_deref(), Some("\u{FFFD}"));
        assert_eq!(unescape(r#""\u0000""#).as_deref(), Some("\u{0}"));
        assert_eq!(unescape(r#""\x""#), None);
        assert_eq!(unescape("unquoted"), None);
    }
}
