//! Error emission and boundary scenario tests.

use lexer_framework::{LexContext, Lexer, State, StringCharacterClass, Token, TokenType};
use pretty_assertions::assert_eq;
use std::thread;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Error,
    Number,
}

impl TokenType for Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Error => "Error",
            Kind::Number => "Number",
        }
    }

    fn value(&self) -> u64 {
        *self as u64
    }
}

const DIGITS: StringCharacterClass = StringCharacterClass::new("0123456789");

fn lex(input: impl Into<Vec<u8>>, start: State<Kind>) -> Vec<Token<Kind>> {
    let lexer = Lexer::new(input, start);
    let stream = lexer.token_stream();
    let handle = thread::spawn(move || lexer.start_lexing());
    let tokens = stream.tokens().collect();
    handle.join().expect("lexer thread panicked");
    tokens
}

fn errorf(l: &mut dyn LexContext<Kind>, message: String) -> Option<State<Kind>> {
    l.emit_error(Kind::Error, message);
    None
}

fn lex_numbers(l: &mut dyn LexContext<Kind>) -> Option<State<Kind>> {
    if l.accept_multiple(&DIGITS) > 0 {
        l.emit(Kind::Number);
        return Some(State::new(lex_numbers));
    }
    let unexpected = l.peek().map(String::from).unwrap_or_default();
    errorf(l, format!("Unexpected token '{unexpected}'"))
}

#[test]
fn test_unexpected_character_scenario() {
    let tokens = lex("@", State::new(lex_numbers));
    assert_eq!(
        tokens,
        vec![Token::new(Kind::Error, "Unexpected token '@'", 0)]
    );
}

#[test]
fn test_error_token_is_last() {
    let tokens = lex("12@34", State::new(lex_numbers));
    assert_eq!(
        tokens,
        vec![
            Token::new(Kind::Number, "12", 0),
            Token::new(Kind::Error, "Unexpected token '@'", 2),
        ]
    );
}

#[test]
fn test_error_offset_is_detection_point() {
    let start = State::new(|l: &mut dyn LexContext<Kind>| {
        l.accept_multiple(&DIGITS);
        l.emit_error(Kind::Error, "number too long".to_string());
        None
    });
    let tokens = lex("12345", start);
    assert_eq!(tokens, vec![Token::new(Kind::Error, "number too long", 5)]);
}

#[test]
fn test_error_discards_pending_lexeme() {
    let start = State::new(|l: &mut dyn LexContext<Kind>| {
        l.accept_multiple(&DIGITS);
        l.emit_error(Kind::Error, "warning".to_string());
        l.next();
        l.emit(Kind::Number);
        None
    });
    let tokens = lex("12x", start);
    assert_eq!(
        tokens,
        vec![
            Token::new(Kind::Error, "warning", 2),
            Token::new(Kind::Number, "x", 2),
        ]
    );
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let start = State::new(|l: &mut dyn LexContext<Kind>| {
        assert_eq!(l.next(), Some(char::REPLACEMENT_CHARACTER));
        l.emit(Kind::Number);
        None
    });
    let tokens = lex(vec![0xFF, b'1'], start);
    assert_eq!(tokens, vec![Token::new(Kind::Number, "\u{FFFD}", 0)]);
}

#[test]
fn test_peek_at_eof() {
    let start = State::new(|l: &mut dyn LexContext<Kind>| {
        l.accept_multiple(&DIGITS);
        assert!(l.is_eof());
        assert_eq!(l.peek(), None);
        assert!(!l.accept(&DIGITS));
        l.emit(Kind::Number);
        None
    });
    assert_eq!(lex("42", start), vec![Token::new(Kind::Number, "42", 0)]);
}
