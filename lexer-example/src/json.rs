//! JSON tokenizer built from lexer states.

use lexer_framework::{CharacterClass, LexContext, Lexer, State, StringCharacterClass, Token, TokenType};
use std::{io, thread};

/// JSON token vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Json {
    Unknown,
    Error,

    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    Colon,
    Comma,
    String,
    Number,
    Whitespace,

    True,
    False,
    Null,
}

impl TokenType for Json {
    fn name(&self) -> &'static str {
        match self {
            Json::Unknown => "Unknown",
            Json::Error => "Error",
            Json::BraceOpen => "BraceOpen",
            Json::BraceClose => "BraceClose",
            Json::BracketOpen => "BracketOpen",
            Json::BracketClose => "BracketClose",
            Json::Colon => "Colon",
            Json::Comma => "Comma",
            Json::String => "String",
            Json::Number => "Number",
            Json::Whitespace => "Whitespace",
            Json::True => "True",
            Json::False => "False",
            Json::Null => "Null",
        }
    }

    fn value(&self) -> u64 {
        *self as u64
    }
}

const HEX: StringCharacterClass = StringCharacterClass::new("ABCDEFabcdef1234567890");
const NUMBER_START: StringCharacterClass = StringCharacterClass::new("1234567890-");
const DIGITS: StringCharacterClass = StringCharacterClass::new("1234567890");
const MINUS: StringCharacterClass = StringCharacterClass::new("-");
const SIGN: StringCharacterClass = StringCharacterClass::new("+-");
const EXPONENT: StringCharacterClass = StringCharacterClass::new("Ee");
const FRACTION: StringCharacterClass = StringCharacterClass::new(".");
const AFTER_ESCAPE: StringCharacterClass = StringCharacterClass::new("\"\\/bfnrtu");
const QUOTE: StringCharacterClass = StringCharacterClass::new("\"");
const WHITESPACE: StringCharacterClass = StringCharacterClass::new("\u{20}\u{0D}\u{0A}\u{09}");

/// Creates a lexer over `input` starting in the JSON token state.
pub fn lexer(input: impl Into<Vec<u8>>) -> Lexer<Json> {
    Lexer::new(input, start())
}

/// The initial JSON lexer state.
pub fn start() -> State<Json> {
    State::new(lex_token)
}

/// Tokenizes `input` on a lexer thread and collects every token, whitespace
/// included. The last token is an `Error` token if the input is malformed.
pub fn tokenize(input: impl Into<Vec<u8>>) -> io::Result<Vec<Token<Json>>> {
    collect(lexer(input))
}

fn collect(lexer: Lexer<Json>) -> io::Result<Vec<Token<Json>>> {
    let stream = lexer.token_stream();
    let handle = thread::Builder::new()
        .name("lexer".into())
        .spawn(move || lexer.start_lexing())?;
    let tokens = stream.into_iter().collect();
    handle
        .join()
        .map_err(|_| io::Error::other("lexer thread panicked"))?;
    Ok(tokens)
}

fn lex_token(l: &mut dyn LexContext<Json>) -> Option<State<Json>> {
    let next = match l.peek() {
        Some('{') => punctuation(Json::BraceOpen),
        Some('}') => punctuation(Json::BraceClose),
        Some('[') => punctuation(Json::BracketOpen),
        Some(']') => punctuation(Json::BracketClose),
        Some(':') => punctuation(Json::Colon),
        Some(',') => punctuation(Json::Comma),
        Some('"') => State::new(lex_string),
        Some('t') => keyword("true", Json::True),
        Some('f') => keyword("false", Json::False),
        Some('n') => keyword("null", Json::Null),
        Some(c) if WHITESPACE.matches(c) => State::new(lex_whitespace),
        Some(c) if NUMBER_START.matches(c) => State::new(lex_number),
        _ => return unexpected_token(l),
    };
    Some(next)
}

fn punctuation(ty: Json) -> State<Json> {
    State::new(move |l: &mut dyn LexContext<Json>| {
        l.next();
        l.emit(ty);
        Some(State::new(lex_token))
    })
}

fn keyword(word: &'static str, ty: Json) -> State<Json> {
    State::new(move |l: &mut dyn LexContext<Json>| {
        for expected in word.chars() {
            if l.next() != Some(expected) {
                l.backup();
                return unexpected_token(l);
            }
        }
        l.emit(ty);
        Some(State::new(lex_token))
    })
}

fn lex_whitespace(l: &mut dyn LexContext<Json>) -> Option<State<Json>> {
    l.accept_multiple(&WHITESPACE);
    l.emit(Json::Whitespace);
    Some(State::new(lex_token))
}

fn lex_number(l: &mut dyn LexContext<Json>) -> Option<State<Json>> {
    l.accept(&MINUS);
    if l.accept_multiple(&DIGITS) == 0 {
        return token_mismatch(l, &DIGITS);
    }
    if l.accept(&FRACTION) && l.accept_multiple(&DIGITS) == 0 {
        return token_mismatch(l, &DIGITS);
    }
    if l.accept(&EXPONENT) {
        l.accept(&SIGN);
        if l.accept_multiple(&DIGITS) == 0 {
            return token_mismatch(l, &DIGITS);
        }
    }
    l.emit(Json::Number);
    Some(State::new(lex_token))
}

fn lex_string(l: &mut dyn LexContext<Json>) -> Option<State<Json>> {
    if !l.accept(&QUOTE) {
        return token_mismatch(l, &QUOTE);
    }

    let mut escaped = false;
    loop {
        let Some(c) = l.next() else {
            // unterminated
            return token_mismatch(l, &QUOTE);
        };

        if escaped && !AFTER_ESCAPE.matches(c) {
            l.backup();
            return token_mismatch(l, &AFTER_ESCAPE);
        }

        match c {
            '"' if !escaped => break,
            '\\' => escaped = !escaped,
            'u' if escaped => {
                for _ in 0..4 {
                    if !l.accept(&HEX) {
                        return token_mismatch(l, &HEX);
                    }
                }
                escaped = false;
            }
            _ => escaped = false,
        }
    }

    l.emit(Json::String);
    Some(State::new(lex_token))
}

fn token_mismatch(l: &mut dyn LexContext<Json>, expected: &dyn CharacterClass) -> Option<State<Json>> {
    let got = peek_text(l);
    errorf(
        l,
        format!(
            "Unexpected token, expected one of [{}], got '{got}'",
            expected.describe()
        ),
    )
}

fn unexpected_token(l: &mut dyn LexContext<Json>) -> Option<State<Json>> {
    let got = peek_text(l);
    errorf(l, format!("Unexpected token '{got}'"))
}

fn peek_text(l: &mut dyn LexContext<Json>) -> String {
    l.peek().map(String::from).unwrap_or_default()
}

fn errorf(l: &mut dyn LexContext<Json>, message: String) -> Option<State<Json>> {
    l.emit_error(Json::Error, message);
    None
}
