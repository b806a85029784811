use lexer_example::json::{tokenize, Json};
use lexer_framework::Token;
use pretty_assertions::assert_eq;

fn lex(input: &str) -> Vec<Token<Json>> {
    tokenize(input).expect("lexer thread")
}

fn significant(input: &str) -> Vec<(Json, String)> {
    lex(input)
        .into_iter()
        .filter(|t| t.ty != Json::Whitespace)
        .map(|t| (t.ty, t.text))
        .collect()
}

#[test]
fn test_object() {
    let tokens = lex(r#"{"a": 1}"#);
    assert_eq!(
        tokens,
        vec![
            Token::new(Json::BraceOpen, "{", 0),
            Token::new(Json::String, "\"a\"", 1),
            Token::new(Json::Colon, ":", 4),
            Token::new(Json::Whitespace, " ", 5),
            Token::new(Json::Number, "1", 6),
            Token::new(Json::BraceClose, "}", 7),
        ]
    );
}

#[test]
fn test_single_space() {
    assert_eq!(lex(" "), vec![Token::new(Json::Whitespace, " ", 0)]);
}

#[test]
fn test_keywords_and_arrays() {
    let tokens = significant("[true, false, null]");
    let kinds: Vec<_> = tokens.iter().map(|(ty, _)| *ty).collect();
    assert_eq!(
        kinds,
        vec![
            Json::BracketOpen,
            Json::True,
            Json::Comma,
            Json::False,
            Json::Comma,
            Json::Null,
            Json::BracketClose,
        ]
    );
}

#[test]
fn test_numbers() {
    for number in ["0", "-12", "3.25", "0e-5", "6E+10", "-1.5e3"] {
        assert_eq!(
            significant(number),
            vec![(Json::Number, number.to_string())],
            "{number}"
        );
    }
}

#[test]
fn test_number_missing_digits() {
    assert_eq!(
        significant("-x"),
        vec![(
            Json::Error,
            "Unexpected token, expected one of [1234567890], got 'x'".to_string()
        )]
    );
    assert_eq!(
        significant("1."),
        vec![(
            Json::Error,
            "Unexpected token, expected one of [1234567890], got ''".to_string()
        )]
    );
}

#[test]
fn test_string_escapes() {
    let input = r#"["ý", "\\u00fd", "a\"b", "\n\/"]"#;
    let strings: Vec<_> = significant(input)
        .into_iter()
        .filter(|(ty, _)| *ty == Json::String)
        .map(|(_, text)| text)
        .collect();
    assert_eq!(
        strings,
        vec![r#""ý""#, r#""\\u00fd""#, r#""a\"b""#, r#""\n\/""#]
    );
}

#[test]
fn test_bad_escape() {
    assert_eq!(
        significant(r#""\x""#),
        vec![(
            Json::Error,
            "Unexpected token, expected one of [\"\\/bfnrtu], got 'x'".to_string()
        )]
    );
}

#[test]
fn test_short_unicode_escape() {
    let tokens = lex(r#""\u00g""#);
    assert_eq!(
        tokens,
        vec![Token::new(
            Json::Error,
            "Unexpected token, expected one of [ABCDEFabcdef1234567890], got 'g'",
            5
        )]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        significant("\"abc"),
        vec![(
            Json::Error,
            "Unexpected token, expected one of [\"], got ''".to_string()
        )]
    );
}

#[test]
fn test_unexpected_character() {
    assert_eq!(
        lex("@"),
        vec![Token::new(Json::Error, "Unexpected token '@'", 0)]
    );
}

#[test]
fn test_misspelled_keyword() {
    let tokens = lex("[tru]");
    assert_eq!(
        tokens,
        vec![
            Token::new(Json::BracketOpen, "[", 0),
            Token::new(Json::Error, "Unexpected token ']'", 4),
        ]
    );
}

#[test]
fn test_error_stops_lexing() {
    let tokens = significant("[1, @, 2]");
    assert_eq!(
        tokens.last(),
        Some(&(Json::Error, "Unexpected token '@'".to_string()))
    );
    assert_eq!(tokens.len(), 4);
}
