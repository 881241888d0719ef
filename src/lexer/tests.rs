//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals, escapes and long brackets
//! - Operators and punctuation
//! - Comments
//! - Error cases

use crate::{errors::errors::ErrorImpl, Position};

use super::{
    lexer::{decode_string, tokenize, tokenize_with},
    tokens::{describe_kinds, TokenKind},
};

fn decode(lexeme: &str) -> Vec<u8> {
    decode_string(lexeme, Position::new(1, 1)).unwrap()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, 1).unwrap().iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("and break do else elseif end false for function goto if in local nil not or repeat return then true until while continue");

    assert_eq!(
        tokens,
        vec![
            TokenKind::And,
            TokenKind::Break,
            TokenKind::Do,
            TokenKind::Else,
            TokenKind::Elseif,
            TokenKind::End,
            TokenKind::False,
            TokenKind::For,
            TokenKind::Function,
            TokenKind::Goto,
            TokenKind::If,
            TokenKind::In,
            TokenKind::Local,
            TokenKind::Nil,
            TokenKind::Not,
            TokenKind::Or,
            TokenKind::Repeat,
            TokenKind::Return,
            TokenKind::Then,
            TokenKind::True,
            TokenKind::Until,
            TokenKind::While,
            TokenKind::Continue,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_continue_disabled() {
    let tokens = tokenize_with("continue", 1, false).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "continue");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _underscore endx", 1).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "endx");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 .5 1e10 2E-3 0xff 0x1p4 0xA.8 5.", 1).unwrap();

    let pairs: Vec<(TokenKind, &str)> = tokens
        .iter()
        .take(9)
        .map(|token| (token.kind, token.value.as_str()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::Int, "42"),
            (TokenKind::Float, "3.14"),
            (TokenKind::Float, ".5"),
            (TokenKind::Float, "1e10"),
            (TokenKind::Float, "2E-3"),
            (TokenKind::Int, "0xff"),
            (TokenKind::Float, "0x1p4"),
            (TokenKind::Float, "0xA.8"),
            (TokenKind::Float, "5."),
        ]
    );
}

#[test]
fn test_tokenize_number_before_concat() {
    assert_eq!(
        kinds("1 ..2"),
        vec![TokenKind::Int, TokenKind::DotDot, TokenKind::Int, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" 'it''s' "a\tb\\c\"d""#, 1).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "\"hello\"");
    assert_eq!(tokens[1].value, "'it'");
    assert_eq!(tokens[2].value, "'s'");
    assert_eq!(tokens[3].value, r#""a\tb\\c\"d""#);
    assert_eq!(decode(&tokens[3].value), b"a\tb\\c\"d");
}

#[test]
fn test_decode_numeric_escapes() {
    assert_eq!(decode(r#""\65\066\x43\u{44}\u{e9}\0""#), b"ABCD\xc3\xa9\0");
}

#[test]
fn test_decode_escapes_above_ascii_as_bytes() {
    let tokens = tokenize(r#"s = "\xff\200""#, 1).unwrap();

    assert_eq!(tokens[2].value, r#""\xff\200""#);
    assert_eq!(decode(&tokens[2].value), vec![255, 128]);
    assert_eq!(decode(r#""\xe9""#), vec![0xe9]);
    assert_eq!(decode(r#""\u{e9}""#), vec![0xc3, 0xa9]);
    assert_eq!(decode("'\u{e9}'"), vec![0xc3, 0xa9]);
}

#[test]
fn test_tokenize_escaped_newline_and_z() {
    let tokens = tokenize("'a\\\nb' 'c\\z   \n  d'", 1).unwrap();

    assert_eq!(tokens[0].value, "'a\\\nb'");
    assert_eq!(decode(&tokens[0].value), b"a\nb");
    assert_eq!(decode(&tokens[1].value), b"cd");
    assert_eq!(tokens[1].position, Position::new(2, 4));
}

#[test]
fn test_tokenize_long_strings() {
    let tokens = tokenize("[[\nfirst\nsecond]] [==[a]]b]=]c]==]", 1).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "[[\nfirst\nsecond]]");
    assert_eq!(decode(&tokens[0].value), b"first\nsecond");
    assert_eq!(tokens[1].value, "[==[a]]b]=]c]==]");
    assert_eq!(decode(&tokens[1].value), b"a]]b]=]c");
    assert_eq!(tokens[1].position, Position::new(3, 10));
}

#[test]
fn test_decode_rejects_malformed_lexemes() {
    let start = Position::new(1, 1);

    assert!(decode_string("[==[open]=]", start).is_err());
    assert!(decode_string("[=]", start).is_err());
    assert_eq!(
        *decode_string("\"ab\" tail", start).unwrap_err().get_kind(),
        ErrorImpl::UnterminatedString
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("x -- trailing\r\n--[[ long\ncomment ]] y --[=[ ]] ]=]", 1).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[1].value, " trailing");
    assert_eq!(tokens[2].kind, TokenKind::Comment);
    assert_eq!(tokens[2].value, " long\ncomment ");
    assert_eq!(tokens[3].value, "y");
    assert_eq!(tokens[3].position, Position::new(3, 12));
    assert_eq!(tokens[4].value, " ]] ");
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("+ - * / // % ^ # & ~ | << >> == ~= <= >= < > = ( ) { } [ ] :: ; : , . .. ...");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::DoubleSlash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Hash,
            TokenKind::Ampersand,
            TokenKind::Tilde,
            TokenKind::Pipe,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assignment,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::DoubleColon,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::DotDot,
            TokenKind::Ellipsis,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("local x\n  = 'é' .. y", 7).unwrap();

    assert_eq!(tokens[0].position, Position::new(7, 1));
    assert_eq!(tokens[1].position, Position::new(7, 7));
    assert_eq!(tokens[2].position, Position::new(8, 3));
    assert_eq!(tokens[4].position, Position::new(8, 9));
    assert_eq!(tokens[6].kind, TokenKind::EOF);
    assert_eq!(tokens[6].position, Position::new(8, 13));
}

#[test]
fn test_tokenize_skips_shebang() {
    let tokens = tokenize("#!/usr/bin/lua\nprint(1)", 1).unwrap();

    assert_eq!(tokens[0].value, "print");
    assert_eq!(tokens[0].position, Position::new(2, 1));
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize("", 1).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unrecognised_character() {
    let error = tokenize("x = 1 @ 2", 1).unwrap_err();

    assert_eq!(
        *error.get_kind(),
        ErrorImpl::UnrecognisedToken {
            token: String::from("@")
        }
    );
    assert_eq!(*error.get_position(), Position::new(1, 7));
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("x = 'abc\ny = 2", 1).unwrap_err();
    assert_eq!(*error.get_kind(), ErrorImpl::UnterminatedString);
    assert_eq!(*error.get_position(), Position::new(1, 5));

    assert!(tokenize("'abc", 1).is_err());
}

#[test]
fn test_tokenize_unterminated_long_bracket() {
    let error = tokenize("--[==[ never closed ]=]", 1).unwrap_err();

    assert_eq!(*error.get_kind(), ErrorImpl::UnterminatedLongBracket { level: 2 });
}

#[test]
fn test_tokenize_invalid_escape() {
    let error = tokenize(r#""\q""#, 1).unwrap_err();
    assert_eq!(
        *error.get_kind(),
        ErrorImpl::InvalidEscape {
            sequence: String::from("\\q")
        }
    );

    assert!(tokenize(r#""\300""#, 1).is_err());
    assert!(tokenize(r#""\xZZ""#, 1).is_err());
}

#[test]
fn test_describe_kinds() {
    assert_eq!(describe_kinds(&[TokenKind::End]), "`end`");
    assert_eq!(
        describe_kinds(&[TokenKind::Else, TokenKind::Elseif, TokenKind::End]),
        "`else`, `elseif` or `end`"
    );
}
