use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("\\A[ \\t\\r\\n\\x0B\\x0C]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("\\A--\\[=*\\[").unwrap(), handler: long_comment_handler },
        RegexPattern { regex: Regex::new("\\A--[^\\n]*").unwrap(), handler: comment_handler },
        RegexPattern { regex: Regex::new("\\A\\[=*\\[").unwrap(), handler: long_string_handler },
        RegexPattern { regex: Regex::new("\\A[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("\\A0[xX](?:[0-9a-fA-F]+(?:\\.[0-9a-fA-F]*)?|\\.[0-9a-fA-F]+)(?:[pP][+-]?[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("\\A(?:[0-9]+(?:\\.[0-9]*)?|\\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("\\A[\"']").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("\\A\\.\\.\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...") },
        RegexPattern { regex: Regex::new("\\A\\.\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..") },
        RegexPattern { regex: Regex::new("\\A\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("\\A::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DoubleColon, "::") },
        RegexPattern { regex: Regex::new("\\A:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("\\A//").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DoubleSlash, "//") },
        RegexPattern { regex: Regex::new("\\A/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("\\A<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<") },
        RegexPattern { regex: Regex::new("\\A<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("\\A<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("\\A>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>") },
        RegexPattern { regex: Regex::new("\\A>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("\\A>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("\\A==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("\\A=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("\\A~=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "~=") },
        RegexPattern { regex: Regex::new("\\A~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
        RegexPattern { regex: Regex::new("\\A\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("\\A\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("\\A\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("\\A\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("\\A\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("\\A\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("\\A;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("\\A,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("\\A\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("\\A-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("\\A\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("\\A%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new("\\A\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new("\\A#").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "#") },
        RegexPattern { regex: Regex::new("\\A&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
        RegexPattern { regex: Regex::new("\\A\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    line_start: usize,
    continue_keyword: bool,
}

impl Lexer {
    pub fn new(source: &str, start_line: u32, continue_keyword: bool) -> Lexer {
        Lexer {
            tokens: vec![],
            source: source.to_string(),
            pos: 0,
            line: start_line,
            line_start: 0,
            continue_keyword,
        }
    }

    /// Moves the cursor `n` bytes forward, keeping the line count current.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for (offset, byte) in self.source.as_bytes()[self.pos..end].iter().enumerate() {
            if *byte == b'\n' {
                self.line += 1;
                self.line_start = self.pos + offset + 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        let column = self.source[self.line_start..self.pos].chars().count() + 1;
        Position::new(self.line, column as u32)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> Result<String, Error> {
        match regex.find(self.remainder()) {
            Some(found) => Ok(found.as_str().to_string()),
            None => Err(self.unrecognised()),
        }
    }

    fn unrecognised(&self) -> Error {
        let token = self.remainder().chars().next().map(String::from).unwrap_or_default();
        Error::new(ErrorImpl::UnrecognisedToken { token }, self.position())
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex)?;
    lexer.advance_n(matched.len());
    Ok(())
}

fn comment_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let position = lexer.position();
    let matched = lexer.matched(regex)?;
    let text = matched[2..].strip_suffix('\r').unwrap_or(&matched[2..]).to_string();

    lexer.push(MK_TOKEN!(TokenKind::Comment, text, position));
    lexer.advance_n(matched.len());
    Ok(())
}

fn long_comment_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let position = lexer.position();
    let opener = lexer.matched(regex)?;
    let (body, consumed) = read_long_bracket(lexer, opener.len(), opener.len() - 4)?;

    lexer.push(MK_TOKEN!(TokenKind::Comment, body, position));
    lexer.advance_n(consumed);
    Ok(())
}

fn long_string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let position = lexer.position();
    let opener = lexer.matched(regex)?;
    let (_, consumed) = read_long_bracket(lexer, opener.len(), opener.len() - 2)?;
    let lexeme = lexer.remainder()[..consumed].to_string();

    lexer.push(MK_TOKEN!(TokenKind::String, lexeme, position));
    lexer.advance_n(consumed);
    Ok(())
}

/// Finds the body of a long bracket whose opener is `opener_len` bytes long.
/// Returns the body and the length of the whole bracket, closer included.
fn read_long_bracket(lexer: &Lexer, opener_len: usize, level: usize) -> Result<(String, usize), Error> {
    let closer = format!("]{}]", "=".repeat(level));
    let rest = &lexer.remainder()[opener_len..];

    let Some(end) = rest.find(&closer) else {
        return Err(Error::new(ErrorImpl::UnterminatedLongBracket { level }, lexer.position()));
    };

    Ok((strip_first_newline(&rest[..end]).to_string(), opener_len + end + closer.len()))
}

fn strip_first_newline(raw: &str) -> &str {
    raw.strip_prefix("\r\n")
        .or_else(|| raw.strip_prefix('\n'))
        .or_else(|| raw.strip_prefix('\r'))
        .unwrap_or(raw)
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let position = lexer.position();
    let matched = lexer.matched(regex)?;

    let is_hex = matched.starts_with("0x") || matched.starts_with("0X");
    let is_float = matched.contains('.')
        || if is_hex {
            matched.contains(['p', 'P'])
        } else {
            matched.contains(['e', 'E'])
        };

    let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(kind, matched, position));
    Ok(())
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let position = lexer.position();
    // Decoding validates the escapes; the token keeps the literal as written.
    let (_, consumed) = read_quoted_string(lexer.remainder(), position)?;
    let lexeme = lexer.remainder()[..consumed].to_string();

    lexer.push(MK_TOKEN!(TokenKind::String, lexeme, position));
    lexer.advance_n(consumed);
    Ok(())
}

/// Decodes the string literal `lexeme`, quoted or long-bracketed, into the
/// bytes it denotes. `\xNN` and `\ddd` escapes yield single raw bytes and
/// `\u{...}` yields UTF-8, so the result need not be valid UTF-8.
///
/// ```
/// use luaparse::{lexer::lexer::decode_string, Position};
///
/// let bytes = decode_string(r#""\xff\65""#, Position::new(1, 1)).unwrap();
/// assert_eq!(bytes, vec![0xff, b'A']);
/// ```
pub fn decode_string(lexeme: &str, position: Position) -> Result<Vec<u8>, Error> {
    if let Some(rest) = lexeme.strip_prefix('[') {
        let level = rest.len() - rest.trim_start_matches('=').len();
        let opener_len = level + 2;
        let closer = format!("]{}]", "=".repeat(level));

        let body = lexeme
            .get(opener_len..)
            .filter(|_| lexeme[1 + level..].starts_with('['))
            .and_then(|body| body.strip_suffix(closer.as_str()));

        return match body {
            Some(body) => Ok(strip_first_newline(body).as_bytes().to_vec()),
            None => Err(Error::new(ErrorImpl::UnterminatedLongBracket { level }, position)),
        };
    }

    let (bytes, consumed) = read_quoted_string(lexeme, position)?;
    if consumed != lexeme.len() {
        return Err(Error::new(ErrorImpl::UnterminatedString, position));
    }
    Ok(bytes)
}

/// Decodes a quoted string at the start of `text`, returning the decoded
/// bytes and the number of bytes the literal occupies.
fn read_quoted_string(text: &str, position: Position) -> Result<(Vec<u8>, usize), Error> {
    let invalid = |sequence: String| Error::new(ErrorImpl::InvalidEscape { sequence }, position);

    let mut chars = text.char_indices().peekable();
    let Some((_, quote)) = chars.next() else {
        return Err(Error::new(ErrorImpl::UnterminatedString, position));
    };

    let mut result: Vec<u8> = vec![];
    while let Some((index, ch)) = chars.next() {
        match ch {
            c if c == quote => return Ok((result, index + c.len_utf8())),
            '\n' | '\r' => break,
            '\\' => {
                let Some((_, escape)) = chars.next() else {
                    break;
                };

                match escape {
                    'a' => result.push(0x07),
                    'b' => result.push(0x08),
                    'f' => result.push(0x0C),
                    'n' => result.push(b'\n'),
                    'r' => result.push(b'\r'),
                    't' => result.push(b'\t'),
                    'v' => result.push(0x0B),
                    '\\' | '"' | '\'' => push_char(&mut result, escape),
                    '\n' => {
                        result.push(b'\n');
                        chars.next_if(|(_, c)| *c == '\r');
                    }
                    '\r' => {
                        result.push(b'\n');
                        chars.next_if(|(_, c)| *c == '\n');
                    }
                    'x' => {
                        let mut hex = String::new();
                        while hex.len() < 2 {
                            match chars.next_if(|(_, c)| c.is_ascii_hexdigit()) {
                                Some((_, c)) => hex.push(c),
                                None => return Err(invalid(format!("\\x{}", hex))),
                            }
                        }
                        let byte = u8::from_str_radix(&hex, 16).map_err(|_| invalid(format!("\\x{}", hex)))?;
                        result.push(byte);
                    }
                    'z' => while chars.next_if(|(_, c)| c.is_ascii_whitespace()).is_some() {},
                    'u' => {
                        if chars.next_if(|(_, c)| *c == '{').is_none() {
                            return Err(invalid(String::from("\\u")));
                        }
                        let mut hex = String::new();
                        while let Some((_, c)) = chars.next_if(|(_, c)| c.is_ascii_hexdigit()) {
                            hex.push(c);
                        }
                        let sequence = format!("\\u{{{}}}", hex);
                        if chars.next_if(|(_, c)| *c == '}').is_none() {
                            return Err(invalid(sequence));
                        }
                        let decoded = u32::from_str_radix(&hex, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or_else(|| invalid(sequence.clone()))?;
                        push_char(&mut result, decoded);
                    }
                    d if d.is_ascii_digit() => {
                        let mut digits = String::from(d);
                        while digits.len() < 3 {
                            match chars.next_if(|(_, c)| c.is_ascii_digit()) {
                                Some((_, c)) => digits.push(c),
                                None => break,
                            }
                        }
                        let byte = digits.parse::<u8>().map_err(|_| invalid(format!("\\{}", digits)))?;
                        result.push(byte);
                    }
                    other => return Err(invalid(format!("\\{}", other))),
                }
            }
            c => push_char(&mut result, c),
        }
    }

    Err(Error::new(ErrorImpl::UnterminatedString, position))
}

fn push_char(bytes: &mut Vec<u8>, c: char) {
    let mut buffer = [0; 4];
    bytes.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let position = lexer.position();
    let value = lexer.matched(regex)?;

    let kind = match RESERVED_LOOKUP.get(value.as_str()) {
        Some(TokenKind::Continue) if !lexer.continue_keyword => TokenKind::Identifier,
        Some(kind) => *kind,
        None => TokenKind::Identifier,
    };

    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, position));
    Ok(())
}

/// Tokenizes `source` with the `continue` extension enabled.
pub fn tokenize(source: &str, start_line: u32) -> Result<Vec<Token>, Error> {
    tokenize_with(source, start_line, true)
}

pub fn tokenize_with(source: &str, start_line: u32, continue_keyword: bool) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, start_line, continue_keyword);

    // A leading `#` line is an interpreter directive.
    if lex.remainder().starts_with('#') {
        let skip = lex.remainder().find('\n').unwrap_or(lex.remainder().len());
        lex.advance_n(skip);
    }

    while !lex.at_eof() {
        let pattern = PATTERNS.iter().find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => return Err(lex.unrecognised()),
        }
    }

    let position = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), position));
    debug!(tokens = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}
