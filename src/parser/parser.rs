//! The token stream the parser reads from, and the parser entry points.
//!
//! `Parser` keeps one token of lookahead (plus a second one for table
//! keys) and remembers the last token it consumed, so productions can take
//! their position from the keyword that opened them.

use tracing::{debug, trace};

use crate::{
    ast::ast::Block,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize_with,
        tokens::{describe_kinds, Token, TokenKind},
    },
    Position, MK_TOKEN,
};

use super::stmt::parse_stmt;

/// Settings for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Line number given to the first line of the source.
    pub start_line: u32,
    /// Recorded as the `source` of every function literal.
    pub chunk_name: String,
    /// Whether `continue` is a keyword. When off it is an ordinary name.
    pub continue_keyword: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            start_line: 1,
            chunk_name: String::new(),
            continue_keyword: true,
        }
    }
}

/// How deeply blocks and expressions may nest before the parse is refused.
pub const MAX_DEPTH: usize = 200;

pub struct Parser {
    /// Always ends in an EOF token.
    tokens: Vec<Token>,
    pos: usize,
    /// The last consumed token.
    current: Token,
    chunk: String,
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, chunk: &str) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.position)
                .unwrap_or(Position::new(1, 1));
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), position));
        }

        let current = tokens[0].clone();
        Parser {
            tokens,
            pos: 0,
            current,
            chunk: chunk.to_string(),
            depth: 0,
        }
    }

    /// The next unconsumed token.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// The kind of the token after the next one.
    pub fn peek2_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Checks the lookahead without consuming it.
    pub fn check_look(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek_kind())
    }

    /// Consumes the lookahead unconditionally. The EOF token is never
    /// consumed past.
    pub fn advance(&mut self) -> &Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }

        trace!(kind = %token.kind, line = token.position.line, "consumed token");
        self.current = token;
        &self.current
    }

    pub fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        if self.check_look(kinds) {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(kinds))
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        self.expect_one_of(&[kind])
    }

    /// The last consumed token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn current_position(&self) -> Position {
        self.current.position
    }

    /// An error for the lookahead not being any of `expected`.
    pub fn unexpected(&self, expected: &[TokenKind]) -> Error {
        let token = self.peek();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected: describe_kinds(expected),
            },
            token.position,
        )
    }

    pub fn skip_comments(&mut self) {
        while self.peek_kind() == TokenKind::Comment {
            self.advance();
        }
    }

    /// Steps one nesting level down. Fails once `MAX_DEPTH` levels are open,
    /// which keeps hostile input from exhausting the stack.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::new(ErrorImpl::TooDeep { limit: MAX_DEPTH }, self.peek().position));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Runs `production` one nesting level down.
    pub fn nested<T>(&mut self, production: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        self.enter()?;
        let result = production(self);
        self.leave();
        result
    }

    pub fn has_tokens(&self) -> bool {
        self.peek_kind() != TokenKind::EOF
    }

    pub fn chunk(&self) -> &str {
        &self.chunk
    }
}

/// Parses `source` with default options, numbering lines from `start_line`.
pub fn parse(source: &str, start_line: u32) -> Result<Block, Error> {
    parse_with_options(
        source,
        &ParseOptions {
            start_line,
            ..ParseOptions::default()
        },
    )
}

pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Block, Error> {
    let tokens = tokenize_with(source, options.start_line, options.continue_keyword)?;
    parse_tokens(tokens, &options.chunk_name)
}

/// Parses an already tokenized chunk. An EOF token is appended if missing.
///
/// The first error aborts the parse; no partial block is returned.
pub fn parse_tokens(tokens: Vec<Token>, chunk_name: &str) -> Result<Block, Error> {
    let mut parser = Parser::new(tokens, chunk_name);
    let mut body = vec![];

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                debug!(%error, chunk = chunk_name, "parse failed");
                return Err(error);
            }
        }
    }

    debug!(statements = body.len(), chunk = chunk_name, "parsed chunk");
    Ok(body)
}
