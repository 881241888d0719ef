//! Lexical analysis module.
//!
//! Converts Lua source into the token stream the parser reads. It handles:
//!
//! - Tokenization through a table of anchored regex patterns
//! - Keywords, names, numbers, strings and every operator
//! - Quoted strings with escapes, and long bracket strings
//! - Line and long comments, which are kept as tokens
//! - Line and column tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
