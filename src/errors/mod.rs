//! Error types and error handling for the parser.
//!
//! A single `Error` struct carries one `ErrorImpl` variant and the
//! position where the problem was detected. Both the lexer and the
//! parser report through it, and the first error aborts the parse.

pub mod errors;
