use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} on line {}, column {}", .position.line, .position.column)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.line
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedLongBracket { .. } => "UnterminatedLongBracket",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedCall => "ExpectedCall",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::TooDeep { .. } => "TooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literals must close on the line they open"))
            }
            ErrorImpl::UnterminatedLongBracket { level } => ErrorTip::Suggestion(format!(
                "Expected a closing `]{}]`",
                "=".repeat(*level)
            )),
            ErrorImpl::InvalidEscape { sequence } => {
                ErrorTip::Suggestion(format!("Invalid escape sequence `{}`", sequence))
            }
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::ExpectedCall => ErrorTip::Suggestion(String::from(
                "A statement starting with `(` must be a function call",
            )),
            ErrorImpl::InvalidAssignmentTarget { target } => ErrorTip::Suggestion(format!(
                "Cannot assign to `{}`, only names and table fields can be assigned",
                target
            )),
            ErrorImpl::TooDeep { limit } => ErrorTip::Suggestion(format!(
                "Blocks and expressions may nest at most {} levels deep",
                limit
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unfinished string")]
    UnterminatedString,
    #[error("unfinished long string or comment (level {level})")]
    UnterminatedLongBracket { level: usize },
    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("syntax error: parenthesized statement is not a function call")]
    ExpectedCall,
    #[error("syntax error: cannot assign to {target}")]
    InvalidAssignmentTarget { target: String },
    #[error("chunk has too many syntax levels (limit is {limit})")]
    TooDeep { limit: usize },
}
