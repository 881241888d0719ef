use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Operator kinds for the `Operator` expression node.
///
/// `UMinus`, `BinNot`, `Not` and `Length` are unary; every other kind is binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpType {
    Add,
    Sub,
    Mul,
    Mod,
    Pow,
    Div,
    IDiv,
    BinAnd,
    BinOr,
    BinXor,
    BinShiftL,
    BinShiftR,
    UMinus,
    BinNot,
    Not,
    Length,
    Concat,

    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,

    And,
    Or,
}

impl OpType {
    pub fn is_unary(&self) -> bool {
        matches!(self, OpType::UMinus | OpType::BinNot | OpType::Not | OpType::Length)
    }

    /// The operator as written in source.
    pub fn symbol(&self) -> &'static str {
        match self {
            OpType::Add => "+",
            OpType::Sub => "-",
            OpType::Mul => "*",
            OpType::Mod => "%",
            OpType::Pow => "^",
            OpType::Div => "/",
            OpType::IDiv => "//",
            OpType::BinAnd => "&",
            OpType::BinOr => "|",
            OpType::BinXor => "~",
            OpType::BinShiftL => "<<",
            OpType::BinShiftR => ">>",
            OpType::UMinus => "-",
            OpType::BinNot => "~",
            OpType::Not => "not",
            OpType::Length => "#",
            OpType::Concat => "..",
            OpType::Equal => "==",
            OpType::NotEqual => "~=",
            OpType::LessThan => "<",
            OpType::GreaterThan => ">",
            OpType::LessOrEqual => "<=",
            OpType::GreaterOrEqual => ">=",
            OpType::And => "and",
            OpType::Or => "or",
        }
    }
}

impl Display for OpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
