use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{ast::Stmt, operators::OpType},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{parser::Parser, stmt::*};

/// Left and right binding power of an operator.
///
/// An operator keeps folding while its left power is above the caller's
/// floor; its right operand is then parsed with the right power as the new
/// floor. A right power below the left one makes the operator right
/// associative.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct BindingPower {
    pub left: u8,
    pub right: u8,
}

/// Floor used for the operand of a unary operator.
pub const UNARY_PRIORITY: u8 = 12;

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;

pub fn binding_power(op: OpType) -> BindingPower {
    let (left, right) = match op {
        OpType::Or => (1, 1),
        OpType::And => (2, 2),

        // Relational
        OpType::Equal
        | OpType::NotEqual
        | OpType::LessThan
        | OpType::GreaterThan
        | OpType::LessOrEqual
        | OpType::GreaterOrEqual => (3, 3),

        // Bitwise
        OpType::BinOr => (4, 4),
        OpType::BinXor => (5, 5),
        OpType::BinAnd => (6, 6),
        OpType::BinShiftL | OpType::BinShiftR => (7, 7),

        OpType::Concat => (9, 8),

        // Additive and multiplicative
        OpType::Add | OpType::Sub => (10, 10),
        OpType::Mul | OpType::Div | OpType::IDiv | OpType::Mod => (11, 11),

        OpType::UMinus | OpType::BinNot | OpType::Not | OpType::Length => (UNARY_PRIORITY, UNARY_PRIORITY),
        OpType::Pow => (14, 13),
    };

    BindingPower { left, right }
}

lazy_static! {
    pub static ref BINARY_LOOKUP: HashMap<TokenKind, OpType> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Or, OpType::Or);
        map.insert(TokenKind::And, OpType::And);

        map.insert(TokenKind::Equals, OpType::Equal);
        map.insert(TokenKind::NotEquals, OpType::NotEqual);
        map.insert(TokenKind::Less, OpType::LessThan);
        map.insert(TokenKind::LessEquals, OpType::LessOrEqual);
        map.insert(TokenKind::Greater, OpType::GreaterThan);
        map.insert(TokenKind::GreaterEquals, OpType::GreaterOrEqual);

        map.insert(TokenKind::Pipe, OpType::BinOr);
        map.insert(TokenKind::Tilde, OpType::BinXor);
        map.insert(TokenKind::Ampersand, OpType::BinAnd);
        map.insert(TokenKind::ShiftLeft, OpType::BinShiftL);
        map.insert(TokenKind::ShiftRight, OpType::BinShiftR);

        map.insert(TokenKind::DotDot, OpType::Concat);

        map.insert(TokenKind::Plus, OpType::Add);
        map.insert(TokenKind::Dash, OpType::Sub);
        map.insert(TokenKind::Star, OpType::Mul);
        map.insert(TokenKind::Slash, OpType::Div);
        map.insert(TokenKind::DoubleSlash, OpType::IDiv);
        map.insert(TokenKind::Percent, OpType::Mod);
        map.insert(TokenKind::Caret, OpType::Pow);
        map
    };

    pub static ref UNARY_LOOKUP: HashMap<TokenKind, OpType> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Dash, OpType::UMinus);
        map.insert(TokenKind::Tilde, OpType::BinNot);
        map.insert(TokenKind::Not, OpType::Not);
        map.insert(TokenKind::Hash, OpType::Length);
        map
    };

    /// Statements that can be told apart by their first token. Anything
    /// else is parsed as a call or an assignment.
    pub static ref STMT_LOOKUP: HashMap<TokenKind, StmtHandler> = {
        let mut map: HashMap<TokenKind, StmtHandler> = HashMap::new();
        map.insert(TokenKind::Semicolon, parse_empty_stmt);
        map.insert(TokenKind::If, parse_if_stmt);
        map.insert(TokenKind::Comment, parse_comment_stmt);
        map.insert(TokenKind::While, parse_while_stmt);
        map.insert(TokenKind::Do, parse_do_stmt);
        map.insert(TokenKind::For, parse_for_stmt);
        map.insert(TokenKind::Repeat, parse_repeat_stmt);
        map.insert(TokenKind::Function, parse_function_stmt);
        map.insert(TokenKind::Local, parse_local_stmt);
        map.insert(TokenKind::DoubleColon, parse_label_stmt);
        map.insert(TokenKind::Return, parse_return_stmt);
        map.insert(TokenKind::Break, parse_break_stmt);
        map.insert(TokenKind::Continue, parse_continue_stmt);
        map.insert(TokenKind::Goto, parse_goto_stmt);
        map.insert(TokenKind::OpenParen, parse_paren_stmt);
        map
    };
}
