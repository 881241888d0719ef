use serde::{Deserialize, Serialize};

use crate::Position;

use super::{
    ast::{Block, Expr},
    operators::OpType,
};

/// Operator Expression
/// A unary or binary operator and its operands. `left` is `None` for unary operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub op: OpType,
    pub left: Option<Box<Expr>>,
    pub right: Box<Expr>,
    pub position: Position,
}

/// Function Call
/// Both an expression and, on its own, a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncCall {
    /// The part before the `:` of a method call, if any.
    pub receiver: Option<Box<Expr>>,
    /// The method name when there is a receiver, otherwise the whole callee.
    pub function: Box<Expr>,
    pub args: Vec<Expr>,
    pub position: Position,
}

/// Function Literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub params: Vec<String>,
    pub is_variadic: bool,
    /// Name of the chunk the function was read from.
    pub source: String,
    pub block: Block,
    pub position: Position,
}

/// Table Constructor
///
/// `keys` and `vals` always have the same length. A `None` key marks a
/// positional entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConstructor {
    pub keys: Vec<Option<Expr>>,
    pub vals: Vec<Expr>,
    pub position: Position,
}

impl TableConstructor {
    pub fn entries(&self) -> impl Iterator<Item = (Option<&Expr>, &Expr)> {
        self.keys.iter().map(Option::as_ref).zip(self.vals.iter())
    }
}

/// Table Accessor
/// Covers both `a.b` (with a string key) and `a[b]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAccessor {
    pub obj: Box<Expr>,
    pub key: Box<Expr>,
    pub position: Position,
}

/// Parenthesized Expression
/// Kept as its own node since parentheses truncate multiple results to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parens {
    pub inner: Box<Expr>,
    pub position: Position,
}

// LITERALS
// Numeric lexemes are stored as written; conversion happens downstream.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstInt {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstFloat {
    pub value: String,
    pub position: Position,
}

/// A string constant. Literals keep their source lexeme with delimiters and
/// escapes untouched (`"a\tb"`, `[[x]]`); `decode_string` turns one into
/// bytes. Keys written as names (`t.k`, `{k = 1}`, `o:k()`) hold the bare
/// name instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstString {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstIdent {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstBool {
    pub value: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstNil {
    pub position: Position,
}

/// The `...` expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstVariadic {
    pub position: Position,
}

/// Comment
/// A first-class leaf, valid as both an expression and a statement. The
/// parser skips comments wherever an operand may start, so as an expression
/// it only appears in trees built by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub position: Position,
}
