use serde::{Deserialize, Serialize};

use crate::Position;

use super::ast::{Block, Expr};

/// Assignment
///
/// Also produced for `local` declarations and for every named function
/// declaration, which is rewritten into a single-target assignment of a
/// function literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub local_decl: bool,
    /// Set for `local function f`, which is encoded as `local f = function`.
    /// Downstream consumers that need `f` visible inside its own body must
    /// declare the local before evaluating the value.
    pub local_func: bool,
    pub targets: Vec<Expr>,
    /// Empty when a `local` declaration has no values.
    pub values: Vec<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoBlock {
    pub body: Block,
    pub position: Position,
}

/// If Statement
/// `elseif` is encoded as an `else_body` holding exactly one nested `If`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct If {
    pub condition: Expr,
    pub then_body: Block,
    pub else_body: Block,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileLoop {
    pub condition: Expr,
    pub body: Block,
    pub position: Position,
}

/// Repeat-Until Loop
/// The condition is scoped inside the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatUntilLoop {
    pub body: Block,
    pub condition: Expr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoopNumeric {
    pub counter: String,
    pub init: Expr,
    pub limit: Expr,
    /// An integer literal `1` when the source omits the step.
    pub step: Expr,
    pub body: Block,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoopGeneric {
    pub locals: Vec<String>,
    /// Not adjusted to three values here.
    pub init: Vec<Expr>,
    pub body: Block,
    pub position: Position,
}

/// Goto
///
/// `break` and `continue` are gotos with the matching flag set and a
/// synthetic label; no such label exists in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goto {
    pub is_break: bool,
    pub is_continue: bool,
    pub label: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub label: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    pub items: Vec<Expr>,
    pub position: Position,
}

/// The empty statement `;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empty {
    pub position: Position,
}
