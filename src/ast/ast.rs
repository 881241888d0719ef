use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Position;

use super::{
    expressions::{
        Comment, ConstBool, ConstFloat, ConstIdent, ConstInt, ConstNil, ConstString, ConstVariadic, FuncCall,
        FuncDecl, Operator, Parens, TableAccessor, TableConstructor,
    },
    statements::{
        Assign, DoBlock, Empty, ForLoopGeneric, ForLoopNumeric, Goto, If, Label, RepeatUntilLoop, Return, WhileLoop,
    },
};

/// An ordered sequence of statements. Order is execution order.
pub type Block = Vec<Stmt>;

/// Node Kinds
///
/// One kind per structural variant of `Stmt` and `Expr`. The kind of a node
/// is always derived from its variant, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Assign,
    DoBlock,
    If,
    WhileLoop,
    RepeatUntilLoop,
    ForLoopNumeric,
    ForLoopGeneric,
    Goto,
    Label,
    Return,
    Empty,
    Comment,
    Operator,
    FuncCall,
    FuncDecl,
    TableConstructor,
    TableAccessor,
    Parens,
    ConstInt,
    ConstFloat,
    ConstString,
    ConstIdent,
    ConstBool,
    ConstNil,
    ConstVariadic,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Behavior shared by every node in the tree.
pub trait AstNode {
    /// Returns the kind of the node.
    fn get_kind(&self) -> NodeKind;
    /// Returns the position the node was read from.
    fn get_position(&self) -> Position;
}

/// Statement
///
/// `FuncCall` and `Comment` share their payload type with `Expr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    Assign(Assign),
    FuncCall(FuncCall),
    DoBlock(DoBlock),
    If(If),
    WhileLoop(WhileLoop),
    RepeatUntilLoop(RepeatUntilLoop),
    ForLoopNumeric(ForLoopNumeric),
    ForLoopGeneric(ForLoopGeneric),
    Goto(Goto),
    Label(Label),
    Return(Return),
    Comment(Comment),
    Empty(Empty),
}

impl AstNode for Stmt {
    fn get_kind(&self) -> NodeKind {
        match self {
            Stmt::Assign(_) => NodeKind::Assign,
            Stmt::FuncCall(_) => NodeKind::FuncCall,
            Stmt::DoBlock(_) => NodeKind::DoBlock,
            Stmt::If(_) => NodeKind::If,
            Stmt::WhileLoop(_) => NodeKind::WhileLoop,
            Stmt::RepeatUntilLoop(_) => NodeKind::RepeatUntilLoop,
            Stmt::ForLoopNumeric(_) => NodeKind::ForLoopNumeric,
            Stmt::ForLoopGeneric(_) => NodeKind::ForLoopGeneric,
            Stmt::Goto(_) => NodeKind::Goto,
            Stmt::Label(_) => NodeKind::Label,
            Stmt::Return(_) => NodeKind::Return,
            Stmt::Comment(_) => NodeKind::Comment,
            Stmt::Empty(_) => NodeKind::Empty,
        }
    }

    fn get_position(&self) -> Position {
        match self {
            Stmt::Assign(stmt) => stmt.position,
            Stmt::FuncCall(stmt) => stmt.position,
            Stmt::DoBlock(stmt) => stmt.position,
            Stmt::If(stmt) => stmt.position,
            Stmt::WhileLoop(stmt) => stmt.position,
            Stmt::RepeatUntilLoop(stmt) => stmt.position,
            Stmt::ForLoopNumeric(stmt) => stmt.position,
            Stmt::ForLoopGeneric(stmt) => stmt.position,
            Stmt::Goto(stmt) => stmt.position,
            Stmt::Label(stmt) => stmt.position,
            Stmt::Return(stmt) => stmt.position,
            Stmt::Comment(stmt) => stmt.position,
            Stmt::Empty(stmt) => stmt.position,
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Operator(Operator),
    FuncCall(FuncCall),
    FuncDecl(FuncDecl),
    TableConstructor(TableConstructor),
    TableAccessor(TableAccessor),
    Parens(Parens),
    ConstInt(ConstInt),
    ConstFloat(ConstFloat),
    ConstString(ConstString),
    ConstIdent(ConstIdent),
    ConstBool(ConstBool),
    ConstNil(ConstNil),
    ConstVariadic(ConstVariadic),
    Comment(Comment),
}

impl Expr {
    /// True for expressions that may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Expr::ConstIdent(_) | Expr::TableAccessor(_))
    }
}

impl AstNode for Expr {
    fn get_kind(&self) -> NodeKind {
        match self {
            Expr::Operator(_) => NodeKind::Operator,
            Expr::FuncCall(_) => NodeKind::FuncCall,
            Expr::FuncDecl(_) => NodeKind::FuncDecl,
            Expr::TableConstructor(_) => NodeKind::TableConstructor,
            Expr::TableAccessor(_) => NodeKind::TableAccessor,
            Expr::Parens(_) => NodeKind::Parens,
            Expr::ConstInt(_) => NodeKind::ConstInt,
            Expr::ConstFloat(_) => NodeKind::ConstFloat,
            Expr::ConstString(_) => NodeKind::ConstString,
            Expr::ConstIdent(_) => NodeKind::ConstIdent,
            Expr::ConstBool(_) => NodeKind::ConstBool,
            Expr::ConstNil(_) => NodeKind::ConstNil,
            Expr::ConstVariadic(_) => NodeKind::ConstVariadic,
            Expr::Comment(_) => NodeKind::Comment,
        }
    }

    fn get_position(&self) -> Position {
        match self {
            Expr::Operator(expr) => expr.position,
            Expr::FuncCall(expr) => expr.position,
            Expr::FuncDecl(expr) => expr.position,
            Expr::TableConstructor(expr) => expr.position,
            Expr::TableAccessor(expr) => expr.position,
            Expr::Parens(expr) => expr.position,
            Expr::ConstInt(expr) => expr.position,
            Expr::ConstFloat(expr) => expr.position,
            Expr::ConstString(expr) => expr.position,
            Expr::ConstIdent(expr) => expr.position,
            Expr::ConstBool(expr) => expr.position,
            Expr::ConstNil(expr) => expr.position,
            Expr::ConstVariadic(expr) => expr.position,
            Expr::Comment(expr) => expr.position,
        }
    }
}

/// A borrowed view of either kind of node, used by the tree walker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl AstNode for Node<'_> {
    fn get_kind(&self) -> NodeKind {
        match self {
            Node::Stmt(stmt) => stmt.get_kind(),
            Node::Expr(expr) => expr.get_kind(),
        }
    }

    fn get_position(&self) -> Position {
        match self {
            Node::Stmt(stmt) => stmt.get_position(),
            Node::Expr(expr) => expr.get_position(),
        }
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Node::Stmt(stmt)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Node::Expr(expr)
    }
}
