//! Depth-first traversal over the tree.
//!
//! `walk` calls a `Visitor` for a node, walks the node's children with
//! whatever visitor that call returned, and then calls the returned visitor
//! once more with `None`. Returning `None` from `visit` skips the children
//! and the closing call. Visitors that keep scoped state push on a node and
//! pop on the closing `None`.

use super::{
    ast::{Block, Expr, Node, Stmt},
    expressions::FuncCall,
};

/// Visitor used with `walk`.
pub trait Visitor<'ast> {
    /// Called with `Some(node)` on entry and `None` once the node's children
    /// are done. On entry, returns the visitor for the children, which may
    /// be `self` or any other visitor reachable from it, or `None` to prune.
    fn visit(&mut self, node: Option<Node<'ast>>) -> Option<&mut dyn Visitor<'ast>>;
}

/// Traverses `node` and its children in depth-first order.
pub fn walk<'ast>(visitor: &mut dyn Visitor<'ast>, node: Node<'ast>) {
    let Some(visitor) = visitor.visit(Some(node)) else {
        return;
    };

    for child in node.children() {
        walk(&mut *visitor, child);
    }

    visitor.visit(None);
}

/// Walks each statement of `block` in order.
pub fn walk_block<'ast>(visitor: &mut dyn Visitor<'ast>, block: &'ast Block) {
    for stmt in block {
        walk(&mut *visitor, Node::Stmt(stmt));
    }
}

struct Inspector<F>(F);

impl<'ast, F> Visitor<'ast> for Inspector<F>
where
    F: FnMut(Option<Node<'ast>>) -> bool,
{
    fn visit(&mut self, node: Option<Node<'ast>>) -> Option<&mut dyn Visitor<'ast>> {
        if (self.0)(node) {
            Some(self)
        } else {
            None
        }
    }
}

/// Like `walk`, except `f` is called for a node only if it returned true
/// for the node's parent. `f` is always called for `node` itself, and gets
/// `None` after the children of a node it returned true for.
pub fn inspect<'ast, F>(node: Node<'ast>, f: F)
where
    F: FnMut(Option<Node<'ast>>) -> bool,
{
    walk(&mut Inspector(f), node);
}

impl<'a> Node<'a> {
    /// The direct children of the node, in the order they were read.
    pub fn children(self) -> Vec<Node<'a>> {
        let mut children = Vec::new();

        match self {
            Node::Stmt(stmt) => match stmt {
                Stmt::Assign(assign) => {
                    push_exprs(&mut children, &assign.targets);
                    push_exprs(&mut children, &assign.values);
                }
                Stmt::FuncCall(call) => push_call(&mut children, call),
                Stmt::DoBlock(block) => push_stmts(&mut children, &block.body),
                Stmt::If(stmt) => {
                    children.push(Node::Expr(&stmt.condition));
                    push_stmts(&mut children, &stmt.then_body);
                    push_stmts(&mut children, &stmt.else_body);
                }
                Stmt::WhileLoop(stmt) => {
                    children.push(Node::Expr(&stmt.condition));
                    push_stmts(&mut children, &stmt.body);
                }
                Stmt::RepeatUntilLoop(stmt) => {
                    push_stmts(&mut children, &stmt.body);
                    children.push(Node::Expr(&stmt.condition));
                }
                Stmt::ForLoopNumeric(stmt) => {
                    children.push(Node::Expr(&stmt.init));
                    children.push(Node::Expr(&stmt.limit));
                    children.push(Node::Expr(&stmt.step));
                    push_stmts(&mut children, &stmt.body);
                }
                Stmt::ForLoopGeneric(stmt) => {
                    push_exprs(&mut children, &stmt.init);
                    push_stmts(&mut children, &stmt.body);
                }
                Stmt::Return(stmt) => push_exprs(&mut children, &stmt.items),
                Stmt::Goto(_) | Stmt::Label(_) | Stmt::Comment(_) | Stmt::Empty(_) => {}
            },
            Node::Expr(expr) => match expr {
                Expr::Operator(operator) => {
                    if let Some(left) = &operator.left {
                        children.push(Node::Expr(left));
                    }
                    children.push(Node::Expr(&operator.right));
                }
                Expr::FuncCall(call) => push_call(&mut children, call),
                Expr::FuncDecl(decl) => push_stmts(&mut children, &decl.block),
                Expr::TableConstructor(table) => {
                    for (key, value) in table.entries() {
                        if let Some(key) = key {
                            children.push(Node::Expr(key));
                        }
                        children.push(Node::Expr(value));
                    }
                }
                Expr::TableAccessor(accessor) => {
                    children.push(Node::Expr(&accessor.obj));
                    children.push(Node::Expr(&accessor.key));
                }
                Expr::Parens(parens) => children.push(Node::Expr(&parens.inner)),
                Expr::ConstInt(_)
                | Expr::ConstFloat(_)
                | Expr::ConstString(_)
                | Expr::ConstIdent(_)
                | Expr::ConstBool(_)
                | Expr::ConstNil(_)
                | Expr::ConstVariadic(_)
                | Expr::Comment(_) => {}
            },
        }

        children
    }
}

fn push_exprs<'a>(children: &mut Vec<Node<'a>>, exprs: &'a [Expr]) {
    children.extend(exprs.iter().map(Node::Expr));
}

fn push_stmts<'a>(children: &mut Vec<Node<'a>>, stmts: &'a [Stmt]) {
    children.extend(stmts.iter().map(Node::Stmt));
}

fn push_call<'a>(children: &mut Vec<Node<'a>>, call: &'a FuncCall) {
    if let Some(receiver) = &call.receiver {
        children.push(Node::Expr(receiver));
    }
    children.push(Node::Expr(&call.function));
    push_exprs(children, &call.args);
}
