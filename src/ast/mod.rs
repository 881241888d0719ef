/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree the parser produces
///
/// Submodules:
/// - ast: `Stmt`, `Expr`, node kinds and the borrowed `Node` view
/// - expressions: Payloads of the expression variants
/// - statements: Payloads of the statement variants
/// - operators: Unary and binary operator kinds
/// - walk: Depth-first traversal with visitors
/// - printer: Renders a tree back into source text
pub mod ast;
pub mod expressions;
pub mod operators;
pub mod printer;
pub mod statements;
pub mod walk;

#[cfg(test)]
mod tests;
