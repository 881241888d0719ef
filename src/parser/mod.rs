//! Parser module for building the syntax tree.
//!
//! A recursive-descent parser over the token stream. Expressions use
//! precedence climbing with per-operator left/right binding powers, which
//! gives `^` and `..` their right associativity. Statements dispatch on
//! their first token through a static lookup table and fall back to call
//! or assignment parsing.
//!
//! Several surface forms are rewritten while parsing:
//!
//! - `function a.b:c() end` becomes an assignment of a function literal,
//!   with `self` added to the parameters of a method
//! - `local function f` becomes `local f = function`, flagged as such
//! - `break` and `continue` become gotos with synthetic labels
//! - `elseif` becomes a nested `If` in the else branch
//! - a numeric `for` without a step gets the step `1`

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
