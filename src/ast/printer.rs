//! Renders a tree back into Lua source.
//!
//! Output keeps the tree shape: parsing the printed text gives back the
//! same statements and expressions. Operators are printed without added
//! parentheses, so the tree has to be one the parser could have built.
//! Explicit grouping is kept as `Parens` nodes.

use std::fmt::Display;

use crate::lexer::tokens::RESERVED_LOOKUP;

use super::{
    ast::{Expr, Stmt},
    expressions::{FuncCall, FuncDecl, TableConstructor},
    statements::{Assign, If},
};

const INDENT: &str = "  ";

/// Prints a block, one statement per line.
pub fn print_block(block: &[Stmt]) -> String {
    let mut printer = Printer::default();
    printer.block(block);
    printer.output
}

pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr(expr);
    printer.output
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::default();
        printer.stmt_body(self);
        write!(f, "{}", printer.output)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print_expr(self))
    }
}

#[derive(Default)]
struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
    }

    fn block(&mut self, block: &[Stmt]) {
        for stmt in block {
            self.write_indent();
            self.stmt_body(stmt);
            self.output.push('\n');
        }
    }

    fn nested(&mut self, block: &[Stmt]) {
        self.indent += 1;
        self.block(block);
        self.indent -= 1;
    }

    /// Closes a construct opened at the current indent.
    fn close(&mut self, keyword: &str) {
        self.write_indent();
        self.push(keyword);
    }

    fn stmt_body(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign(assign) => match (assign.targets.as_slice(), assign.values.as_slice()) {
                ([Expr::ConstIdent(name)], [Expr::FuncDecl(decl)]) if assign.local_func => {
                    self.push("local function ");
                    self.push(&name.value);
                    self.function_body(decl, false);
                }
                ([target], [Expr::FuncDecl(decl)]) if !assign.local_decl && !assign.local_func => {
                    match function_name(target, decl) {
                        Some((name, is_method)) => {
                            self.push("function ");
                            self.push(&name);
                            self.function_body(decl, is_method);
                        }
                        None => self.assignment(assign),
                    }
                }
                _ => self.assignment(assign),
            },
            Stmt::FuncCall(call) => self.call(call),
            Stmt::DoBlock(block) => {
                self.push("do\n");
                self.nested(&block.body);
                self.close("end");
            }
            Stmt::If(stmt) => self.if_chain(stmt),
            Stmt::WhileLoop(stmt) => {
                self.push("while ");
                self.expr(&stmt.condition);
                self.push(" do\n");
                self.nested(&stmt.body);
                self.close("end");
            }
            Stmt::RepeatUntilLoop(stmt) => {
                self.push("repeat\n");
                self.nested(&stmt.body);
                self.close("until ");
                self.expr(&stmt.condition);
            }
            Stmt::ForLoopNumeric(stmt) => {
                self.push("for ");
                self.push(&stmt.counter);
                self.push(" = ");
                self.expr_list([&stmt.init, &stmt.limit, &stmt.step]);
                self.push(" do\n");
                self.nested(&stmt.body);
                self.close("end");
            }
            Stmt::ForLoopGeneric(stmt) => {
                self.push("for ");
                self.push(&stmt.locals.join(", "));
                self.push(" in ");
                self.expr_list(&stmt.init);
                self.push(" do\n");
                self.nested(&stmt.body);
                self.close("end");
            }
            Stmt::Goto(stmt) if stmt.is_break => self.push("break"),
            Stmt::Goto(stmt) if stmt.is_continue => self.push("continue"),
            Stmt::Goto(stmt) => {
                self.push("goto ");
                self.push(&stmt.label);
            }
            Stmt::Label(stmt) => {
                self.push("::");
                self.push(&stmt.label);
                self.push("::");
            }
            Stmt::Return(stmt) => {
                self.push("return");
                if !stmt.items.is_empty() {
                    self.push(" ");
                    self.expr_list(&stmt.items);
                }
            }
            Stmt::Comment(comment) => {
                if comment.text.contains(['\n', '\r']) || comment.text.starts_with('[') {
                    self.long_comment(&comment.text);
                } else {
                    self.push("--");
                    self.push(&comment.text);
                }
            }
            Stmt::Empty(_) => self.push(";"),
        }
    }

    fn assignment(&mut self, assign: &Assign) {
        if assign.local_decl {
            self.push("local ");
        }
        self.expr_list(&assign.targets);
        if !assign.values.is_empty() {
            self.push(" = ");
            self.expr_list(&assign.values);
        }
    }

    fn if_chain(&mut self, stmt: &If) {
        let mut current = stmt;
        self.push("if ");

        loop {
            self.expr(&current.condition);
            self.push(" then\n");
            self.nested(&current.then_body);

            match current.else_body.as_slice() {
                [Stmt::If(next)] => {
                    self.close("elseif ");
                    current = next;
                }
                [] => break,
                body => {
                    self.close("else\n");
                    self.nested(body);
                    break;
                }
            }
        }

        self.close("end");
    }

    fn expr_list<'e>(&mut self, exprs: impl IntoIterator<Item = &'e Expr>) {
        for (index, expr) in exprs.into_iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.expr(expr);
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Operator(operator) => {
                match &operator.left {
                    Some(left) => {
                        self.expr(left);
                        self.push(" ");
                        self.push(operator.op.symbol());
                        self.push(" ");
                    }
                    // Always spaced so that `- -x` never reads as a comment.
                    None => {
                        self.push(operator.op.symbol());
                        self.push(" ");
                    }
                }
                self.expr(&operator.right);
            }
            Expr::FuncCall(call) => self.call(call),
            Expr::FuncDecl(decl) => {
                self.push("function");
                self.function_body(decl, false);
            }
            Expr::TableConstructor(table) => self.table(table),
            Expr::TableAccessor(accessor) => {
                self.expr(&accessor.obj);
                match name_key(&accessor.key) {
                    Some(name) => {
                        self.push(".");
                        self.push(name);
                    }
                    None => {
                        self.bracketed(&accessor.key);
                        self.push("]");
                    }
                }
            }
            Expr::Parens(parens) => {
                self.push("(");
                self.expr(&parens.inner);
                self.push(")");
            }
            Expr::ConstInt(value) => self.push(&value.value),
            Expr::ConstFloat(value) => self.push(&value.value),
            Expr::ConstString(value) if is_literal(&value.value) => self.push(&value.value),
            Expr::ConstString(value) => self.push(&quote(&value.value)),
            Expr::ConstIdent(value) => self.push(&value.value),
            Expr::ConstBool(value) => self.push(if value.value { "true" } else { "false" }),
            Expr::ConstNil(_) => self.push("nil"),
            Expr::ConstVariadic(_) => self.push("..."),
            Expr::Comment(comment) => self.long_comment(&comment.text),
        }
    }

    fn call(&mut self, call: &FuncCall) {
        match &call.receiver {
            Some(receiver) => {
                self.expr(receiver);
                self.push(":");
                match name_key(&call.function) {
                    Some(method) => self.push(method),
                    None => self.expr(&call.function),
                }
            }
            None => self.expr(&call.function),
        }

        self.push("(");
        self.expr_list(&call.args);
        self.push(")");
    }

    /// Prints parameters and body. `skip_self` leaves out the leading `self`
    /// of a method.
    fn function_body(&mut self, decl: &FuncDecl, skip_self: bool) {
        let skip = usize::from(skip_self);
        let mut params = decl.params[skip..].to_vec();
        if decl.is_variadic {
            params.push(String::from("..."));
        }

        self.push("(");
        self.push(&params.join(", "));
        self.push(")\n");
        self.nested(&decl.block);
        self.close("end");
    }

    fn table(&mut self, table: &TableConstructor) {
        self.push("{");
        for (index, (key, value)) in table.entries().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            match key {
                Some(key) => match name_key(key) {
                    Some(name) => {
                        self.push(name);
                        self.push(" = ");
                    }
                    None => {
                        self.bracketed(key);
                        self.push("] = ");
                    }
                },
                None => {}
            }
            self.expr(value);
        }
        self.push("}");
    }

    /// Opens `[` and prints `key`, spaced when the key itself starts with a
    /// bracket so that `[[` never opens a long string.
    fn bracketed(&mut self, key: &Expr) {
        self.push("[");
        let start = self.output.len();
        self.expr(key);
        if self.output[start..].starts_with('[') {
            self.output.insert(start, ' ');
        }
    }

    fn long_comment(&mut self, text: &str) {
        self.push("--");
        self.push(&long_bracket(text));
    }
}

/// The `a.b.c` or `a.b:c` name a function declaration would have for this
/// target. The flag is set for the method form, used when the first
/// parameter is `self`.
fn function_name(target: &Expr, decl: &FuncDecl) -> Option<(String, bool)> {
    if let Expr::TableAccessor(accessor) = target {
        if let Some(key) = name_key(&accessor.key) {
            if decl.params.first().is_some_and(|param| param == "self") {
                return Some((format!("{}:{}", name_path(&accessor.obj)?, key), true));
            }
        }
    }

    name_path(target).map(|path| (path, false))
}

fn name_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::ConstIdent(name) => Some(name.value.clone()),
        Expr::TableAccessor(accessor) => {
            let key = name_key(&accessor.key)?;
            Some(format!("{}.{}", name_path(&accessor.obj)?, key))
        }
        _ => None,
    }
}

/// The bare name a key was written as, if it can be written that way.
fn name_key(key: &Expr) -> Option<&str> {
    match key {
        Expr::ConstString(key) if !is_literal(&key.value) && is_name(&key.value) => Some(&key.value),
        _ => None,
    }
}

/// Whether a string constant holds a literal lexeme rather than a bare name.
fn is_literal(value: &str) -> bool {
    value.starts_with(['"', '\'', '['])
}

fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_well = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_LOOKUP.contains_key(text)
}

/// Wraps `text` in the lowest-level long bracket that it cannot close early.
fn long_bracket(text: &str) -> String {
    let mut level = 0;
    loop {
        let equals = "=".repeat(level);
        let closer = format!("]{}]", equals);
        let candidate = format!("{}{}", text, closer);

        if candidate.find(&closer) == Some(text.len()) {
            // The lexer drops a newline directly after the opener.
            let lead = if text.starts_with(['\n', '\r']) { "\n" } else { "" };
            return format!("[{}[{}{}{}", equals, lead, text, closer);
        }
        level += 1;
    }
}

/// Quotes a bare string value, as held by name keys.
fn quote(value: &str) -> String {
    let mut quoted = String::from("\"");
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\{:03}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
