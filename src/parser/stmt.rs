use crate::{
    ast::{
        ast::{AstNode, Block, Expr, Stmt},
        expressions::{Comment, ConstIdent, ConstInt, TableAccessor},
        statements::{
            Assign, DoBlock, Empty, ForLoopGeneric, ForLoopNumeric, Goto, If, Label, RepeatUntilLoop, Return, WhileLoop,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    expr::{parse_expr, parse_expr_list, parse_function_body, parse_name_key, parse_suffixed_value},
    lookups::STMT_LOOKUP,
    parser::Parser,
};

/// Tokens that end the value list of a `return`.
const RETURN_ENDERS: [TokenKind; 6] = [
    TokenKind::End,
    TokenKind::Else,
    TokenKind::Elseif,
    TokenKind::Until,
    TokenKind::Semicolon,
    TokenKind::EOF,
];

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match STMT_LOOKUP.get(&parser.peek_kind()) {
        Some(handler) => handler(parser),
        None => parse_expression_stmt(parser),
    }
}

/// Parses statements until one of `enders`, which is consumed. Running
/// out of tokens first is an error.
pub fn parse_block(parser: &mut Parser, enders: &[TokenKind]) -> Result<Block, Error> {
    parser.nested(|parser| {
        let mut body = vec![];

        while !parser.check_look(enders) {
            if !parser.has_tokens() {
                return Err(parser.unexpected(enders));
            }
            body.push(parse_stmt(parser)?);
        }

        parser.advance();
        Ok(body)
    })
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    Ok(Stmt::Empty(Empty { position }))
}

pub fn parse_comment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    Ok(Stmt::Comment(Comment {
        text: token.value.clone(),
        position: token.position,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let mut first = parse_if_clause(parser, position)?;

    let mut elseifs = vec![];
    let mut else_body = vec![];
    loop {
        match parser.current().kind {
            TokenKind::Elseif => {
                let position = parser.current_position();
                elseifs.push(parse_if_clause(parser, position)?);
            }
            TokenKind::Else => {
                else_body = parse_block(parser, &[TokenKind::End])?;
                break;
            }
            _ => break,
        }
    }

    // Each `elseif` becomes the sole statement of the previous clause's else.
    first.else_body = elseifs.into_iter().rev().fold(else_body, |else_body, mut clause| {
        clause.else_body = else_body;
        vec![Stmt::If(clause)]
    });

    Ok(Stmt::If(first))
}

/// `cond then block`, leaving the closing keyword as the current token.
fn parse_if_clause(parser: &mut Parser, position: Position) -> Result<If, Error> {
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Then)?;
    let then_body = parse_block(parser, &[TokenKind::Else, TokenKind::Elseif, TokenKind::End])?;

    Ok(If {
        condition,
        then_body,
        else_body: vec![],
        position,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Do)?;
    let body = parse_block(parser, &[TokenKind::End])?;

    Ok(Stmt::WhileLoop(WhileLoop {
        condition,
        body,
        position,
    }))
}

pub fn parse_do_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let body = parse_block(parser, &[TokenKind::End])?;

    Ok(Stmt::DoBlock(DoBlock { body, position }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let first = parser.expect(TokenKind::Identifier)?;

    if parser.check_look(&[TokenKind::Assignment]) {
        parser.advance();
        let init = parse_expr(parser)?;
        parser.expect(TokenKind::Comma)?;
        let limit = parse_expr(parser)?;

        let step = if parser.check_look(&[TokenKind::Comma]) {
            parser.advance();
            parse_expr(parser)?
        } else {
            Expr::ConstInt(ConstInt {
                value: String::from("1"),
                position: parser.current_position(),
            })
        };

        parser.expect(TokenKind::Do)?;
        let body = parse_block(parser, &[TokenKind::End])?;

        return Ok(Stmt::ForLoopNumeric(ForLoopNumeric {
            counter: first.value,
            init,
            limit,
            step,
            body,
            position,
        }));
    }

    let mut locals = vec![first.value];
    while parser.check_look(&[TokenKind::Comma]) {
        parser.advance();
        locals.push(parser.expect(TokenKind::Identifier)?.value);
    }

    parser.expect(TokenKind::In)?;
    let init = parse_expr_list(parser)?;
    parser.expect(TokenKind::Do)?;
    let body = parse_block(parser, &[TokenKind::End])?;

    Ok(Stmt::ForLoopGeneric(ForLoopGeneric {
        locals,
        init,
        body,
        position,
    }))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let body = parse_block(parser, &[TokenKind::Until])?;
    let condition = parse_expr(parser)?;

    Ok(Stmt::RepeatUntilLoop(RepeatUntilLoop {
        body,
        condition,
        position,
    }))
}

pub fn parse_function_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.peek().position;
    parse_function_decl(parser, false, position)
}

pub fn parse_local_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    if parser.check_look(&[TokenKind::Function]) {
        return parse_function_decl(parser, true, position);
    }

    let mut targets = vec![];
    loop {
        let name = parser.expect(TokenKind::Identifier)?;
        targets.push(Expr::ConstIdent(ConstIdent {
            value: name.value,
            position: name.position,
        }));

        if !parser.check_look(&[TokenKind::Comma]) {
            break;
        }
        parser.advance();
    }

    let values = if parser.check_look(&[TokenKind::Assignment]) {
        parser.advance();
        parse_expr_list(parser)?
    } else {
        vec![]
    };

    Ok(Stmt::Assign(Assign {
        local_decl: true,
        local_func: false,
        targets,
        values,
        position,
    }))
}

/// `function name body` and `local function name body`, both rewritten
/// into an assignment of a function literal.
fn parse_function_decl(parser: &mut Parser, local: bool, position: Position) -> Result<Stmt, Error> {
    let keyword = parser.expect(TokenKind::Function)?;

    let (target, has_self) = if local {
        let name = parser.expect(TokenKind::Identifier)?;
        let target = Expr::ConstIdent(ConstIdent {
            value: name.value,
            position: name.position,
        });
        (target, false)
    } else {
        parse_name_path(parser)?
    };

    let decl = parse_function_body(parser, has_self, keyword.position)?;

    Ok(Stmt::Assign(Assign {
        local_decl: false,
        local_func: local,
        targets: vec![target],
        values: vec![Expr::FuncDecl(decl)],
        position,
    }))
}

/// Reads `name {.name | [expr]} [:name]`. The flag is set when the path ends
/// in a method name.
fn parse_name_path(parser: &mut Parser) -> Result<(Expr, bool), Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let mut path = Expr::ConstIdent(ConstIdent {
        value: name.value,
        position: name.position,
    });

    loop {
        let key = match parser.peek_kind() {
            TokenKind::OpenBracket => {
                parser.advance();
                let key = parse_expr(parser)?;
                parser.expect(TokenKind::CloseBracket)?;
                key
            }
            TokenKind::Dot => {
                parser.advance();
                parse_name_key(parser)?
            }
            _ => break,
        };

        path = Expr::TableAccessor(TableAccessor {
            obj: Box::new(path),
            key: Box::new(key),
            position: parser.current_position(),
        });
    }

    if !parser.check_look(&[TokenKind::Colon]) {
        return Ok((path, false));
    }

    let position = parser.advance().position;
    let method = parse_name_key(parser)?;
    let path = Expr::TableAccessor(TableAccessor {
        obj: Box::new(path),
        key: Box::new(method),
        position,
    });

    Ok((path, true))
}

pub fn parse_label_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let label = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::DoubleColon)?;

    Ok(Stmt::Label(Label { label, position }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    parser.skip_comments();
    let items = if parser.check_look(&RETURN_ENDERS) {
        vec![]
    } else {
        parse_expr_list(parser)?
    };

    Ok(Stmt::Return(Return { items, position }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    Ok(Stmt::Goto(Goto {
        is_break: true,
        is_continue: false,
        label: String::from("break"),
        position,
    }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    Ok(Stmt::Goto(Goto {
        is_break: false,
        is_continue: true,
        label: String::from("continue"),
        position,
    }))
}

pub fn parse_goto_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let label = parser.expect(TokenKind::Identifier)?.value;

    Ok(Stmt::Goto(Goto {
        is_break: false,
        is_continue: false,
        label,
        position,
    }))
}

/// A statement opening with `(` must turn out to be a call, as in `(f)()`.
pub fn parse_paren_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parse_suffixed_value(parser)? {
        Expr::FuncCall(call) => Ok(Stmt::FuncCall(call)),
        other => Err(Error::new(ErrorImpl::ExpectedCall, other.get_position())),
    }
}

/// A call, or the targets and values of an assignment.
pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.peek().position;

    let first = match parse_suffixed_value(parser)? {
        Expr::FuncCall(call) => return Ok(Stmt::FuncCall(call)),
        other => other,
    };

    let mut targets = vec![assignment_target(first)?];
    while parser.check_look(&[TokenKind::Comma]) {
        parser.advance();
        targets.push(assignment_target(parse_suffixed_value(parser)?)?);
    }

    parser.expect(TokenKind::Assignment)?;
    let values = parse_expr_list(parser)?;

    Ok(Stmt::Assign(Assign {
        local_decl: false,
        local_func: false,
        targets,
        values,
        position,
    }))
}

fn assignment_target(expr: Expr) -> Result<Expr, Error> {
    if expr.is_assignable() {
        Ok(expr)
    } else {
        Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget {
                target: expr.to_string(),
            },
            expr.get_position(),
        ))
    }
}
