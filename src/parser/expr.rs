use crate::{
    ast::{
        ast::{AstNode, Expr},
        expressions::{
            ConstBool, ConstFloat, ConstIdent, ConstInt, ConstNil, ConstString, ConstVariadic, FuncCall,
            FuncDecl, Operator, Parens, TableAccessor, TableConstructor,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    lookups::{binding_power, BINARY_LOOKUP, UNARY_LOOKUP, UNARY_PRIORITY},
    parser::Parser,
    stmt::parse_block,
};

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_subexpr(parser, 0)
}

/// One or more comma separated expressions.
pub fn parse_expr_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut exprs = vec![parse_expr(parser)?];
    while parser.check_look(&[TokenKind::Comma]) {
        parser.advance();
        exprs.push(parse_expr(parser)?);
    }
    Ok(exprs)
}

/// Precedence climbing. Folds binary operators whose left binding power is
/// above `limit`.
pub fn parse_subexpr(parser: &mut Parser, limit: u8) -> Result<Expr, Error> {
    parser.nested(|parser| parse_operand_chain(parser, limit))
}

fn parse_operand_chain(parser: &mut Parser, limit: u8) -> Result<Expr, Error> {
    parser.skip_comments();

    let mut left = match UNARY_LOOKUP.get(&parser.peek_kind()) {
        Some(&op) => {
            let position = parser.advance().position;
            let right = parse_subexpr(parser, UNARY_PRIORITY)?;
            Expr::Operator(Operator {
                op,
                left: None,
                right: Box::new(right),
                position,
            })
        }
        None => parse_value(parser)?,
    };

    parser.skip_comments();

    while let Some(&op) = BINARY_LOOKUP.get(&parser.peek_kind()) {
        let power = binding_power(op);
        if power.left <= limit {
            break;
        }

        let position = parser.advance().position;
        let right = parse_subexpr(parser, power.right)?;
        left = Expr::Operator(Operator {
            op,
            left: Some(Box::new(left)),
            right: Box::new(right),
            position,
        });
    }

    Ok(left)
}

/// A literal, table constructor, function literal, comment or suffixed value.
pub fn parse_value(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.peek().clone();
    let position = token.position;

    let value = match token.kind {
        TokenKind::OpenCurly => return parse_table_constructor(parser),
        TokenKind::Function => {
            parser.advance();
            return Ok(Expr::FuncDecl(parse_function_body(parser, false, position)?));
        }
        TokenKind::True => Expr::ConstBool(ConstBool { value: true, position }),
        TokenKind::False => Expr::ConstBool(ConstBool { value: false, position }),
        TokenKind::Nil => Expr::ConstNil(ConstNil { position }),
        TokenKind::Ellipsis => Expr::ConstVariadic(ConstVariadic { position }),
        TokenKind::Int => Expr::ConstInt(ConstInt { value: token.value, position }),
        TokenKind::Float => Expr::ConstFloat(ConstFloat { value: token.value, position }),
        TokenKind::String => Expr::ConstString(ConstString { value: token.value, position }),
        _ => return parse_suffixed_value(parser),
    };

    parser.advance();
    Ok(value)
}

/// A primary value followed by any number of `[key]`, `.name`, `:name args`
/// and call suffixes, applied left to right.
pub fn parse_suffixed_value(parser: &mut Parser) -> Result<Expr, Error> {
    let mut value = parse_primary_value(parser)?;

    loop {
        match parser.peek_kind() {
            TokenKind::OpenBracket => {
                let position = parser.advance().position;
                let key = parse_expr(parser)?;
                parser.expect(TokenKind::CloseBracket)?;

                value = Expr::TableAccessor(TableAccessor {
                    obj: Box::new(value),
                    key: Box::new(key),
                    position,
                });
            }
            TokenKind::Dot => {
                let position = parser.advance().position;
                let key = parse_name_key(parser)?;

                value = Expr::TableAccessor(TableAccessor {
                    obj: Box::new(value),
                    key: Box::new(key),
                    position,
                });
            }
            TokenKind::Colon | TokenKind::OpenParen | TokenKind::String | TokenKind::OpenCurly => {
                value = parse_call(parser, value)?;
            }
            _ => return Ok(value),
        }
    }
}

/// A name or a parenthesized expression.
pub fn parse_primary_value(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.peek_kind() {
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::ConstIdent(ConstIdent {
                value: token.value.clone(),
                position: token.position,
            }))
        }
        TokenKind::OpenParen => {
            let position = parser.advance().position;
            let inner = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;

            Ok(Expr::Parens(Parens {
                inner: Box::new(inner),
                position,
            }))
        }
        _ => Err(parser.unexpected(&[TokenKind::Identifier, TokenKind::OpenParen])),
    }
}

/// Reads a name and returns it as a string key, as in `a.name`.
pub fn parse_name_key(parser: &mut Parser) -> Result<Expr, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    Ok(Expr::ConstString(ConstString {
        value: name.value,
        position: name.position,
    }))
}

/// Parses the arguments of a call on `prefix`, including an optional
/// `:name` method part.
pub fn parse_call(parser: &mut Parser, prefix: Expr) -> Result<Expr, Error> {
    let position = prefix.get_position();

    let (receiver, function) = if parser.check_look(&[TokenKind::Colon]) {
        parser.advance();
        (Some(Box::new(prefix)), parse_name_key(parser)?)
    } else {
        (None, prefix)
    };

    let args = match parser.peek_kind() {
        TokenKind::OpenCurly => vec![parse_table_constructor(parser)?],
        TokenKind::String => {
            let token = parser.advance();
            vec![Expr::ConstString(ConstString {
                value: token.value.clone(),
                position: token.position,
            })]
        }
        TokenKind::OpenParen => {
            parser.advance();
            let mut args = vec![];

            parser.skip_comments();
            while !parser.check_look(&[TokenKind::CloseParen]) {
                args.push(parse_expr(parser)?);
                if !parser.check_look(&[TokenKind::Comma]) {
                    break;
                }
                parser.advance();
                parser.skip_comments();
            }

            parser.expect(TokenKind::CloseParen)?;
            args
        }
        _ => {
            return Err(parser.unexpected(&[TokenKind::OpenParen, TokenKind::String, TokenKind::OpenCurly]));
        }
    };

    Ok(Expr::FuncCall(FuncCall {
        receiver,
        function: Box::new(function),
        args,
        position,
    }))
}

pub fn parse_table_constructor(parser: &mut Parser) -> Result<Expr, Error> {
    let position = parser.expect(TokenKind::OpenCurly)?.position;
    let mut keys = vec![];
    let mut vals = vec![];

    parser.skip_comments();
    while !parser.check_look(&[TokenKind::CloseCurly]) {
        let key = match parser.peek_kind() {
            TokenKind::Identifier if parser.peek2_kind() == TokenKind::Assignment => {
                let key = parse_name_key(parser)?;
                parser.advance();
                Some(key)
            }
            TokenKind::OpenBracket => {
                parser.advance();
                let key = parse_expr(parser)?;
                parser.expect(TokenKind::CloseBracket)?;
                parser.expect(TokenKind::Assignment)?;
                Some(key)
            }
            _ => None,
        };

        keys.push(key);
        vals.push(parse_expr(parser)?);

        if !parser.check_look(&[TokenKind::Comma, TokenKind::Semicolon]) {
            break;
        }
        parser.advance();
        parser.skip_comments();
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::TableConstructor(TableConstructor { keys, vals, position }))
}

/// Parses a parameter list and body up to `end`. The `function` keyword
/// and any name have already been read. `has_self` prepends a `self`
/// parameter.
pub fn parse_function_body(parser: &mut Parser, has_self: bool, position: Position) -> Result<FuncDecl, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    if has_self {
        params.push(String::from("self"));
    }

    let mut is_variadic = false;
    while parser.check_look(&[TokenKind::Identifier, TokenKind::Ellipsis]) {
        // `...` must be last; the closing paren is expected right after it.
        if parser.advance().kind == TokenKind::Ellipsis {
            is_variadic = true;
            break;
        }
        params.push(parser.current().value.clone());

        if !parser.check_look(&[TokenKind::Comma]) {
            break;
        }
        parser.advance();

        if !parser.check_look(&[TokenKind::Identifier, TokenKind::Ellipsis]) {
            return Err(parser.unexpected(&[TokenKind::Identifier, TokenKind::Ellipsis]));
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let block = parse_block(parser, &[TokenKind::End])?;

    Ok(FuncDecl {
        params,
        is_variadic,
        source: parser.chunk().to_string(),
        block,
        position,
    })
}
