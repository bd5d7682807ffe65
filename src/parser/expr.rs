use crate::{
    ast::expressions::{BinaryOp, Expr, LiteralKind, MemberOp, PostfixOp, StringPart, UnaryOp},
    errors::errors::Error,
    lexer::tokens::{LiteralValue, Token, TokenKind},
};

use super::{
    lookups::{binary_operator, BindingPower, NAME_TOKENS},
    parser::Parser,
};

/// Parses a full expression, starting at the loosest level (`?:`).
pub fn parse_expression(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::LOWEST)
}

/// One precedence level: a left-associative loop over the level's operators.
pub fn parse_binary_expr(parser: &mut Parser, level: BindingPower) -> Result<Expr, Error> {
    let mut left = parse_operand(parser, level)?;

    while let Some(op) = match_binary_operator(parser, level)? {
        let right = parse_operand(parser, level)?;
        left = Expr::binary(op, left, right);
    }

    Ok(left)
}

fn parse_operand(parser: &mut Parser, level: BindingPower) -> Result<Expr, Error> {
    match level.tighter() {
        Some(next) => parse_binary_expr(parser, next),
        None => parse_unary_expr(parser),
    }
}

/// Consumes the operator at the current position if it binds at `level`.
fn match_binary_operator(
    parser: &mut Parser,
    level: BindingPower,
) -> Result<Option<BinaryOp>, Error> {
    let kind = parser.peek_kind(0)?;

    if level == BindingPower::Relational {
        match kind {
            // `! in` / `! is` written apart
            TokenKind::Not => {
                let op = match parser.peek_kind(1)? {
                    TokenKind::In => BinaryOp::NotIn,
                    TokenKind::Is => BinaryOp::NotIs,
                    _ => return Ok(None),
                };
                parser.next()?;
                parser.next()?;
                return Ok(Some(op));
            }
            TokenKind::As => {
                parser.next()?;
                if parser.accept(TokenKind::Question)? {
                    return Ok(Some(BinaryOp::AsSafe));
                }
                return Ok(Some(BinaryOp::As));
            }
            _ => {}
        }
    }

    let Some(op) = binary_operator(kind, level) else {
        return Ok(None);
    };
    parser.next()?;
    Ok(Some(op))
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let prefix = match parser.peek_kind(0)? {
        TokenKind::Not => Some(UnaryOp::Not),
        TokenKind::Dash => Some(UnaryOp::Negate),
        _ => None,
    };

    if let Some(op) = prefix {
        parser.next()?;
        let operand = parse_unary_expr(parser)?;
        return Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        });
    }

    let operand = parse_primary_expr(parser)?;

    let op = match parser.peek_kind(0)? {
        TokenKind::PlusPlus => PostfixOp::Increment,
        TokenKind::MinusMinus => PostfixOp::Decrement,
        _ => return Ok(operand),
    };
    parser.next()?;

    Ok(Expr::Postfix {
        op,
        operand: Box::new(operand),
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.peek(0)?.clone();

    match token.kind {
        TokenKind::IntLiteral | TokenKind::FloatLiteral | TokenKind::CharLiteral => {
            parser.next()?;
            let kind = match token.kind {
                TokenKind::IntLiteral => LiteralKind::Int,
                TokenKind::FloatLiteral => LiteralKind::Float,
                _ => LiteralKind::Char,
            };

            Ok(Expr::Literal {
                kind,
                text: token.value,
                value: token.literal,
            })
        }
        TokenKind::StringStart => parse_string_expr(parser),
        TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::SoftKeyword => {
            parser.next()?;
            parse_access_chain(parser, Expr::identifier(token.value))
        }
        TokenKind::OpenParen => {
            parser.next()?;
            let inner = parse_expression(parser)?;
            parser.expect(TokenKind::CloseParen, "expected ')' to close expression")?;
            parse_access_chain(parser, inner)
        }
        TokenKind::EOF => {
            parser.error_at(&token, "unexpected end of input in expression");
            Ok(error_expr(&token))
        }
        _ => {
            parser.next()?;
            parser.error_at(&token, "invalid primary expression");
            Ok(error_expr(&token))
        }
    }
}

fn error_expr(token: &Token) -> Expr {
    Expr::Error {
        token: token.value.clone(),
        position: token.position(),
    }
}

/// Extends `node` with calls and member accesses for as long as they follow.
fn parse_access_chain(parser: &mut Parser, mut node: Expr) -> Result<Expr, Error> {
    loop {
        match parser.peek_kind(0)? {
            TokenKind::OpenParen => {
                parser.next()?;
                let args = parse_call_args(parser)?;
                node = Expr::Call {
                    callee: Box::new(node),
                    args,
                };
            }
            kind @ (TokenKind::Dot | TokenKind::SafeCall | TokenKind::NotNull) => {
                parser.next()?;
                let op = match kind {
                    TokenKind::Dot => MemberOp::Dot,
                    TokenKind::SafeCall => MemberOp::SafeCall,
                    _ => MemberOp::NotNull,
                };

                // `x!!.y` lexes as `!!` then `.`; both belong to one access
                if op == MemberOp::NotNull {
                    parser.accept(TokenKind::Dot)?;
                }

                if !parser.check_any(&NAME_TOKENS)? {
                    parser.error_here(format!("expected member name after '{}'", op))?;
                    parser.synchronize()?;
                    break;
                }

                let member = parser.next()?.value;
                node = Expr::Member {
                    target: Box::new(node),
                    op,
                    member,
                };
            }
            _ => break,
        }
    }

    Ok(node)
}

fn parse_call_args(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut args = vec![];

    if !parser.check(TokenKind::CloseParen)? {
        loop {
            args.push(parse_expression(parser)?);
            if !parser.accept(TokenKind::Comma)? {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "expected ')' after call arguments")?;
    Ok(args)
}

/// Reassembles the STRING_START .. STRING_END run into one node.
fn parse_string_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.next()?;
    let mut parts = vec![];

    while !parser.check_any(&[TokenKind::StringEnd, TokenKind::EOF])? {
        let token = parser.next()?;

        match token.kind {
            TokenKind::StringText => {
                let text = match token.literal {
                    Some(LiteralValue::Text(text)) => text,
                    _ => token.value,
                };
                parts.push(StringPart::Text(text));
            }
            TokenKind::StringInterpId => parts.push(StringPart::InterpId(token.value)),
            TokenKind::StringInterpStart => {
                if parser.check(TokenKind::StringInterpExpr)? {
                    let expr = parser.next()?;
                    parts.push(StringPart::InterpExpr(expr.value));
                }

                if !parser.accept(TokenKind::StringInterpEnd)? {
                    parser.error_here("expected '}' to close interpolation")?;
                    parser.synchronize()?;
                }
            }
            _ => parts.push(StringPart::Unknown(token.value)),
        }
    }

    parser.expect(TokenKind::StringEnd, "expected end of string")?;
    Ok(Expr::String { parts })
}
