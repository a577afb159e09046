use crate::{
    ast::expressions::{
        ArithExpr, ArithOp, AssignmentExpr, BlockExpr, BoolExpr, CaseBranch, CaseExpr,
        DispatchExpr, Expr, GroupingExpr, IdentifierExpr, IfExpr, IntExpr, IsVoidExpr, LetExpr,
        LocalBinding, NegateExpr, NewExpr, NotExpr, RelationalExpr, RelationalOp, StringExpr,
        WhileExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

const RELATIONAL_OPERATORS: [TokenKind; 3] =
    [TokenKind::Less, TokenKind::LessEquals, TokenKind::Equals];

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.no_viable_alternative());
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than the caller's level, fold it into lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.no_viable_alternative());
        };

        let power = parser.current_binding_power();
        left = led(parser, left, power)?;
    }

    Ok(left)
}

fn operator_error(token: &Token, expected: &str) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            token: token.quoted(),
            expected: String::from(expected),
        },
        token.position,
    )
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    match token.kind {
        TokenKind::Integer => Ok(Expr::Int(IntExpr {
            value: token.value,
            position: token.position,
        })),
        TokenKind::Bool => Ok(Expr::Bool(BoolExpr {
            value: token.value.eq_ignore_ascii_case("true"),
            position: token.position,
        })),
        TokenKind::String => Ok(Expr::String(StringExpr {
            value: token.value,
            position: token.position,
        })),
        _ => Err(operator_error(&token, "{INT, BOOL, STRING}")),
    }
}

/// A bare identifier, an implicit dispatch `f(...)` or an assignment
/// `x <- e`, told apart by the token after the identifier.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.peek_kind() {
        TokenKind::OpenParen => {
            let name = parser.advance();
            let arguments = parse_arguments(parser)?;

            Ok(Expr::Dispatch(DispatchExpr {
                receiver: None,
                static_type: None,
                method: name.value,
                arguments,
                position: name.position,
            }))
        }
        TokenKind::Assign => {
            let name = parser.advance();
            parser.advance();
            // Right-associative: the value is a full expression.
            let value = parse_expr(parser, BindingPower::Default)?;

            Ok(Expr::Assignment(AssignmentExpr {
                name: name.value,
                value: Box::new(value),
                position: name.position,
            }))
        }
        _ => {
            let name = parser.advance();

            Ok(Expr::Identifier(IdentifierExpr {
                value: name.value,
                position: name.position,
            }))
        }
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Plus => ArithOp::Plus,
        TokenKind::Dash => ArithOp::Minus,
        TokenKind::Star => ArithOp::Times,
        TokenKind::Slash => ArithOp::Divide,
        _ => return Err(operator_error(&operator_token, "{'+', '-', '*', '/'}")),
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Arith(ArithExpr {
        position: left.get_position(),
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_relational_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Less => RelationalOp::Less,
        TokenKind::LessEquals => RelationalOp::LessEquals,
        TokenKind::Equals => RelationalOp::Equals,
        _ => return Err(operator_error(&operator_token, "{'<', '<=', '='}")),
    };

    let right = parse_expr(parser, bp)?;

    if parser.current_token().is_one_of_many(&RELATIONAL_OPERATORS) {
        return Err(Error::new(
            ErrorImpl::NonAssociative {
                token: parser.current_token().quoted(),
            },
            parser.current_token().position,
        ));
    }

    Ok(Expr::Relational(RelationalExpr {
        position: left.get_position(),
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_not_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;
    let inner = parse_expr(parser, BindingPower::Not)?;

    Ok(Expr::Not(NotExpr {
        inner: Box::new(inner),
        position: start,
    }))
}

pub fn parse_isvoid_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;
    let inner = parse_expr(parser, BindingPower::IsVoid)?;

    Ok(Expr::IsVoid(IsVoidExpr {
        inner: Box::new(inner),
        position: start,
    }))
}

pub fn parse_negate_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;
    let inner = parse_expr(parser, BindingPower::Negate)?;

    Ok(Expr::Negate(NegateExpr {
        inner: Box::new(inner),
        position: start,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Grouping(GroupingExpr {
        inner: Box::new(inner),
        position: start,
    }))
}

/// `( [e (, e)*] )`, possibly empty.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(arguments)
}

pub fn parse_dispatch_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let static_type = if parser.current_token_kind() == TokenKind::At {
        parser.advance();
        Some(parser.expect(TokenKind::Type)?.value)
    } else {
        None
    };

    parser.expect(TokenKind::Dot)?;
    let method = parser.expect(TokenKind::Identifier)?.value;
    let arguments = parse_arguments(parser)?;

    Ok(Expr::Dispatch(DispatchExpr {
        position: left.get_position(),
        receiver: Some(Box::new(left)),
        static_type,
        method,
        arguments,
    }))
}

pub fn parse_new_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;
    let type_name = parser.expect(TokenKind::Type)?.value;

    Ok(Expr::New(NewExpr {
        type_name,
        position: start,
    }))
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let then_branch = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Else)?;
    let else_branch = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Fi)?;

    Ok(Expr::If(IfExpr {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
        position: start,
    }))
}

pub fn parse_while_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Loop)?;
    let body = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Pool)?;

    Ok(Expr::While(WhileExpr {
        condition: Box::new(condition),
        body: Box::new(body),
        position: start,
    }))
}

/// `{ e; e; ... }` with at least one expression.
pub fn parse_block_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;

    let mut body = Vec::new();
    loop {
        body.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect(TokenKind::Semicolon)?;

        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Block(BlockExpr {
        body,
        position: start,
    }))
}

fn parse_local_binding(parser: &mut Parser) -> Result<LocalBinding, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let type_name = parser.expect(TokenKind::Type)?.value;

    let init = if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    } else {
        None
    };

    Ok(LocalBinding {
        name: name.value,
        type_name,
        init,
        position: name.position,
    })
}

/// `let b1, b2, ... in body` with at least one binding.
pub fn parse_let_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;

    let mut bindings = vec![parse_local_binding(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        bindings.push(parse_local_binding(parser)?);
    }

    parser.expect(TokenKind::In)?;
    let body = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::Let(LetExpr {
        bindings,
        body: Box::new(body),
        position: start,
    }))
}

fn parse_case_branch(parser: &mut Parser) -> Result<CaseBranch, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let type_name = parser.expect(TokenKind::Type)?.value;
    parser.expect(TokenKind::DArrow)?;
    let body = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(CaseBranch {
        name: name.value,
        type_name,
        body: Box::new(body),
        position: name.position,
    })
}

/// `case e of branch; ... esac` with at least one branch.
pub fn parse_case_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().position;

    let scrutinee = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Of)?;

    let mut branches = vec![parse_case_branch(parser)?];
    while parser.current_token_kind() != TokenKind::Esac {
        branches.push(parse_case_branch(parser)?);
    }

    parser.expect(TokenKind::Esac)?;

    Ok(Expr::Case(CaseExpr {
        scrutinee: Box::new(scrutinee),
        branches,
        position: start,
    }))
}
