//! Class and feature rules.
//!
//! These rules own error recovery: an error anywhere inside a feature is
//! reported and parsing resumes at the next feature, an error in a class
//! header resumes at the next class.

use crate::{
    ast::ast::{Attribute, ClassDef, Feature, Formal, Method, Program},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

/// `(class ;)+ EOF`
///
/// Always yields a program; whether it may be used depends on the errors
/// recorded in the parser.
pub fn parse_program(parser: &mut Parser) -> Program {
    let position = parser.current_token().position;

    if !parser.has_tokens() {
        let error = parser.unexpected(TokenKind::Class.describe());
        parser.report(error);
    }

    let mut classes = vec![];
    while parser.has_tokens() {
        let result = parse_class(parser).and_then(|class| {
            parser.expect(TokenKind::Semicolon)?;
            Ok(class)
        });

        match result {
            Ok(class) => classes.push(class),
            Err(error) => {
                parser.report(error);
                parser.recover(0, &[TokenKind::Semicolon, TokenKind::Class]);

                if parser.current_token_kind() == TokenKind::Semicolon {
                    parser.advance();
                }
            }
        }
    }

    Program { classes, position }
}

/// `class TYPE [inherits TYPE] { (feature ;)* }`
pub fn parse_class(parser: &mut Parser) -> Result<ClassDef, Error> {
    let start = parser.expect(TokenKind::Class)?.position;
    let name = parser.expect(TokenKind::Type)?.value;

    let parent = if parser.current_token_kind() == TokenKind::Inherits {
        parser.advance();
        Some(parser.expect(TokenKind::Type)?.value)
    } else {
        None
    };

    parser.expect(TokenKind::OpenCurly)?;
    let body_depth = parser.depth();

    let mut features = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        let result = parse_feature(parser).and_then(|feature| {
            parser.expect(TokenKind::Semicolon)?;
            Ok(feature)
        });

        match result {
            Ok(feature) => features.push(feature),
            Err(error) => {
                parser.report(error);
                parser.recover(body_depth, &[TokenKind::Semicolon, TokenKind::CloseCurly]);

                if parser.current_token_kind() == TokenKind::Semicolon {
                    parser.advance();
                }
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(ClassDef {
        name,
        parent,
        features,
        position: start,
    })
}

/// Methods and attributes both start with an identifier; the token after
/// it decides which one this is.
pub fn parse_feature(parser: &mut Parser) -> Result<Feature, Error> {
    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected(TokenKind::Identifier.describe()));
    }

    match parser.peek_kind() {
        TokenKind::OpenParen => Ok(Feature::Method(parse_method(parser)?)),
        TokenKind::Colon => Ok(Feature::Attribute(parse_attribute(parser)?)),
        _ => {
            parser.advance();
            Err(parser.unexpected("{'(', ':'}"))
        }
    }
}

/// `ID ( [formal (, formal)*] ) : TYPE { expr }`
pub fn parse_method(parser: &mut Parser) -> Result<Method, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut formals = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        formals.push(parse_formal(parser)?);

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            formals.push(parse_formal(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Colon)?;
    let return_type = parser.expect(TokenKind::Type)?.value;

    parser.expect(TokenKind::OpenCurly)?;
    let body = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Method {
        name: name.value,
        formals,
        return_type,
        body,
        position: name.position,
    })
}

/// `ID : TYPE [<- expr]`
pub fn parse_attribute(parser: &mut Parser) -> Result<Attribute, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let type_name = parser.expect(TokenKind::Type)?.value;

    let init = if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Attribute {
        name: name.value,
        type_name,
        init,
        position: name.position,
    })
}

/// `ID : TYPE`
pub fn parse_formal(parser: &mut Parser) -> Result<Formal, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let type_name = parser.expect(TokenKind::Type)?.value;

    Ok(Formal {
        name: name.value,
        type_name,
        position: name.position,
    })
}
