//! The boundary between scanning and parsing.
//!
//! The parser only ever pulls classified tokens through [`TokenSource`]; it
//! does not care whether they come from the bundled [`Lexer`](super::lexer::Lexer)
//! or from an already-scanned list.

use std::collections::VecDeque;

use crate::{Position, MK_TOKEN};

use super::tokens::{Token, TokenKind};

/// A supplier of classified tokens.
///
/// Once the `EOF` token has been produced, every further call must produce
/// `EOF` again.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Replays a pre-scanned list of tokens.
pub struct TokenStream {
    tokens: VecDeque<Token>,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_position = tokens
            .last()
            .map(|token| token.position)
            .unwrap_or_else(|| Position::new(1, 1));

        TokenStream {
            tokens: tokens.into(),
            eof: MK_TOKEN!(TokenKind::EOF, String::from("<EOF>"), eof_position),
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.pop_front() {
            Some(token) => {
                if token.kind == TokenKind::EOF {
                    self.eof = token.clone();
                }
                token
            }
            None => self.eof.clone(),
        }
    }
}
