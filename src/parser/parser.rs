//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry point.
//! The parser pulls tokens from a [`TokenSource`] through a two-token
//! window (the current token and one token of lookahead) and uses
//! NUD/LED handler tables for expression parsing, as set up in
//! [`lookups`](super::lookups).
//!
//! Errors never abort the parse. Each one is recorded and the grammar rules
//! resynchronize on `;`/`}` boundaries, tracked with a brace-depth counter
//! over every consumed token.

use std::{
    collections::{HashMap, HashSet},
    mem,
};

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        source::TokenSource,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup,
    },
    program::parse_program,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Where tokens come from
    source: Box<dyn TokenSource>,
    /// The token being looked at
    current: Token,
    /// The token after `current`
    next: Token,
    /// Number of `{` consumed and not yet closed
    depth: usize,
    /// Diagnostics collected so far
    errors: Vec<Error>,
    /// Set by a reported error, cleared by the next successful `expect`
    in_recovery: bool,
    /// Position of the last syntax error kept
    last_reported: Option<Position>,
    /// Positions of tokens that directly follow a lexical error token
    after_lexical: HashSet<Position>,
    /// Lookup table for null denotation (prefix and primary) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix and postfix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser and fills its lookahead window.
    ///
    /// Lookup tables start empty; [`parse`] registers them.
    pub fn new(source: Box<dyn TokenSource>) -> Self {
        let mut source = source;
        let mut errors = vec![];
        let mut after_lexical = HashSet::new();
        let current = pull(source.as_mut(), &mut errors, &mut after_lexical);
        let next = pull(source.as_mut(), &mut errors, &mut after_lexical);

        Parser {
            source,
            current,
            next,
            depth: 0,
            errors,
            in_recovery: false,
            last_reported: None,
            after_lexical,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.next.kind
    }

    /// Advances to the next token and returns the one that was current.
    pub fn advance(&mut self) -> Token {
        let incoming = pull(self.source.as_mut(), &mut self.errors, &mut self.after_lexical);
        let following = mem::replace(&mut self.next, incoming);
        let token = mem::replace(&mut self.current, following);

        match token.kind {
            TokenKind::OpenCurly => self.depth += 1,
            TokenKind::CloseCurly => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }

        token
    }

    /// Expects a token of the specified kind and consumes it.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `UnexpectedToken` error at the current token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            return Err(self.unexpected(expected_kind.describe()));
        }

        self.in_recovery = false;
        Ok(self.advance())
    }

    /// Builds a mismatch error at the current token.
    pub fn unexpected(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current.quoted(),
                expected: String::from(expected),
            },
            self.current.position,
        )
    }

    /// Builds an error for a token that cannot start an expression.
    pub fn no_viable_alternative(&self) -> Error {
        Error::new(
            ErrorImpl::NoViableAlternative {
                token: self.current.quoted(),
            },
            self.current.position,
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Records an error and keeps going.
    ///
    /// Until a token is matched again, further errors are consequences of
    /// this one and are dropped. So are errors at a position already
    /// reported, or at the token right after a lexical error.
    pub fn report(&mut self, error: Error) {
        let position = *error.get_position();
        let repeated =
            self.last_reported == Some(position) || self.after_lexical.contains(&position);

        if self.in_recovery || repeated {
            debug!(position = %position, "suppressed: {}", error);
            self.in_recovery = true;
            return;
        }

        debug!(position = %position, "{}", error);
        self.in_recovery = true;
        self.last_reported = Some(position);
        self.errors.push(error);
    }

    /// Skips tokens until one of `stops` is current at brace depth `depth`
    /// or shallower, or until EOF. The stop token is not consumed.
    pub fn recover(&mut self, depth: usize, stops: &[TokenKind]) {
        let mut skipped = 0;

        while self.has_tokens() && !(self.depth <= depth && stops.contains(&self.current.kind)) {
            self.advance();
            skipped += 1;
        }

        debug!(skipped, resumed_at = %self.current.position, "resynchronized");
    }

    /// Returns the binding power of the current token when used as an
    /// infix or postfix operator.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current.kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix/postfix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix/primary) handler for a token.
    ///
    /// Unlike LEDs this does not touch the binding power table, so a token
    /// may be both a prefix and an infix operator (`-`).
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Consumes the parser, yielding its diagnostics ordered by position.
    pub fn into_errors(self) -> Vec<Error> {
        let mut errors = self.errors;
        errors.sort_by_key(|error| *error.get_position());
        errors
    }
}

/// Pulls the next grammar token, reporting and dropping lexical error
/// tokens on the way. The position of a token that follows a dropped one
/// is remembered in `after_lexical`.
fn pull(
    source: &mut dyn TokenSource,
    errors: &mut Vec<Error>,
    after_lexical: &mut HashSet<Position>,
) -> Token {
    let mut dropped = false;

    loop {
        let token = source.next_token();
        if token.kind != TokenKind::Error {
            if dropped {
                after_lexical.insert(token.position);
            }
            return token;
        }

        debug!(position = %token.position, text = %token.value, "lexical error token");
        errors.push(Error::new(ErrorImpl::Lexical { text: token.value }, token.position));
        dropped = true;
    }
}

/// Parses one token stream into a [`Program`].
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses classes until EOF.
///
/// # Returns
///
/// The program when the stream was free of lexical and syntax errors,
/// otherwise every diagnostic found, ordered by position. A tree is never
/// returned alongside errors.
pub fn parse(source: impl TokenSource + 'static) -> Result<Program, Vec<Error>> {
    let mut parser = Parser::new(Box::new(source));
    create_token_lookups(&mut parser);

    let program = parse_program(&mut parser);
    let errors = parser.into_errors();

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}
