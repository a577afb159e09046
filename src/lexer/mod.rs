//! Lexical analysis module for the front end.
//!
//! This module contains the token model shared with the parser and a
//! reference scanner that converts Cool source text into tokens. It handles:
//!
//! - The `TokenSource` contract the parser consumes
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line/column tracking for diagnostics
//! - Comments, whitespace, and lexical error tokens

pub mod lexer;
pub mod source;
pub mod tokens;
