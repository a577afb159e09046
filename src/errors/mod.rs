//! Error types and diagnostics for the front end.
//!
//! This module defines:
//!
//! - Error structures with source position information
//! - Lexical and syntax error variants
//! - The `Diagnostic` line format that pairs an error with its source name
//! - Helpful suggestions attached to some errors

pub mod errors;
