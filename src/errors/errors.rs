use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A single problem found while reading one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::Lexical { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Lexical { .. } => "Lexical",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoViableAlternative { .. } => "NoViableAlternative",
            ErrorImpl::NonAssociative { .. } => "NonAssociative",
        }
    }

    /// The label a diagnostic line carries before the message.
    pub fn get_category(&self) -> &str {
        if self.is_lexical() {
            "Lexical error"
        } else {
            "Syntax error"
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::Lexical { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, .. } if expected == "';'" => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::None,
            ErrorImpl::NoViableAlternative { .. } => {
                ErrorTip::Suggestion(String::from("an expression was expected here"))
            }
            ErrorImpl::NonAssociative { .. } => ErrorTip::Suggestion(String::from(
                "wrap one of the comparisons in parentheses",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.get_category(), self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("{text}")]
    Lexical { text: String },
    #[error("mismatched input {token} expecting {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("no viable alternative at input {token}")]
    NoViableAlternative { token: String },
    #[error("relational operators are non-associative, found {token}")]
    NonAssociative { token: String },
}

/// An [`Error`] tagged with the name of the source it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub source: String,
    pub error: Error,
}

impl Diagnostic {
    pub fn new(source: impl Into<String>, error: Error) -> Self {
        Diagnostic {
            source: source.into(),
            error,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "\"{}\", line {}, {}",
            self.source,
            self.error.get_position(),
            self.error
        )
    }
}
