//! Crate-level error type
//!
//! Parsing and evaluation fail with distinct error types. [`Error`] joins
//! them for callers that run source text end to end, such as
//! [`crate::eval_source`] and the command-line driver.

use crate::interpreter::errors::RuntimeError;
use crate::parser::parse::ParseError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Lexical or syntax error; nothing was evaluated
    Parse(ParseError),
    /// Evaluation stopped part way through
    Runtime(RuntimeError),
}

impl Error {
    /// True when evaluation stopped because the input source ran dry.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Error::Runtime(e) if e.is_end_of_input())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
            Error::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Runtime(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Error::Runtime(err)
    }
}
