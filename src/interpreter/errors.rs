//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse errors).
//!
//! All runtime errors abort the current evaluation immediately. Variables
//! already assigned by earlier statements keep their values; there is no
//! rollback. [`RuntimeError::EndOfInput`] is the one exception to "error":
//! it reports that the input source ran dry and a driver should treat it as
//! a normal end of the session.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Undefined variable reference
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Binary operator applied to operand kinds it does not accept
    TypeError {
        operator: String,
        left: &'static str,
        right: &'static str,
        location: SourceLocation,
    },

    /// Unary operator applied to an operand kind it does not accept
    UnaryTypeError {
        operator: String,
        operand: &'static str,
        location: SourceLocation,
    },

    /// Division by zero (integer or float divisor)
    DivisionByZero { location: SourceLocation },

    /// Integer overflow in arithmetic operation
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// The input source signalled end of stream during `input` (a signal, not a real error)
    EndOfInput { location: SourceLocation },

    /// The output sink or input source failed
    Io {
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            RuntimeError::UndefinedVariable { location, .. } => location,
            RuntimeError::TypeError { location, .. } => location,
            RuntimeError::UnaryTypeError { location, .. } => location,
            RuntimeError::DivisionByZero { location } => location,
            RuntimeError::IntegerOverflow { location, .. } => location,
            RuntimeError::EndOfInput { location } => location,
            RuntimeError::Io { location, .. } => location,
        }
    }

    /// True for the end-of-input signal, which drivers treat as termination.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, RuntimeError::EndOfInput { .. })
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UndefinedVariable { name, location } => {
                write!(f, "Undefined variable '{}' at line {}", name, location.line)
            }
            RuntimeError::TypeError {
                operator,
                left,
                right,
                location,
            } => {
                write!(
                    f,
                    "Type error at line {}: unsupported operand kinds for '{}': {} and {}",
                    location.line, operator, left, right
                )
            }
            RuntimeError::UnaryTypeError {
                operator,
                operand,
                location,
            } => {
                write!(
                    f,
                    "Type error at line {}: unsupported operand kind for unary '{}': {}",
                    location.line, operator, operand
                )
            }
            RuntimeError::DivisionByZero { location } => {
                write!(f, "Division by zero at line {}", location.line)
            }
            RuntimeError::IntegerOverflow {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Integer overflow in operation: {} at line {}",
                    operation, location.line
                )
            }
            RuntimeError::EndOfInput { location } => {
                write!(f, "End of input reached at line {}", location.line)
            }
            RuntimeError::Io { message, location } => {
                write!(f, "I/O failure at line {}: {}", location.line, message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
