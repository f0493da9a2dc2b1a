//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the single runtime representation
//! shared by the lexer (literal payloads), the evaluator and the environment.
//!
//! # Value Kinds
//!
//! - [`Value::Number`]: an integer or a double-precision float ([`Number`])
//! - [`Value::Bool`]: `true` / `false`
//! - [`Value::Str`]: an owned string
//! - [`Value::Unit`]: the result of statements that produce nothing
//!
//! # Truthiness
//!
//! `Unit`, `false`, numeric zero (`0` and `0.0`) and the empty string are
//! falsy. Every other value is truthy.

use std::cmp::Ordering;
use std::fmt;

/// Numeric payload: integer storage unless the literal had a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Widen to `f64` for mixed arithmetic and comparisons.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(x) => x == 0.0,
        }
    }

    /// Numeric comparison with int/float promotion. `None` only for NaN.
    pub fn partial_cmp_num(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    /// Numeric equality with int/float promotion (`1 == 1.0`).
    pub fn num_eq(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            // Whole floats keep a trailing ".0" so they stay distinguishable from ints
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Number(Number),
    Bool(bool),
    Str(String),
    #[default]
    Unit,
}

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }

    pub fn float(x: f64) -> Self {
        Value::Number(Number::Float(x))
    }

    /// Name of this value's kind, as used in type error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Unit => "unit",
        }
    }

    /// Coerce to a boolean for `if`, `while`, `and`, `or` and `not`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_zero(),
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Unit => false,
        }
    }

    /// Get the numeric payload, returns None if not a Number
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    /// Language-level equality: same kind and same value.
    ///
    /// Values of different kinds are never equal; this never fails.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.num_eq(*b),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => f.write_str(s),
            Value::Unit => f.write_str("none"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
