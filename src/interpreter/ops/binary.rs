//! Binary operator evaluation
//!
//! `and` / `or` short-circuit: the right operand is evaluated only when the
//! left one does not already decide the result. Every other operator
//! evaluates left then right, then dispatches on the operand kinds.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Environment, Number, Value};
use crate::parser::ast::{AstNode, BinOp, SourceLocation};
use crate::terminal::{InputSource, OutputSink};
use std::cmp::Ordering;

impl<O: OutputSink, I: InputSource> Interpreter<O, I> {
    pub(crate) fn evaluate_binary_op(
        &mut self,
        op: BinOp,
        left: &AstNode,
        right: &AstNode,
        location: SourceLocation,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::And | BinOp::Or => {
                let left_val = self.evaluate(left, env)?;
                // `false and _` and `true or _` are decided by the left operand
                if left_val.is_truthy() == (op == BinOp::Or) {
                    return Ok(Value::Bool(left_val.is_truthy()));
                }
                let right_val = self.evaluate(right, env)?;
                apply_binary(op, &left_val, &right_val, location)
            }
            _ => {
                let left_val = self.evaluate(left, env)?;
                let right_val = self.evaluate(right, env)?;
                apply_binary(op, &left_val, &right_val, location)
            }
        }
    }
}

/// Apply a non-short-circuit binary operator to two evaluated operands
pub(crate) fn apply_binary(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    match op {
        BinOp::Add => match (left, right) {
            (Value::Str(a), Value::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::Str(joined))
            }
            _ => arithmetic(op, left, right, location),
        },
        BinOp::Sub | BinOp::Mul | BinOp::Div => arithmetic(op, left, right, location),
        BinOp::Eq => Ok(Value::Bool(left.loose_eq(right))),
        BinOp::Ne => Ok(Value::Bool(!left.loose_eq(right))),
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            let ordering = compare_values(op, left, right, location)?;
            let result = match (op, ordering) {
                // NaN compares false against everything
                (_, None) => false,
                (BinOp::Lt, Some(ord)) => ord == Ordering::Less,
                (BinOp::Le, Some(ord)) => ord != Ordering::Greater,
                (BinOp::Gt, Some(ord)) => ord == Ordering::Greater,
                (_, Some(ord)) => ord != Ordering::Less,
            };
            Ok(Value::Bool(result))
        }
        // Reached only once the left operand failed to decide the result
        BinOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

fn type_error(op: BinOp, left: &Value, right: &Value, location: SourceLocation) -> RuntimeError {
    RuntimeError::TypeError {
        operator: op.symbol().to_string(),
        left: left.kind_name(),
        right: right.kind_name(),
        location,
    }
}

/// Ordering for `< <= > >=`: number/number or string/string only
fn compare_values(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Option<Ordering>, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp_num(*b)),
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        _ => Err(type_error(op, left, right, location)),
    }
}

/// `+ - * /` on two numbers. Int op int stays int (checked), except `/`
/// which always yields a float. Any float operand promotes to float.
#[inline]
fn arithmetic(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(type_error(op, left, right, location));
    };

    if op == BinOp::Div {
        if b.is_zero() {
            return Err(RuntimeError::DivisionByZero { location });
        }
        return Ok(Value::float(a.as_f64() / b.as_f64()));
    }

    let result = match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            let checked = match op {
                BinOp::Add => x.checked_add(y),
                BinOp::Sub => x.checked_sub(y),
                _ => x.checked_mul(y),
            };
            checked
                .map(Number::Int)
                .ok_or_else(|| RuntimeError::IntegerOverflow {
                    operation: format!("{} {} {}", x, op, y),
                    location,
                })?
        }
        (a, b) => {
            let (x, y) = (a.as_f64(), b.as_f64());
            Number::Float(match op {
                BinOp::Add => x + y,
                BinOp::Sub => x - y,
                _ => x * y,
            })
        }
    };

    Ok(Value::Number(result))
}
