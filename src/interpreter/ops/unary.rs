//! Unary operator evaluation

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Environment, Number, Value};
use crate::parser::ast::*;
use crate::terminal::{InputSource, OutputSink};

impl<O: OutputSink, I: InputSource> Interpreter<O, I> {
    pub(crate) fn evaluate_unary_op(
        &mut self,
        op: UnOp,
        operand: &AstNode,
        location: SourceLocation,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let val = self.evaluate(operand, env)?;
        match op {
            UnOp::Neg => negate(&val, location),
            UnOp::Not => Ok(Value::Bool(!val.is_truthy())),
        }
    }
}

fn negate(val: &Value, location: SourceLocation) -> Result<Value, RuntimeError> {
    match val {
        Value::Number(Number::Int(n)) => n
            .checked_neg()
            .map(Value::int)
            .ok_or_else(|| RuntimeError::IntegerOverflow {
                operation: format!("-{}", n),
                location,
            }),
        Value::Number(Number::Float(x)) => Ok(Value::float(-x)),
        _ => Err(RuntimeError::UnaryTypeError {
            operator: UnOp::Neg.to_string(),
            operand: val.kind_name(),
            location,
        }),
    }
}
