// Execution engine for the calcline interpreter

use crate::interpreter::errors::RuntimeError;
use crate::memory::{Environment, Value};
use crate::parser::ast::*;
use crate::terminal::{InputSource, MockTerminal, OutputSink};

/// Tree-walking interpreter.
///
/// Owns only its I/O collaborators. Variable state lives in an
/// [`Environment`] passed into every call, so one environment can outlive
/// many parsed programs (a REPL keeps reusing the same one).
pub struct Interpreter<O = MockTerminal, I = MockTerminal> {
    /// Receives rendered values from `print`
    pub(crate) output: O,

    /// Supplies lines for `input`
    pub(crate) input: I,
}

impl<O: OutputSink, I: InputSource> Interpreter<O, I> {
    /// Create a new interpreter around an output sink and an input source
    pub fn new(output: O, input: I) -> Self {
        Interpreter { output, input }
    }

    /// Run a parsed program (a top-level `Block`) against `env`.
    ///
    /// Returns the value of the last top-level statement, or `Unit` for an
    /// empty program.
    pub fn run(&mut self, program: &AstNode, env: &mut Environment) -> Result<Value, RuntimeError> {
        self.execute_block(program.statements(), env)
    }

    /// Evaluate any node and return its value
    pub fn evaluate(&mut self, node: &AstNode, env: &mut Environment) -> Result<Value, RuntimeError> {
        match node {
            AstNode::NumberLiteral(n, _) => Ok(Value::Number(*n)),

            AstNode::BooleanLiteral(b, _) => Ok(Value::Bool(*b)),

            AstNode::StringLiteral(s, _) => Ok(Value::Str(s.clone())),

            AstNode::Variable(name, loc) => {
                env.get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        location: *loc,
                    })
            }

            AstNode::BinaryOp {
                op,
                left,
                right,
                location,
            } => self.evaluate_binary_op(*op, left, right, *location, env),

            AstNode::UnaryOp {
                op,
                operand,
                location,
            } => self.evaluate_unary_op(*op, operand, *location, env),

            AstNode::Block { statements, .. } => self.execute_block(statements, env),

            AstNode::Assign {
                name,
                value,
                ..
            } => self.execute_assign(name, value, env),

            AstNode::Delete { name, .. } => {
                env.remove(name);
                Ok(Value::Unit)
            }

            AstNode::Print { value, location } => self.execute_print(value, *location, env),

            AstNode::Input {
                prompt,
                target,
                location,
            } => self.execute_input(prompt.as_deref(), target.as_deref(), *location, env),

            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.execute_if(condition, then_branch, else_branch.as_deref(), env),

            AstNode::While {
                condition, body, ..
            } => self.execute_while(condition, body, env),
        }
    }

    /// Get the output sink (e.g. to inspect a [`MockTerminal`])
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get the input source
    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Take the collaborators back
    pub fn into_parts(self) -> (O, I) {
        (self.output, self.input)
    }
}

impl Default for Interpreter<MockTerminal, MockTerminal> {
    fn default() -> Self {
        Interpreter::new(MockTerminal::new(), MockTerminal::new())
    }
}
