//! # Introduction
//!
//! calcline parses and executes a small dynamically typed statement
//! language: numbers, booleans and strings, global variables, `if`/`while`,
//! and `print`/`input` statements.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → (value, environment, I/O)
//! ```
//!
//! 1. [`parser`]: tokenises the source lazily and builds an AST.
//! 2. [`interpreter`]: walks the AST, producing values and side effects.
//! 3. [`memory`]: tagged [`memory::Value`]s and the global
//!    [`memory::Environment`].
//! 4. [`terminal`]: the output sink and input source behind `print` and
//!    `input`, with a [`terminal::MockTerminal`] for tests.
//!
//! ## Example
//!
//! ```
//! use calcline::interpreter::engine::Interpreter;
//! use calcline::memory::{Environment, Value};
//!
//! let mut env = Environment::new();
//! let mut interp = Interpreter::default();
//!
//! calcline::eval_source("x = 5", &mut env, &mut interp).unwrap();
//! let result = calcline::eval_source("print x + 1", &mut env, &mut interp).unwrap();
//!
//! assert_eq!(result, Value::int(6));
//! assert_eq!(interp.output().get_output(), vec!["6"]);
//! ```

pub mod error;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod terminal;

pub use error::Error;

use interpreter::engine::Interpreter;
use memory::{Environment, Value};
use parser::parse::Parser;
use terminal::{InputSource, OutputSink};

/// Parse `source` as a whole program and evaluate it against `env`.
///
/// Nothing is evaluated if parsing fails. On a runtime error, variables
/// assigned by earlier statements keep their values.
pub fn eval_source<O: OutputSink, I: InputSource>(
    source: &str,
    env: &mut Environment,
    interp: &mut Interpreter<O, I>,
) -> Result<Value, Error> {
    let program = Parser::new(source).parse_program()?;
    Ok(interp.run(&program, env)?)
}
