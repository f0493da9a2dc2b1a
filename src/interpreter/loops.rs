//! Loop statement execution (`while`).
//!
//! There is no `break` or `continue` and no iteration bound: a condition
//! that never turns falsy loops forever.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Environment, Value};
use crate::parser::ast::AstNode;
use crate::terminal::{InputSource, OutputSink};

impl<O: OutputSink, I: InputSource> Interpreter<O, I> {
    /// Executes a `while condition body` loop.
    ///
    /// The condition is re-evaluated by truthiness before each iteration.
    /// The loop itself evaluates to `Unit`.
    pub(crate) fn execute_while(
        &mut self,
        condition: &AstNode,
        body: &AstNode,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        while self.evaluate(condition, env)?.is_truthy() {
            self.evaluate(body, env)?;
        }
        Ok(Value::Unit)
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::memory::{Environment, Value};
    use crate::parser::parse::Parser;

    fn run(source: &str, env: &mut Environment) -> Interpreter {
        let program = Parser::new(source).parse_program().unwrap();
        let mut interp = Interpreter::default();
        interp.run(&program, env).unwrap();
        interp
    }

    #[test]
    fn test_counting_loop_terminates() {
        let mut env = Environment::new();
        run("i = 0 while i < 3 then i = i + 1", &mut env);
        assert_eq!(env.get("i"), Some(&Value::int(3)));
    }

    #[test]
    fn test_block_body() {
        let mut env = Environment::new();
        let interp = run(
            "i = 0\nsum = 0\nwhile i < 4 {\n  i = i + 1\n  sum = sum + i\n  print sum\n}",
            &mut env,
        );

        assert_eq!(env.get("sum"), Some(&Value::int(10)));
        assert_eq!(interp.output().get_output(), vec!["1", "3", "6", "10"]);
    }

    #[test]
    fn test_false_condition_never_runs_body() {
        let mut env = Environment::new();
        run("while false then touched = true", &mut env);
        assert!(!env.contains("touched"));
    }

    #[test]
    fn test_loop_value_is_unit() {
        let mut env = Environment::new();
        let program = Parser::new("n = 2 while n then n = n - 1").parse_program().unwrap();
        let result = Interpreter::default().run(&program, &mut env).unwrap();

        assert_eq!(result, Value::Unit);
        assert_eq!(env.get("n"), Some(&Value::int(0)));
    }
}
