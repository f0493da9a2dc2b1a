//! Statement execution
//!
//! Adds `impl Interpreter` methods for blocks, bindings, conditionals and
//! the two I/O statements. Every statement evaluates to a value: `print`
//! and assignment yield the value they handled, `del` yields `Unit`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Environment, Value};
use crate::parser::ast::{AstNode, SourceLocation};
use crate::terminal::{InputSource, OutputSink};

impl<O: OutputSink, I: InputSource> Interpreter<O, I> {
    /// Execute statements in order; the last one's value is the block's value.
    pub(crate) fn execute_block(
        &mut self,
        statements: &[AstNode],
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let mut result = Value::Unit;
        for stmt in statements {
            result = self.evaluate(stmt, env)?;
        }
        Ok(result)
    }

    pub(crate) fn execute_assign(
        &mut self,
        name: &str,
        value: &AstNode,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let val = self.evaluate(value, env)?;
        env.set(name, val.clone());
        Ok(val)
    }

    pub(crate) fn execute_print(
        &mut self,
        value: &AstNode,
        location: SourceLocation,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let val = self.evaluate(value, env)?;
        self.output
            .write_value(&val.to_string(), location)
            .map_err(|e| RuntimeError::Io {
                message: e.to_string(),
                location,
            })?;
        Ok(val)
    }

    /// Block on the input source for one line. The line is stored verbatim;
    /// with a `target` it is also bound in the environment.
    pub(crate) fn execute_input(
        &mut self,
        prompt: Option<&str>,
        target: Option<&str>,
        location: SourceLocation,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let line = self
            .input
            .read_line(prompt)
            .map_err(|e| RuntimeError::Io {
                message: e.to_string(),
                location,
            })?
            .ok_or(RuntimeError::EndOfInput { location })?;

        let val = Value::Str(line);
        if let Some(name) = target {
            env.set(name, val.clone());
        }
        Ok(val)
    }

    /// Only the chosen branch runs. A false condition with no `else` is `Unit`.
    pub(crate) fn execute_if(
        &mut self,
        condition: &AstNode,
        then_branch: &AstNode,
        else_branch: Option<&AstNode>,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        if self.evaluate(condition, env)?.is_truthy() {
            self.evaluate(then_branch, env)
        } else if let Some(else_branch) = else_branch {
            self.evaluate(else_branch, env)
        } else {
            Ok(Value::Unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::interpreter::errors::RuntimeError;
    use crate::memory::{Environment, Value};
    use crate::parser::parse::Parser;
    use crate::terminal::MockTerminal;

    fn run_with(
        source: &str,
        input: MockTerminal,
        env: &mut Environment,
    ) -> (Result<Value, RuntimeError>, Interpreter) {
        let program = Parser::new(source).parse_program().unwrap();
        let mut interp = Interpreter::new(MockTerminal::new(), input);
        let result = interp.run(&program, env);
        (result, interp)
    }

    #[test]
    fn test_assignment_returns_value() {
        let mut env = Environment::new();
        let (result, _) = run_with("x = 2 * 21", MockTerminal::new(), &mut env);

        assert_eq!(result.unwrap(), Value::int(42));
        assert_eq!(env.get("x"), Some(&Value::int(42)));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut env = Environment::new();
        let (result, _) = run_with("del nothing", MockTerminal::new(), &mut env);
        assert_eq!(result.unwrap(), Value::Unit);
    }

    #[test]
    fn test_print_renders_and_returns() {
        let mut env = Environment::new();
        let (result, interp) = run_with(
            "print 7\nprint 5 / 2\nprint 4 / 2\nprint not 0\nprint \"a\" + \"b\"",
            MockTerminal::new(),
            &mut env,
        );

        assert_eq!(result.unwrap(), Value::from("ab"));
        assert_eq!(
            interp.output().get_output(),
            vec!["7", "2.5", "2.0", "true", "ab"]
        );
        assert_eq!(interp.output().lines[1].location.line, 2);
    }

    #[test]
    fn test_input_binds_raw_line() {
        let mut env = Environment::new();
        let (result, interp) = run_with(
            "input name",
            MockTerminal::with_input(["  Ada Lovelace "]),
            &mut env,
        );

        assert_eq!(result.unwrap(), Value::from("  Ada Lovelace "));
        assert_eq!(env.get("name"), Some(&Value::from("  Ada Lovelace ")));
        assert_eq!(interp.input().prompts(), ["name> ".to_string()]);
    }

    #[test]
    fn test_input_expression_with_prompt() {
        let mut env = Environment::new();
        let (result, interp) = run_with(
            "age = input(\"Age? \")",
            MockTerminal::with_input(["41"]),
            &mut env,
        );

        // Input is always a string; no numeric conversion happens
        assert_eq!(result.unwrap(), Value::from("41"));
        assert_eq!(env.get("age"), Some(&Value::from("41")));
        assert_eq!(interp.input().prompts(), ["Age? ".to_string()]);
    }

    #[test]
    fn test_input_end_of_stream_is_signal() {
        let mut env = Environment::new();
        let (result, _) = run_with("x = 1\ninput\nx = 2", MockTerminal::new(), &mut env);

        let err = result.unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(env.get("x"), Some(&Value::int(1)));
    }

    #[test]
    fn test_if_runs_only_chosen_branch() {
        let mut env = Environment::new();
        let (result, _) = run_with(
            "if 1 < 2 then a = \"yes\" else b = \"no\"",
            MockTerminal::new(),
            &mut env,
        );

        assert_eq!(result.unwrap(), Value::from("yes"));
        assert!(env.contains("a"));
        assert!(!env.contains("b"));
    }

    #[test]
    fn test_if_truthiness_of_strings() {
        let mut env = Environment::new();
        let (result, _) = run_with(
            "if \"\" then 1 else 2",
            MockTerminal::new(),
            &mut env,
        );
        assert_eq!(result.unwrap(), Value::int(2));
    }
}
