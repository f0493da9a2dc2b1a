use calcline::interpreter::engine::Interpreter;
use calcline::interpreter::errors::RuntimeError;
use calcline::memory::{Environment, Value};
use calcline::parser::parse::Parser;
use calcline::{eval_source, Error};
use std::fs;
use std::path::Path;

fn eval(source: &str) -> Result<Value, Error> {
    let mut env = Environment::new();
    let mut interp = Interpreter::default();
    eval_source(source, &mut env, &mut interp)
}

fn runtime_error(source: &str) -> RuntimeError {
    match eval(source) {
        Err(Error::Runtime(e)) => e,
        other => panic!("Expected runtime error for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_arithmetic_demo_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/arithmetic.calc");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let mut parser = Parser::new(&source);
    let program = parser.parse_program().expect("Parsing failed");

    let mut env = Environment::new();
    let mut interpreter = Interpreter::default();
    interpreter.run(&program, &mut env).expect("Execution failed");

    let output = interpreter.output().get_output();
    println!("Interpreter output:\n{}", output.join("\n"));

    assert_eq!(
        output,
        vec!["9", "5", "14", "3.5", "1.5", "-7", "sum: done", "true", "3.5"]
    );
}

#[test]
fn test_precedence() {
    assert_eq!(eval("2 + 3 * 4").unwrap(), Value::int(14));
    assert_eq!(eval("(2 + 3) * 4").unwrap(), Value::int(20));
    assert_eq!(eval("10 - 4 - 3").unwrap(), Value::int(3));
    assert_eq!(eval("-2 * 3").unwrap(), Value::int(-6));
    assert_eq!(eval("1 + 2 < 4 and not false").unwrap(), Value::Bool(true));
}

#[test]
fn test_division() {
    assert_eq!(eval("5 / 2").unwrap(), Value::float(2.5));
    assert_eq!(eval("6 / 3").unwrap(), Value::float(2.0));
    assert_eq!(eval("6 / 3").unwrap().to_string(), "2.0");

    assert!(matches!(
        runtime_error("5 / 0"),
        RuntimeError::DivisionByZero { .. }
    ));
    assert!(matches!(
        runtime_error("1 / 0.0"),
        RuntimeError::DivisionByZero { .. }
    ));
}

#[test]
fn test_string_operators() {
    assert_eq!(eval("\"ab\" + \"cd\"").unwrap(), Value::from("abcd"));

    match runtime_error("\"ab\" - \"cd\"") {
        RuntimeError::TypeError { operator, .. } => assert_eq!(operator, "-"),
        other => panic!("Expected type error, got {:?}", other),
    }
    assert!(matches!(
        runtime_error("\"n\" + 1"),
        RuntimeError::TypeError { .. }
    ));
    assert!(matches!(
        runtime_error("-\"n\""),
        RuntimeError::UnaryTypeError { .. }
    ));
}

#[test]
fn test_cross_kind_equality() {
    assert_eq!(eval("1 == 1.0").unwrap(), Value::Bool(true));
    assert_eq!(eval("1 == \"1\"").unwrap(), Value::Bool(false));
    assert_eq!(eval("true != 1").unwrap(), Value::Bool(true));
    assert!(matches!(
        runtime_error("true < 1"),
        RuntimeError::TypeError { .. }
    ));
}

#[test]
fn test_short_circuit_skips_undefined() {
    assert_eq!(eval("false and missing").unwrap(), Value::Bool(false));
    assert_eq!(eval("true or missing").unwrap(), Value::Bool(true));
    assert!(matches!(
        runtime_error("true and missing"),
        RuntimeError::UndefinedVariable { .. }
    ));
}

#[test]
fn test_integer_overflow_is_an_error() {
    assert!(matches!(
        runtime_error("9223372036854775807 + 1"),
        RuntimeError::IntegerOverflow { .. }
    ));
}

#[test]
fn test_number_literals_render_canonically() {
    assert_eq!(eval("3.50").unwrap().to_string(), "3.5");
    assert_eq!(eval("42").unwrap().to_string(), "42");
    assert_eq!(eval("0.25 + 0.25").unwrap().to_string(), "0.5");
}
