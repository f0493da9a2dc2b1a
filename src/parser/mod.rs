//! calcline source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens), pulled lazily
//! - [`parse`]: Parser struct, error type and token buffering
//! - [`ast`]: AST node definitions
//!
//! Statement and expression productions live in the private `statements`
//! and `expressions` modules as further `impl Parser` blocks.
//!
//! # Parser Implementation
//!
//! Hand-written predictive recursive descent parser, one method per
//! precedence level. No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod expressions;
mod statements;
