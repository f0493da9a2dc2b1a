//! calcline execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The [`engine::Interpreter`] and its node dispatch
//! - [`errors`]: Runtime error types
//!
//! Statement, loop and operator evaluation live in private modules that add
//! further `impl Interpreter` blocks.
//!
//! # Execution Model
//!
//! The interpreter walks the AST depth-first. Variable state lives in a
//! single [`crate::memory::Environment`] passed by reference into every
//! call; output and input go through the collaborators in
//! [`crate::terminal`].

pub mod engine;
pub mod errors;

mod loops;
mod ops;
mod statements;
