//! Memory model for the interpreter
//!
//! This module provides the core runtime state abstractions:
//! - [`value`]: Runtime value representation (Number, Bool, Str, Unit)
//! - [`environment`]: The single global name → value mapping
//!
//! There is no stack or heap: every variable is global and lives in the
//! [`environment::Environment`] until it is deleted or the run ends.

pub mod environment;
pub mod value;

pub use environment::Environment;
pub use value::{Number, Value};
