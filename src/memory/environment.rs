//! Global variable environment
//!
//! A single flat mapping from variable name to [`Value`]. There are no nested
//! scopes and no shadowing: `Assign` creates or overwrites, `Delete` removes,
//! and a lookup of a missing name is the caller's error to report.
//!
//! One environment lives for a whole program run. A line-oriented driver can
//! keep reusing the same environment across separately parsed units so that
//! variables persist between them.

use super::value::Value;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Create or overwrite a variable
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Remove a variable, returning its last value if it existed
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variable names in sorted order (the map itself is unordered)
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut env = Environment::new();
        env.set("x", Value::int(1));
        env.set("x", Value::from("one"));

        assert_eq!(env.len(), 1);
        assert_eq!(env.get("x"), Some(&Value::from("one")));
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut env = Environment::new();
        assert!(env.remove("ghost").is_none());

        env.set("x", Value::Bool(true));
        assert_eq!(env.remove("x"), Some(Value::Bool(true)));
        assert!(!env.contains("x"));
        assert!(env.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let mut env = Environment::new();
        env.set("zeta", Value::Unit);
        env.set("alpha", Value::Unit);
        env.set("mid", Value::Unit);

        assert_eq!(env.names(), vec!["alpha", "mid", "zeta"]);
    }
}
