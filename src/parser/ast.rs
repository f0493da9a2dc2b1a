// AST (Abstract Syntax Tree) definitions for the calcline language

use crate::memory::value::Number;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical (short-circuit)
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // not x
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Neg => f.write_str("-"),
            UnOp::Not => f.write_str("not"),
        }
    }
}

/// AST nodes representing statements and expressions
///
/// Statements are expressions here: every node evaluates to a value, with
/// `Unit` for the ones that produce nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Block {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },

    // Statements
    Assign {
        name: String,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    Delete {
        name: String,
        location: SourceLocation,
    },
    Print {
        value: Box<AstNode>,
        location: SourceLocation,
    },
    /// Read one line of input. `target` is set by the statement form
    /// (`input name`), which binds the line; the expression form only
    /// yields it.
    Input {
        prompt: Option<String>,
        target: Option<String>,
        location: SourceLocation,
    },
    If {
        condition: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    While {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        location: SourceLocation,
    },

    // Expressions
    NumberLiteral(Number, SourceLocation),
    BooleanLiteral(bool, SourceLocation),
    StringLiteral(String, SourceLocation),
    Variable(String, SourceLocation),
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Block { location, .. }
            | AstNode::Assign { location, .. }
            | AstNode::Delete { location, .. }
            | AstNode::Print { location, .. }
            | AstNode::Input { location, .. }
            | AstNode::If { location, .. }
            | AstNode::While { location, .. }
            | AstNode::BinaryOp { location, .. }
            | AstNode::UnaryOp { location, .. } => *location,
            AstNode::NumberLiteral(_, loc)
            | AstNode::BooleanLiteral(_, loc)
            | AstNode::StringLiteral(_, loc)
            | AstNode::Variable(_, loc) => *loc,
        }
    }

    /// Top-level statements of a program block (a non-block is its own
    /// single statement).
    pub fn statements(&self) -> &[AstNode] {
        match self {
            AstNode::Block { statements, .. } => statements,
            other => std::slice::from_ref(other),
        }
    }

    /// Whether a line-oriented driver should echo this statement's result.
    ///
    /// Statements whose effect is already visible (printing, binding,
    /// looping) are silent. A block echoes according to its last statement.
    pub fn echoes_result(&self) -> bool {
        match self {
            AstNode::Print { .. }
            | AstNode::Assign { .. }
            | AstNode::Delete { .. }
            | AstNode::While { .. } => false,
            AstNode::Input { target, .. } => target.is_none(),
            AstNode::Block { statements, .. } => {
                statements.last().is_some_and(AstNode::echoes_result)
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_echo_rules() {
        let print = AstNode::Print {
            value: Box::new(AstNode::NumberLiteral(Number::Int(1), loc())),
            location: loc(),
        };
        let expr = AstNode::Variable("x".to_string(), loc());
        let bound_input = AstNode::Input {
            prompt: None,
            target: Some("x".to_string()),
            location: loc(),
        };

        assert!(!print.echoes_result());
        assert!(expr.echoes_result());
        assert!(!bound_input.echoes_result());

        let block = AstNode::Block {
            statements: vec![print, expr],
            location: loc(),
        };
        assert!(block.echoes_result());
        assert!(!AstNode::Block {
            statements: Vec::new(),
            location: loc()
        }
        .echoes_result());
    }
}
