//! Statement parsing implementation
//!
//! This module handles parsing of all calcline statement forms:
//!
//! - Control flow: `if ... then ... [else ...]`, `while ... [then] ...`
//! - Bindings: `name = expr`, `del name` (and the older `name = del`)
//! - I/O: `print expr`, `input [name]`
//! - Blocks: `{ ... }`
//! - Expression statements
//!
//! # Grammar
//!
//! ```text
//! statement ::= if_stmt | while_stmt | del_stmt | assign_stmt
//!             | print_stmt | input_stmt | expr
//! if_stmt   ::= 'if' expr 'then' body ('else' body)?
//! while_stmt::= 'while' expr 'then'? body
//! body      ::= block | statement
//! block     ::= '{' statement* '}'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location()?;

        if self.match_token(&TokenKind::If)? {
            return self.parse_if_statement(loc);
        }

        if self.match_token(&TokenKind::While)? {
            return self.parse_while_statement(loc);
        }

        if self.match_token(&TokenKind::Del)? {
            let name = self.expect_identifier()?;
            return Ok(AstNode::Delete {
                name,
                location: loc,
            });
        }

        if self.check(&TokenKind::Input)? {
            if let Some(stmt) = self.parse_input_statement(loc)? {
                return Ok(stmt);
            }
        }

        let ident = match &self.peek_token()?.kind {
            TokenKind::Ident(name) => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = ident {
            if matches!(self.peek_ahead(1)?.kind, TokenKind::Assign) {
                return self.parse_assignment(name, loc);
            }
            if name == "print" {
                self.advance()?;
                let value = Box::new(self.parse_expression()?);
                return Ok(AstNode::Print {
                    value,
                    location: loc,
                });
            }
        }

        self.parse_expression()
    }

    /// Parse `name = expr` (identifier not yet consumed)
    fn parse_assignment(
        &mut self,
        name: String,
        loc: SourceLocation,
    ) -> Result<AstNode, ParseError> {
        self.advance()?; // identifier
        self.advance()?; // '='

        // `name = del` is the older spelling of `del name`
        if self.match_token(&TokenKind::Del)? {
            return Ok(AstNode::Delete {
                name,
                location: loc,
            });
        }

        let value = Box::new(self.parse_expression()?);
        Ok(AstNode::Assign {
            name,
            value,
            location: loc,
        })
    }

    /// Parse the statement forms of `input`.
    ///
    /// `input name` (same line) binds the line to `name`; a bare `input`
    /// binds it to the variable `input`, and `input = expr` assigns that
    /// variable directly. `input(...)` is left to the expression parser and
    /// yields `None` here.
    fn parse_input_statement(
        &mut self,
        loc: SourceLocation,
    ) -> Result<Option<AstNode>, ParseError> {
        let next = self.peek_ahead(1)?;
        let same_line = next.location.line == loc.line;
        let named = match &next.kind {
            TokenKind::LParen => return Ok(None),
            TokenKind::Ident(name) if same_line => Some(name.clone()),
            _ => None,
        };

        if self.peek_ahead(1)?.kind == TokenKind::Assign {
            return self.parse_assignment("input".to_string(), loc).map(Some);
        }

        self.advance()?; // 'input'
        if named.is_some() {
            self.advance()?;
        }
        let target = named.unwrap_or_else(|| "input".to_string());

        Ok(Some(AstNode::Input {
            prompt: Some(format!("{}> ", target)),
            target: Some(target),
            location: loc,
        }))
    }

    /// Parse if statement (`if` already consumed)
    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let condition = Box::new(self.parse_expression()?);
        self.expect_token(&TokenKind::Then, "Expected 'then' after if condition")?;

        let then_branch = Box::new(self.parse_body()?);

        let else_branch = if self.match_token(&TokenKind::Else)? {
            Some(Box::new(self.parse_body()?))
        } else {
            None
        };

        Ok(AstNode::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement (`while` already consumed)
    fn parse_while_statement(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let condition = Box::new(self.parse_expression()?);
        self.match_token(&TokenKind::Then)?;

        let body = Box::new(self.parse_body()?);

        Ok(AstNode::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse a branch or loop body: a `{ }` block or a single statement
    pub(crate) fn parse_body(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location()?;
        self.descend(loc)?;
        let body = if self.check(&TokenKind::LBrace)? {
            self.parse_block()?
        } else {
            self.parse_statement()?
        };
        self.ascend();
        Ok(body)
    }

    /// Parse `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        let location = self
            .expect_token(&TokenKind::LBrace, "Expected '{'")?
            .location;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace)? && !self.is_at_end()? {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(&TokenKind::RBrace, "Expected '}' to close block")?;

        Ok(AstNode::Block {
            statements,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::Number;
    use crate::parser::parse::ParseErrorKind;

    fn parse(source: &str) -> Vec<AstNode> {
        match Parser::new(source).parse_program().unwrap() {
            AstNode::Block { statements, .. } => statements,
            other => panic!("Expected program block, got {:?}", other),
        }
    }

    fn parse_err(source: &str) -> ParseError {
        Parser::new(source).parse_program().unwrap_err()
    }

    #[test]
    fn test_assignment() {
        let stmts = parse("x = 5");
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            AstNode::Assign { name, value, .. } => {
                assert_eq!(name, "x");
                assert!(matches!(**value, AstNode::NumberLiteral(Number::Int(5), _)));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_del_forms() {
        let stmts = parse("del x\ny = del");
        assert!(matches!(&stmts[0], AstNode::Delete { name, .. } if name == "x"));
        assert!(matches!(&stmts[1], AstNode::Delete { name, .. } if name == "y"));
    }

    #[test]
    fn test_del_in_expression_rejected() {
        let err = parse_err("x = 1 + del");
        assert_eq!(err.kind, ParseErrorKind::Syntax);
    }

    #[test]
    fn test_print_statement() {
        let stmts = parse("print 1 + 2");
        assert!(matches!(
            &stmts[0],
            AstNode::Print { value, .. } if matches!(**value, AstNode::BinaryOp { op: BinOp::Add, .. })
        ));
    }

    #[test]
    fn test_print_can_be_assigned() {
        let stmts = parse("print = 3");
        assert!(matches!(&stmts[0], AstNode::Assign { name, .. } if name == "print"));
    }

    #[test]
    fn test_bare_identifier_starts_expression() {
        let stmts = parse("x + 1");
        assert!(matches!(
            &stmts[0],
            AstNode::BinaryOp { op: BinOp::Add, left, .. } if matches!(**left, AstNode::Variable(ref n, _) if n == "x")
        ));
    }

    #[test]
    fn test_if_requires_then() {
        let err = parse_err("if x 1");
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert!(err.message.contains("'then'"));
    }

    #[test]
    fn test_if_else_with_blocks() {
        let stmts = parse("if x then { y = 1 z = 2 } else y = 3");
        match &stmts[0] {
            AstNode::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(matches!(&**then_branch, AstNode::Block { statements, .. } if statements.len() == 2));
                assert!(matches!(
                    else_branch.as_deref(),
                    Some(AstNode::Assign { name, .. }) if name == "y"
                ));
            }
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else() {
        let stmts = parse("if true then 1");
        assert!(matches!(&stmts[0], AstNode::If { else_branch: None, .. }));
    }

    #[test]
    fn test_while_with_optional_then() {
        let with_then = parse("while i < 3 then i = i + 1");
        let without = parse("while i < 3 { i = i + 1 }");

        assert!(matches!(&with_then[0], AstNode::While { body, .. } if matches!(**body, AstNode::Assign { .. })));
        assert!(matches!(&without[0], AstNode::While { body, .. } if matches!(**body, AstNode::Block { .. })));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("while true { x = 1");
        assert!(err.message.contains("'}'"));
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn test_input_statement_forms() {
        let stmts = parse("input name\ninput\nx = input(\"Age? \")");

        assert!(matches!(
            &stmts[0],
            AstNode::Input { target: Some(t), prompt: Some(p), .. } if t == "name" && p == "name> "
        ));
        assert!(matches!(
            &stmts[1],
            AstNode::Input { target: Some(t), .. } if t == "input"
        ));
        match &stmts[2] {
            AstNode::Assign { value, .. } => assert!(matches!(
                &**value,
                AstNode::Input { target: None, prompt: Some(p), .. } if p == "Age? "
            )),
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_input_variable_can_be_assigned() {
        let stmts = parse("input = 3");
        assert!(matches!(&stmts[0], AstNode::Assign { name, .. } if name == "input"));
    }

    #[test]
    fn test_input_does_not_swallow_next_line() {
        let stmts = parse("input\nx = 1");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(&stmts[1], AstNode::Assign { name, .. } if name == "x"));
    }
}
