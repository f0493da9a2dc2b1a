//! Expression parsing implementation
//!
//! One method per precedence level, lowest first. Every binary level is
//! left-associative.
//!
//! # Precedence
//!
//! ```text
//! expr        ::= logical_or
//! logical_or  ::= logical_and ('or' logical_and)*
//! logical_and ::= equality ('and' equality)*
//! equality    ::= comparison (('==' | '!=') comparison)*
//! comparison  ::= arith (('<' | '<=' | '>' | '>=') arith)*
//! arith       ::= term (('+' | '-') term)*
//! term        ::= factor (('*' | '/') factor)*
//! factor      ::= 'not' factor | '-' factor | NUMBER | 'true' | 'false'
//!               | STRING | '(' expr ')' | IDENT | input_expr
//! input_expr  ::= 'input' ('(' STRING? ')')?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR (`or`)
    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        let mut wrapped = 0;
        let mut left = self.parse_logical_and()?;

        while self.match_token(&TokenKind::Or)? {
            let loc = self.previous_location();
            self.extend_chain(loc)?;
            wrapped += 1;
            let right = Box::new(self.parse_logical_and()?);
            left = AstNode::BinaryOp {
                op: BinOp::Or,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.release_chain(wrapped);
        Ok(left)
    }

    /// Parse logical AND (`and`)
    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        let mut wrapped = 0;
        let mut left = self.parse_equality()?;

        while self.match_token(&TokenKind::And)? {
            let loc = self.previous_location();
            self.extend_chain(loc)?;
            wrapped += 1;
            let right = Box::new(self.parse_equality()?);
            left = AstNode::BinaryOp {
                op: BinOp::And,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.release_chain(wrapped);
        Ok(left)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut wrapped = 0;
        let mut left = self.parse_comparison()?;

        loop {
            let op = if self.match_token(&TokenKind::EqEq)? {
                BinOp::Eq
            } else if self.match_token(&TokenKind::NotEq)? {
                BinOp::Ne
            } else {
                break;
            };

            let loc = self.previous_location();
            self.extend_chain(loc)?;
            wrapped += 1;
            let right = Box::new(self.parse_comparison()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.release_chain(wrapped);
        Ok(left)
    }

    /// Parse comparison (< <= > >=)
    fn parse_comparison(&mut self) -> Result<AstNode, ParseError> {
        let mut wrapped = 0;
        let mut left = self.parse_arith()?;

        loop {
            let op = if self.match_token(&TokenKind::Lt)? {
                BinOp::Lt
            } else if self.match_token(&TokenKind::Le)? {
                BinOp::Le
            } else if self.match_token(&TokenKind::Gt)? {
                BinOp::Gt
            } else if self.match_token(&TokenKind::Ge)? {
                BinOp::Ge
            } else {
                break;
            };

            let loc = self.previous_location();
            self.extend_chain(loc)?;
            wrapped += 1;
            let right = Box::new(self.parse_arith()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.release_chain(wrapped);
        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_arith(&mut self) -> Result<AstNode, ParseError> {
        let mut wrapped = 0;
        let mut left = self.parse_term()?;

        loop {
            let op = if self.match_token(&TokenKind::Plus)? {
                BinOp::Add
            } else if self.match_token(&TokenKind::Minus)? {
                BinOp::Sub
            } else {
                break;
            };

            let loc = self.previous_location();
            self.extend_chain(loc)?;
            wrapped += 1;
            let right = Box::new(self.parse_term()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.release_chain(wrapped);
        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut wrapped = 0;
        let mut left = self.parse_factor()?;

        loop {
            let op = if self.match_token(&TokenKind::Star)? {
                BinOp::Mul
            } else if self.match_token(&TokenKind::Slash)? {
                BinOp::Div
            } else {
                break;
            };

            let loc = self.previous_location();
            self.extend_chain(loc)?;
            wrapped += 1;
            let right = Box::new(self.parse_factor()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.release_chain(wrapped);
        Ok(left)
    }

    /// Parse unary operators and primary expressions
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        let token = self.peek_token()?.clone();
        let loc = token.location;

        match token.kind {
            TokenKind::Not => self.parse_unary(UnOp::Not, loc),
            TokenKind::Minus => self.parse_unary(UnOp::Neg, loc),
            TokenKind::Number(n) => {
                self.advance()?;
                Ok(AstNode::NumberLiteral(n, loc))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(AstNode::BooleanLiteral(true, loc))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(AstNode::BooleanLiteral(false, loc))
            }
            TokenKind::Str(s) => {
                self.advance()?;
                Ok(AstNode::StringLiteral(s, loc))
            }
            TokenKind::Ident(name) => {
                self.advance()?;
                Ok(AstNode::Variable(name, loc))
            }
            TokenKind::LParen => {
                self.advance()?;
                self.descend(loc)?;
                let expr = self.parse_expression()?;
                self.expect_token(&TokenKind::RParen, "Expected ')' after expression")?;
                self.ascend();
                Ok(expr)
            }
            TokenKind::Input => self.parse_input_expression(),
            TokenKind::Del => Err(ParseError::syntax(
                "'del' can only be used as a statement",
                loc,
            )),
            _ => Err(self.unexpected("Expected expression")?),
        }
    }

    fn parse_unary(&mut self, op: UnOp, location: SourceLocation) -> Result<AstNode, ParseError> {
        self.advance()?;
        self.descend(location)?;
        let operand = Box::new(self.parse_factor()?);
        self.ascend();
        Ok(AstNode::UnaryOp {
            op,
            operand,
            location,
        })
    }

    /// Parse `input`, `input()` or `input("prompt")`
    fn parse_input_expression(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance()?.location;

        let mut prompt = None;
        if self.match_token(&TokenKind::LParen)? {
            let literal = match &self.peek_token()?.kind {
                TokenKind::Str(s) => Some(s.clone()),
                _ => None,
            };
            if literal.is_some() {
                self.advance()?;
                prompt = literal;
            }
            self.expect_token(&TokenKind::RParen, "Expected ')' after input prompt")?;
        }

        Ok(AstNode::Input {
            prompt,
            target: None,
            location,
        })
    }
}
