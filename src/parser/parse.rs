//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a predictive recursive descent approach with the following
//! organization:
//! - This module: Parser struct, token buffering, helper methods
//! - `statements`: Parsing statements (`if`, `while`, assignment, `print`, ...)
//! - `expressions`: Parsing expressions by precedence level
//!
//! # Token Supply
//!
//! Tokens are pulled lazily from the [`Lexer`]. A small lookahead buffer holds
//! at most two tokens, which is all the grammar needs to tell `x = ...` apart
//! from an expression starting with `x`. Nothing is ever re-read.
//!
//! # Nesting
//!
//! Parenthesised expressions, unary operators and branch bodies recurse in
//! the parser and count towards [`MAX_NESTING`]. Left-associative operator
//! chains do not recurse here but still deepen the AST, so their length is
//! capped separately by [`MAX_CHAIN`]. Input past either limit is a syntax
//! error rather than a stack overflow, and every AST the parser returns is
//! shallow enough to evaluate and drop.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind, TraceHook};
use std::collections::VecDeque;
use std::fmt;

/// Which stage rejected the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Invalid character, unterminated string, malformed number
    Lexical,
    /// Unexpected or missing token
    Syntax,
}

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        ParseError {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            location,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.kind == ParseErrorKind::Lexical
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.kind {
            ParseErrorKind::Lexical => "Lexical error",
            ParseErrorKind::Syntax => "Syntax error",
        };
        write!(
            f,
            "{} at line {}, column {}: {}",
            stage, self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lexical,
            message: err.message,
            location: err.location,
        }
    }
}

/// Deepest nesting of parentheses, unary operators and bodies
pub const MAX_NESTING: usize = 64;

/// Most binary operators allowed in one unparenthesised chain
pub const MAX_CHAIN: usize = 256;

/// Recursive descent parser for calcline
pub struct Parser {
    lexer: Lexer,
    lookahead: VecDeque<Token>,
    previous: SourceLocation,
    depth: usize,
    chain: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: VecDeque::with_capacity(2),
            previous: SourceLocation::default(),
            depth: 0,
            chain: 0,
        }
    }

    /// Create a parser whose lexer reports every token to `hook`.
    pub fn with_trace(source: &str, hook: TraceHook) -> Self {
        let mut parser = Self::new(source);
        parser.lexer.set_trace(hook);
        parser
    }

    /// Parse the entire program into a top-level `Block`
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location()?;
        let mut statements = Vec::new();

        while !self.is_at_end()? {
            statements.push(self.parse_statement()?);
        }

        Ok(AstNode::Block {
            statements,
            location,
        })
    }

    // ===== Helper methods =====

    /// Make sure at least `n` tokens are buffered.
    fn fill(&mut self, n: usize) -> Result<(), ParseError> {
        while self.lookahead.len() < n {
            let token = self.lexer.next_token()?;
            self.lookahead.push_back(token);
        }
        Ok(())
    }

    /// Look at the token `n` positions ahead of the current one (0 = current).
    pub(crate) fn peek_ahead(&mut self, n: usize) -> Result<&Token, ParseError> {
        self.fill(n + 1)?;
        Ok(&self.lookahead[n])
    }

    pub(crate) fn peek_token(&mut self) -> Result<&Token, ParseError> {
        self.peek_ahead(0)
    }

    pub(crate) fn check(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        Ok(std::mem::discriminant(&self.peek_token()?.kind) == std::mem::discriminant(kind))
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if self.check(kind)? {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume and return the current token. At end of input this keeps
    /// returning `Eof`.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        self.fill(1)?;
        let token = match self.lookahead.pop_front() {
            Some(token) => token,
            None => Token::new(TokenKind::Eof, self.previous),
        };
        self.previous = token.location;
        Ok(token)
    }

    pub(crate) fn is_at_end(&mut self) -> Result<bool, ParseError> {
        Ok(self.peek_token()?.is_eof())
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: &TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind)? {
            self.advance()
        } else {
            Err(self.unexpected(message)?)
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let name = match &self.peek_token()?.kind {
            TokenKind::Ident(name) => Some(name.clone()),
            _ => None,
        };
        match name {
            Some(name) => {
                self.advance()?;
                Ok(name)
            }
            None => Err(self.unexpected("Expected identifier")?),
        }
    }

    /// Build a syntax error that names the offending current token.
    pub(crate) fn unexpected(&mut self, message: &str) -> Result<ParseError, ParseError> {
        let token = self.peek_token()?;
        Ok(ParseError::syntax(
            format!("{}, found {}", message, token.kind),
            token.location,
        ))
    }

    /// Enter one level of nesting, failing past [`MAX_NESTING`].
    ///
    /// A failed parse is never resumed, so error paths need not call
    /// [`Parser::ascend`].
    pub(crate) fn descend(&mut self, location: SourceLocation) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::syntax("expression nested too deeply", location));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Count one more operator in the chain being built, failing past
    /// [`MAX_CHAIN`].
    pub(crate) fn extend_chain(&mut self, location: SourceLocation) -> Result<(), ParseError> {
        if self.chain >= MAX_CHAIN {
            return Err(ParseError::syntax("operator chain too long", location));
        }
        self.chain += 1;
        Ok(())
    }

    pub(crate) fn release_chain(&mut self, links: usize) {
        self.chain -= links;
    }

    pub(crate) fn current_location(&mut self) -> Result<SourceLocation, ParseError> {
        Ok(self.peek_token()?.location)
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous
    }
}
