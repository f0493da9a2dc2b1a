//! Lexer (tokenizer) for calcline source code
//!
//! Converts raw source text into a lazy stream of [`Token`]s pulled one at a
//! time by the parser through [`Lexer::next_token`]. The stream ends with a
//! single [`TokenKind::Eof`]; asking for more after that keeps yielding `Eof`.
//!
//! `#` starts a comment that runs to the end of the line.

use super::ast::SourceLocation;
use crate::memory::value::{Number, Value};
use std::fmt;

/// All token kinds produced by the lexer.
///
/// Literal-bearing kinds carry their payload directly.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(Number),
    Str(String),
    True,
    False,

    // Identifiers
    Ident(String),

    // Keywords
    And,
    Or,
    Not,
    If,
    Then,
    Else,
    While,
    Input,
    Del,

    // Operators
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /
    Assign, // =
    EqEq,   // ==
    NotEq,  // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=

    // Punctuation
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number literal {}", n),
            TokenKind::Str(s) => write!(f, "string literal \"{}\"", s.escape_debug()),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::And => write!(f, "'and'"),
            TokenKind::Or => write!(f, "'or'"),
            TokenKind::Not => write!(f, "'not'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Then => write!(f, "'then'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Input => write!(f, "'input'"),
            TokenKind::Del => write!(f, "'del'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the location of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// The literal value carried by this token, if it is a literal.
    pub fn literal(&self) -> Option<Value> {
        match &self.kind {
            TokenKind::Number(n) => Some(Value::Number(*n)),
            TokenKind::Str(s) => Some(Value::Str(s.clone())),
            TokenKind::True => Some(Value::Bool(true)),
            TokenKind::False => Some(Value::Bool(false)),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}",
            self.location.line, self.location.column, self.kind
        )
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Callback invoked with every token the lexer produces.
pub type TraceHook = Box<dyn FnMut(&Token)>;

/// Lexer for calcline source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    trace: Option<TraceHook>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            trace: None,
        }
    }

    /// Install a hook that sees every token as it is produced.
    pub fn set_trace(&mut self, hook: TraceHook) {
        self.trace = Some(hook);
    }

    /// Tokenize the entire input, `Eof` included
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Produce the next token
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan_token()?;
        if let Some(hook) = self.trace.as_mut() {
            hook(&token);
        }
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, loc));
        };

        let kind = match ch {
            '"' => self.string_literal(loc)?,

            '0'..='9' => self.number_literal(ch, loc)?,

            c if c.is_alphabetic() => self.identifier_or_keyword(c),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '=' => self.with_eq(TokenKind::EqEq, TokenKind::Assign),
            '!' => self.with_eq(TokenKind::NotEq, TokenKind::Not),
            '<' => self.with_eq(TokenKind::Le, TokenKind::Lt),
            '>' => self.with_eq(TokenKind::Ge, TokenKind::Gt),

            _ => {
                return Err(LexError {
                    message: format!("Unexpected character: '{}'", ch),
                    location: loc,
                });
            }
        };

        Ok(Token::new(kind, loc))
    }

    /// Greedy two-character operator: `=` follows → `double`, else `single`.
    fn with_eq(&mut self, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Parse string literal (opening quote already consumed)
    fn string_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(TokenKind::Str(string)),
                '\\' => match self.advance() {
                    Some('n') => string.push('\n'),
                    Some('t') => string.push('\t'),
                    // Any other escaped character stands for itself
                    Some(other) => string.push(other),
                    None => break,
                },
                _ => string.push(ch),
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal: digits with at most one decimal point
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<TokenKind, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' {
                if seen_dot {
                    return Err(LexError {
                        message: format!("Malformed number literal: {}.", num_str),
                        location: loc,
                    });
                }
                seen_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let number = if seen_dot {
            num_str.parse::<f64>().map(Number::Float).map_err(|_| LexError {
                message: format!("Invalid number literal: {}", num_str),
                location: loc,
            })?
        } else {
            num_str.parse::<i64>().map(Number::Int).map_err(|_| LexError {
                message: format!("Integer literal out of range: {}", num_str),
                location: loc,
            })?
        };

        Ok(TokenKind::Number(number))
    }

    /// Parse identifier or keyword. Both are case-insensitive.
    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::new();
        ident.extend(first_char.to_lowercase());

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.extend(ch.to_lowercase());
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "input" => TokenKind::Input,
            "del" => TokenKind::Del,
            _ => TokenKind::Ident(ident),
        }
    }

    /// Skip whitespace and `#` comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '#' {
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = kinds("x = (1 + 2) * 3");

        assert!(matches!(tokens[0], TokenKind::Ident(ref s) if s == "x"));
        assert_eq!(tokens[1], TokenKind::Assign);
        assert_eq!(tokens[2], TokenKind::LParen);
        assert_eq!(tokens[3], TokenKind::Number(Number::Int(1)));
        assert_eq!(tokens[4], TokenKind::Plus);
        assert_eq!(tokens[5], TokenKind::Number(Number::Int(2)));
        assert_eq!(tokens[6], TokenKind::RParen);
        assert_eq!(tokens[7], TokenKind::Star);
        assert_eq!(tokens[8], TokenKind::Number(Number::Int(3)));
        assert_eq!(tokens[9], TokenKind::Eof);
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_operators_are_greedy() {
        let tokens = kinds("== != <= >= = ! < >");

        assert_eq!(
            tokens,
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Assign,
                TokenKind::Not,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let tokens = kinds("IF Then eLsE while INPUT del True FALSE and OR not");

        assert_eq!(
            tokens,
            vec![
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Input,
                TokenKind::Del,
                TokenKind::True,
                TokenKind::False,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_lowercased() {
        let tokens = kinds("MyVar other_1");
        assert_eq!(tokens[0], TokenKind::Ident("myvar".to_string()));
        assert_eq!(tokens[1], TokenKind::Ident("other_1".to_string()));
    }

    #[test]
    fn test_number_literals() {
        let tokens = kinds("42 3.50 7.");
        assert_eq!(tokens[0], TokenKind::Number(Number::Int(42)));
        assert_eq!(tokens[1], TokenKind::Number(Number::Float(3.5)));
        assert_eq!(tokens[2], TokenKind::Number(Number::Float(7.0)));
    }

    #[test]
    fn test_literal_rerenders() {
        let mut lexer = Lexer::new(r#"3.50 17 "hi" true"#);
        let rendered: Vec<String> = lexer
            .tokenize()
            .unwrap()
            .iter()
            .filter_map(Token::literal)
            .map(|v| v.to_string())
            .collect();

        assert_eq!(rendered, vec!["3.5", "17", "hi", "true"]);
    }

    #[test]
    fn test_two_decimal_points_rejected() {
        let err = Lexer::new("1.2.3").tokenize().unwrap_err();
        assert!(err.message.contains("Malformed number"));
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_string_escapes() {
        let tokens = kinds(r#""a\nb\tc\\d\"e\qf""#);
        assert_eq!(tokens[0], TokenKind::Str("a\nb\tc\\d\"eqf".to_string()));
    }

    #[test]
    fn test_escape_e_is_plain_character() {
        let tokens = kinds(r#""bye\e""#);
        assert_eq!(tokens[0], TokenKind::Str("byee".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("x = \"abc").tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated"));
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("x = 1\ny = @").tokenize().unwrap_err();
        assert!(err.message.contains("'@'"));
        assert_eq!(err.location, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = kinds("# header\nx # trailing\n");
        assert_eq!(
            tokens,
            vec![TokenKind::Ident("x".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("1");
        assert!(!lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_trace_hook_sees_every_token() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut lexer = Lexer::new("a + 1");
        lexer.set_trace(Box::new(move |t: &Token| sink.borrow_mut().push(t.kind.clone())));
        lexer.tokenize().unwrap();

        assert_eq!(seen.borrow().len(), 4);
        assert_eq!(seen.borrow()[3], TokenKind::Eof);
    }
}
