//! Lexer for tokenizing patterns
//!
//! The pattern language only has four special characters: `(`, `)`, `|` and
//! `*`. Every other character of the supported alphabet is a literal.

use crate::alphabet;
use crate::error::{LexerErrorKind, RegexError, Result};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token in a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Pipe `|` (union)
    Pipe,
    /// Star `*` (zero or more)
    Star,
    /// A literal character, the epsilon sentinel included
    Literal(char),
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => write!(f, "`(`"),
            Token::RightParen => write!(f, "`)`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Star => write!(f, "`*`"),
            Token::Literal(c) => write!(f, "literal {:?}", c),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer for tokenizing patterns
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input string
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Position (in characters) of the next token
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        let Some(c) = self.chars.next() else {
            return Ok(Token::Eof);
        };
        let position = self.position;
        self.position += 1;

        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '|' => Token::Pipe,
            '*' => Token::Star,
            c if alphabet::is_supported(c) => Token::Literal(c),
            c => {
                return Err(RegexError::Lexer {
                    position,
                    kind: LexerErrorKind::UnsupportedChar(c),
                });
            }
        };
        Ok(token)
    }

    /// Tokenize the entire input, ending with [`Token::Eof`]
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            tokens.push(token);
            if token == Token::Eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Check whether the input has been fully consumed
    pub fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }
}
