//! Parser for patterns
//!
//! A recursive descent parser that converts tokens into an [`Ast`] shaped
//! like the pattern grammar (lowest precedence first):
//!
//! ```text
//! union  := union '|' concat | concat
//! concat := concat star | star
//! star   := star '*' | atom
//! atom   := '(' union ')' | TERMINAL
//! ```
//!
//! The left-recursive rules are parsed as loops that fold to the left, so
//! `a|b|c` becomes `Union2(Union2(Union(a), b), c)`. Only parentheses
//! recurse, and their depth is capped at [`MAX_NESTING`].

use crate::ast::Ast;
use crate::error::{ParseError, RegexError, Result};
use crate::lexer::{Lexer, Token};

/// Deepest parenthesis nesting the parser accepts
pub const MAX_NESTING: usize = 256;

/// Parser for patterns
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input string
    pub fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            depth: 0,
        })
    }

    /// Advance to the next token
    fn advance(&mut self) -> Result<()> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Expect a specific token, error if not found
    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.current_token == expected {
            self.advance()
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> RegexError {
        match self.current_token {
            Token::Eof => ParseError::UnexpectedEof.into(),
            found => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            }
            .into(),
        }
    }

    /// Parse the entire input and return the AST
    pub fn parse(&mut self) -> Result<Ast> {
        if self.current_token == Token::Eof {
            return Err(ParseError::EmptyPattern.into());
        }

        let ast = self.parse_union()?;

        // Ensure we've consumed all tokens
        if self.current_token != Token::Eof {
            return Err(ParseError::UnexpectedToken {
                expected: "EOF".to_string(),
                found: self.current_token.to_string(),
            }
            .into());
        }

        Ok(ast)
    }

    /// union := union '|' concat | concat
    fn parse_union(&mut self) -> Result<Ast> {
        let mut node = Ast::Union(Box::new(self.parse_concat()?));

        while self.current_token == Token::Pipe {
            self.advance()?; // consume '|'
            let right = self.parse_concat()?;
            node = Ast::Union2(Box::new(node), Box::new(right));
        }

        Ok(node)
    }

    /// concat := concat star | star
    fn parse_concat(&mut self) -> Result<Ast> {
        let mut node = Ast::Concat(Box::new(self.parse_star()?));

        while self.starts_atom() {
            let right = self.parse_star()?;
            node = Ast::Concat2(Box::new(node), Box::new(right));
        }

        Ok(node)
    }

    /// star := star '*' | atom
    fn parse_star(&mut self) -> Result<Ast> {
        let mut node = Ast::Star(Box::new(self.parse_atom()?));

        while self.current_token == Token::Star {
            self.advance()?; // consume '*'
            node = Ast::Star2(Box::new(node));
        }

        Ok(node)
    }

    /// atom := '(' union ')' | TERMINAL
    fn parse_atom(&mut self) -> Result<Ast> {
        match self.current_token {
            Token::Literal(c) => {
                self.advance()?;
                Ok(Ast::Terminal(c))
            }
            Token::LeftParen => {
                if self.depth == MAX_NESTING {
                    return Err(ParseError::NestingTooDeep { limit: MAX_NESTING }.into());
                }
                self.advance()?; // consume '('
                self.depth += 1;
                let inner = self.parse_union()?;
                self.depth -= 1;
                self.expect(Token::RightParen)?;
                Ok(Ast::Paren(Box::new(inner)))
            }
            _ => Err(self.unexpected("literal or `(`")),
        }
    }

    /// Check whether the current token can begin an atom
    fn starts_atom(&self) -> bool {
        matches!(self.current_token, Token::Literal(_) | Token::LeftParen)
    }
}

/// Parse a pattern into an AST
pub fn parse(input: &str) -> Result<Ast> {
    Parser::new(input)?.parse()
}
