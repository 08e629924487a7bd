//! Error types for pattern compilation
//!
//! Errors are categorized by their source: lexing, parsing, or automaton
//! construction. Lexing and parsing errors describe a bad pattern supplied by
//! the user. Automaton errors mean a structural invariant was broken while
//! building an NFA, which is a defect in whoever assembled it.

use crate::automaton::{State, Transition};
use thiserror::Error;

/// The main error type for pattern compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegexError {
    /// Errors that occur during lexing/tokenization
    #[error("lexer error at position {position}: {kind}")]
    Lexer {
        /// Position (in characters) where the error occurred
        position: usize,
        /// The specific kind of lexer error
        kind: LexerErrorKind,
    },

    /// Errors that occur during parsing
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Errors that occur while building automata (AST to NFA)
    #[error("automaton error: {0}")]
    Automaton(#[from] AutomatonError),
}

/// Specific kinds of lexer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerErrorKind {
    /// A character outside the supported alphabet
    #[error("unsupported character {0:?}")]
    UnsupportedChar(char),
}

/// Errors that occur during parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected token encountered
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What was expected
        expected: String,
        /// What was actually found
        found: String,
    },

    /// Unexpected end of input
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The pattern contained no tokens at all
    #[error("empty pattern")]
    EmptyPattern,

    /// Parentheses opened deeper than the parser allows
    #[error("parentheses nested more than {limit} deep")]
    NestingTooDeep {
        /// The deepest nesting accepted
        limit: usize,
    },
}

/// Violations of the structural invariants of an [`Automaton`](crate::Automaton)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// The start state is missing from the state set
    #[error("start state {0} is not one of the automaton's states")]
    StartNotInStates(State),

    /// A final state is missing from the state set
    #[error("final state {0} is not one of the automaton's states")]
    FinalNotInStates(State),

    /// A transition touches a state outside the state set
    #[error("transition {0} uses a state outside the automaton")]
    DanglingTransition(Transition),

    /// A transition handed to epsilon-elimination as a seed was not an epsilon
    #[error("seed transition {0} is not an epsilon transition")]
    RealSeed(Transition),
}

/// Result type alias for pattern operations
pub type Result<T> = std::result::Result<T, RegexError>;
