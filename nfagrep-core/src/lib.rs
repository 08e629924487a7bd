//! Nfagrep Core Library
//!
//! Compiles a small regular-expression language (literals, `|`, `*`,
//! parentheses and the epsilon terminal `-`) into an epsilon-free NFA and
//! searches lines of text with it.
//!
//! ```
//! use nfagrep_core::Pattern;
//!
//! let pattern = Pattern::new("(a|b)c").unwrap();
//! assert!(pattern.is_match("zzbcxx"));
//! assert!(!pattern.is_match("ca"));
//! ```

pub mod algebra;
pub mod alphabet;
pub mod ast;
pub mod automaton;
pub mod compiler;
pub mod engine;
pub mod epsilon;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod simulate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use algebra::{any_character, concat, literal_or_epsilon, star, union};
pub use ast::Ast;
pub use automaton::{Automaton, Label, State, Transition};
pub use compiler::compile;
pub use engine::{AutomatonStats, LineMatch, Pattern, wrap_for_search};
pub use epsilon::{eliminate_epsilon, epsilon_closure};
pub use error::{AutomatonError, LexerErrorKind, ParseError, RegexError, Result};
pub use lexer::{Lexer, Token};
pub use parser::{MAX_NESTING, Parser, parse};
pub use simulate::StepTable;
