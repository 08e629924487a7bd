//! Line matching
//!
//! A compiled automaton matches its whole input. To find the pattern anywhere
//! inside a line it is wrapped as `.* pattern .*`, where `.` is
//! [`any_character`]. The wrapped automaton is built and indexed once, then
//! used read-only for every line.

use crate::algebra::{any_character, concat, star};
use crate::ast::Ast;
use crate::automaton::Automaton;
use crate::compiler::compile;
use crate::error::{AutomatonError, Result};
use crate::parser::parse;
use crate::simulate::StepTable;
use log::debug;

/// Wrap a whole-string automaton so that it accepts any string containing a
/// match as a substring
pub fn wrap_for_search(compiled: Automaton) -> std::result::Result<Automaton, AutomatonError> {
    let prefixed = concat(star(any_character()?)?, compiled)?;
    concat(prefixed, star(any_character()?)?)
}

/// Sizes of the automata behind a [`Pattern`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonStats {
    pub states: usize,
    pub transitions: usize,
    pub finals: usize,
}

impl AutomatonStats {
    fn of(automaton: &Automaton) -> Self {
        AutomatonStats {
            states: automaton.state_count(),
            transitions: automaton.transition_count(),
            finals: automaton.finals().len(),
        }
    }
}

/// A line that contained a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    /// 1-based line number
    pub number: usize,
    /// The line text, unchanged
    pub line: &'a str,
}

/// A compiled search pattern
#[derive(Debug)]
pub struct Pattern {
    source: String,
    ast: Ast,
    compiled: Automaton,
    search: StepTable,
    search_stats: AutomatonStats,
}

impl Pattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let ast = parse(pattern)?;
        let mut compiled = Self::from_ast(ast)?;
        compiled.source = pattern.to_string();
        Ok(compiled)
    }

    /// Compile an already parsed syntax tree
    pub fn from_ast(ast: Ast) -> Result<Self> {
        let compiled = compile(&ast)?;
        let search = wrap_for_search(compiled.duplicate())?;
        let search_stats = AutomatonStats::of(&search);
        debug!(
            "search automaton: {} state(s), {} transition(s)",
            search_stats.states, search_stats.transitions
        );

        Ok(Pattern {
            source: ast.to_string(),
            ast,
            compiled,
            search: StepTable::new(&search),
            search_stats,
        })
    }

    /// The pattern text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// The automaton for the bare pattern, which matches whole strings only
    pub fn automaton(&self) -> &Automaton {
        &self.compiled
    }

    /// Sizes of the bare and the search automaton, in that order
    pub fn stats(&self) -> (AutomatonStats, AutomatonStats) {
        (AutomatonStats::of(&self.compiled), self.search_stats)
    }

    /// Check if the pattern occurs anywhere in `line`
    pub fn is_match(&self, line: &str) -> bool {
        self.search.accepts(line)
    }

    /// Check if the pattern matches `text` in full
    pub fn is_full_match(&self, text: &str) -> bool {
        self.compiled.accepts(text)
    }

    /// The lines containing a match, numbered and in input order
    pub fn matching_lines<'a, I>(&'a self, lines: I) -> impl Iterator<Item = LineMatch<'a>> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        lines
            .into_iter()
            .enumerate()
            .filter(move |(_, line)| self.is_match(line))
            .map(|(i, line)| LineMatch {
                number: i + 1,
                line,
            })
    }
}
