//! AST to automaton compilation
//!
//! A bottom-up fold over the syntax tree. Pass-through nodes and parentheses
//! contribute nothing; the operator nodes map onto the combinators in
//! [`algebra`](crate::algebra).
//!
//! The fold runs on an explicit stack of frames rather than the call stack, so
//! the depth of the tree (which grows with the length of the pattern) is
//! bounded only by memory. A run of the same binary operator, such as the
//! left-folded spine the parser builds for `abcd` or `a|b|c|d`, becomes one
//! frame whose operands are merged pairwise. Concatenation and union are
//! associative, so the balanced merge accepts the same language as the
//! left fold while touching each state a logarithmic number of times.

use crate::algebra;
use crate::alphabet::EPSILON_SENTINEL;
use crate::ast::Ast;
use crate::automaton::{Automaton, State};
use crate::error::AutomatonError;
use log::debug;
use std::collections::HashSet;

/// Compile a syntax tree into an epsilon-free automaton accepting exactly the
/// strings the pattern describes
pub fn compile(ast: &Ast) -> Result<Automaton, AutomatonError> {
    let nfa = compile_tree(ast)?;
    debug!(
        "compiled {} node(s) into {} state(s), {} transition(s), {} final(s)",
        ast.size(),
        nfa.state_count(),
        nfa.transition_count(),
        nfa.finals().len()
    );
    Ok(nfa)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    Concat,
    Union,
    Star,
}

/// An operator node whose operands are being compiled
struct Frame<'a> {
    combine: Combine,
    /// Operands still to compile, the next one last
    pending: Vec<&'a Ast>,
    /// Compiled operands, in pattern order
    done: Vec<Automaton>,
}

enum Opened<'a> {
    Terminal(char),
    Frame(Frame<'a>),
}

impl<'a> Frame<'a> {
    fn open(node: &'a Ast) -> Opened<'a> {
        let (combine, pending) = match node.operator() {
            Ast::Terminal(c) => return Opened::Terminal(*c),
            Ast::Star2(operand) => (Combine::Star, vec![&**operand]),
            chain @ Ast::Concat2(..) => (Combine::Concat, operands(chain, concat_parts)),
            chain @ Ast::Union2(..) => (Combine::Union, operands(chain, union_parts)),
            // operator() never stops on a pass-through
            Ast::Paren(inner) | Ast::Star(inner) | Ast::Concat(inner) | Ast::Union(inner) => {
                (Combine::Concat, vec![&**inner])
            }
        };
        Opened::Frame(Frame {
            combine,
            done: Vec::with_capacity(pending.len()),
            pending,
        })
    }

    fn finish(self) -> Result<Automaton, AutomatonError> {
        match self.combine {
            Combine::Concat => merge_balanced(self.done, algebra::concat, epsilon),
            Combine::Union => merge_balanced(self.done, algebra::union, nothing),
            Combine::Star => algebra::star(merge_balanced(self.done, algebra::concat, epsilon)?),
        }
    }
}

fn compile_tree(root: &Ast) -> Result<Automaton, AutomatonError> {
    let mut frames: Vec<Frame<'_>> = Vec::new();
    let mut node = root;

    loop {
        let mut value = loop {
            match Frame::open(node) {
                Opened::Terminal(c) => break algebra::literal_or_epsilon(c)?,
                Opened::Frame(mut frame) => match frame.pending.pop() {
                    Some(operand) => {
                        node = operand;
                        frames.push(frame);
                    }
                    None => break frame.finish()?,
                },
            }
        };

        loop {
            let Some(mut frame) = frames.pop() else {
                return Ok(value);
            };
            frame.done.push(value);
            match frame.pending.pop() {
                Some(operand) => {
                    node = operand;
                    frames.push(frame);
                    break;
                }
                None => value = frame.finish()?,
            }
        }
    }
}

fn concat_parts(node: &Ast) -> Option<(&Ast, &Ast)> {
    match node.operator() {
        Ast::Concat2(left, right) => Some((&**left, &**right)),
        _ => None,
    }
}

fn union_parts(node: &Ast) -> Option<(&Ast, &Ast)> {
    match node.operator() {
        Ast::Union2(left, right) => Some((&**left, &**right)),
        _ => None,
    }
}

/// Flatten a run of one binary operator into its operands, last one first
fn operands<'a>(chain: &'a Ast, split: fn(&Ast) -> Option<(&Ast, &Ast)>) -> Vec<&'a Ast> {
    let mut found = Vec::new();
    let mut todo = vec![chain];
    while let Some(node) = todo.pop() {
        match split(node) {
            Some((left, right)) => {
                todo.push(left);
                todo.push(right);
            }
            None => found.push(node),
        }
    }
    found
}

/// Combine neighbours pairwise until one automaton is left
fn merge_balanced(
    mut parts: Vec<Automaton>,
    combine: fn(Automaton, Automaton) -> Result<Automaton, AutomatonError>,
    empty: fn() -> Result<Automaton, AutomatonError>,
) -> Result<Automaton, AutomatonError> {
    while parts.len() > 1 {
        let mut merged = Vec::with_capacity(parts.len().div_ceil(2));
        let mut iter = parts.into_iter();
        while let Some(left) = iter.next() {
            merged.push(match iter.next() {
                Some(right) => combine(left, right)?,
                None => left,
            });
        }
        parts = merged;
    }
    match parts.pop() {
        Some(nfa) => Ok(nfa),
        None => empty(),
    }
}

fn epsilon() -> Result<Automaton, AutomatonError> {
    algebra::literal_or_epsilon(EPSILON_SENTINEL)
}

/// The automaton accepting no string at all
fn nothing() -> Result<Automaton, AutomatonError> {
    let start = State::fresh();
    Automaton::new(HashSet::from([start]), start, HashSet::new(), HashSet::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::simulate::StepTable;

    fn compiled(pattern: &str) -> Automaton {
        compile(&parse(pattern).unwrap()).unwrap()
    }

    #[test]
    fn test_terminal() {
        let nfa = compile(&Ast::terminal('a')).unwrap();
        assert_eq!(nfa.state_count(), 2);
        assert!(nfa.accepts("a"));
    }

    #[test]
    fn test_epsilon_terminal() {
        let nfa = compile(&Ast::epsilon()).unwrap();
        assert_eq!(nfa.state_count(), 1);
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("-"));
    }

    #[test]
    fn test_pass_through_adds_no_states() {
        let bare = compile(&Ast::terminal('a')).unwrap();
        let wrapped = compiled("((a))");
        assert_eq!(bare.state_count(), wrapped.state_count());
        assert_eq!(bare.transition_count(), wrapped.transition_count());
    }

    #[test]
    fn test_whole_string_semantics() {
        let nfa = compiled("ab");
        assert!(nfa.accepts("ab"));
        assert!(!nfa.accepts("xaby"));
    }

    #[test]
    fn test_union_then_concat() {
        let nfa = compiled("(a|b)c");
        assert!(nfa.accepts("ac"));
        assert!(nfa.accepts("bc"));
        assert!(!nfa.accepts("c"));
        assert!(!nfa.accepts("abc"));
    }

    #[test]
    fn test_precedence() {
        // star binds tighter than concat, concat tighter than union
        let nfa = compiled("ab*|c");
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("abbb"));
        assert!(nfa.accepts("c"));
        assert!(!nfa.accepts("abab"));
        assert!(!nfa.accepts("ac"));
    }

    #[test]
    fn test_nested_star() {
        let nfa = compiled("(a(b|-))*");
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("aab"));
        assert!(nfa.accepts("abab"));
        assert!(!nfa.accepts("b"));
        assert!(!nfa.accepts("abb"));
    }

    #[test]
    fn test_mixed_chains_keep_operand_order() {
        let nfa = compiled("ab(c|d|e)f*g|h(ij)*|k");
        for accepted in ["abcg", "abeffg", "h", "hijij", "k"] {
            assert!(nfa.accepts(accepted), "text {}", accepted);
        }
        for rejected in ["bacg", "abfg", "hji", "kk", ""] {
            assert!(!nfa.accepts(rejected), "text {}", rejected);
        }
    }

    #[test]
    fn test_right_nested_chain() {
        // built by hand; the parser only ever nests to the left
        let ast = Ast::concat(
            Ast::terminal('a'),
            Ast::concat(Ast::terminal('b'), Ast::concat(Ast::epsilon(), Ast::terminal('c'))),
        );
        let nfa = compile(&ast).unwrap();
        assert!(nfa.accepts("abc"));
        assert!(!nfa.accepts("acb"));
    }

    #[test]
    fn test_repeated_star() {
        let nfa = compiled("(ab)***");
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("ababab"));
        assert!(!nfa.accepts("aba"));
    }

    #[test]
    fn test_long_literal_on_default_stack() {
        let text = "ab".repeat(10_000);
        let nfa = compiled(&text);
        assert_eq!(nfa.state_count(), 40_000);
        assert_eq!(nfa.finals().len(), 1);
        assert!(nfa.is_epsilon_free());

        let table = StepTable::new(&nfa);
        assert!(table.accepts(&text));
        assert!(!table.accepts(&text[1..]));
        assert!(!table.accepts(&text[..text.len() - 1]));
        assert!(!table.accepts(&format!("{text}a")));
    }

    #[test]
    fn test_long_union_chain() {
        let alternatives: Vec<String> = (0..500).map(|i| format!("x{i}y")).collect();
        let nfa = compiled(&alternatives.join("|"));
        let table = StepTable::new(&nfa);
        assert!(table.accepts("x0y"));
        assert!(table.accepts("x250y"));
        assert!(table.accepts("x499y"));
        assert!(!table.accepts("x500y"));
        assert!(!table.accepts("x12"));
    }

    #[test]
    fn test_empty_chains_fall_back_to_identities() {
        let none = merge_balanced(Vec::new(), algebra::union, nothing).unwrap();
        assert!(!none.accepts(""));
        let eps = merge_balanced(Vec::new(), algebra::concat, epsilon).unwrap();
        assert!(eps.accepts(""));
    }

    #[test]
    fn test_result_is_epsilon_free() {
        for pattern in ["a", "-", "a*", "(a|b)*c", "((x)*|y-)z"] {
            assert!(compiled(pattern).is_epsilon_free(), "pattern {}", pattern);
        }
    }
}
