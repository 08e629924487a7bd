//! Property tests for the automaton algebra
//!
//! Each combinator is checked against the language law it has to satisfy,
//! and the compiler against a direct interpretation of the syntax tree.

use nfagrep_core::{
    Ast, Automaton, State, Transition, compile, concat, eliminate_epsilon, star, union,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

fn ast_strategy() -> impl Strategy<Value = Ast> {
    let leaf = prop_oneof![Just('a'), Just('b'), Just('-')].prop_map(Ast::terminal);
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Ast::star),
            inner.clone().prop_map(Ast::paren),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Ast::concat(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Ast::union(l, r)),
        ]
    })
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[abc]{0,6}"
}

/// Positions reachable after matching `ast` from position `i` of `s`
fn ends(ast: &Ast, s: &[char], i: usize) -> BTreeSet<usize> {
    match ast {
        Ast::Terminal('-') => BTreeSet::from([i]),
        Ast::Terminal(c) => {
            if s.get(i) == Some(c) {
                BTreeSet::from([i + 1])
            } else {
                BTreeSet::new()
            }
        }
        Ast::Paren(inner) | Ast::Star(inner) | Ast::Concat(inner) | Ast::Union(inner) => {
            ends(inner, s, i)
        }
        Ast::Star2(operand) => {
            let mut reached = BTreeSet::from([i]);
            let mut frontier = vec![i];
            while let Some(j) = frontier.pop() {
                for k in ends(operand, s, j) {
                    if reached.insert(k) {
                        frontier.push(k);
                    }
                }
            }
            reached
        }
        Ast::Concat2(left, right) => ends(left, s, i)
            .into_iter()
            .flat_map(|j| ends(right, s, j))
            .collect(),
        Ast::Union2(left, right) => {
            let mut both = ends(left, s, i);
            both.extend(ends(right, s, i));
            both
        }
    }
}

fn reference_match(ast: &Ast, text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    ends(ast, &chars, 0).contains(&chars.len())
}

/// Every way to cut `text` in two
fn splits(text: &str) -> impl Iterator<Item = (&str, &str)> {
    (0..=text.len()).map(move |i| text.split_at(i))
}

fn star_reference(nfa: &Automaton, text: &str) -> bool {
    text.is_empty()
        || (1..=text.len()).any(|i| nfa.accepts(&text[..i]) && star_reference(nfa, &text[i..]))
}

/// Epsilon-aware subset simulation over real transitions plus `epsilons`
fn accepts_with_epsilons(nfa: &Automaton, epsilons: &[(State, State)], text: &str) -> bool {
    let close = |mut set: HashSet<State>| {
        let mut stack: Vec<State> = set.iter().copied().collect();
        while let Some(s) = stack.pop() {
            for &(src, dst) in epsilons {
                if src == s && set.insert(dst) {
                    stack.push(dst);
                }
            }
        }
        set
    };

    let mut active = close(HashSet::from([nfa.start()]));
    for c in text.chars() {
        let next = nfa
            .transitions()
            .iter()
            .filter(|t| t.label == nfagrep_core::Label::Symbol(c) && active.contains(&t.source))
            .map(|t| t.destination)
            .collect();
        active = close(next);
    }
    active.iter().any(|s| nfa.is_final(*s))
}

/// State count, real transitions, finals and epsilon seeds, by state index
type RawAutomaton = (usize, Vec<(usize, char, usize)>, Vec<usize>, Vec<(usize, usize)>);

/// A random epsilon-free automaton over {a, b} plus random epsilon seeds
fn raw_automaton_strategy() -> impl Strategy<Value = RawAutomaton> {
    (1usize..5).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, prop_oneof![Just('a'), Just('b')], 0..n), 0..8),
            prop::collection::vec(0..n, 0..3),
            prop::collection::vec((0..n, 0..n), 0..5),
        )
    })
}

proptest! {
    #[test]
    fn compile_matches_reference(ast in ast_strategy(), text in text_strategy()) {
        let nfa = compile(&ast).unwrap();
        prop_assert!(nfa.is_epsilon_free());
        prop_assert_eq!(nfa.accepts(&text), reference_match(&ast, &text));
    }

    #[test]
    fn empty_text_iff_start_is_final(ast in ast_strategy()) {
        let nfa = compile(&ast).unwrap();
        prop_assert_eq!(nfa.accepts(""), nfa.is_final(nfa.start()));
    }

    #[test]
    fn union_law(a in ast_strategy(), b in ast_strategy(), text in text_strategy()) {
        let (na, nb) = (compile(&a).unwrap(), compile(&b).unwrap());
        let combined = union(na.duplicate(), nb.duplicate()).unwrap();
        prop_assert_eq!(combined.accepts(&text), na.accepts(&text) || nb.accepts(&text));
    }

    #[test]
    fn concat_law(a in ast_strategy(), b in ast_strategy(), text in text_strategy()) {
        let (na, nb) = (compile(&a).unwrap(), compile(&b).unwrap());
        let combined = concat(na.duplicate(), nb.duplicate()).unwrap();
        let expected = splits(&text).any(|(s1, s2)| na.accepts(s1) && nb.accepts(s2));
        prop_assert_eq!(combined.accepts(&text), expected);
    }

    #[test]
    fn star_law(a in ast_strategy(), text in text_strategy()) {
        let na = compile(&a).unwrap();
        let starred = star(na.duplicate()).unwrap();
        prop_assert_eq!(starred.accepts(&text), star_reference(&na, &text));
    }

    #[test]
    fn elimination_preserves_language(
        (n, real, finals, seeds) in raw_automaton_strategy(),
        text in "[ab]{0,5}",
    ) {
        let q: Vec<State> = (0..n).map(|_| State::fresh()).collect();
        let nfa = Automaton::new(
            q.iter().copied().collect(),
            q[0],
            finals.iter().map(|&i| q[i]).collect(),
            real.iter().map(|&(s, c, d)| Transition::symbol(c, q[s], q[d])).collect(),
        )
        .unwrap();
        let epsilons: Vec<(State, State)> = seeds.iter().map(|&(s, d)| (q[s], q[d])).collect();
        let expected = accepts_with_epsilons(&nfa, &epsilons, &text);

        let eliminated = eliminate_epsilon(
            nfa,
            epsilons.iter().map(|&(s, d)| Transition::epsilon(s, d)),
        )
        .unwrap();
        prop_assert!(eliminated.is_epsilon_free());
        prop_assert_eq!(eliminated.accepts(&text), expected);
    }
}
