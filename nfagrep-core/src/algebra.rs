//! Primitive automata and the Thompson-style combinators
//!
//! Every combinator takes its operands by value, adds freshly allocated
//! states and a few epsilon seeds, and returns the epsilon-eliminated result.
//! Operands are consumed, so a caller can never observe a half-built
//! automaton; use [`Automaton::duplicate`] to combine an automaton with
//! itself.

use crate::alphabet::{self, EPSILON_SENTINEL};
use crate::automaton::{Automaton, State, Transition};
use crate::epsilon::eliminate_epsilon;
use crate::error::AutomatonError;
use std::collections::HashSet;

/// The base case for a terminal
///
/// The epsilon sentinel yields a single state that is both start and final,
/// accepting only the empty string. Any other character yields
/// `start -ch-> final`.
pub fn literal_or_epsilon(ch: char) -> Result<Automaton, AutomatonError> {
    let start = State::fresh();

    if ch == EPSILON_SENTINEL {
        return Automaton::new(
            HashSet::from([start]),
            start,
            HashSet::from([start]),
            HashSet::new(),
        );
    }

    let accept = State::fresh();
    Automaton::new(
        HashSet::from([start, accept]),
        start,
        HashSet::from([accept]),
        HashSet::from([Transition::symbol(ch, start, accept)]),
    )
}

/// Accepts exactly one character from the supported alphabet
pub fn any_character() -> Result<Automaton, AutomatonError> {
    let start = State::fresh();
    let accept = State::fresh();

    Automaton::new(
        HashSet::from([start, accept]),
        start,
        HashSet::from([accept]),
        alphabet::symbols()
            .map(|c| Transition::symbol(c, start, accept))
            .collect(),
    )
}

/// Accepts what either `a` or `b` accepts
pub fn union(a: Automaton, b: Automaton) -> Result<Automaton, AutomatonError> {
    let (mut states, a_start, mut finals, mut transitions) = a.into_parts();
    let (b_states, b_start, b_finals, b_transitions) = b.into_parts();

    let head = State::fresh();
    states.extend(b_states);
    states.insert(head);
    finals.extend(b_finals);
    transitions.extend(b_transitions);

    let merged = Automaton::new(states, head, finals, transitions)?;
    eliminate_epsilon(
        merged,
        [
            Transition::epsilon(head, a_start),
            Transition::epsilon(head, b_start),
        ],
    )
}

/// Accepts `s1 + s2` whenever `a` accepts `s1` and `b` accepts `s2`
pub fn concat(a: Automaton, b: Automaton) -> Result<Automaton, AutomatonError> {
    let (mut states, a_start, a_finals, mut transitions) = a.into_parts();
    let (b_states, b_start, b_finals, b_transitions) = b.into_parts();

    states.extend(b_states);
    transitions.extend(b_transitions);

    let seeds: Vec<Transition> = a_finals
        .iter()
        .map(|&f| Transition::epsilon(f, b_start))
        .collect();

    let merged = Automaton::new(states, a_start, b_finals, transitions)?;
    eliminate_epsilon(merged, seeds)
}

/// Kleene star: zero or more repetitions of `n`
pub fn star(n: Automaton) -> Result<Automaton, AutomatonError> {
    let (mut states, inner_start, mut finals, transitions) = n.into_parts();

    let head = State::fresh();
    let mut seeds = vec![Transition::epsilon(head, inner_start)];
    seeds.extend(finals.iter().map(|&f| Transition::epsilon(f, inner_start)));

    states.insert(head);
    finals.insert(head);

    let merged = Automaton::new(states, head, finals, transitions)?;
    eliminate_epsilon(merged, seeds)
}
