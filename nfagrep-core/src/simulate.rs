//! Subset simulation of epsilon-free automata
//!
//! The set of active states starts as `{start}`. Each input character maps it
//! to the destinations of every transition labeled with that character. An
//! empty step rejects at once; otherwise the input is accepted when the final
//! active set meets the final states. No backtracking is involved.

use crate::automaton::{Automaton, Label, State};
use std::collections::{HashMap, HashSet};

/// Drive the simulation, asking `step` for the successors of the active set
fn run<F>(start: State, finals: &HashSet<State>, text: &str, mut step: F) -> bool
where
    F: FnMut(&HashSet<State>, char) -> HashSet<State>,
{
    let mut active = HashSet::from([start]);

    for c in text.chars() {
        active = step(&active, c);
        if active.is_empty() {
            return false;
        }
    }

    !active.is_disjoint(finals)
}

impl Automaton {
    /// Decide whether the automaton accepts `text` in full
    ///
    /// The automaton must be epsilon-free; epsilon transitions are never
    /// followed here.
    pub fn accepts(&self, text: &str) -> bool {
        debug_assert!(self.is_epsilon_free());

        run(self.start(), self.finals(), text, |active, c| {
            self.transitions()
                .iter()
                .filter(|t| t.label == Label::Symbol(c) && active.contains(&t.source))
                .map(|t| t.destination)
                .collect()
        })
    }
}

/// A read-only index of an automaton's transitions by `(source, symbol)`
///
/// Built once and then queried for every line of a search, so the per-step
/// cost depends on the active states rather than on the whole transition set.
#[derive(Debug)]
pub struct StepTable {
    start: State,
    finals: HashSet<State>,
    steps: HashMap<(State, char), Vec<State>>,
}

impl StepTable {
    /// Index an epsilon-free automaton
    pub fn new(automaton: &Automaton) -> Self {
        debug_assert!(automaton.is_epsilon_free());

        let mut steps: HashMap<(State, char), Vec<State>> = HashMap::new();
        for t in automaton.transitions() {
            if let Label::Symbol(c) = t.label {
                steps.entry((t.source, c)).or_default().push(t.destination);
            }
        }

        StepTable {
            start: automaton.start(),
            finals: automaton.finals().clone(),
            steps,
        }
    }

    /// Same contract as [`Automaton::accepts`]
    pub fn accepts(&self, text: &str) -> bool {
        run(self.start, &self.finals, text, |active, c| {
            active
                .iter()
                .filter_map(|&s| self.steps.get(&(s, c)))
                .flatten()
                .copied()
                .collect()
        })
    }
}
