//! States, transitions and the NFA they form
//!
//! An [`Automaton`] is the tuple `(states, start, finals, transitions)`.
//! Construction checks that every state it mentions is one of its own, and
//! the fields are never mutated afterwards: the combinators in
//! [`algebra`](crate::algebra) take automata by value and build new ones.

use crate::error::AutomatonError;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STATE: AtomicU64 = AtomicU64::new(0);

/// An NFA state
///
/// States carry no payload; two states are equal only if they came from the
/// same call to [`State::fresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State(u64);

impl State {
    /// Allocate a state distinct from every state allocated before it
    pub fn fresh() -> Self {
        State(NEXT_STATE.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identity of this state
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// What a transition consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// A single character from the input
    Symbol(char),
    /// Nothing at all
    Epsilon,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Symbol(c) => write!(f, "{:?}", c),
            Label::Epsilon => write!(f, "ε"),
        }
    }
}

/// A labeled edge between two states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub label: Label,
    pub source: State,
    pub destination: State,
}

impl Transition {
    /// A transition consuming `c`
    pub fn symbol(c: char, source: State, destination: State) -> Self {
        Transition {
            label: Label::Symbol(c),
            source,
            destination,
        }
    }

    /// A transition consuming no input
    pub fn epsilon(source: State, destination: State) -> Self {
        Transition {
            label: Label::Epsilon,
            source,
            destination,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.label == Label::Epsilon
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.label, self.destination)
    }
}

/// A nondeterministic finite automaton
#[derive(Debug)]
pub struct Automaton {
    states: HashSet<State>,
    start: State,
    finals: HashSet<State>,
    transitions: HashSet<Transition>,
}

impl Automaton {
    /// Build an automaton, checking that the start state, every final state
    /// and both ends of every transition belong to `states`
    pub fn new(
        states: HashSet<State>,
        start: State,
        finals: HashSet<State>,
        transitions: HashSet<Transition>,
    ) -> Result<Self, AutomatonError> {
        if !states.contains(&start) {
            return Err(AutomatonError::StartNotInStates(start));
        }
        if let Some(&stray) = finals.iter().find(|s| !states.contains(s)) {
            return Err(AutomatonError::FinalNotInStates(stray));
        }
        if let Some(&dangling) = transitions
            .iter()
            .find(|t| !states.contains(&t.source) || !states.contains(&t.destination))
        {
            return Err(AutomatonError::DanglingTransition(dangling));
        }

        Ok(Automaton {
            states,
            start,
            finals,
            transitions,
        })
    }

    pub fn states(&self) -> &HashSet<State> {
        &self.states
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn finals(&self) -> &HashSet<State> {
        &self.finals
    }

    pub fn transitions(&self) -> &HashSet<Transition> {
        &self.transitions
    }

    pub fn is_final(&self, state: State) -> bool {
        self.finals.contains(&state)
    }

    /// True when no transition is labeled epsilon
    pub fn is_epsilon_free(&self) -> bool {
        !self.transitions.iter().any(Transition::is_epsilon)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Split the automaton back into its parts
    pub fn into_parts(
        self,
    ) -> (
        HashSet<State>,
        State,
        HashSet<State>,
        HashSet<Transition>,
    ) {
        (self.states, self.start, self.finals, self.transitions)
    }

    /// A copy accepting the same language over entirely fresh states
    ///
    /// Combining an automaton with itself must go through this: two operands
    /// sharing states would be merged into one graph by the combinators.
    pub fn duplicate(&self) -> Automaton {
        let renamed: HashMap<State, State> =
            self.states.iter().map(|&s| (s, State::fresh())).collect();

        Automaton {
            states: renamed.values().copied().collect(),
            start: renamed[&self.start],
            finals: self.finals.iter().map(|s| renamed[s]).collect(),
            transitions: self
                .transitions
                .iter()
                .map(|t| Transition {
                    label: t.label,
                    source: renamed[&t.source],
                    destination: renamed[&t.destination],
                })
                .collect(),
        }
    }
}
