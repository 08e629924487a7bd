//! Epsilon-elimination
//!
//! Each combinator splices automata together with a handful of epsilon
//! transitions (the *seeds*) and immediately folds them away:
//!
//! 1. The transitive closure of the seed relation is computed by fixed-point
//!    iteration over the seeds alone, never over the real transitions.
//! 2. For every closure edge `src -> dst`, `src` becomes final if `dst` was,
//!    and every real transition leaving `dst` is copied to leave `src`.
//! 3. The seeds themselves are dropped.
//!
//! The result accepts exactly what the automaton-plus-seeds accepts under
//! epsilon-aware simulation, without containing a single epsilon.

use crate::automaton::{Automaton, State, Transition};
use crate::error::AutomatonError;
use log::trace;
use std::collections::{HashMap, HashSet};

/// Transitive closure of a set of epsilon edges
///
/// Iterates until one full pass over the known pairs derives nothing new, so
/// self-loops and cycles terminate. The relation only grows and is bounded by
/// the square of the number of states involved.
pub fn epsilon_closure(seeds: &HashSet<(State, State)>) -> HashSet<(State, State)> {
    let mut closure = seeds.clone();
    let mut passes = 0usize;

    loop {
        passes += 1;
        let mut successors: HashMap<State, Vec<State>> = HashMap::new();
        for &(src, dst) in &closure {
            successors.entry(src).or_default().push(dst);
        }

        let derived: Vec<(State, State)> = closure
            .iter()
            .flat_map(|&(src, mid)| {
                successors
                    .get(&mid)
                    .into_iter()
                    .flatten()
                    .map(move |&dst| (src, dst))
            })
            .filter(|pair| !closure.contains(pair))
            .collect();

        if derived.is_empty() {
            break;
        }
        closure.extend(derived);
    }

    trace!(
        "epsilon closure: {} seed edge(s) -> {} edge(s) in {} pass(es)",
        seeds.len(),
        closure.len(),
        passes
    );
    closure
}

/// Remove the seed epsilon transitions from `automaton` by folding their
/// effect into its final states and real transitions
///
/// `automaton` itself must already be epsilon-free. Every seed must carry the
/// epsilon label and stay within the automaton's states.
pub fn eliminate_epsilon<I>(automaton: Automaton, seeds: I) -> Result<Automaton, AutomatonError>
where
    I: IntoIterator<Item = Transition>,
{
    let mut edges = HashSet::new();
    for seed in seeds {
        if !seed.is_epsilon() {
            return Err(AutomatonError::RealSeed(seed));
        }
        if !automaton.states().contains(&seed.source)
            || !automaton.states().contains(&seed.destination)
        {
            return Err(AutomatonError::DanglingTransition(seed));
        }
        edges.insert((seed.source, seed.destination));
    }

    let closure = epsilon_closure(&edges);
    let (states, start, finals, transitions) = automaton.into_parts();

    let mut outgoing: HashMap<State, Vec<&Transition>> = HashMap::new();
    for t in &transitions {
        outgoing.entry(t.source).or_default().push(t);
    }

    let mut new_finals = finals.clone();
    let mut bypasses = Vec::new();
    for &(src, dst) in &closure {
        if finals.contains(&dst) {
            new_finals.insert(src);
        }
        for t in outgoing.get(&dst).into_iter().flatten() {
            bypasses.push(Transition {
                label: t.label,
                source: src,
                destination: t.destination,
            });
        }
    }

    let mut new_transitions = transitions;
    new_transitions.extend(bypasses);

    Automaton::new(states, start, new_finals, new_transitions)
}
