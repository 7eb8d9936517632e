// Single-valuedness proof by exhaustive superposition exploration.
// Origin: hoarec/Mealy.java (checkForNondeterminism, superpositionTransition)
//
// Starting from {initial}, every reachable set of simultaneously active states
// is visited once. A set fails if two of its states accept, or if one input
// drives two edges into the same state. The alphabet is partitioned by the
// edge boundaries of the current set, so only one input per interval needs
// to be tried.

use hashbrown::{HashMap, HashSet};
use hoarec_core::Symbol;

use crate::AmbiguityError;
use crate::config::ProverConfig;
use crate::glushkov::StateId;
use crate::mealy::Mealy;
use crate::superposition::Superposition;

/// Prove that no input has two accepting computations in `mealy`.
pub fn check_functional(mealy: &Mealy) -> Result<(), AmbiguityError> {
    check_functional_with(mealy, &ProverConfig::default())
}

/// [`check_functional`] with an optional bound on explored superpositions.
pub fn check_functional_with(mealy: &Mealy, config: &ProverConfig) -> Result<(), AmbiguityError> {
    let state_count = mealy.state_count();
    let initial = Superposition::singleton(state_count, mealy.initial_state());
    let mut visited: HashSet<Superposition> = HashSet::new();
    visited.insert(initial.clone());
    let mut to_visit = vec![initial];

    while let Some(superposition) = to_visit.pop() {
        check_accepts_in_multiple_places(mealy, &superposition)?;
        for input in alignment_boundaries(mealy, &superposition) {
            let next = superposition_transition(mealy, &superposition, input)?;
            if next.is_empty() || visited.contains(&next) {
                continue;
            }
            if let Some(limit) = config.max_superpositions {
                if visited.len() >= limit {
                    return Err(AmbiguityError::ExplorationLimit { limit });
                }
            }
            visited.insert(next.clone());
            to_visit.push(next);
        }
    }
    Ok(())
}

/// Fail if more than one member of `superposition` accepts.
pub fn check_accepts_in_multiple_places(
    mealy: &Mealy,
    superposition: &Superposition,
) -> Result<(), AmbiguityError> {
    let mut accepting: Option<(StateId, &str)> = None;
    for state in superposition.iter() {
        let Some(output) = mealy.moore_output(state) else {
            continue;
        };
        match accepting {
            None => accepting = Some((state, output)),
            Some((first, first_output)) => {
                return Err(AmbiguityError::AmbiguousAcceptance {
                    first,
                    second: state,
                    first_output: first_output.to_string(),
                    second_output: output.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// One representative input per interval on which every member behaves uniformly.
///
/// Each edge `[from, to]` of a member opens an interval at `from` and another
/// at `to + 1`; symbol 0 covers everything below the smallest bound. The
/// lower end of each interval is its representative. Returned ascending.
pub fn alignment_boundaries(mealy: &Mealy, superposition: &Superposition) -> Vec<Symbol> {
    let mut boundaries = vec![Symbol::MIN];
    for state in superposition.iter() {
        for tran in mealy.transitions(state) {
            boundaries.push(tran.from_inclusive);
            if let Some(above) = tran.to_inclusive.checked_add(1) {
                boundaries.push(above);
            }
        }
    }
    boundaries.sort_unstable();
    boundaries.dedup();
    boundaries
}

/// States active after reading `input` from `superposition`.
///
/// Fails if any state is entered twice, whether from two different members
/// or through duplicate edges of one member.
pub fn superposition_transition(
    mealy: &Mealy,
    superposition: &Superposition,
    input: Symbol,
) -> Result<Superposition, AmbiguityError> {
    let mut next = Superposition::new(mealy.state_count());
    let mut reached_from: HashMap<StateId, StateId> = HashMap::new();
    for source in superposition.iter() {
        for tran in mealy.transitions_for(source, input) {
            if let Some(&first_source) = reached_from.get(&tran.to_state) {
                return Err(AmbiguityError::ConflictingTransitions {
                    first_source,
                    second_source: source,
                    target: tran.to_state,
                    input,
                });
            }
            reached_from.insert(tran.to_state, source);
            next.insert(tran.to_state);
        }
    }
    Ok(next)
}
