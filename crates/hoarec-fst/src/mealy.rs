// Compiled transition table.
// Origin: hoarec/Mealy.java (Tran, compile, transitionsFor)

use hoarec_core::{Symbol, SymbolRange};

use crate::config::TrellisConfig;
use crate::glushkov::{PositionGraph, StateId};

/// One outgoing edge: any input in `[from_inclusive, to_inclusive]` moves to
/// `to_state` and emits `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tran {
    pub from_inclusive: Symbol,
    pub to_inclusive: Symbol,
    pub to_state: StateId,
    pub output: String,
}

impl Tran {
    fn new(range: SymbolRange, to_state: StateId, output: String) -> Self {
        Self {
            from_inclusive: range.from,
            to_inclusive: range.to,
            to_state,
            output,
        }
    }

    #[inline]
    pub fn contains(&self, input: Symbol) -> bool {
        self.from_inclusive <= input && input <= self.to_inclusive
    }
}

/// Mealy machine compiled from a position graph.
///
/// States `0..occurrences` are the symbol occurrences; the initial state is
/// appended last. Each state's edges are sorted by `from_inclusive`, and
/// overlapping or duplicate edges are kept exactly as constructed. The table
/// is immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Mealy {
    transitions: Vec<Vec<Tran>>,
    /// Output on acceptance per state; `None` means not accepting.
    moore_output: Vec<Option<String>>,
    initial_state: StateId,
}

impl std::fmt::Debug for Mealy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mealy")
            .field("state_count", &self.state_count())
            .field("transition_count", &self.transition_count())
            .field(
                "accepting_count",
                &self.moore_output.iter().filter(|o| o.is_some()).count(),
            )
            .field("initial_state", &self.initial_state)
            .finish()
    }
}

impl Mealy {
    /// Assemble a table from its parts. Each edge list is sorted in place.
    ///
    /// Used to reconstruct a transducer produced elsewhere. Returns `None` if
    /// the arrays disagree in length or any index is out of bounds.
    pub fn from_parts(
        mut transitions: Vec<Vec<Tran>>,
        moore_output: Vec<Option<String>>,
        initial_state: StateId,
    ) -> Option<Self> {
        let state_count = transitions.len();
        if moore_output.len() != state_count || initial_state >= state_count {
            return None;
        }
        let in_bounds = transitions
            .iter()
            .flatten()
            .all(|t| t.to_state < state_count && t.from_inclusive <= t.to_inclusive);
        if !in_bounds {
            return None;
        }
        for edges in &mut transitions {
            edges.sort_by_key(|t| (t.from_inclusive, t.to_state));
        }
        Some(Self {
            transitions,
            moore_output,
            initial_state,
        })
    }

    /// Flatten a complete position graph.
    ///
    /// Position states keep their ids, so the table has one slot per id up to
    /// the largest one in `graph`. Ids below that which the graph never handed
    /// out become unreachable states with no edges.
    pub fn from_graph(graph: &PositionGraph) -> Self {
        let occurrences = graph.state_ids().into_iter().max().map_or(0, |last| last + 1);
        let mut ranges = vec![None; occurrences];
        graph.collect_states(&mut ranges);

        let mut adjacency = vec![Vec::new(); occurrences];
        graph.collect_transitions(&mut adjacency);

        let edges_into = |targets: Vec<(StateId, String)>| -> Vec<Tran> {
            let mut edges: Vec<Tran> = targets
                .into_iter()
                .filter_map(|(target, output)| {
                    ranges[target].map(|range| Tran::new(range, target, output))
                })
                .collect();
            edges.sort_by_key(|t| (t.from_inclusive, t.to_state));
            edges
        };

        let mut transitions: Vec<Vec<Tran>> = adjacency.into_iter().map(&edges_into).collect();

        let initial_state = occurrences;
        let start = graph
            .start_states()
            .iter()
            .map(|(&state, output)| (state, output.clone()))
            .collect();
        transitions.push(edges_into(start));

        let mut moore_output = vec![None; occurrences + 1];
        moore_output[initial_state] = graph.empty_word_output().map(str::to_string);
        for (&state, output) in graph.end_states() {
            moore_output[state] = Some(output.clone());
        }

        Self {
            transitions,
            moore_output,
            initial_state,
        }
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.iter().map(Vec::len).sum()
    }

    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    /// Sorted outgoing edges of `state`.
    pub fn transitions(&self, state: StateId) -> &[Tran] {
        &self.transitions[state]
    }

    /// Output emitted when accepting in `state`, or `None` if it does not accept.
    pub fn moore_output(&self, state: StateId) -> Option<&str> {
        self.moore_output[state].as_deref()
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.moore_output[state].is_some()
    }

    /// Indices into `transitions(state)` of every edge containing `input`,
    /// back to front.
    pub(crate) fn matching_edges(
        &self,
        state: StateId,
        input: Symbol,
    ) -> impl Iterator<Item = usize> + Clone + '_ {
        let edges = &self.transitions[state];
        let end = edges.partition_point(|t| t.from_inclusive <= input);
        (0..end).rev().filter(move |&i| edges[i].contains(input))
    }

    /// Every edge of `state` whose range contains `input`, back to front.
    ///
    /// The automaton is not assumed deterministic, so all matches are
    /// returned; more than one is a signal for the caller. The iterator can be
    /// cloned to restart the scan.
    pub fn transitions_for(
        &self,
        state: StateId,
        input: Symbol,
    ) -> impl Iterator<Item = &Tran> + Clone + '_ {
        let edges = &self.transitions[state];
        self.matching_edges(state, input).map(move |i| &edges[i])
    }

    /// Fresh evaluation buffers sized for this transducer.
    pub fn new_trellis(&self) -> TrellisConfig {
        TrellisConfig::new(self.state_count())
    }
}
