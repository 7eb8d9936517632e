// Evaluation buffers and prover limits.
// Origin: hoarec/Mealy.java (evaluate trellis, checkForNondeterminism visited set)

use crate::glushkov::StateId;

/// One reached trellis cell: the state it came from and which of that state's
/// edges was taken. The seed cell at position 0 has no source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    pub source: Option<StateId>,
    pub edge: usize,
}

impl Step {
    pub const SEED: Step = Step {
        source: None,
        edge: 0,
    };
}

/// Reusable working memory for [`crate::evaluate_with`].
///
/// Holds the `(input_length + 1) x state_count` trellis plus the sparse list of
/// states reached at the current and next position. Buffers grow to the
/// largest input seen and are reused by later calls; a config must not be
/// shared between threads, but each thread may own one per transducer.
#[derive(Debug, Default)]
pub struct TrellisConfig {
    pub(crate) state_count: usize,
    pub(crate) cells: Vec<Option<Step>>,
    pub(crate) frontier: Vec<StateId>,
    pub(crate) next_frontier: Vec<StateId>,
}

impl TrellisConfig {
    /// Create a configuration for a transducer with `state_count` states.
    pub fn new(state_count: usize) -> Self {
        Self {
            state_count,
            cells: Vec::new(),
            frontier: Vec::with_capacity(state_count),
            next_frontier: Vec::with_capacity(state_count),
        }
    }

    /// Clear all cells for an input of `input_length` symbols.
    pub(crate) fn reset(&mut self, input_length: usize, state_count: usize) {
        self.state_count = state_count;
        self.cells.clear();
        self.cells.resize((input_length + 1) * state_count, None);
        self.frontier.clear();
        self.next_frontier.clear();
    }

    #[inline]
    pub(crate) fn cell(&self, position: usize, state: StateId) -> Option<Step> {
        self.cells[position * self.state_count + state]
    }

    #[inline]
    pub(crate) fn set(&mut self, position: usize, state: StateId, step: Step) {
        self.cells[position * self.state_count + state] = Some(step);
    }

    /// Number of trellis cells currently allocated.
    pub fn capacity(&self) -> usize {
        self.cells.capacity()
    }
}

/// Limits for [`crate::check_functional_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProverConfig {
    /// Abort once this many distinct superpositions have been discovered.
    /// `None` explores the whole reachable space.
    pub max_superpositions: Option<usize>,
}

impl ProverConfig {
    pub fn with_limit(max_superpositions: usize) -> Self {
        Self {
            max_superpositions: Some(max_superpositions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_previous_run() {
        let mut config = TrellisConfig::new(3);
        config.reset(2, 3);
        config.set(1, 2, Step { source: Some(0), edge: 1 });
        config.frontier.push(2);
        assert_eq!(config.cell(1, 2), Some(Step { source: Some(0), edge: 1 }));

        config.reset(2, 3);
        assert_eq!(config.cell(1, 2), None);
        assert!(config.frontier.is_empty());
    }

    #[test]
    fn reset_grows_for_longer_input() {
        let mut config = TrellisConfig::new(2);
        config.reset(1, 2);
        assert_eq!(config.cells.len(), 4);
        config.reset(10, 2);
        assert_eq!(config.cells.len(), 22);
        assert!(config.capacity() >= 22);
    }

    #[test]
    fn cells_are_row_major_by_position() {
        let mut config = TrellisConfig::new(4);
        config.reset(3, 4);
        config.set(2, 1, Step::SEED);
        assert_eq!(config.cells[2 * 4 + 1], Some(Step::SEED));
    }

    #[test]
    fn prover_default_is_unbounded() {
        assert_eq!(ProverConfig::default().max_superpositions, None);
        assert_eq!(ProverConfig::with_limit(8).max_superpositions, Some(8));
    }
}
