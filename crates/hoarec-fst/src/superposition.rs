// Set of simultaneously active states.
// Origin: hoarec/Mealy.java (BitSet superpositions)

use std::fmt;

use fixedbitset::FixedBitSet;

use crate::glushkov::StateId;

/// A subset of the states of one transducer.
///
/// Every superposition of a transducer has the same capacity, so equality and
/// hashing depend on members only and the type can key the prover's visited
/// set directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Superposition {
    bits: FixedBitSet,
}

impl Superposition {
    /// Empty set over `state_count` states.
    pub fn new(state_count: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(state_count),
        }
    }

    pub fn singleton(state_count: usize, state: StateId) -> Self {
        let mut s = Self::new(state_count);
        s.insert(state);
        s
    }

    /// Add `state`. Returns `true` if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        !self.bits.put(state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones()
    }
}

impl fmt::Debug for Superposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut s = Superposition::new(130);
        assert!(s.is_empty());
        assert!(s.insert(0));
        assert!(s.insert(64));
        assert!(s.insert(129));
        assert!(!s.insert(64));
        assert!(s.contains(129));
        assert!(!s.contains(1));
        assert!(!s.contains(1000));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn iter_is_ascending() {
        let mut s = Superposition::new(200);
        for state in [150, 3, 64, 63, 0] {
            s.insert(state);
        }
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 3, 63, 64, 150]);
    }

    #[test]
    fn equality_by_members() {
        let mut a = Superposition::new(10);
        let mut b = Superposition::new(10);
        a.insert(1);
        a.insert(7);
        b.insert(7);
        b.insert(1);
        assert_eq!(a, b);
        assert_ne!(a, Superposition::singleton(10, 1));
    }

    #[test]
    fn usable_as_hash_key() {
        let mut seen = hashbrown::HashSet::new();
        assert!(seen.insert(Superposition::singleton(70, 65)));
        assert!(!seen.insert(Superposition::singleton(70, 65)));
        assert!(seen.insert(Superposition::singleton(70, 3)));
    }

    #[test]
    fn debug_lists_members() {
        let mut s = Superposition::new(8);
        s.insert(2);
        s.insert(5);
        assert_eq!(format!("{s:?}"), "{2, 5}");
    }

    #[test]
    fn zero_states() {
        let s = Superposition::new(0);
        assert!(s.is_empty());
        assert_eq!(s.iter().count(), 0);
    }
}
