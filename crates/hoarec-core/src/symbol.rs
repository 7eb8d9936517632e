// Input alphabet: symbols are Unicode code points, edges match inclusive ranges.
// Origin: hoarec/Regex.java (Atomic, Range)

/// A single input symbol. Strings are fed to the engine one code point at a time.
pub type Symbol = u32;

/// Inclusive range of input symbols matched by one position state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolRange {
    pub from: Symbol,
    pub to: Symbol,
}

impl SymbolRange {
    /// Range `[from, to]`. Ranges with `from > to` are representable but empty;
    /// the builder rejects them.
    pub const fn new(from: Symbol, to: Symbol) -> Self {
        Self { from, to }
    }

    /// Range matching exactly one symbol.
    pub const fn single(symbol: Symbol) -> Self {
        Self {
            from: symbol,
            to: symbol,
        }
    }

    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.from <= symbol && symbol <= self.to
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

/// Convert a string into the symbol sequence the engine consumes.
pub fn symbols_of(text: &str) -> Vec<Symbol> {
    text.chars().map(Symbol::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_contains_only_itself() {
        let r = SymbolRange::single('b' as Symbol);
        assert!(r.contains('b' as Symbol));
        assert!(!r.contains('a' as Symbol));
        assert!(!r.contains('c' as Symbol));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let r = SymbolRange::new('a' as Symbol, 'z' as Symbol);
        assert!(r.contains('a' as Symbol));
        assert!(r.contains('z' as Symbol));
        assert!(!r.contains('A' as Symbol));
        assert!(!r.is_empty());
    }

    #[test]
    fn reversed_range_is_empty() {
        let r = SymbolRange::new(10, 3);
        assert!(r.is_empty());
        assert!(!r.contains(5));
    }

    #[test]
    fn symbols_of_uses_code_points() {
        assert_eq!(symbols_of("aä"), vec![0x61, 0xE4]);
        assert!(symbols_of("").is_empty());
    }
}
