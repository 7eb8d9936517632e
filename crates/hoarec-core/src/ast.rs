// Regex-with-output expression tree.
// Origin: hoarec/Regex.java, hoarec/Simple.java (Product)

use std::fmt;

use crate::symbol::{Symbol, SymbolRange, symbols_of};

/// A regular expression whose atoms carry output strings.
///
/// The tree is owned, acyclic and immutable once built. Each literal symbol
/// occurrence becomes exactly one automaton state during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Re {
    /// Either side.
    Union(Box<Re>, Box<Re>),
    /// Left side followed by right side.
    Concat(Box<Re>, Box<Re>),
    /// Zero or more repetitions.
    Kleene(Box<Re>),
    /// A literal symbol sequence, emitting `output` once the whole literal has
    /// been consumed. An empty literal matches the empty word.
    Atomic { literal: Vec<Symbol>, output: String },
    /// Any one symbol in `range`, emitting `output`.
    Range { range: SymbolRange, output: String },
    /// `inner`, with `output` appended after whatever `inner` emits.
    Output { inner: Box<Re>, output: String },
    /// Reference to a named expression. Not expanded by the engine.
    Var(String),
}

impl Re {
    /// Literal string with trailing output.
    pub fn literal(literal: &str, output: &str) -> Self {
        Self::Atomic {
            literal: symbols_of(literal),
            output: output.to_string(),
        }
    }

    /// Literal from raw symbols.
    pub fn symbols(literal: Vec<Symbol>, output: &str) -> Self {
        Self::Atomic {
            literal,
            output: output.to_string(),
        }
    }

    /// The empty word, emitting `output`.
    pub fn epsilon(output: &str) -> Self {
        Self::Atomic {
            literal: Vec::new(),
            output: output.to_string(),
        }
    }

    /// Character class `[from-to]` with output.
    pub fn range(from: char, to: char, output: &str) -> Self {
        Self::Range {
            range: SymbolRange::new(Symbol::from(from), Symbol::from(to)),
            output: output.to_string(),
        }
    }

    pub fn union(lhs: Re, rhs: Re) -> Self {
        Self::Union(Box::new(lhs), Box::new(rhs))
    }

    pub fn concat(lhs: Re, rhs: Re) -> Self {
        Self::Concat(Box::new(lhs), Box::new(rhs))
    }

    pub fn kleene(inner: Re) -> Self {
        Self::Kleene(Box::new(inner))
    }

    pub fn output(inner: Re, output: &str) -> Self {
        Self::Output {
            inner: Box::new(inner),
            output: output.to_string(),
        }
    }

    pub fn var(name: &str) -> Self {
        Self::Var(name.to_string())
    }

    /// Number of position states the expression compiles to: one per literal
    /// symbol, one per range, and one per empty literal.
    pub fn occurrences(&self) -> usize {
        match self {
            Re::Union(l, r) | Re::Concat(l, r) => l.occurrences() + r.occurrences(),
            Re::Kleene(inner) | Re::Output { inner, .. } => inner.occurrences(),
            Re::Atomic { literal, .. } => literal.len().max(1),
            Re::Range { .. } => 1,
            Re::Var(_) => 0,
        }
    }
}

fn write_symbol(f: &mut fmt::Formatter<'_>, symbol: Symbol) -> fmt::Result {
    match char::from_u32(symbol) {
        Some(c) if !c.is_control() && c != '\'' && c != '\\' => write!(f, "{c}"),
        _ => write!(f, "\\u{{{symbol:x}}}"),
    }
}

fn write_output(f: &mut fmt::Formatter<'_>, output: &str) -> fmt::Result {
    if output.is_empty() {
        Ok(())
    } else {
        write!(f, ":{output:?}")
    }
}

impl fmt::Display for Re {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Re::Union(l, r) => write!(f, "({l} | {r})"),
            Re::Concat(l, r) => write!(f, "{l} {r}"),
            Re::Kleene(inner) => write!(f, "({inner})*"),
            Re::Atomic { literal, output } => {
                f.write_str("'")?;
                for &s in literal {
                    write_symbol(f, s)?;
                }
                f.write_str("'")?;
                write_output(f, output)
            }
            Re::Range { range, output } => {
                f.write_str("[")?;
                write_symbol(f, range.from)?;
                f.write_str("-")?;
                write_symbol(f, range.to)?;
                f.write_str("]")?;
                write_output(f, output)
            }
            Re::Output { inner, output } => {
                write!(f, "({inner})")?;
                write_output(f, output)
            }
            Re::Var(name) => write!(f, "{name}"),
        }
    }
}
