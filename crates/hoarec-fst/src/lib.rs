//! Functional transducer engine for regex-with-output expressions.
//!
//! An [`Re`] is compiled into a position (Glushkov) automaton in which every
//! literal symbol occurrence is one state, flattened into a [`Mealy`]
//! transition table, optionally proven single-valued, and evaluated with a
//! trellis over (position x state).
//!
//! # Architecture
//!
//! - [`glushkov`] -- Position graph construction (state renaming, start/end outputs)
//! - [`mealy`] -- Compiled transition table and the range query
//! - [`superposition`] -- Bit-set of simultaneously active states
//! - [`prover`] -- Exhaustive single-valuedness check over superpositions
//! - [`evaluate`] -- Forward trellis and backtracking output reconstruction
//! - [`config`] -- Reusable evaluation buffers and prover limits
//! - `normalize` -- Output-fragment normalisation pre-pass (feature `normalize`)

pub mod config;
pub mod evaluate;
pub mod glushkov;
pub mod mealy;
#[cfg(feature = "normalize")]
pub mod normalize;
pub mod prover;
pub mod superposition;

pub use config::{ProverConfig, TrellisConfig};
pub use evaluate::{evaluate, evaluate_str, evaluate_with};
pub use glushkov::{PositionGraph, StateId};
pub use hoarec_core::{Re, Symbol, SymbolRange};
pub use mealy::{Mealy, Tran};
#[cfg(feature = "normalize")]
pub use normalize::normalize;
pub use prover::{check_functional, check_functional_with};

/// Construction-time failure. The source expression must be fixed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("ambiguous epsilon output: union branches emit {lhs:?} and {rhs:?} on the empty word")]
    AmbiguousEpsilonOutput { lhs: String, rhs: String },
    #[error("ambiguous epsilon output: Kleene closure over an expression emitting {output:?} on the empty word")]
    AmbiguousKleeneEpsilon { output: String },
    #[error("unsupported construct: variable `{name}` cannot be compiled")]
    UnsupportedVariable { name: String },
    #[error("invalid symbol range [{from}, {to}]")]
    InvalidRange { from: Symbol, to: Symbol },
}

/// The transducer is not single-valued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmbiguityError {
    #[error("ambiguous acceptance: states {first} ({first_output:?}) and {second} ({second_output:?}) accept simultaneously")]
    AmbiguousAcceptance {
        first: StateId,
        second: StateId,
        first_output: String,
        second_output: String,
    },
    #[error("conflicting transitions: state {target} reached from both {first_source} and {second_source} over input {input}")]
    ConflictingTransitions {
        first_source: StateId,
        second_source: StateId,
        target: StateId,
        input: Symbol,
    },
    #[error("exploration limit reached after {limit} superpositions")]
    ExplorationLimit { limit: usize },
}

/// Ambiguity discovered while evaluating.
///
/// A transducer that passed [`check_functional`] never produces these; they
/// signal either a skipped proof or a construction defect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("runtime ambiguity: state {target} at position {position} reached from both {first_source} and {second_source}")]
    ConflictingPaths {
        position: usize,
        target: StateId,
        first_source: StateId,
        second_source: StateId,
    },
    #[error("runtime ambiguity: states {first} and {second} accept simultaneously")]
    SimultaneousAcceptance { first: StateId, second: StateId },
    #[error("backtracking from state {state} did not end at the initial state")]
    BrokenBacktrack { state: StateId },
}

/// Any engine failure; the target of `?` for callers mixing the three stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Ambiguity(#[from] AmbiguityError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Build the position graph of `re` and flatten it into a transition table.
pub fn compile(re: &Re) -> Result<Mealy, CompileError> {
    let mut next_state = 0;
    let graph = PositionGraph::build(re, &mut next_state)?;
    Ok(Mealy::from_graph(&graph))
}

/// Compile `re` and prove the result single-valued.
pub fn compile_and_check(re: &Re) -> Result<Mealy, Error> {
    let mealy = compile(re)?;
    check_functional(&mealy)?;
    Ok(mealy)
}
