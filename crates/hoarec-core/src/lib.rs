//! Shared types for hoarec regex-with-output transducers.
//!
//! Front ends that parse a textual grammar only need this crate: they build
//! an [`ast::Re`] and hand it to the engine in `hoarec-fst`.
//!
//! # Modules
//!
//! - [`symbol`] -- Input alphabet (code points and inclusive ranges)
//! - [`output`] -- Output algebra ("no language" vs. the empty string)
//! - [`ast`] -- The regex-with-output expression tree

pub mod ast;
pub mod output;
pub mod symbol;

pub use ast::Re;
pub use symbol::{Symbol, SymbolRange};
