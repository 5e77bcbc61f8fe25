//! Engine-facing error types.
//!
//! Proof failure is *not* an error: it travels in-band as the failed
//! binding. These types cover caller misuse only: bad arity at
//! construction time, non-Horn sentences handed to `tell`, and query
//! shapes `fetch` does not evaluate.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors surfaced to embedders of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A functor with a declared arity was applied to the wrong number of
    /// arguments.
    #[error("wrong arity for '{name}': expected {expected} arguments, got {got}")]
    WrongArity {
        name: SmolStr,
        expected: usize,
        got: usize,
    },

    /// `tell` received a sentence that is not a Horn clause (e.g. a
    /// top-level disjunction).
    #[error("only Horn clauses can be told: {0}")]
    NotHorn(String),

    /// `fetch` received an expression outside the supported query shapes.
    #[error("cannot fetch this kind of expression: {0}")]
    UnsupportedQuery(String),
}
