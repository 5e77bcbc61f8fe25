//! # hornbase
//!
//! Core library for Horn-clause logic programming: a knowledge base of
//! rules and facts, queries as logical formulas, and lazy enumeration of
//! the bindings under which a query is entailed. Definite clauses plus
//! negation-as-failure, disjunction, comparison constraints, and list/tail
//! pattern matching.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser     → Logos lexer, recursive-descent parser, KB loading
//!   ↓
//! solve      → backward chaining, forward chaining, iterative deepening
//!   ↓
//! kb         → knowledge-base facade: compound queries over any table
//!   ↓
//! table      → clause storage: linear, predicate index, trie, heuristic
//!   ↓
//! constraint → comparison constraints over bindings
//!   ↓
//! unify      → bidirectional bindings, unification, occurs check
//!   ↓
//! term       → the Logical expression tree, rules, substitution
//!   ↓
//! base       → primitives (rename-id generator)
//! ```
//!
//! The engine is single-threaded and cooperative: every ask returns a lazy
//! iterator, and a client that stops consuming aborts the remaining search
//! with nothing to clean up.

// ============================================================================
// MODULES (dependency order: base → term → unify → … → parser)
// ============================================================================

/// Foundation: the rename-id generator
pub mod base;

/// Term model: logical expressions, rules, substitution, standardization
pub mod term;

/// Unification: bindings and the two-sided binding algorithm
pub mod unify;

/// Comparison constraints embedded in proofs
pub mod constraint;

/// Clause tables: four storage strategies behind one contract
pub mod table;

/// Knowledge-base facade: compound queries over any table
pub mod kb;

/// Resolution: backward chaining, forward chaining, iterative deepening
pub mod solve;

/// Prolog surface syntax: lexer, parser, knowledge-base loading
pub mod parser;

/// Engine-facing error types
pub mod error;

// Re-export the working vocabulary
pub use constraint::{CmpOp, Constraint};
pub use error::EngineError;
pub use kb::{KnowledgeBase, Sentence};
pub use parser::{knowledge_base, knowledge_base_from_reader, parse_program, parse_query, ParseError};
pub use solve::{bc_ask, bc_ask_with, fc_ask, forward_chain, id_ask, take, BcOpts};
pub use table::{FetchResult, HeuristicIndex, LinearTable, PredicateIndex, Table, TrieTable};
pub use term::{
    atom, functor, functor_n, reset_ids, standardize, substitute, var, variables, variables_in,
    Functor, Keyword, Logical, Rule, Term, Var,
};
pub use unify::{occurs, resolve, unifiable, unify, Binding, Unifier};
