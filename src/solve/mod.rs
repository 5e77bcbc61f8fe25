//! Resolution procedures over a knowledge base.
//!
//! - [`bc_ask`] - backward chaining: depth-first proof search, optionally
//!   bounded by patience (maximum depth) and filtered by minimum depth
//! - [`forward_chain`] / [`fc_ask`] - saturation to fixpoint, then a plain
//!   facts-only fetch
//! - [`id_ask`] - iterative deepening over the patience bound
//! - [`take`] - bound a lazy answer sequence
//!
//! Every entry point yields answers lazily; a client that stops consuming
//! aborts the remaining search with nothing to clean up.

mod backward;
mod deepening;
mod forward;

pub use backward::{bc_ask, bc_ask_with, BcOpts};
pub use deepening::id_ask;
pub use forward::{fc_ask, forward_chain};

/// Consumes up to `n` elements of a lazy sequence, returning however many
/// exist if it is shorter.
pub fn take<I: IntoIterator>(n: usize, iter: I) -> Vec<I::Item> {
    iter.into_iter().take(n).collect()
}
