//! Foundation utilities for the hornbase engine.
//!
//! This module has NO dependencies on other hornbase modules.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter handing out rename ids.
///
/// Starts above zero so renamed variables are visually distinct from
/// anything a user is likely to number by hand.
static NEXT_RENAME_ID: AtomicU64 = AtomicU64::new(1000);

/// Returns a fresh rename id.
///
/// Every call returns a value never returned before in this process, so
/// two renaming passes can never collide. Atomic, so embedding the engine
/// in a threaded host is safe even though the engine itself is
/// single-threaded.
pub fn fresh_rename_id() -> u64 {
    NEXT_RENAME_ID.fetch_add(1, Ordering::Relaxed)
}
