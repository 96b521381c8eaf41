//! # Per-Group Serialization
//!
//! A group's deduction pools span several documents, so a group-wide
//! recalculation is a multi-row read-modify-write. Two of them running
//! concurrently against one group could interleave into an inconsistent
//! pool split even though each commits transactionally. The engine hands
//! out one async mutex per group code and holds it across the whole
//! operation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  recalculate("G-1")  ──► lock("G-1") ──► load → compute → save     │
//! │  recalculate("G-1")  ──► waits                                     │
//! │  recalculate("G-2")  ──► lock("G-2") ──► runs concurrently         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock decrements do NOT go through these locks; the conditional
//! UPDATE in the product repository already makes them safe.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Hands out one lock per group code.
#[derive(Debug, Default)]
pub struct GroupLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl GroupLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        GroupLocks::default()
    }

    /// Returns the lock for a group code, creating it on first use.
    ///
    /// The caller acquires it with `.lock().await` and holds the guard
    /// for the duration of the group-wide operation. Locks are never
    /// removed; the set of live group codes is small and bounded by the
    /// lifetime of the process.
    pub async fn for_group(&self, group_code: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(group_code.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
