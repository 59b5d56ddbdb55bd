// src/query/visited.rs
//! Cycle detection for traversals over the stored block graph.

use crate::types::strip;
use std::collections::HashSet;

/// Visit tracking keyed by undashed identifier, so the two spellings of
/// one id count as the same visit.
#[derive(Debug, Default)]
pub(crate) struct VisitTracker {
    visited: HashSet<String>,
}

impl VisitTracker {
    /// A tracker with `id` already visited.
    pub(crate) fn starting_at(id: &str) -> Self {
        let mut tracker = Self::default();
        tracker.visit(id);
        tracker
    }

    /// Marks an id visited; `false` if it had been seen before.
    pub(crate) fn visit(&mut self, id: &str) -> bool {
        self.visited.insert(strip(id))
    }
}
