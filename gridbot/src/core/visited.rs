//! Cells entered during a run.

use std::collections::HashSet;

use crate::core::geometry::Position;

/// Deduplicated set of visited cells that also remembers first-visit order.
///
/// Membership checks go through the set; the ordered log feeds checklist
/// display and snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedCells {
    order: Vec<Position>,
    seen: HashSet<Position>,
}

impl VisitedCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Returns false if the cell was already present.
    pub fn record(&mut self, position: Position) -> bool {
        if !self.seen.insert(position) {
            return false;
        }
        self.order.push(position);
        true
    }

    pub fn contains(&self, position: Position) -> bool {
        self.seen.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    /// Cells in first-visit order.
    pub fn ordered(&self) -> &[Position] {
        &self.order
    }
}
