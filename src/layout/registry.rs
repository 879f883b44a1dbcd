//! Per-build map from paper id to its garden position.
//!
//! An entry exists exactly when the layout traversal has visited that
//! paper. Entries are written once and never moved afterwards.

use std::collections::HashMap;

use super::draw::Point;
use crate::paper::PaperId;

/// Positions of the papers visited so far, in garden coordinates.
#[derive(Debug, Default, Clone)]
pub struct PositionRegistry {
    positions: HashMap<PaperId, Point>,
}

impl PositionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the position of `id`.
    ///
    /// Returns false and keeps the existing entry if `id` was already
    /// recorded.
    pub fn record(&mut self, id: &PaperId, position: Point) -> bool {
        if self.positions.contains_key(id) {
            return false;
        }
        self.positions.insert(id.clone(), position);
        true
    }

    /// Position of `id`, if it has been visited.
    pub fn lookup(&self, id: &PaperId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Get the number of recorded papers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_lookup() {
        let mut registry = PositionRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.record(&PaperId::from(1u32), Point::new(200.0, 450.0)));
        assert_eq!(
            registry.lookup(&PaperId::from(1u32)),
            Some(Point::new(200.0, 450.0))
        );
        assert_eq!(registry.lookup(&PaperId::from(2u32)), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_entries_are_written_once() {
        let mut registry = PositionRegistry::new();
        let id = PaperId::from("a");

        assert!(registry.record(&id, Point::new(1.0, 2.0)));
        assert!(!registry.record(&id, Point::new(9.0, 9.0)));
        assert_eq!(registry.lookup(&id), Some(Point::new(1.0, 2.0)));
    }
}
