//! Undo/redo functionality
//!
//! History is a linear list of full-collection snapshots plus a cursor. The
//! snapshot under the cursor always equals the live collection once an edit has
//! been committed.

use shared::SceneObject;

use super::SceneStore;

/// Immutable copy of the whole object collection
pub type HistorySnapshot = Vec<SceneObject>;

/// Linear snapshot stack with a cursor
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<HistorySnapshot>,
    cursor: usize,
    max_snapshots: usize,
}

impl History {
    pub fn new(initial: HistorySnapshot, max_snapshots: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            max_snapshots: max_snapshots.max(2),
        }
    }

    /// Record a new state. Everything after the cursor is discarded.
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.max_snapshots {
            let excess = self.snapshots.len() - self.max_snapshots;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back; returns the snapshot now under the cursor
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step forward; returns the snapshot now under the cursor
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.snapshots.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_snapshots(&self) -> usize {
        self.max_snapshots
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}

impl SceneStore {
    /// Undo last change. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        match self.history.undo() {
            Some(prev) => {
                self.scene.objects = prev.clone();
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Redo last undone change. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        match self.history.redo() {
            Some(next) => {
                self.scene.objects = next.clone();
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots currently held
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ObjectKind, SceneObject};

    fn snap(ids: &[u64]) -> HistorySnapshot {
        ids.iter()
            .map(|&id| SceneObject::new(id, ObjectKind::Block, [0.0; 3]))
            .collect()
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut h = History::new(snap(&[]), 10);
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn test_push_discards_future() {
        let mut h = History::new(snap(&[]), 10);
        h.push(snap(&[1]));
        h.push(snap(&[1, 2]));
        assert_eq!(h.undo().map(|s| s.len()), Some(1));
        h.push(snap(&[1, 3]));
        assert!(!h.can_redo());
        assert_eq!(h.len(), 3);
        assert_eq!(h.current().map(|s| s[1].id), Some(3));
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut h = History::new(snap(&[]), 3);
        h.push(snap(&[1]));
        h.push(snap(&[1, 2]));
        h.push(snap(&[1, 2, 3]));
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), 2);
        assert!(h.undo().is_some());
        assert!(h.undo().is_some());
        assert!(h.undo().is_none());
        assert_eq!(h.current().map(|s| s.len()), Some(1));
    }
}
