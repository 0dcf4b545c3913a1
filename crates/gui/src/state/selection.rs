use shared::ObjectId;

/// Single-object selection cursor. Holds an ID only, never a reference into
/// the collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ObjectId>,
}

impl SelectionState {
    /// Selected object, if any
    pub fn primary(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected == Some(id)
    }

    pub fn select(&mut self, id: ObjectId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Drop the selection if it points at an object that no longer exists
    pub fn retain(&mut self, exists: impl Fn(ObjectId) -> bool) {
        if let Some(id) = self.selected {
            if !exists(id) {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces() {
        let mut s = SelectionState::default();
        s.select(3);
        s.select(5);
        assert_eq!(s.primary(), Some(5));
        assert!(!s.is_selected(3));
    }

    #[test]
    fn test_retain_drops_stale_id() {
        let mut s = SelectionState::default();
        s.select(4);
        s.retain(|id| id != 4);
        assert!(s.is_empty());
    }
}
