//! Scene edits routed through the session.
//!
//! Mutations are refused while playing. Rejections and failures turn
//! into notices instead of errors.

use shared::{ObjectId, ObjectKind, SceneDescription};

use super::{EditorSession, Notice};
use crate::error::{InputError, SceneError};
use crate::state::scene::persistence::ProjectStore;
use crate::state::scene::{FieldUpdate, PlacementHint};
use crate::validation::{parse_field, FieldKind};

impl EditorSession {
    fn editing_allowed(&self, action: &str) -> bool {
        if self.is_playing() {
            tracing::debug!("Ignored {} while playing", action);
            false
        } else {
            true
        }
    }

    /// Add an object and select it
    pub fn add_object(&mut self, kind: ObjectKind, hint: PlacementHint) -> Option<ObjectId> {
        if !self.editing_allowed("add") {
            return None;
        }
        self.end_drag();
        let id = self.scene.add_object(kind, hint);
        self.selection.select(id);
        Some(id)
    }

    /// Delete an object. Scaffolding produces a notice and nothing changes.
    pub fn delete_object(&mut self, id: ObjectId) -> bool {
        if !self.editing_allowed("delete") {
            return false;
        }
        self.end_drag();
        match self.scene.delete_object(id) {
            Ok(true) => {
                if self.selection.is_selected(id) {
                    self.selection.clear();
                }
                true
            }
            Ok(false) => false,
            Err(SceneError::Protected { name, .. }) => {
                self.notify(Notice::DeleteRejected { name });
                false
            }
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected() {
            Some(id) => self.delete_object(id),
            None => false,
        }
    }

    /// Duplicate an object and select the copy
    pub fn duplicate_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        if !self.editing_allowed("duplicate") {
            return None;
        }
        self.end_drag();
        let copy = self.scene.duplicate_object(id)?;
        self.selection.select(copy);
        Some(copy)
    }

    pub fn duplicate_selected(&mut self) -> Option<ObjectId> {
        self.selected().and_then(|id| self.duplicate_object(id))
    }

    /// Discrete field edit (typed value, color picker commit)
    pub fn update_field(&mut self, id: ObjectId, update: FieldUpdate) -> bool {
        if !self.editing_allowed("field edit") {
            return false;
        }
        self.end_drag();
        self.scene.update_field(id, update)
    }

    /// Parse `text` for `kind` and apply it. The field keeps its value on bad
    /// input. Unusable numbers are dropped quietly; a bad name or color
    /// becomes a notice.
    pub fn set_field_from_text(&mut self, id: ObjectId, kind: FieldKind, text: &str) -> bool {
        match parse_field(kind, text) {
            Ok(update) => self.update_field(id, update),
            Err(InputError::Numeric(e)) => {
                tracing::debug!("Dropped value {:?} for #{}: {}", text, id, e);
                false
            }
            Err(e) => {
                self.notify(Notice::InvalidInput {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        if !self.editing_allowed("undo") {
            return false;
        }
        self.drag = None;
        let changed = self.scene.undo();
        self.revalidate_selection();
        changed
    }

    pub fn redo(&mut self) -> bool {
        if !self.editing_allowed("redo") {
            return false;
        }
        self.drag = None;
        let changed = self.scene.redo();
        self.revalidate_selection();
        changed
    }

    /// Reset to the default scene (undoable)
    pub fn clear_scene(&mut self) -> bool {
        if !self.editing_allowed("clear") {
            return false;
        }
        self.end_drag();
        self.scene.clear();
        self.selection.clear();
        true
    }

    /// Explicit save under the session's project key
    pub fn save(&mut self, store: &mut dyn ProjectStore) -> bool {
        self.end_drag();
        let key = self.project_key.clone();
        match self.scene.save_to(store, &key) {
            Ok(()) => {
                self.notify(Notice::Saved { project: key });
                true
            }
            Err(e) => {
                self.notify(Notice::SaveFailed {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// Open the project saved under `key`. On success the session switches
    /// to that key with a fresh history.
    pub fn open(&mut self, store: &dyn ProjectStore, key: &str) -> bool {
        if !self.editing_allowed("open") {
            return false;
        }
        self.end_drag();
        match self.scene.load_from(store, key) {
            Ok(true) => {
                self.project_key = key.to_string();
                self.selection.clear();
                self.notify(Notice::Loaded {
                    project: key.to_string(),
                });
                true
            }
            Ok(false) => {
                self.notify(Notice::ProjectNotFound {
                    project: key.to_string(),
                });
                false
            }
            Err(e) => {
                self.notify(Notice::LoadFailed {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// Replace the scene with `scene` (e.g. imported from a file)
    pub fn load_scene(&mut self, scene: SceneDescription) {
        if self.is_playing() {
            self.exit_play();
        }
        self.drag = None;
        self.scene.set_scene(scene);
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scene::persistence::MemoryProjectStore;
    use crate::state::settings::AppSettings;
    use shared::Axis;

    fn session() -> EditorSession {
        EditorSession::new("proj", SceneDescription::default_scene(), &AppSettings::default())
    }

    #[test]
    fn test_delete_scaffolding_emits_notice() {
        let mut s = session();
        assert!(!s.delete_object(1));
        assert_eq!(
            s.take_notices(),
            vec![Notice::DeleteRejected {
                name: "Baseplate".into()
            }]
        );
        assert_eq!(s.objects().len(), 2);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut s = session();
        let id = s.add_object(ObjectKind::Block, PlacementHint::At([0.0, 1.0, 0.0])).unwrap();
        assert_eq!(s.selected(), Some(id));
        assert!(s.delete_selected());
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_undo_drops_stale_selection() {
        let mut s = session();
        let id = s.add_object(ObjectKind::Block, PlacementHint::Random).unwrap();
        assert_eq!(s.selected(), Some(id));
        s.undo();
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_edits_refused_while_playing() {
        let mut s = session();
        s.enter_play();
        let history = s.scene().history_len();
        assert!(s.add_object(ObjectKind::Block, PlacementHint::Random).is_none());
        assert!(!s.update_field(2, FieldUpdate::Position(Axis::X, 9.0)));
        assert!(s.duplicate_object(2).is_none());
        assert!(!s.undo());
        assert!(!s.clear_scene());
        assert_eq!(s.scene().history_len(), history);
    }

    #[test]
    fn test_bad_text_keeps_value() {
        let mut s = session();
        assert!(!s.set_field_from_text(2, FieldKind::Position(Axis::X), "1/0"));
        assert!(!s.set_field_from_text(2, FieldKind::Position(Axis::X), "abc"));
        assert!(!s.set_field_from_text(2, FieldKind::Scale(Axis::Y), "NaN"));
        assert_eq!(s.scene().get(2).unwrap().position[0], 0.0);
        assert_eq!(s.scene().history_len(), 1);
        assert!(s.notices().is_empty());

        assert!(s.set_field_from_text(2, FieldKind::Position(Axis::X), "2*3"));
        assert_eq!(s.scene().get(2).unwrap().position[0], 6.0);
    }

    #[test]
    fn test_bad_name_or_color_is_reported() {
        let mut s = session();
        assert!(!s.set_field_from_text(2, FieldKind::Name, "   "));
        assert!(!s.set_field_from_text(2, FieldKind::Color, "#zz0000"));
        assert!(matches!(
            s.notices(),
            [Notice::InvalidInput { .. }, Notice::InvalidInput { .. }]
        ));
        assert_eq!(s.scene().get(2).unwrap().name, "SpawnLocation");
    }

    #[test]
    fn test_save_and_open() {
        let mut store = MemoryProjectStore::new();
        let mut s = session();
        s.add_object(ObjectKind::Group, PlacementHint::Random);
        assert!(s.save(&mut store));

        let mut other = EditorSession::new("other", SceneDescription::default_scene(), &AppSettings::default());
        assert!(other.open(&store, "proj"));
        assert_eq!(other.project_key(), "proj");
        assert_eq!(other.objects(), s.objects());
        assert!(!other.open(&store, "missing"));
        assert!(matches!(
            other.notices().last(),
            Some(Notice::ProjectNotFound { .. })
        ));
    }
}
