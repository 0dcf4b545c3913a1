//! Continuous (drag) edits
//!
//! A gesture mutates the live collection every frame without touching the
//! history. `end_gesture` records a single snapshot if anything changed.

use shared::ObjectId;

use super::{FieldUpdate, Gesture, SceneStore};

impl SceneStore {
    /// Open a gesture on `id`. Any gesture already open is committed first.
    pub fn begin_gesture(&mut self, id: ObjectId) -> bool {
        self.end_gesture();
        if !self.contains(id) {
            return false;
        }
        self.gesture = Some(Gesture {
            object_id: id,
            changed: false,
        });
        true
    }

    /// Apply one frame of the open gesture
    pub fn apply_gesture(&mut self, update: FieldUpdate) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        if !update.is_well_formed() {
            tracing::debug!("Dropped non-finite drag value {:?}", update);
            return false;
        }
        let Some(obj) = self.get_mut(gesture.object_id) else {
            return false;
        };
        if update.apply_to(obj) {
            self.version += 1;
            self.gesture = Some(Gesture {
                changed: true,
                ..gesture
            });
            true
        } else {
            false
        }
    }

    /// Close the open gesture. Returns `true` if a snapshot was recorded.
    pub fn end_gesture(&mut self) -> bool {
        match self.gesture.take() {
            Some(Gesture { changed: true, .. }) => {
                self.commit();
                true
            }
            _ => false,
        }
    }
}
