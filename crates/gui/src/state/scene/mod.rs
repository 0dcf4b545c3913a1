//! Scene store
//!
//! Owns the ordered object collection and its undo/redo history. Every
//! committed mutation pushes one snapshot; drag gestures are coalesced into a
//! single snapshot when they end.

mod field_ops;
mod history;
mod object_ops;
pub mod persistence;
mod transform_ops;

pub use field_ops::FieldUpdate;
pub use history::{History, HistorySnapshot};
pub use object_ops::{PlacementHint, DUPLICATE_OFFSET};

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{ObjectId, SceneDescription, SceneObject};

/// Default number of snapshots kept for undo
pub const DEFAULT_MAX_SNAPSHOTS: usize = 256;

/// Open continuous edit (drag) on one object
#[derive(Debug, Clone, Copy)]
pub(crate) struct Gesture {
    pub object_id: ObjectId,
    pub changed: bool,
}

/// Scene state with objects and undo/redo history
pub struct SceneStore {
    /// Live collection
    pub(crate) scene: SceneDescription,
    pub(crate) history: History,
    /// Monotonically increasing version counter for change detection
    pub(crate) version: u64,
    pub(crate) next_id: ObjectId,
    pub(crate) rng: StdRng,
    pub(crate) gesture: Option<Gesture>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(SceneDescription::default_scene())
    }
}

impl SceneStore {
    /// Store over `scene` with a fresh history
    pub fn new(scene: SceneDescription) -> Self {
        Self::with_rng(scene, DEFAULT_MAX_SNAPSHOTS, StdRng::from_entropy())
    }

    /// Store keeping at most `max_snapshots` history entries
    pub fn with_capacity(scene: SceneDescription, max_snapshots: usize) -> Self {
        Self::with_rng(scene, max_snapshots, StdRng::from_entropy())
    }

    /// Store whose random placement is reproducible
    pub fn with_seed(scene: SceneDescription, seed: u64) -> Self {
        Self::with_rng(scene, DEFAULT_MAX_SNAPSHOTS, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(scene: SceneDescription, max_snapshots: usize, rng: StdRng) -> Self {
        let scene = prepare_loaded(scene);
        let next_id = scene.max_id() + 1;
        Self {
            history: History::new(scene.objects.clone(), max_snapshots),
            scene,
            version: 0,
            next_id,
            rng,
            gesture: None,
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Live collection in display order
    pub fn objects(&self) -> &[SceneObject] {
        &self.scene.objects
    }

    /// Live collection as a persistable description
    pub fn description(&self) -> &SceneDescription {
        &self.scene
    }

    /// Look up an object by ID
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.scene.objects.iter().find(|o| o.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.scene.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.scene.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.objects.is_empty()
    }

    /// Spawn point used by play mode (lowest ID if several exist)
    pub fn active_spawn(&self) -> Option<&SceneObject> {
        self.scene.active_spawn()
    }

    /// Replace the collection (project load). History restarts from here.
    pub fn set_scene(&mut self, scene: SceneDescription) {
        let scene = prepare_loaded(scene);
        self.gesture = None;
        self.next_id = scene.max_id() + 1;
        self.history = History::new(scene.objects.clone(), self.history.max_snapshots());
        self.scene = scene;
        self.version += 1;
    }

    /// Reset to the default scene as an undoable edit
    pub fn clear(&mut self) {
        self.end_gesture();
        let fresh = SceneDescription::default_scene();
        // Keep IDs monotonic across the reset
        self.scene.objects = fresh
            .objects
            .into_iter()
            .map(|mut o| {
                o.id = self.issue_id();
                o
            })
            .collect();
        self.commit();
    }

    pub(crate) fn issue_id(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Save the live collection as a new history entry
    pub(crate) fn commit(&mut self) {
        self.history.push(self.scene.objects.clone());
        self.version += 1;
    }
}

/// Loaded data may miss the scaffold flags or carry repeated IDs
fn prepare_loaded(mut scene: SceneDescription) -> SceneDescription {
    if scene.restore_scaffolding() {
        tracing::debug!("Restored scaffold flags on a loaded scene");
    }
    dedupe_ids(scene)
}

/// Later duplicates of an ID get fresh ones
fn dedupe_ids(mut scene: SceneDescription) -> SceneDescription {
    let mut seen = std::collections::HashSet::new();
    let mut next = scene.max_id() + 1;
    for obj in &mut scene.objects {
        if !seen.insert(obj.id) {
            tracing::warn!("Duplicate object id {} in loaded scene, reassigned to {}", obj.id, next);
            obj.id = next;
            seen.insert(next);
            next += 1;
        }
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ObjectKind;

    #[test]
    fn test_default_store_has_scaffolding() {
        let store = SceneStore::default();
        assert_eq!(store.len(), 2);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert!(store.active_spawn().is_some());
    }

    #[test]
    fn test_set_scene_resets_history_and_ids() {
        let mut store = SceneStore::with_seed(SceneDescription::default_scene(), 1);
        store.add_object(ObjectKind::Block, PlacementHint::Random);
        assert!(store.can_undo());

        let loaded = SceneDescription::new(vec![SceneObject::new(40, ObjectKind::Block, [0.0; 3])]);
        store.set_scene(loaded);
        assert!(!store.can_undo());
        let id = store.add_object(ObjectKind::Block, PlacementHint::Random);
        assert_eq!(id, 41);
    }

    #[test]
    fn test_duplicate_ids_in_loaded_scene_are_reassigned() {
        let loaded = SceneDescription::new(vec![
            SceneObject::new(5, ObjectKind::Block, [0.0; 3]),
            SceneObject::new(5, ObjectKind::Block, [1.0, 0.0, 0.0]),
        ]);
        let store = SceneStore::new(loaded);
        assert_eq!(store.objects()[0].id, 5);
        assert_eq!(store.objects()[1].id, 6);
    }

    #[test]
    fn test_imported_scene_keeps_scaffolding_protected() {
        let json = r##"{"objects": [
            {"id": 1, "name": "Baseplate", "kind": "block", "position": [0, -0.5, 0],
             "rotation": [0, 0, 0], "scale": [100, 1, 100], "color": "#4a4a4a"},
            {"id": 2, "name": "SpawnLocation", "kind": "spawn_point", "position": [0, 0.1, 0],
             "rotation": [0, 0, 0], "scale": [4, 0.2, 4], "color": "#3b82f6"}
        ]}"##;
        let scene: SceneDescription = serde_json::from_str(json).unwrap();
        let mut store = SceneStore::default();
        store.set_scene(scene);
        assert!(store.delete_object(1).is_err());
        assert!(store.delete_object(2).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut store = SceneStore::with_seed(SceneDescription::default_scene(), 2);
        store.add_object(ObjectKind::Block, PlacementHint::Random);
        assert_eq!(store.len(), 3);
        store.clear();
        assert_eq!(store.len(), 2);
        assert!(store.undo());
        assert_eq!(store.len(), 3);
    }
}
