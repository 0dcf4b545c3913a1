//! Headless test harness for driving an editor session without a window.

use glam::Vec3;
use shared::{Axis, ObjectId, ObjectKind, SceneDescription, SceneObject};

use crate::play::{MoveKey, PlayState};
use crate::state::scene::persistence::MemoryProjectStore;
use crate::state::scene::{FieldUpdate, PlacementHint, SceneStore};
use crate::state::settings::{AppSettings, ViewportSettings};
use crate::state::tool::Tool;
use crate::state::EditorSession;
use crate::viewport::drawable::{build_drawables, Drawable};
use crate::viewport::picking::{pick_nearest, Ray};

/// Seed used when the caller does not choose one
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Headless harness: one session, an in-memory project store, default settings
pub struct TestHarness {
    pub session: EditorSession,
    pub store: MemoryProjectStore,
    pub settings: AppSettings,
}

impl TestHarness {
    /// Default scene, deterministic random placement
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_scene(SceneDescription::default_scene(), seed)
    }

    pub fn with_scene(scene: SceneDescription, seed: u64) -> Self {
        let settings = AppSettings::default();
        let store = SceneStore::with_seed(scene, seed);
        Self {
            session: EditorSession::with_store("harness", store, settings.simulation.clone()),
            store: MemoryProjectStore::new(),
            settings,
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    pub fn add(&mut self, kind: ObjectKind) -> Option<ObjectId> {
        self.session.add_object(kind, PlacementHint::Random)
    }

    pub fn add_block_at(&mut self, position: [f64; 3]) -> Option<ObjectId> {
        self.session.add_object(ObjectKind::Block, PlacementHint::At(position))
    }

    pub fn delete(&mut self, id: ObjectId) -> bool {
        self.session.delete_object(id)
    }

    pub fn duplicate(&mut self, id: ObjectId) -> Option<ObjectId> {
        self.session.duplicate_object(id)
    }

    pub fn set_position(&mut self, id: ObjectId, position: [f64; 3]) -> bool {
        let mut changed = false;
        for axis in Axis::ALL {
            changed |= self
                .session
                .update_field(id, FieldUpdate::Position(axis, position[axis.index()]));
        }
        changed
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn clear(&mut self) {
        self.session.clear_scene();
    }

    /// Load a scene from JSON string (replaces current)
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: SceneDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.session.load_scene(scene);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(self.session.scene().description()).unwrap_or_default()
    }

    pub fn save(&mut self) -> bool {
        self.session.save(&mut self.store)
    }

    pub fn open(&mut self, key: &str) -> bool {
        self.session.open(&self.store, key)
    }

    // ── Tools and pointer ─────────────────────────────────────

    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.session.select_tool(tool)
    }

    /// Click along a world-space ray, picking like the viewport does
    pub fn click_ray(&mut self, origin: Vec3, direction: Vec3) -> Option<ObjectId> {
        let ray = Ray {
            origin,
            direction: direction.normalize_or_zero(),
        };
        let hit = pick_nearest(&ray, self.session.objects());
        self.session.click(hit);
        hit
    }

    /// Click straight down onto the point `(x, z)`
    pub fn click_from_above(&mut self, x: f32, z: f32) -> Option<ObjectId> {
        self.click_ray(Vec3::new(x, 100.0, z), Vec3::NEG_Y)
    }

    /// Full drag gesture: begin, `steps` equal moves summing to `total`, end
    pub fn drag(&mut self, axis: Axis, total: f64, steps: usize) -> bool {
        if !self.session.begin_drag(axis) {
            return false;
        }
        let steps = steps.max(1);
        for _ in 0..steps {
            self.session.drag_by(total / steps as f64);
        }
        self.session.end_drag()
    }

    // ── Play mode ─────────────────────────────────────────────

    pub fn play(&mut self) -> bool {
        self.session.enter_play()
    }

    pub fn stop(&mut self) -> bool {
        self.session.exit_play()
    }

    pub fn hold(&mut self, key: MoveKey, held: bool) {
        self.session.set_key(key, held);
    }

    /// Run `count` frames of `delta` seconds each
    pub fn run_frames(&mut self, count: usize, delta: f32) {
        for _ in 0..count {
            self.session.frame(delta);
        }
    }

    pub fn actor(&self) -> Option<&PlayState> {
        self.session.play_state()
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn object_count(&self) -> usize {
        self.session.objects().len()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.session.scene().get(id)
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.session.selected()
    }

    pub fn drawables(&self) -> Vec<Drawable> {
        build_drawables(
            self.session.objects(),
            self.session.scene().active_spawn().map(|o| o.id),
            self.session.selected(),
            self.session.play_state(),
            &ViewportSettings::default(),
        )
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
