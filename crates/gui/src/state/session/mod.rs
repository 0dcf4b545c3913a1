//! Editor session
//!
//! One `EditorSession` exists per open project. It ties the scene store to the
//! tool/selection state machine and to play mode. The UI reads it every frame
//! and calls its methods for every user action.

mod controller;
mod edit_ops;
mod play_mode;

pub use controller::DragState;

use shared::{ObjectId, SceneDescription, SceneObject};

use super::scene::SceneStore;
use super::selection::SelectionState;
use super::settings::{AppSettings, SimulationSettings};
use super::tool::{EditorMode, Tool};
use crate::play::{MoveKeys, PlayState};

/// User-visible message produced by a session action
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Scaffolding cannot be deleted
    DeleteRejected { name: String },
    /// Typed value was not accepted; the field keeps its old value
    InvalidInput { reason: String },
    Saved { project: String },
    SaveFailed { reason: String },
    Loaded { project: String },
    LoadFailed { reason: String },
    ProjectNotFound { project: String },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved { .. } | Notice::Loaded { .. })
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::DeleteRejected { name } => write!(f, "'{name}' cannot be deleted"),
            Notice::InvalidInput { reason } => write!(f, "invalid value: {reason}"),
            Notice::Saved { project } => write!(f, "saved '{project}'"),
            Notice::SaveFailed { reason } => write!(f, "save failed: {reason}"),
            Notice::Loaded { project } => write!(f, "opened '{project}'"),
            Notice::LoadFailed { reason } => write!(f, "open failed: {reason}"),
            Notice::ProjectNotFound { project } => write!(f, "project '{project}' not found"),
        }
    }
}

/// State of one open project
pub struct EditorSession {
    project_key: String,
    scene: SceneStore,
    selection: SelectionState,
    tool: Tool,
    mode: EditorMode,
    drag: Option<DragState>,
    held_keys: MoveKeys,
    play: Option<PlayState>,
    sim: SimulationSettings,
    notices: Vec<Notice>,
}

impl EditorSession {
    /// Session over `scene` using the limits from `settings`
    pub fn new(project_key: impl Into<String>, scene: SceneDescription, settings: &AppSettings) -> Self {
        let store = SceneStore::with_capacity(scene, settings.history.max_snapshots);
        Self::with_store(project_key, store, settings.simulation.clone())
    }

    /// Fresh project with the default scene and a generated key
    pub fn new_project(settings: &AppSettings) -> Self {
        let key = uuid::Uuid::new_v4().to_string();
        tracing::info!("New project {}", key);
        Self::new(key, SceneDescription::default_scene(), settings)
    }

    pub fn with_store(project_key: impl Into<String>, scene: SceneStore, sim: SimulationSettings) -> Self {
        Self {
            project_key: project_key.into(),
            scene,
            selection: SelectionState::default(),
            tool: Tool::default(),
            mode: EditorMode::Editing,
            drag: None,
            held_keys: MoveKeys::default(),
            play: None,
            sim: sim.sanitized(),
            notices: Vec::new(),
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    pub fn objects(&self) -> &[SceneObject] {
        self.scene.objects()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selection.primary()
    }

    /// Selected object, resolved through the store
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected().and_then(|id| self.scene.get(id))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == EditorMode::Playing
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn play_state(&self) -> Option<&PlayState> {
        self.play.as_ref()
    }

    pub fn held_keys(&self) -> MoveKeys {
        self.held_keys
    }

    pub fn simulation_settings(&self) -> &SimulationSettings {
        &self.sim
    }

    /// New constants apply from the next frame
    pub fn set_simulation_settings(&mut self, sim: SimulationSettings) {
        self.sim = sim.sanitized();
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand pending notices to the UI
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Queue a notice for the UI and log it
    pub fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!("{}", notice);
        } else {
            tracing::info!("{}", notice);
        }
        self.notices.push(notice);
    }

    /// Drop a selection whose object no longer exists (after undo/redo/delete)
    pub(crate) fn revalidate_selection(&mut self) {
        let scene = &self.scene;
        self.selection.retain(|id| scene.contains(id));
    }
}
