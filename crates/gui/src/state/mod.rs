pub mod scene;
pub mod selection;
pub mod session;
pub mod settings;
pub mod tool;

pub use scene::SceneStore;
pub use session::{EditorSession, Notice};
pub use settings::{AppSettings, Language, SimulationSettings};
pub use tool::{EditorMode, Tool};

/// Panel visibility flags
pub struct PanelVisibility {
    pub explorer: bool,
    pub properties: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            explorer: true,
            properties: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub session: EditorSession,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
    /// Key typed into the "Open project" dialog
    pub open_dialog: Option<String>,
}

impl AppState {
    pub fn new(settings: AppSettings, session: EditorSession) -> Self {
        Self {
            session,
            panels: PanelVisibility::default(),
            settings,
            show_settings_window: false,
            open_dialog: None,
        }
    }
}
