//! Application settings

use serde::{Deserialize, Serialize};

use super::scene::DEFAULT_MAX_SNAPSHOTS;

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Russian,
    English,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::Russian, Language::English]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::English => "English",
        }
    }
}

/// Ground grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in world units
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 2.0,
            range: 25,
            opacity: 0.35,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Selection outline color RGB
    pub selection_color: [u8; 3],
    /// Opacity of the active spawn point
    pub spawn_opacity: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [135, 190, 235],
            selection_color: [0, 255, 255],
            spawn_opacity: 0.8,
        }
    }
}

/// Play-mode constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Horizontal speed while a movement key is held (units/s)
    pub move_speed: f32,
    /// Upward velocity set by a jump (units/s)
    pub jump_impulse: f32,
    /// Vertical acceleration (units/s²)
    pub gravity: f32,
    /// Horizontal velocity factor per 1/60 s without input
    pub damping: f32,
    /// Height of the actor's center above the ground when standing
    pub actor_half_height: f32,
    /// Follow camera position relative to the actor
    pub camera_offset: [f32; 3],
    /// Height above the actor the follow camera looks at
    pub look_at_height: f32,
    /// Upper bound for a single frame's delta (seconds)
    pub max_frame_delta: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            jump_impulse: 8.0,
            gravity: -25.0,
            damping: 0.8,
            actor_half_height: 2.0,
            camera_offset: [0.0, 5.0, 10.0],
            look_at_height: 1.0,
            max_frame_delta: 0.1,
        }
    }
}

impl SimulationSettings {
    /// Same constants with out-of-range values pulled back into range.
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let camera_offset = if self.camera_offset.iter().all(|v| v.is_finite()) {
            self.camera_offset
        } else {
            defaults.camera_offset
        };
        Self {
            move_speed: finite_or(self.move_speed, defaults.move_speed).max(0.0),
            jump_impulse: finite_or(self.jump_impulse, defaults.jump_impulse).max(0.0),
            gravity: finite_or(self.gravity, defaults.gravity),
            damping: finite_or(self.damping, defaults.damping).clamp(0.0, 1.0),
            actor_half_height: finite_or(self.actor_half_height, defaults.actor_half_height).max(0.0),
            camera_offset,
            look_at_height: finite_or(self.look_at_height, defaults.look_at_height),
            max_frame_delta: finite_or(self.max_frame_delta, defaults.max_frame_delta).max(0.0),
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Oldest snapshots are dropped beyond this count
    pub max_snapshots: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    #[serde(default)]
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::default(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "blockstudio", "block-studio")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings and pull simulation constants back into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.simulation = settings.simulation.sanitized();
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Cannot create config dir: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Cannot write {}: {}", path.display(), e);
                }
            }
            Err(e) => tracing::warn!("Cannot serialize settings: {}", e),
        }
    }
}
