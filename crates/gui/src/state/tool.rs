//! Editing tools and editor mode

use serde::{Deserialize, Serialize};

/// Active editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Select,
    Move,
    Scale,
    Rotate,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Select, Tool::Move, Tool::Scale, Tool::Rotate];

    /// i18n key of the tool label
    pub fn label_key(self) -> &'static str {
        match self {
            Tool::Select => "tool.select",
            Tool::Move => "tool.move",
            Tool::Scale => "tool.scale",
            Tool::Rotate => "tool.rotate",
        }
    }

    /// Keyboard digit that picks this tool
    pub fn shortcut(self) -> char {
        match self {
            Tool::Select => '1',
            Tool::Move => '2',
            Tool::Scale => '3',
            Tool::Rotate => '4',
        }
    }

    /// Whether dragging with this tool edits the selected object
    pub fn is_transform(self) -> bool {
        !matches!(self, Tool::Select)
    }
}

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    #[default]
    Editing,
    Playing,
}
