//! JSON command protocol.
//!
//! Scripts whole editing sessions against a `TestHarness`: every command is a
//! JSON object tagged by `"command"`, every response reports success and
//! optional data.

use serde::{Deserialize, Serialize};
use shared::{Axis, ObjectId, ObjectKind};

use crate::harness::TestHarness;
use crate::play::MoveKey;
use crate::state::scene::PlacementHint;
use crate::state::tool::Tool;
use crate::validation::{parse_field, FieldKind};

/// A command the harness can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add an object; without `position` placement is random
    AddObject {
        kind: ObjectKind,
        #[serde(default)]
        position: Option<[f64; 3]>,
    },
    DeleteObject {
        id: ObjectId,
    },
    Duplicate {
        id: ObjectId,
    },
    /// Set one field from text, exactly as typed into the properties panel.
    /// `axis` is required for vector fields.
    UpdateField {
        id: ObjectId,
        field: FieldName,
        #[serde(default)]
        axis: Option<Axis>,
        value: String,
    },
    /// Select by ID, or clear with `null`
    Select {
        id: Option<ObjectId>,
    },
    /// Pointer click with an already-resolved pick result
    Click {
        hit: Option<ObjectId>,
    },
    SetTool {
        tool: Tool,
    },
    /// Drag the selected object along `axis` by `amount` in `steps` moves
    Drag {
        axis: Axis,
        amount: f64,
        #[serde(default = "default_steps")]
        steps: usize,
    },
    Undo,
    Redo,
    Clear,
    Play,
    Stop,
    Key {
        key: MoveKey,
        held: bool,
    },
    /// Run `count` simulation frames of `delta` seconds
    Frame {
        delta: f32,
        #[serde(default = "default_frame_count")]
        count: usize,
    },
    Save,
    Open {
        key: String,
    },
    /// Inspect the session: objects, selection, tool, mode, actor
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Field selector of `update_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Color,
    Position,
    Rotation,
    Scale,
}

impl FieldName {
    fn with_axis(self, axis: Option<Axis>) -> Result<FieldKind, String> {
        match (self, axis) {
            (FieldName::Name, _) => Ok(FieldKind::Name),
            (FieldName::Color, _) => Ok(FieldKind::Color),
            (FieldName::Position, Some(a)) => Ok(FieldKind::Position(a)),
            (FieldName::Rotation, Some(a)) => Ok(FieldKind::Rotation(a)),
            (FieldName::Scale, Some(a)) => Ok(FieldKind::Scale(a)),
            (field, None) => Err(format!("field {field:?} needs an axis")),
        }
    }
}

fn default_steps() -> usize {
    1
}

fn default_frame_count() -> usize {
    1
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    /// Failure carrying the newest session notice, if there is one
    fn rejected(harness: &mut TestHarness, fallback: &str) -> Self {
        let reason = harness
            .session
            .take_notices()
            .pop()
            .map(|n| n.to_string())
            .unwrap_or_else(|| fallback.to_string());
        Self::err(reason)
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    // Notices from earlier commands were already reported
    harness.session.take_notices();

    match cmd {
        AgentCommand::AddObject { kind, position } => {
            let hint = position.map_or(PlacementHint::Random, PlacementHint::At);
            match harness.session.add_object(kind, hint) {
                Some(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
                None => CommandResponse::err("editing is disabled while playing"),
            }
        }

        AgentCommand::DeleteObject { id } => {
            if harness.delete(id) {
                CommandResponse::ok_with_data(serde_json::json!({ "removed": id }))
            } else {
                CommandResponse::rejected(harness, "object not found")
            }
        }

        AgentCommand::Duplicate { id } => match harness.duplicate(id) {
            Some(copy) => CommandResponse::ok_with_data(serde_json::json!({ "id": copy })),
            None => CommandResponse::err(format!("cannot duplicate #{id}")),
        },

        AgentCommand::UpdateField {
            id,
            field,
            axis,
            value,
        } => {
            let kind = match field.with_axis(axis) {
                Ok(kind) => kind,
                Err(e) => return CommandResponse::err(e),
            };
            match parse_field(kind, &value) {
                Ok(update) => {
                    let changed = harness.session.update_field(id, update);
                    CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
                }
                Err(e) => CommandResponse::err(format!("invalid value: {e}")),
            }
        }

        AgentCommand::Select { id } => {
            harness.session.select(id);
            CommandResponse::ok_with_data(serde_json::json!({ "selected": harness.selected() }))
        }

        AgentCommand::Click { hit } => {
            harness.session.click(hit);
            CommandResponse::ok_with_data(serde_json::json!({ "selected": harness.selected() }))
        }

        AgentCommand::SetTool { tool } => {
            let applied = harness.set_tool(tool);
            CommandResponse::ok_with_data(serde_json::json!({
                "applied": applied,
                "tool": harness.session.tool(),
            }))
        }

        AgentCommand::Drag {
            axis,
            amount,
            steps,
        } => {
            if harness.drag(axis, amount, steps) {
                CommandResponse::ok()
            } else {
                CommandResponse::err("nothing to drag")
            }
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Clear => {
            harness.clear();
            CommandResponse::ok()
        }

        AgentCommand::Play => {
            let started = harness.play();
            CommandResponse::ok_with_data(serde_json::json!({ "started": started }))
        }

        AgentCommand::Stop => {
            let stopped = harness.stop();
            CommandResponse::ok_with_data(serde_json::json!({ "stopped": stopped }))
        }

        AgentCommand::Key { key, held } => {
            harness.hold(key, held);
            CommandResponse::ok()
        }

        AgentCommand::Frame { delta, count } => {
            if !harness.session.is_playing() {
                return CommandResponse::err("not playing");
            }
            harness.run_frames(count, delta);
            CommandResponse::ok_with_data(actor_json(harness))
        }

        AgentCommand::Save => {
            if harness.save() {
                CommandResponse::ok()
            } else {
                CommandResponse::rejected(harness, "save failed")
            }
        }

        AgentCommand::Open { key } => {
            if harness.open(&key) {
                CommandResponse::ok()
            } else {
                CommandResponse::rejected(harness, "open failed")
            }
        }

        AgentCommand::Inspect => {
            let objects: Vec<serde_json::Value> = harness
                .session
                .objects()
                .iter()
                .map(|obj| {
                    serde_json::json!({
                        "id": obj.id,
                        "name": obj.name,
                        "kind": obj.kind,
                        "position": obj.position,
                        "rotation": obj.rotation,
                        "scale": obj.scale,
                        "color": obj.color,
                        "protected": obj.is_protected(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "selected": harness.selected(),
                "tool": harness.session.tool(),
                "mode": harness.session.mode(),
                "can_undo": harness.session.scene().can_undo(),
                "can_redo": harness.session.scene().can_redo(),
                "actor": actor_json(harness),
            }))
        }

        AgentCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

fn actor_json(harness: &TestHarness) -> serde_json::Value {
    match harness.actor() {
        Some(state) => serde_json::json!({
            "position": state.actor_position.to_array(),
            "velocity": state.actor_velocity.to_array(),
            "grounded": state.grounded,
        }),
        None => serde_json::Value::Null,
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
