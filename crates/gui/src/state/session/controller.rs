//! Tool and selection state machine

use shared::{Axis, ObjectId};

use super::EditorSession;
use crate::state::scene::FieldUpdate;
use crate::state::tool::Tool;

/// Open pointer drag on a gizmo handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub object_id: ObjectId,
    pub axis: Axis,
    pub tool: Tool,
    /// Field value when the drag started
    pub start_value: f64,
    /// Sum of drag amounts so far
    pub accumulated: f64,
}

impl DragState {
    fn update(&self) -> FieldUpdate {
        let value = self.start_value + self.accumulated;
        match self.tool {
            Tool::Scale => FieldUpdate::Scale(self.axis, value),
            Tool::Rotate => FieldUpdate::Rotation(self.axis, value),
            Tool::Move | Tool::Select => FieldUpdate::Position(self.axis, value),
        }
    }
}

impl EditorSession {
    /// Switch the active tool. Ignored while playing.
    pub fn select_tool(&mut self, tool: Tool) -> bool {
        if self.is_playing() {
            tracing::debug!("Ignored tool change to {:?} while playing", tool);
            return false;
        }
        self.end_drag();
        self.tool = tool;
        true
    }

    /// Pointer click resolved by picking. A hit selects with any tool;
    /// a miss clears the selection only with the Select tool.
    pub fn click(&mut self, hit: Option<ObjectId>) {
        if self.is_playing() {
            return;
        }
        match hit {
            Some(id) if self.scene.contains(id) => self.selection.select(id),
            Some(id) => tracing::debug!("Click on unknown object #{}", id),
            None if self.tool == Tool::Select => self.selection.clear(),
            None => {}
        }
    }

    /// Direct selection (explorer list). `None` clears.
    pub fn select(&mut self, id: Option<ObjectId>) {
        if self.is_playing() {
            return;
        }
        match id {
            Some(id) if self.scene.contains(id) => self.selection.select(id),
            Some(_) => {}
            None => self.selection.clear(),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Start a drag along `axis` on the selected object with the current tool
    pub fn begin_drag(&mut self, axis: Axis) -> bool {
        if self.is_playing() || !self.tool.is_transform() {
            return false;
        }
        self.end_drag();
        let Some(obj) = self.selected_object() else {
            return false;
        };
        let i = axis.index();
        let start_value = match self.tool {
            Tool::Scale => obj.scale[i],
            Tool::Rotate => obj.rotation[i],
            Tool::Move | Tool::Select => obj.position[i],
        };
        let object_id = obj.id;

        if !self.scene.begin_gesture(object_id) {
            return false;
        }
        self.drag = Some(DragState {
            object_id,
            axis,
            tool: self.tool,
            start_value,
            accumulated: 0.0,
        });
        true
    }

    /// Add `amount` (world units, or radians for Rotate) to the open drag
    pub fn drag_by(&mut self, amount: f64) -> bool {
        if !amount.is_finite() {
            return false;
        }
        let Some(mut drag) = self.drag else {
            return false;
        };
        drag.accumulated += amount;
        self.drag = Some(drag);
        self.scene.apply_gesture(drag.update())
    }

    /// Finish the drag. Returns `true` if it produced an undo step.
    pub fn end_drag(&mut self) -> bool {
        if self.drag.take().is_some() {
            self.scene.end_gesture()
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::settings::AppSettings;
    use shared::{SceneDescription, SCALE_EPSILON};

    fn session() -> EditorSession {
        EditorSession::new("t", SceneDescription::default_scene(), &AppSettings::default())
    }

    #[test]
    fn test_miss_clears_only_in_select_mode() {
        let mut s = session();
        s.click(Some(2));
        s.select_tool(Tool::Move);
        s.click(None);
        assert_eq!(s.selected(), Some(2));
        s.select_tool(Tool::Select);
        s.click(None);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_hit_selects_with_any_tool() {
        let mut s = session();
        s.select_tool(Tool::Rotate);
        s.click(Some(1));
        assert_eq!(s.selected(), Some(1));
    }

    #[test]
    fn test_drag_needs_transform_tool_and_selection() {
        let mut s = session();
        assert!(!s.begin_drag(Axis::X));
        s.select_tool(Tool::Move);
        assert!(!s.begin_drag(Axis::X));
        s.click(Some(2));
        assert!(s.begin_drag(Axis::X));
    }

    #[test]
    fn test_move_drag_is_one_undo_step() {
        let mut s = session();
        s.select_tool(Tool::Move);
        s.click(Some(2));
        s.begin_drag(Axis::X);
        for _ in 0..10 {
            s.drag_by(0.5);
        }
        assert!(s.end_drag());
        assert_eq!(s.scene().get(2).unwrap().position[0], 5.0);
        assert_eq!(s.scene().history_len(), 2);
    }

    #[test]
    fn test_scale_drag_clamps_and_recovers() {
        let mut s = session();
        s.select_tool(Tool::Scale);
        s.click(Some(2));
        s.begin_drag(Axis::Y);
        s.drag_by(-5.0);
        assert_eq!(s.scene().get(2).unwrap().scale[1], SCALE_EPSILON);
        s.drag_by(5.5);
        assert!((s.scene().get(2).unwrap().scale[1] - 0.7).abs() < 1e-9);
        s.end_drag();
    }

    #[test]
    fn test_tool_change_ends_drag() {
        let mut s = session();
        s.select_tool(Tool::Rotate);
        s.click(Some(2));
        s.begin_drag(Axis::Z);
        s.drag_by(1.0);
        s.select_tool(Tool::Select);
        assert!(s.drag().is_none());
        assert!(s.scene().can_undo());
    }
}
