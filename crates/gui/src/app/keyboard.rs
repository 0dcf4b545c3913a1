//! Keyboard handling: editor shortcuts and play-mode movement keys

use eframe::egui;

use crate::play::MoveKeys;
use crate::state::{AppState, Tool};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // F5 — play / stop
        if i.key_pressed(egui::Key::F5) {
            toolbar::action_toggle_play(state);
        }
        // Escape — stop playing, otherwise deselect
        if i.key_pressed(egui::Key::Escape) {
            if state.session.is_playing() {
                state.session.exit_play();
            } else {
                state.session.end_drag();
                state.session.clear_selection();
            }
        }
        // Ctrl+S — save project
        if i.modifiers.command && i.key_pressed(egui::Key::S) {
            toolbar::action_save(state);
        }

        if state.session.is_playing() {
            return;
        }

        // Ctrl+Z — undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            toolbar::action_undo(state);
        }
        // Ctrl+Shift+Z or Ctrl+Y — redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            toolbar::action_redo(state);
        }
        // Delete — remove selected object
        if i.key_pressed(egui::Key::Delete) {
            toolbar::action_delete(state);
        }
        // Ctrl+D — duplicate
        if i.modifiers.command && i.key_pressed(egui::Key::D) {
            toolbar::action_duplicate(state);
        }
        // F — focus camera on selected object
        if i.key_pressed(egui::Key::F) && !i.modifiers.command {
            if let Some(obj) = state.session.selected_object() {
                viewport.focus_on(glam::Vec3::from(obj.position.map(|v| v as f32)));
            }
        }
        // 1..4 — tools
        if !i.modifiers.command {
            for (key, tool) in [
                (egui::Key::Num1, Tool::Select),
                (egui::Key::Num2, Tool::Move),
                (egui::Key::Num3, Tool::Scale),
                (egui::Key::Num4, Tool::Rotate),
            ] {
                if i.key_pressed(key) {
                    toolbar::action_set_tool(state, tool);
                }
            }
        }
    });
}

/// Movement keys held this frame (WASD or arrows, Space to jump)
pub fn sample_move_keys(ctx: &egui::Context) -> MoveKeys {
    if ctx.memory(|m| m.focused().is_some()) {
        return MoveKeys::default();
    }
    ctx.input(|i| MoveKeys {
        forward: i.key_down(egui::Key::W) || i.key_down(egui::Key::ArrowUp),
        back: i.key_down(egui::Key::S) || i.key_down(egui::Key::ArrowDown),
        left: i.key_down(egui::Key::A) || i.key_down(egui::Key::ArrowLeft),
        right: i.key_down(egui::Key::D) || i.key_down(egui::Key::ArrowRight),
        jump: i.key_down(egui::Key::Space),
    })
}
