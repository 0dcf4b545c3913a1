//! Toolbar actions and UI

use egui::Ui;
use shared::ObjectKind;

use crate::i18n::{kind_label, t};
use crate::state::scene::persistence::FileProjectStore;
use crate::state::scene::PlacementHint;
use crate::state::{AppState, EditorSession, Notice, Tool};

// ── Public actions (callable from menus and shortcuts too) ───

pub fn action_add(state: &mut AppState, kind: ObjectKind) {
    if let Some(id) = state.session.add_object(kind, PlacementHint::Random) {
        tracing::info!("Added {:?} #{}", kind, id);
    }
}

pub fn action_delete(state: &mut AppState) {
    state.session.delete_selected();
}

pub fn action_duplicate(state: &mut AppState) {
    state.session.duplicate_selected();
}

pub fn action_undo(state: &mut AppState) {
    state.session.undo();
}

pub fn action_redo(state: &mut AppState) {
    state.session.redo();
}

pub fn action_toggle_play(state: &mut AppState) {
    state.session.toggle_play();
}

pub fn action_set_tool(state: &mut AppState, tool: Tool) {
    state.session.select_tool(tool);
}

/// Save the open project into the user data directory
pub fn action_save(state: &mut AppState) {
    match FileProjectStore::in_data_dir() {
        Ok(mut store) => {
            state.session.save(&mut store);
        }
        Err(e) => state.session.notify(Notice::SaveFailed {
            reason: e.to_string(),
        }),
    }
}

/// Open a saved project by key; the current session stays on failure
pub fn action_open(state: &mut AppState, key: &str) {
    match FileProjectStore::in_data_dir() {
        Ok(store) => {
            state.session.open(&store, key);
        }
        Err(e) => state.session.notify(Notice::LoadFailed {
            reason: e.to_string(),
        }),
    }
}

/// Start over with a fresh project key and the default scene
pub fn action_new_project(state: &mut AppState) {
    state.session = EditorSession::new_project(&state.settings);
}

// ── Toolbar UI ───────────────────────────────────────────────

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let playing = state.session.is_playing();

    ui.horizontal(|ui| {
        ui.add_enabled_ui(!playing, |ui| {
            for tool in Tool::ALL {
                let active = state.session.tool() == tool;
                let label = format!("{} ({})", t(tool.label_key()), tool.shortcut());
                if ui.selectable_label(active, label).clicked() {
                    action_set_tool(state, tool);
                }
            }

            ui.separator();

            ui.menu_button(t("tb.add"), |ui| {
                for &kind in ObjectKind::all() {
                    if ui.button(kind_label(kind)).clicked() {
                        action_add(state, kind);
                        ui.close_menu();
                    }
                }
            });

            ui.separator();

            let scene = state.session.scene();
            let (can_undo, can_redo) = (scene.can_undo(), scene.can_redo());
            if ui
                .add_enabled(can_undo, egui::Button::new("↶"))
                .on_hover_text(t("tb.undo_tip"))
                .clicked()
            {
                action_undo(state);
            }
            if ui
                .add_enabled(can_redo, egui::Button::new("↷"))
                .on_hover_text(t("tb.redo_tip"))
                .clicked()
            {
                action_redo(state);
            }
            if ui.button("💾").on_hover_text(t("tb.save_tip")).clicked() {
                action_save(state);
            }
        });

        ui.separator();

        let (label, fill) = if playing {
            (t("tb.stop"), egui::Color32::from_rgb(170, 50, 50))
        } else {
            (t("tb.play"), egui::Color32::from_rgb(40, 130, 60))
        };
        if ui.add(egui::Button::new(label).fill(fill)).clicked() {
            action_toggle_play(state);
        }
    });
}
