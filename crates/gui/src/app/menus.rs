//! Application menu bar, settings window and the open-project dialog

use eframe::egui;
use shared::{ObjectKind, SceneDescription};

use crate::i18n::{kind_label, set_lang, t};
use crate::state::{AppState, Language};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.new")).clicked() {
            toolbar::action_new_project(state);
            ui.close_menu();
        }
        if ui.button(t("menu.open_project")).clicked() {
            state.open_dialog = Some(String::new());
            ui.close_menu();
        }
        if ui.button(t("menu.save_project")).clicked() {
            toolbar::action_save(state);
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.import")).clicked() {
            ui.close_menu();
            import_scene(state);
        }
        if ui.button(t("menu.export")).clicked() {
            ui.close_menu();
            export_scene(state);
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn import_scene(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.import_title"))
        .add_filter("JSON", &["json"])
        .pick_file()
    else {
        return;
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match serde_json::from_str::<SceneDescription>(&json) {
            Ok(scene) => {
                state.session.load_scene(scene);
                tracing::info!("Imported scene from {}", path.display());
            }
            Err(e) => tracing::error!("Failed to parse scene: {e}"),
        },
        Err(e) => tracing::error!("Failed to read file: {e}"),
    }
}

fn export_scene(state: &AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.export_title"))
        .add_filter("JSON", &["json"])
        .set_file_name(format!("{}.json", state.session.project_key()))
        .save_file()
    else {
        return;
    };
    match serde_json::to_string_pretty(state.session.scene().description()) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                tracing::error!("Failed to write scene: {e}");
            } else {
                tracing::info!("Exported scene to {}", path.display());
            }
        }
        Err(e) => tracing::error!("Failed to serialize scene: {e}"),
    }
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    let editing = !state.session.is_playing();
    let has_selection = state.session.selected().is_some();

    ui.menu_button(t("menu.edit"), |ui| {
        let scene = state.session.scene();
        let (can_undo, can_redo) = (scene.can_undo(), scene.can_redo());
        if ui
            .add_enabled(editing && can_undo, egui::Button::new(t("menu.undo")))
            .clicked()
        {
            toolbar::action_undo(state);
            ui.close_menu();
        }
        if ui
            .add_enabled(editing && can_redo, egui::Button::new(t("menu.redo")))
            .clicked()
        {
            toolbar::action_redo(state);
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(editing && has_selection, egui::Button::new(t("menu.duplicate")))
            .clicked()
        {
            toolbar::action_duplicate(state);
            ui.close_menu();
        }
        if ui
            .add_enabled(editing && has_selection, egui::Button::new(t("menu.delete")))
            .clicked()
        {
            toolbar::action_delete(state);
            ui.close_menu();
        }
        if ui
            .add_enabled(has_selection, egui::Button::new(t("menu.deselect")))
            .clicked()
        {
            state.session.clear_selection();
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(editing, egui::Button::new(t("menu.clear_scene")))
            .clicked()
        {
            state.session.clear_scene();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.explorer, t("menu.explorer"));
        ui.checkbox(&mut state.panels.properties, t("menu.properties"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for &language in Language::all() {
                if ui
                    .selectable_label(state.settings.ui.language == language, language.display_name())
                    .clicked()
                {
                    state.settings.ui.language = language;
                    set_lang(language.into());
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the insert menu
pub fn insert_menu(ui: &mut egui::Ui, state: &mut AppState) {
    let editing = !state.session.is_playing();
    ui.menu_button(t("menu.insert"), |ui| {
        for &kind in ObjectKind::all() {
            if ui
                .add_enabled(editing, egui::Button::new(kind_label(kind)))
                .clicked()
            {
                toolbar::action_add(state, kind);
                ui.close_menu();
            }
        }
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Modal asking for a project key
pub fn open_project_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(mut key) = state.open_dialog.take() else {
        return;
    };
    let mut keep_open = true;
    let mut confirmed = false;

    egui::Window::new(t("open.title"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(t("open.key"));
                let response = ui.add(egui::TextEdit::singleline(&mut key).desired_width(280.0));
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }
            });
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!key.trim().is_empty(), egui::Button::new(t("open.ok")))
                    .clicked()
                {
                    confirmed = true;
                }
                if ui.button(t("open.cancel")).clicked() {
                    keep_open = false;
                }
            });
        });

    if confirmed && !key.trim().is_empty() {
        toolbar::action_open(state, key.trim());
    } else if keep_open {
        state.open_dialog = Some(key);
    }
}

pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_grid_settings(ui, state);
                show_viewport_settings(ui, state);
                show_simulation_settings(ui, state);
                show_history_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open && state.show_settings_window;
}

fn show_grid_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.grid"));
    ui.checkbox(&mut state.settings.grid.visible, t("settings.grid_visible"));

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.grid.size)
                .speed(0.1)
                .range(0.25..=10.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        ui.add(egui::DragValue::new(&mut state.settings.grid.range).speed(1).range(1..=100));
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut state.settings.grid.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        egui::color_picker::color_edit_button_srgb(ui, rgb);
    });
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.viewport"));
    color_row(ui, t("settings.bg_color"), &mut state.settings.viewport.background_color);
    color_row(ui, t("settings.sel_color"), &mut state.settings.viewport.selection_color);
    ui.horizontal(|ui| {
        ui.label(t("settings.spawn_opacity"));
        ui.add(egui::Slider::new(&mut state.settings.viewport.spawn_opacity, 0.1..=1.0));
    });
    ui.add_space(10.0);
}

fn show_simulation_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.simulation"));
    let sim = &mut state.settings.simulation;
    let rows: [(&str, &mut f32, std::ops::RangeInclusive<f32>); 4] = [
        (t("settings.move_speed"), &mut sim.move_speed, 1.0..=50.0),
        (t("settings.jump"), &mut sim.jump_impulse, 0.0..=40.0),
        (t("settings.gravity"), &mut sim.gravity, -100.0..=0.0),
        (t("settings.damping"), &mut sim.damping, 0.0..=1.0),
    ];
    for (label, value, range) in rows {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).speed(0.1).range(range));
        });
    }
    ui.add_space(10.0);
}

fn show_history_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.history"));
    ui.horizontal(|ui| {
        ui.label(t("settings.max_snapshots"));
        ui.add(
            egui::DragValue::new(&mut state.settings.history.max_snapshots)
                .speed(1)
                .range(2..=4096),
        );
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(10.0..=24.0),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            let language = state.settings.ui.language;
            state.settings = crate::state::settings::AppSettings::default();
            state.settings.ui.language = language;
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
