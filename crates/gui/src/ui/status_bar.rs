use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    let session = &state.session;
    ui.horizontal(|ui| {
        ui.weak(format!("{}: {}", t("status.objects"), session.objects().len()));

        ui.separator();

        if session.is_playing() {
            ui.colored_label(egui::Color32::from_rgb(120, 220, 120), t("status.playing"));
            if let Some(play) = session.play_state() {
                let p = play.actor_position;
                ui.separator();
                ui.monospace(format!("{:.1} {:.1} {:.1}", p.x, p.y, p.z));
            }
        } else {
            match session.selected_object() {
                Some(obj) => {
                    ui.label(format!("{}: {}", t("status.selected"), obj.name));
                }
                None => {
                    ui.weak(t("status.editing"));
                }
            }
            ui.separator();
            ui.weak(t(session.tool().label_key()));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("{}: {}", t("status.project"), session.project_key()));
        });
    });
}
