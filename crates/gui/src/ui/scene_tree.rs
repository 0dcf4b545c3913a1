//! Explorer panel - every object in the scene

use egui::Ui;
use shared::{ObjectId, ObjectKind};

use crate::i18n::{kind_label, t};
use crate::state::AppState;

enum RowAction {
    Select(ObjectId),
    Duplicate(ObjectId),
    Delete(ObjectId),
}

fn kind_icon(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Block => "■",
        ObjectKind::SpawnPoint => "⊕",
        ObjectKind::Group => "▣",
        ObjectKind::Behavior => "📜",
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("explorer.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("({})", state.session.objects().len()));
        });
    });
    ui.separator();

    let playing = state.session.is_playing();
    let selected = state.session.selected();
    let mut action = None;

    egui::ScrollArea::vertical()
        .id_salt("explorer_scroll")
        .show(ui, |ui| {
            egui::CollapsingHeader::new(t("explorer.workspace"))
                .id_salt("workspace")
                .default_open(true)
                .show(ui, |ui| {
                    for obj in state.session.objects() {
                        let is_selected = selected == Some(obj.id);
                        let mut text = format!("{} {}", kind_icon(obj.kind), obj.name);
                        if obj.is_protected() {
                            text.push_str(" 🔒");
                        }

                        let response = ui
                            .add_enabled(!playing, egui::SelectableLabel::new(is_selected, text))
                            .on_hover_text(kind_label(obj.kind));
                        if response.clicked() {
                            action = Some(RowAction::Select(obj.id));
                        }

                        response.context_menu(|ui| {
                            if ui.button(t("explorer.duplicate")).clicked() {
                                action = Some(RowAction::Duplicate(obj.id));
                                ui.close_menu();
                            }
                            if obj.is_protected() {
                                ui.add_enabled(false, egui::Button::new(t("explorer.locked")));
                            } else if ui.button(t("explorer.delete")).clicked() {
                                action = Some(RowAction::Delete(obj.id));
                                ui.close_menu();
                            }
                        });
                    }
                });
        });

    match action {
        Some(RowAction::Select(id)) => state.session.select(Some(id)),
        Some(RowAction::Duplicate(id)) => {
            state.session.duplicate_object(id);
        }
        Some(RowAction::Delete(id)) => {
            state.session.delete_object(id);
        }
        None => {}
    }
}
