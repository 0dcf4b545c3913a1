//! Properties panel for the selected object
//!
//! Every field is a text box. The typed text is kept while the box has focus
//! and committed when focus leaves; a rejected value reverts to the stored one.

use egui::Ui;
use shared::{Axis, ObjectId, SceneObject};

use crate::i18n::{kind_label, t};
use crate::state::AppState;
use crate::validation::FieldKind;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("props.title"));
    ui.separator();

    let Some(obj) = state.session.selected_object().cloned() else {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("props.nothing"));
        });
        return;
    };

    if state.session.is_playing() {
        ui.weak(t("props.playing"));
        return;
    }

    let mut commits: Vec<(FieldKind, String)> = Vec::new();

    egui::Grid::new("object_props")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(t("props.name"));
            if let Some(text) = text_field(ui, obj.id, FieldKind::Name, obj.name.clone(), 160.0) {
                commits.push((FieldKind::Name, text));
            }
            ui.end_row();

            ui.label(t("props.kind"));
            ui.horizontal(|ui| {
                ui.label(kind_label(obj.kind));
                if obj.is_protected() {
                    ui.weak("🔒");
                }
            });
            ui.end_row();

            ui.label("ID:");
            ui.monospace(obj.id.to_string());
            ui.end_row();
        });

    ui.add_space(6.0);
    vector_section(ui, &obj, t("props.position"), FieldKind::Position, obj.position, &mut commits);
    let degrees = obj.rotation.map(f64::to_degrees);
    vector_section(ui, &obj, t("props.rotation"), FieldKind::Rotation, degrees, &mut commits);
    vector_section(ui, &obj, t("props.scale"), FieldKind::Scale, obj.scale, &mut commits);

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(t("props.color"));
        let [r, g, b] = obj.color.0;
        let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 3.0, egui::Color32::from_rgb(r, g, b));
        if let Some(text) = text_field(ui, obj.id, FieldKind::Color, obj.color.to_hex(), 90.0) {
            commits.push((FieldKind::Color, text));
        }
    });

    for (kind, text) in commits {
        state.session.set_field_from_text(obj.id, kind, &text);
    }
}

fn vector_section(
    ui: &mut Ui,
    obj: &SceneObject,
    title: &str,
    field: fn(Axis) -> FieldKind,
    values: [f64; 3],
    commits: &mut Vec<(FieldKind, String)>,
) {
    egui::CollapsingHeader::new(title)
        .id_salt(("vec", title))
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for axis in Axis::ALL {
                    ui.label(axis.label());
                    let kind = field(axis);
                    let current = format_number(values[axis.index()]);
                    if let Some(text) = text_field(ui, obj.id, kind, current, 56.0) {
                        commits.push((kind, text));
                    }
                }
            });
        });
}

/// Single-line box over a stored value. Returns the typed text once, when
/// focus leaves and the text differs from `current`.
fn text_field(ui: &mut Ui, object: ObjectId, kind: FieldKind, current: String, width: f32) -> Option<String> {
    let id = egui::Id::new(("prop_field", object, kind));
    let mut buffer = ui
        .data_mut(|d| d.get_temp::<String>(id))
        .unwrap_or_else(|| current.clone());

    let response = ui.add(
        egui::TextEdit::singleline(&mut buffer)
            .id(id)
            .desired_width(width),
    );

    if response.lost_focus() {
        ui.data_mut(|d| d.remove::<String>(id));
        return (buffer != current).then_some(buffer);
    }
    if response.has_focus() {
        ui.data_mut(|d| d.insert_temp(id, buffer));
    } else {
        ui.data_mut(|d| d.remove::<String>(id));
    }
    None
}

/// Up to three decimals, trailing zeros dropped
fn format_number(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(2.12345), "2.123");
    }
}
