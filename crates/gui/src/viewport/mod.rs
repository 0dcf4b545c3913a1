//! 3D viewport panel

pub use block_studio_lib::viewport::{camera, drawable, gizmo, picking};
mod renderer;

use egui::Ui;
use shared::Axis;

use crate::state::{AppState, Tool};
use camera::{ArcBallCamera, CameraPose};
use drawable::build_drawables;
use gizmo::{compute_drag_delta, gizmo_hit_test, rotation_drag_angle};
use picking::pick_nearest;
use renderer::{paint_viewport, GizmoOverlay};

const GIZMO_LENGTH: f32 = 2.0;

/// 3D viewport: orbit camera while editing, follow camera while playing
pub struct ViewportPanel {
    camera: ArcBallCamera,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    /// Orbit around a point
    pub fn focus_on(&mut self, target: glam::Vec3) {
        self.camera.target = target;
    }

    /// Camera used this frame
    fn active_pose(&self, state: &AppState) -> CameraPose {
        match state.session.play_state() {
            Some(play) => play.camera,
            None => self.camera.pose(),
        }
    }

    /// Gizmo center when the selected object can be dragged
    fn gizmo_center(state: &AppState) -> Option<glam::Vec3> {
        let session = &state.session;
        if session.is_playing() || !session.tool().is_transform() {
            return None;
        }
        session
            .selected_object()
            .map(|obj| glam::Vec3::from(obj.position.map(|v| v as f32)))
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        if !state.session.is_playing() {
            // ── Gizmo and camera controls ─────────────────────────
            self.handle_gizmo_and_camera(&response, ui, rect, state);

            // ── Scroll zoom ───────────────────────────────────────
            if response.hovered() {
                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    self.camera.zoom(scroll * 0.01);
                }
            }

            // ── Object selection via click ────────────────────────
            self.handle_selection(&response, ui, rect, state);
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        let session = &state.session;
        let drawables = build_drawables(
            session.objects(),
            session.scene().active_spawn().map(|o| o.id),
            session.selected(),
            session.play_state(),
            &state.settings.viewport,
        );
        let gizmo = Self::gizmo_center(state).map(|center| GizmoOverlay {
            center,
            length: GIZMO_LENGTH,
            active: session.drag().map(|d| d.axis),
        });

        paint_viewport(
            &ui.painter_at(rect),
            rect,
            &self.active_pose(state),
            &drawables,
            state.settings.viewport.background_color,
            &state.settings.grid,
            gizmo.as_ref(),
        );
    }

    fn handle_gizmo_and_camera(&mut self, response: &egui::Response, ui: &Ui, rect: egui::Rect, state: &mut AppState) {
        // ── Gizmo drag handling ─────────────────────────────────
        if let Some(drag) = state.session.drag().copied() {
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                if delta != egui::Vec2::ZERO {
                    let amount = self.drag_amount(state, drag.tool, drag.axis, delta, rect);
                    state.session.drag_by(amount);
                }
            }
            if response.drag_stopped() || !response.dragged_by(egui::PointerButton::Primary) {
                state.session.end_drag();
            }
            return;
        }

        // ── Gizmo drag start on LMB ─────────────────────────────
        if response.drag_started_by(egui::PointerButton::Primary) && !ui.input(|i| i.modifiers.alt) {
            let pointer = response.interact_pointer_pos().or_else(|| response.hover_pos());
            if let (Some(pos), Some(center)) = (pointer, Self::gizmo_center(state)) {
                let ray = self.camera.pose().screen_ray(pos, rect);
                if let Some(axis) = gizmo_hit_test(&ray, center, GIZMO_LENGTH) {
                    if state.session.begin_drag(axis) {
                        return;
                    }
                }
            }
        }

        // ── Camera controls ─────────────────────────────────────
        if response.dragged_by(egui::PointerButton::Primary) || response.dragged_by(egui::PointerButton::Middle) {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x * 0.02, delta.y * 0.02);
        }
    }

    /// Screen drag converted to the field delta of the active tool
    fn drag_amount(&self, state: &AppState, tool: Tool, axis: Axis, delta: egui::Vec2, rect: egui::Rect) -> f64 {
        if tool == Tool::Rotate {
            return rotation_drag_angle(delta) as f64;
        }
        match Self::gizmo_center(state) {
            Some(center) => compute_drag_delta(&self.camera.pose(), center, axis, delta, rect) as f64,
            None => 0.0,
        }
    }

    fn handle_selection(&mut self, response: &egui::Response, ui: &Ui, rect: egui::Rect, state: &mut AppState) {
        if !response.clicked() || ui.input(|i| i.modifiers.alt) {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        let ray = self.camera.pose().screen_ray(pos, rect);

        // A click on a gizmo handle never picks through it
        if let Some(center) = Self::gizmo_center(state) {
            if gizmo_hit_test(&ray, center, GIZMO_LENGTH).is_some() {
                return;
            }
        }

        let hit = pick_nearest(&ray, state.session.objects());
        state.session.click(hit);
    }
}
