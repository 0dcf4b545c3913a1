//! Software rendering of the viewport with egui's painter
//!
//! Cube faces are projected, lit with a fixed directional light and drawn far
//! to near. Large faces (the baseplate) are split into patches first so depth
//! sorting and near-plane rejection stay local. Faces lying in the ground
//! plane are painted before the grid, everything else after it.

use egui::{Color32, Pos2, Rect, Shape as PaintShape, Stroke};
use glam::{Mat4, Vec3};
use shared::Axis;

use super::camera::CameraPose;
use super::drawable::{outline_model_matrix, Drawable, Shape};
use super::gizmo::{axis_color, gizmo_handles};
use crate::state::settings::GridSettings;

/// Largest patch edge (world units) before a face is subdivided
const MAX_PATCH: f32 = 4.0;
const MAX_SUBDIVISIONS: usize = 32;
/// Grid lines are split so a line crossing behind the camera still draws in front
const GRID_SEGMENTS: i32 = 8;
/// Faces with every corner at or below this height belong to the ground layer
const GROUND_LEVEL: f32 = 0.02;

/// Gizmo overlay for the selected object
pub struct GizmoOverlay {
    pub center: Vec3,
    pub length: f32,
    pub active: Option<Axis>,
}

/// Corners of each unit-cube face in local space
const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    [[0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [0.5, -0.5, 0.5]],
    [[-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5], [-0.5, -0.5, -0.5]],
    [[-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5]],
    [[-0.5, -0.5, 0.5], [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5]],
    [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
    [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

struct Primitive {
    depth: f32,
    shape: PaintShape,
}

#[derive(Default)]
struct Layers {
    ground: Vec<Primitive>,
    scene: Vec<Primitive>,
}

impl Layers {
    fn push(&mut self, on_ground: bool, prim: Primitive) {
        if on_ground {
            self.ground.push(prim);
        } else {
            self.scene.push(prim);
        }
    }
}

fn paint_sorted(painter: &egui::Painter, mut prims: Vec<Primitive>) {
    prims.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    painter.extend(prims.into_iter().map(|p| p.shape));
}

/// Paint one frame of the viewport
pub fn paint_viewport(
    painter: &egui::Painter,
    rect: Rect,
    camera: &CameraPose,
    drawables: &[Drawable],
    background: [u8; 3],
    grid: &GridSettings,
    gizmo: Option<&GizmoOverlay>,
) {
    let [r, g, b] = background;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(r, g, b));

    let mut layers = Layers::default();
    for d in drawables {
        match d.shape {
            Shape::Cube => push_cube(&mut layers, rect, camera, d),
            Shape::Sphere => push_sphere(&mut layers, rect, camera, d),
        }
    }

    paint_sorted(painter, layers.ground);
    if grid.visible {
        draw_grid(painter, rect, camera, grid);
    }
    paint_sorted(painter, layers.scene);

    for d in drawables {
        if let Some(color) = d.outline {
            draw_outline(painter, rect, camera, &outline_model_matrix(&d.model), color);
        }
    }

    if let Some(gizmo) = gizmo {
        draw_gizmo(painter, rect, camera, gizmo);
    }
}

fn shade(color: [u8; 3], opacity: f32, normal: Vec3) -> Color32 {
    let light = Vec3::new(0.4, 1.0, 0.6).normalize();
    let k = 0.55 + 0.45 * normal.dot(light).max(0.0);
    let [r, g, b] = color.map(|c| (c as f32 * k).clamp(0.0, 255.0) as u8);
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

fn push_cube(layers: &mut Layers, rect: Rect, camera: &CameraPose, d: &Drawable) {
    let center = d.model.transform_point3(Vec3::ZERO);

    for face in CUBE_FACES {
        let corners = face.map(|c| d.model.transform_point3(Vec3::from(c)));
        let face_center = corners.iter().copied().sum::<Vec3>() / 4.0;

        let mut normal = (corners[1] - corners[0])
            .cross(corners[3] - corners[0])
            .normalize_or_zero();
        if normal.dot(face_center - center) < 0.0 {
            normal = -normal;
        }
        // Back-facing
        if normal.dot(camera.eye - face_center) <= 0.0 {
            continue;
        }

        let fill = shade(d.color, d.opacity, normal);
        let edge = Stroke::new(0.5, fill.gamma_multiply(0.7));
        let nu = subdivisions((corners[1] - corners[0]).length());
        let nv = subdivisions((corners[3] - corners[0]).length());

        for i in 0..nu {
            for j in 0..nv {
                let (u0, u1) = (i as f32 / nu as f32, (i + 1) as f32 / nu as f32);
                let (v0, v1) = (j as f32 / nv as f32, (j + 1) as f32 / nv as f32);
                let patch = [
                    bilerp(&corners, u0, v0),
                    bilerp(&corners, u1, v0),
                    bilerp(&corners, u1, v1),
                    bilerp(&corners, u0, v1),
                ];
                let Some(points) = project_all(camera, rect, &patch) else {
                    continue;
                };
                let patch_center = patch.iter().copied().sum::<Vec3>() / 4.0;
                let on_ground = patch.iter().all(|p| p.y <= GROUND_LEVEL);
                let stroke = if nu * nv == 1 { edge } else { Stroke::NONE };
                layers.push(
                    on_ground,
                    Primitive {
                        depth: camera.view_depth(patch_center),
                        shape: PaintShape::convex_polygon(points, fill, stroke),
                    },
                );
            }
        }
    }
}

fn push_sphere(layers: &mut Layers, rect: Rect, camera: &CameraPose, d: &Drawable) {
    let center = d.model.transform_point3(Vec3::ZERO);
    let radius_world = d.model.transform_vector3(Vec3::X).length() * 0.5;
    let right = camera.look_direction().cross(Vec3::Y).normalize_or_zero();
    let (Some(c), Some(edge)) = (
        camera.project(center, rect),
        camera.project(center + right * radius_world, rect),
    ) else {
        return;
    };
    let toward_eye = (camera.eye - center).normalize_or_zero();
    layers.push(
        false,
        Primitive {
            depth: camera.view_depth(center),
            shape: PaintShape::circle_filled(c, (edge - c).length(), shade(d.color, d.opacity, toward_eye)),
        },
    );
}

fn subdivisions(edge_length: f32) -> usize {
    ((edge_length / MAX_PATCH).ceil() as usize).clamp(1, MAX_SUBDIVISIONS)
}

fn bilerp(c: &[Vec3; 4], u: f32, v: f32) -> Vec3 {
    let a = c[0].lerp(c[1], u);
    let b = c[3].lerp(c[2], u);
    a.lerp(b, v)
}

fn project_all(camera: &CameraPose, rect: Rect, points: &[Vec3]) -> Option<Vec<Pos2>> {
    points.iter().map(|&p| camera.project(p, rect)).collect()
}

fn draw_grid(painter: &egui::Painter, rect: Rect, camera: &CameraPose, settings: &GridSettings) {
    let alpha = (settings.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let stroke = Stroke::new(0.6, Color32::from_rgba_unmultiplied(40, 40, 40, alpha));

    let range = settings.range.max(1);
    let step = settings.size.max(0.01);
    let extent = range as f32 * step;
    let y = 0.0;

    for i in -range..=range {
        let f = i as f32 * step;
        for s in 0..GRID_SEGMENTS {
            let t0 = -extent + 2.0 * extent * s as f32 / GRID_SEGMENTS as f32;
            let t1 = -extent + 2.0 * extent * (s + 1) as f32 / GRID_SEGMENTS as f32;
            for (a, b) in [
                (Vec3::new(f, y, t0), Vec3::new(f, y, t1)),
                (Vec3::new(t0, y, f), Vec3::new(t1, y, f)),
            ] {
                if let (Some(a), Some(b)) = (camera.project(a, rect), camera.project(b, rect)) {
                    if rect.contains(a) || rect.contains(b) {
                        painter.line_segment([a, b], stroke);
                    }
                }
            }
        }
    }
}

fn draw_outline(painter: &egui::Painter, rect: Rect, camera: &CameraPose, model: &Mat4, color: [u8; 3]) {
    let stroke = Stroke::new(2.0, Color32::from_rgb(color[0], color[1], color[2]));
    let corners: Vec<Option<Pos2>> = (0..8)
        .map(|i| {
            let local = Vec3::new(
                if i & 1 == 0 { -0.5 } else { 0.5 },
                if i & 2 == 0 { -0.5 } else { 0.5 },
                if i & 4 == 0 { -0.5 } else { 0.5 },
            );
            camera.project(model.transform_point3(local), rect)
        })
        .collect();

    for (a, b) in CUBE_EDGES {
        if let (Some(pa), Some(pb)) = (corners[a], corners[b]) {
            painter.line_segment([pa, pb], stroke);
        }
    }
}

fn draw_gizmo(painter: &egui::Painter, rect: Rect, camera: &CameraPose, gizmo: &GizmoOverlay) {
    for (axis, start, end) in gizmo_handles(gizmo.center, gizmo.length) {
        let (Some(a), Some(b)) = (camera.project(start, rect), camera.project(end, rect)) else {
            continue;
        };
        let [r, g, bl] = axis_color(axis);
        let width = if gizmo.active == Some(axis) { 5.0 } else { 3.0 };
        let color = Color32::from_rgb(r, g, bl);
        painter.line_segment([a, b], Stroke::new(width, color));
        painter.circle_filled(b, width + 2.0, color);
        painter.text(
            b + egui::vec2(6.0, -6.0),
            egui::Align2::LEFT_BOTTOM,
            axis.label(),
            egui::FontId::monospace(11.0),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdivisions_bounds() {
        assert_eq!(subdivisions(1.0), 1);
        assert_eq!(subdivisions(4.0), 1);
        assert_eq!(subdivisions(100.0), 25);
        assert_eq!(subdivisions(10_000.0), MAX_SUBDIVISIONS);
    }

    #[test]
    fn test_bilerp_corners() {
        let c = [
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::Y,
        ];
        assert_eq!(bilerp(&c, 0.0, 0.0), c[0]);
        assert_eq!(bilerp(&c, 1.0, 1.0), c[2]);
        assert_eq!(bilerp(&c, 0.5, 0.5), Vec3::new(0.5, 0.5, 0.0));
    }
}
