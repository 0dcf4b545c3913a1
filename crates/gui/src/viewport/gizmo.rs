use glam::Vec3;
use shared::Axis;

use super::camera::CameraPose;
use super::picking::Ray;

/// Screen pixels of horizontal drag per radian of rotation
const PIXELS_PER_RADIAN: f32 = 100.0;
/// Max ray-to-handle distance that still counts as a hit (world units)
const HIT_THRESHOLD: f32 = 0.25;

pub fn axis_vector(axis: Axis) -> Vec3 {
    match axis {
        Axis::X => Vec3::X,
        Axis::Y => Vec3::Y,
        Axis::Z => Vec3::Z,
    }
}

/// Handle colors, RGB
pub fn axis_color(axis: Axis) -> [u8; 3] {
    match axis {
        Axis::X => [230, 50, 50],
        Axis::Y => [50, 205, 50],
        Axis::Z => [50, 80, 230],
    }
}

/// Handle segments `(axis, start, end)` around `center`
pub fn gizmo_handles(center: Vec3, length: f32) -> [(Axis, Vec3, Vec3); 3] {
    Axis::ALL.map(|axis| (axis, center, center + axis_vector(axis) * length))
}

/// Test if a ray hits one of the gizmo handles.
/// The closest handle within the threshold wins.
pub fn gizmo_hit_test(ray: &Ray, center: Vec3, axis_length: f32) -> Option<Axis> {
    let mut best: Option<(Axis, f32)> = None;

    for (axis, start, end) in gizmo_handles(center, axis_length) {
        let dist = ray_segment_distance(ray, start, end);
        if dist < HIT_THRESHOLD && best.map_or(true, |(_, d)| dist < d) {
            best = Some((axis, dist));
        }
    }

    best.map(|(axis, _)| axis)
}

/// World-space distance along `axis` for a screen-space drag.
/// Projects the drag onto the axis as it appears on screen.
pub fn compute_drag_delta(
    camera: &CameraPose,
    center: Vec3,
    axis: Axis,
    screen_delta: egui::Vec2,
    rect: egui::Rect,
) -> f32 {
    let (Some(p0), Some(p1)) = (
        camera.project(center, rect),
        camera.project(center + axis_vector(axis), rect),
    ) else {
        return 0.0;
    };

    let screen_axis = p1 - p0;
    let screen_axis_len = screen_axis.length();
    if screen_axis_len < 1.0 {
        return 0.0;
    }

    // 1 world unit = screen_axis_len pixels
    let projected = screen_delta.dot(screen_axis / screen_axis_len);
    projected / screen_axis_len
}

/// Rotation (radians) for a drag with the Rotate tool
pub fn rotation_drag_angle(screen_delta: egui::Vec2) -> f32 {
    screen_delta.x / PIXELS_PER_RADIAN
}

/// Minimum distance between a ray and a line segment.
fn ray_segment_distance(ray: &Ray, line_start: Vec3, line_end: Vec3) -> f32 {
    let u = ray.direction;
    let v = line_end - line_start;
    let w = ray.origin - line_start;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    let denom = a * c - b * b;

    let (sc, tc) = if denom < 1e-7 {
        // Nearly parallel
        (0.0, if b > c { d / b } else { e / c })
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    let tc = tc.clamp(0.0, 1.0);
    let sc = sc.max(0.0);

    let closest_ray = ray.origin + u * sc;
    let closest_line = line_start + v * tc;

    (closest_ray - closest_line).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_hit_each_axis() {
        let center = Vec3::ZERO;
        for axis in Axis::ALL {
            let tip = axis_vector(axis) * 1.5;
            let origin = tip + Vec3::new(3.0, 7.0, 5.0);
            let ray = Ray {
                origin,
                direction: (tip - origin).normalize(),
            };
            assert_eq!(gizmo_hit_test(&ray, center, 2.0), Some(axis));
        }
    }

    #[test]
    fn test_miss() {
        let ray = Ray {
            origin: Vec3::new(10.0, 10.0, 10.0),
            direction: Vec3::Y,
        };
        assert_eq!(gizmo_hit_test(&ray, Vec3::ZERO, 2.0), None);
    }

    #[test]
    fn test_drag_along_screen_axis() {
        let camera = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        // X points right on screen from this camera
        let right = compute_drag_delta(&camera, Vec3::ZERO, Axis::X, egui::vec2(50.0, 0.0), rect());
        assert!(right > 0.0);
        let left = compute_drag_delta(&camera, Vec3::ZERO, Axis::X, egui::vec2(-50.0, 0.0), rect());
        assert!((left + right).abs() < 1e-4);
        // Vertical mouse motion does not move along X
        let none = compute_drag_delta(&camera, Vec3::ZERO, Axis::X, egui::vec2(0.0, 40.0), rect());
        assert!(none.abs() < 1e-4);
    }

    #[test]
    fn test_axis_pointing_at_camera_is_ignored() {
        let camera = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let d = compute_drag_delta(&camera, Vec3::ZERO, Axis::Z, egui::vec2(30.0, 30.0), rect());
        assert_eq!(d, 0.0);
    }
}
