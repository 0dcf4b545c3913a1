//! Scene objects as renderable primitives
//!
//! Every object is a unit cube under its model matrix. The renderer in the
//! binary only sees `Drawable`s, never the store.

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::{Color, ObjectId, SceneObject};

use crate::play::PlayState;
use crate::state::settings::ViewportSettings;

/// Primitive shape in local space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Unit cube centered at the origin
    Cube,
    /// Sphere of radius 0.5 centered at the origin
    Sphere,
}

/// One primitive ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Scene object this came from (`None` for the actor)
    pub id: Option<ObjectId>,
    pub shape: Shape,
    pub model: Mat4,
    /// Base color after emissive tint
    pub color: [u8; 3],
    pub opacity: f32,
    /// Outline color for the selected object
    pub outline: Option<[u8; 3]>,
}

const SELECTED_EMISSIVE: (Color, f32) = (Color::rgb(0xff, 0xff, 0xff), 0.3);
const SPAWN_EMISSIVE: (Color, f32) = (Color::rgb(0x3b, 0x82, 0xf6), 0.2);
/// Outline box is slightly larger than the object
const OUTLINE_INFLATE: f32 = 1.02;

/// Model matrix of an object: translate, rotate (XYZ Euler), scale
pub fn object_model_matrix(obj: &SceneObject) -> Mat4 {
    let [px, py, pz] = obj.position.map(|v| v as f32);
    let [rx, ry, rz] = obj.rotation.map(|v| v as f32);
    let [sx, sy, sz] = obj.scale.map(|v| v as f32);
    Mat4::from_scale_rotation_translation(
        Vec3::new(sx, sy, sz),
        Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
        Vec3::new(px, py, pz),
    )
}

/// Model matrix of the selection outline
pub fn outline_model_matrix(model: &Mat4) -> Mat4 {
    *model * Mat4::from_scale(Vec3::splat(OUTLINE_INFLATE))
}

fn tint(color: Color, (emissive, intensity): (Color, f32)) -> [u8; 3] {
    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let base = color.0[i] as f32;
        let add = emissive.0[i] as f32 * intensity;
        *slot = (base + add).clamp(0.0, 255.0) as u8;
    }
    out
}

/// Drawables for the live collection plus the actor while playing.
/// The selection outline is only shown while editing.
pub fn build_drawables(
    objects: &[SceneObject],
    active_spawn: Option<ObjectId>,
    selected: Option<ObjectId>,
    play: Option<&PlayState>,
    settings: &ViewportSettings,
) -> Vec<Drawable> {
    let editing = play.is_none();
    let mut out = Vec::with_capacity(objects.len() + 6);

    for obj in objects {
        let is_selected = editing && selected == Some(obj.id);
        let is_spawn = active_spawn == Some(obj.id);

        let (color, opacity) = if is_selected {
            (tint(obj.color, SELECTED_EMISSIVE), 1.0)
        } else if is_spawn {
            (tint(obj.color, SPAWN_EMISSIVE), settings.spawn_opacity)
        } else {
            (obj.color.0, 1.0)
        };

        out.push(Drawable {
            id: Some(obj.id),
            shape: Shape::Cube,
            model: object_model_matrix(obj),
            color,
            opacity,
            outline: is_selected.then_some(settings.selection_color),
        });
    }

    if let Some(play) = play {
        out.extend(actor_drawables(play.actor_position));
    }
    out
}

/// The actor: torso, head, two arms, two legs
pub fn actor_drawables(position: Vec3) -> Vec<Drawable> {
    const TORSO: [u8; 3] = [0x3b, 0x82, 0xf6];
    const HEAD: [u8; 3] = [0x60, 0xa5, 0xfa];
    const ARM: [u8; 3] = [0x25, 0x63, 0xeb];
    const LEG: [u8; 3] = [0x1e, 0x40, 0xaf];

    let parts: [(Shape, Vec3, Vec3, [u8; 3]); 6] = [
        (Shape::Cube, Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0), TORSO),
        (Shape::Sphere, Vec3::new(0.0, 1.25, 0.0), Vec3::ONE, HEAD),
        (Shape::Cube, Vec3::new(-0.3, 0.0, 0.0), Vec3::new(0.3, 1.5, 0.3), ARM),
        (Shape::Cube, Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.3, 1.5, 0.3), ARM),
        (Shape::Cube, Vec3::new(-0.25, -0.75, 0.0), Vec3::new(0.3, 1.0, 0.3), LEG),
        (Shape::Cube, Vec3::new(0.25, -0.75, 0.0), Vec3::new(0.3, 1.0, 0.3), LEG),
    ];

    parts
        .into_iter()
        .map(|(shape, offset, size, color)| Drawable {
            id: None,
            shape,
            model: Mat4::from_scale_rotation_translation(size, Quat::IDENTITY, position + offset),
            color,
            opacity: 1.0,
            outline: None,
        })
        .collect()
}
