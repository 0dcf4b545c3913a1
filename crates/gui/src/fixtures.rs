//! Factory functions for creating test data.
//!
//! Builds `SceneObject`s and `SceneDescription`s for tests and for scripted
//! sessions.

use shared::*;

// ── Object factories ────────────────────────────────────────────

/// Plain block at a position.
pub fn block_at(id: ObjectId, pos: [f64; 3]) -> SceneObject {
    SceneObject::new(id, ObjectKind::Block, pos)
}

/// Block with explicit scale and color.
pub fn block(id: ObjectId, name: &str, pos: [f64; 3], scale: [f64; 3], color: Color) -> SceneObject {
    SceneObject {
        name: name.to_string(),
        scale,
        color,
        ..block_at(id, pos)
    }
}

/// Block rotated by Euler angles (radians).
pub fn rotated_block(id: ObjectId, pos: [f64; 3], rotation: [f64; 3]) -> SceneObject {
    SceneObject {
        rotation,
        ..block_at(id, pos)
    }
}

/// Spawn point at a position (not scaffolding).
pub fn spawn_at(id: ObjectId, pos: [f64; 3]) -> SceneObject {
    SceneObject::new(id, ObjectKind::SpawnPoint, pos)
}

// ── Scene factories ─────────────────────────────────────────────

/// Default scene plus the given objects.
pub fn default_scene_with(objects: impl IntoIterator<Item = SceneObject>) -> SceneDescription {
    let mut scene = SceneDescription::default_scene();
    scene.objects.extend(objects);
    scene
}

/// Scene without scaffolding.
pub fn bare_scene(objects: impl IntoIterator<Item = SceneObject>) -> SceneDescription {
    SceneDescription::new(objects.into_iter().collect())
}

/// Row of `count` blocks along +X, two units apart, IDs starting at `first_id`.
pub fn block_row(first_id: ObjectId, count: usize) -> Vec<SceneObject> {
    (0..count)
        .map(|i| block_at(first_id + i as ObjectId, [i as f64 * 2.0, 0.5, 0.0]))
        .collect()
}
