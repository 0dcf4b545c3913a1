//! Play-mode kinematic simulation
//!
//! A single actor walks over a flat ground. `step` is pure: it takes the
//! previous state and returns the next one, and never touches the scene.

use glam::Vec3;
use shared::SceneObject;

use crate::state::settings::SimulationSettings;
use crate::viewport::camera::CameraPose;

/// Held movement keys, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Named key, for input that does not come from a keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Jump,
}

impl MoveKeys {
    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Forward => self.forward = held,
            MoveKey::Back => self.back = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
            MoveKey::Jump => self.jump = held,
        }
    }
}

/// Live play state. Discarded when play stops.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayState {
    pub actor_position: Vec3,
    pub actor_velocity: Vec3,
    /// Follow camera, read for movement direction and rewritten each step
    pub camera: CameraPose,
    /// Actor touched the ground on the last step
    pub grounded: bool,
}

impl PlayState {
    /// Actor standing at `position` with the camera already trailing it
    pub fn at(position: Vec3, settings: &SimulationSettings) -> Self {
        Self {
            actor_position: position,
            actor_velocity: Vec3::ZERO,
            camera: follow_camera(position, settings),
            grounded: false,
        }
    }

    /// Actor above the spawn point, or above the origin without one
    pub fn spawn(spawn: Option<&SceneObject>, settings: &SimulationSettings) -> Self {
        let base = spawn
            .map(|s| Vec3::new(s.position[0] as f32, s.position[1] as f32, s.position[2] as f32))
            .filter(|p| p.is_finite())
            .unwrap_or(Vec3::ZERO);
        Self::at(base + Vec3::Y * settings.actor_half_height, settings)
    }
}

/// Camera trailing the actor at the configured offset
pub fn follow_camera(actor: Vec3, settings: &SimulationSettings) -> CameraPose {
    CameraPose::new(
        actor + Vec3::from_array(settings.camera_offset),
        actor + Vec3::Y * settings.look_at_height,
    )
}

/// Horizontal movement basis (forward, right) from the camera
pub fn movement_basis(camera: &CameraPose) -> (Vec3, Vec3) {
    let look = camera.look_direction();
    let forward = Vec3::new(look.x, 0.0, look.z).try_normalize().unwrap_or(Vec3::NEG_Z);
    let right = forward.cross(Vec3::Y).normalize();
    (forward, right)
}

/// Clamp a raw frame delta into the range the integrator accepts
pub fn sanitize_delta(delta: f32, settings: &SimulationSettings) -> f32 {
    if delta.is_finite() {
        delta.min(settings.max_frame_delta).max(0.0)
    } else {
        0.0
    }
}

/// Advance the simulation by `delta` seconds
pub fn step(state: &PlayState, input: MoveKeys, delta: f32, settings: &SimulationSettings) -> PlayState {
    let delta = sanitize_delta(delta, settings);
    if delta == 0.0 {
        return state.clone();
    }

    let (forward, right) = movement_basis(&state.camera);
    let mut direction = Vec3::ZERO;
    if input.forward {
        direction += forward;
    }
    if input.back {
        direction -= forward;
    }
    if input.left {
        direction -= right;
    }
    if input.right {
        direction += right;
    }
    let direction = direction.normalize_or_zero();

    let mut velocity = state.actor_velocity;
    if direction != Vec3::ZERO {
        velocity.x = direction.x * settings.move_speed;
        velocity.z = direction.z * settings.move_speed;
    } else {
        let factor = settings.damping.powf(delta * 60.0);
        velocity.x *= factor;
        velocity.z *= factor;
    }

    velocity.y += settings.gravity * delta;
    let mut position = state.actor_position + velocity * delta;

    let ground = settings.actor_half_height;
    let grounded = position.y <= ground;
    if grounded {
        position.y = ground;
        velocity.y = 0.0;
        if input.jump {
            velocity.y = settings.jump_impulse;
        }
    }

    PlayState {
        actor_position: position,
        actor_velocity: velocity,
        camera: follow_camera(position, settings),
        grounded,
    }
}
