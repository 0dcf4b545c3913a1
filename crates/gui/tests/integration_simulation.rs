//! Play-mode simulation scenarios.

use block_studio_lib::harness::TestHarness;
use block_studio_lib::play::{step, MoveKey, MoveKeys, PlayState};
use block_studio_lib::state::SimulationSettings;
use glam::Vec3;

fn run(mut state: PlayState, keys: MoveKeys, frames: &[(usize, f32)], s: &SimulationSettings) -> PlayState {
    for &(count, delta) in frames {
        for _ in 0..count {
            state = step(&state, keys, delta, s);
        }
    }
    state
}

#[test]
fn test_frame_rate_independence() {
    let s = SimulationSettings::default();
    let start = PlayState::at(Vec3::new(0.0, s.actor_half_height, 0.0), &s);
    let keys = MoveKeys {
        forward: true,
        right: true,
        ..Default::default()
    };

    let coarse = run(start.clone(), keys, &[(10, 0.1)], &s);
    // 62.5 frames of 0.016 s
    let fine = run(start, keys, &[(62, 0.016), (1, 0.008)], &s);

    let gap = (coarse.actor_position - fine.actor_position).length();
    assert!(gap < 1e-3, "coarse {:?} fine {:?}", coarse.actor_position, fine.actor_position);
    let travelled = Vec3::new(coarse.actor_position.x, 0.0, coarse.actor_position.z).length();
    assert!((travelled - s.move_speed).abs() < 1e-3);
}

#[test]
fn test_ground_clamp_from_height() {
    let s = SimulationSettings::default();
    assert_eq!(s.gravity, -25.0);
    let start = PlayState::at(Vec3::new(0.0, 10.0, 0.0), &s);

    let end = run(start, MoveKeys::default(), &[(300, 0.016)], &s);
    assert_eq!(end.actor_position.y, s.actor_half_height);
    assert_eq!(end.actor_velocity.y, 0.0);
    assert!(end.grounded);
}

#[test]
fn test_jump_leaves_and_returns_to_ground() {
    let s = SimulationSettings::default();
    let grounded = run(
        PlayState::at(Vec3::new(0.0, s.actor_half_height, 0.0), &s),
        MoveKeys::default(),
        &[(1, 0.016)],
        &s,
    );
    let jump = MoveKeys {
        jump: true,
        ..Default::default()
    };
    let launched = step(&grounded, jump, 0.016, &s);
    assert_eq!(launched.actor_velocity.y, s.jump_impulse);

    let airborne = step(&launched, MoveKeys::default(), 0.016, &s);
    assert!(airborne.actor_position.y > s.actor_half_height);
    assert!(!airborne.grounded);

    let landed = run(airborne, MoveKeys::default(), &[(120, 0.016)], &s);
    assert_eq!(landed.actor_position.y, s.actor_half_height);
}

#[test]
fn test_horizontal_velocity_decays_without_keys() {
    let s = SimulationSettings::default();
    let moving = run(
        PlayState::at(Vec3::new(0.0, s.actor_half_height, 0.0), &s),
        MoveKeys {
            forward: true,
            ..Default::default()
        },
        &[(5, 0.016)],
        &s,
    );
    let speed = |p: &PlayState| Vec3::new(p.actor_velocity.x, 0.0, p.actor_velocity.z).length();
    let coasting = run(moving.clone(), MoveKeys::default(), &[(30, 0.016)], &s);
    assert!(speed(&coasting) < speed(&moving) * 0.01);
}

#[test]
fn test_huge_frame_delta_is_clamped() {
    let s = SimulationSettings::default();
    let start = PlayState::at(Vec3::new(0.0, s.actor_half_height, 0.0), &s);
    let keys = MoveKeys {
        forward: true,
        ..Default::default()
    };
    let one_big = step(&start, keys, 5.0, &s);
    let capped = step(&start, keys, s.max_frame_delta, &s);
    assert_eq!(one_big, capped);
    assert_eq!(step(&start, keys, f32::NAN, &s), start);
}

#[test]
fn test_play_session_never_touches_history() {
    let mut h = TestHarness::new();
    let before = h.session.objects().to_vec();
    let version = h.session.scene().version();

    h.play();
    h.hold(MoveKey::Forward, true);
    h.hold(MoveKey::Jump, true);
    h.run_frames(120, 0.016);
    h.stop();

    assert_eq!(h.session.objects(), before.as_slice());
    assert_eq!(h.session.scene().version(), version);
    assert!(!h.session.scene().can_undo());
}

#[test]
fn test_actor_spawns_above_spawn_point() {
    let mut h = TestHarness::new();
    h.session
        .update_field(2, block_studio_lib::state::scene::FieldUpdate::Position(shared::Axis::X, 6.0));
    h.play();
    let actor = h.actor().unwrap();
    assert_eq!(actor.actor_position.x, 6.0);
    assert!(actor.actor_position.y > 2.0);
}

#[test]
fn test_keys_are_released_on_stop() {
    let mut h = TestHarness::new();
    h.play();
    h.hold(MoveKey::Left, true);
    h.stop();
    h.play();
    let start = h.actor().unwrap().actor_position;
    h.run_frames(10, 0.016);
    let end = h.actor().unwrap().actor_position;
    assert_eq!(start.x, end.x);
    assert_eq!(start.z, end.z);
}

#[test]
fn test_bad_simulation_constants_do_not_crash_play() {
    let mut h = TestHarness::new();
    h.session.set_simulation_settings(SimulationSettings {
        max_frame_delta: -0.05,
        damping: f32::NAN,
        ..SimulationSettings::default()
    });
    let sim = h.session.simulation_settings().clone();
    assert_eq!(sim.max_frame_delta, 0.0);
    assert_eq!(sim.damping, SimulationSettings::default().damping);

    assert!(h.play());
    let start = h.actor().unwrap().actor_position;
    h.hold(MoveKey::Forward, true);
    h.run_frames(10, 0.016);
    assert_eq!(h.actor().unwrap().actor_position, start);
}
