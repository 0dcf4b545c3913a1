//! Integration tests for TestHarness.
//!
//! Drives whole editing sessions headlessly: history, protection of the
//! scaffolding, selection across mode changes, duplicate placement.

use block_studio_lib::fixtures::{bare_scene, block, block_at, default_scene_with};
use block_studio_lib::harness::{TestHarness, DEFAULT_SEED};
use block_studio_lib::state::scene::FieldUpdate;
use block_studio_lib::state::{EditorMode, Notice, Tool};
use shared::{Axis, Color, ObjectKind, SceneObject, SCALE_EPSILON};

fn snapshot(h: &TestHarness) -> Vec<SceneObject> {
    h.session.objects().to_vec()
}

#[test]
fn test_undo_redo_inverse_law() {
    let mut h = TestHarness::new();
    let before = snapshot(&h);

    let a = h.add_block_at([1.0, 0.5, 1.0]).unwrap();
    let b = h.add(ObjectKind::Group).unwrap();
    h.set_position(a, [4.0, 1.0, -2.0]);
    h.duplicate(a).unwrap();
    h.delete(b);
    h.session.update_field(a, FieldUpdate::Name("Tower".into()));
    let after = snapshot(&h);

    let mut steps = 0;
    while h.undo() {
        steps += 1;
    }
    assert_eq!(snapshot(&h), before);

    for _ in 0..steps {
        assert!(h.redo());
    }
    assert!(!h.redo());
    assert_eq!(snapshot(&h), after);
}

#[test]
fn test_history_linearity_discards_redo() {
    let mut h = TestHarness::new();
    h.add_block_at([0.0, 0.5, 0.0]);
    h.add_block_at([2.0, 0.5, 0.0]);
    assert!(h.undo());
    assert!(h.session.scene().can_redo());

    h.add_block_at([4.0, 0.5, 0.0]);
    assert!(!h.session.scene().can_redo());
    assert!(!h.redo());
    assert_eq!(h.object_count(), 4);
}

#[test]
fn test_protected_objects_survive_delete() {
    let mut h = TestHarness::new();
    for id in [1, 2] {
        let count = h.object_count();
        h.session.take_notices();
        assert!(!h.delete(id));
        assert_eq!(h.object_count(), count);
        let notices = h.session.take_notices();
        assert!(
            matches!(notices.as_slice(), [Notice::DeleteRejected { .. }]),
            "expected a rejection, got {notices:?}"
        );
    }
    assert!(!h.session.scene().can_undo());
}

#[test]
fn test_delete_clears_selection_of_removed_object() {
    let mut h = TestHarness::new();
    let id = h.add_block_at([3.0, 0.5, 3.0]).unwrap();
    assert_eq!(h.selected(), Some(id));
    assert!(h.delete(id));
    assert_eq!(h.selected(), None);
}

#[test]
fn test_scale_input_is_clamped_not_ignored() {
    let mut h = TestHarness::new();
    let id = h.add_block_at([0.0, 0.5, 0.0]).unwrap();
    for input in [0.0, -3.0, -0.0001] {
        h.session.update_field(id, FieldUpdate::Scale(Axis::Y, 5.0));
        h.session.update_field(id, FieldUpdate::Scale(Axis::Y, input));
        assert_eq!(h.object(id).unwrap().scale[1], SCALE_EPSILON);
    }
}

#[test]
fn test_scale_text_is_clamped() {
    let mut h = TestHarness::new();
    let id = h.add_block_at([0.0, 0.5, 0.0]).unwrap();
    use block_studio_lib::validation::FieldKind;
    assert!(h.session.set_field_from_text(id, FieldKind::Scale(Axis::X), "-2"));
    assert_eq!(h.object(id).unwrap().scale[0], SCALE_EPSILON);
}

#[test]
fn test_selection_clears_on_play() {
    let mut h = TestHarness::new();
    h.session.select(Some(2));
    assert_eq!(h.selected(), Some(2));

    assert!(h.play());
    assert_eq!(h.session.mode(), EditorMode::Playing);
    assert_eq!(h.selected(), None);

    assert!(h.stop());
    assert_eq!(h.session.mode(), EditorMode::Editing);
    assert_eq!(h.selected(), None);
}

#[test]
fn test_duplicate_offset() {
    let original = block(10, "Crate", [1.0, 2.0, 3.0], [2.0, 1.0, 0.5], Color::rgb(200, 40, 40));
    let original = SceneObject {
        rotation: [0.1, 0.2, 0.3],
        ..original
    };
    let mut h = TestHarness::with_scene(default_scene_with([original.clone()]), DEFAULT_SEED);

    let copy_id = h.duplicate(10).unwrap();
    let copy = h.object(copy_id).unwrap();
    assert_ne!(copy_id, 10);
    assert_eq!(copy.position, [3.0, 2.0, 5.0]);
    assert_eq!(copy.color, original.color);
    assert_eq!(copy.scale, original.scale);
    assert_eq!(copy.rotation, original.rotation);
    assert_eq!(h.selected(), Some(copy_id));
}

#[test]
fn test_duplicate_of_scaffold_is_deletable() {
    let mut h = TestHarness::new();
    let copy = h.duplicate(1).unwrap();
    assert!(!h.object(copy).unwrap().is_protected());
    assert!(h.delete(copy));
}

#[test]
fn test_drag_gesture_is_one_undo_step() {
    let mut h = TestHarness::new();
    let id = h.add_block_at([0.0, 0.5, 0.0]).unwrap();
    assert!(h.set_tool(Tool::Move));

    assert!(h.drag(Axis::X, 6.0, 12));
    assert!((h.object(id).unwrap().position[0] - 6.0).abs() < 1e-9);

    assert!(h.undo());
    assert_eq!(h.object(id).unwrap().position[0], 0.0);
    assert!(h.undo());
    assert!(h.object(id).is_none());
}

#[test]
fn test_click_with_select_tool_misses_clear() {
    let mut h = TestHarness::with_scene(bare_scene([block_at(5, [0.0, 0.5, 0.0])]), DEFAULT_SEED);
    assert_eq!(h.click_from_above(0.0, 0.0), Some(5));
    assert_eq!(h.selected(), Some(5));

    h.set_tool(Tool::Move);
    assert_eq!(h.click_from_above(40.0, 40.0), None);
    assert_eq!(h.selected(), Some(5));

    h.set_tool(Tool::Select);
    h.click_from_above(40.0, 40.0);
    assert_eq!(h.selected(), None);
}

#[test]
fn test_editing_is_blocked_while_playing() {
    let mut h = TestHarness::new();
    h.play();
    assert_eq!(h.add(ObjectKind::Block), None);
    assert!(!h.set_tool(Tool::Rotate));
    assert!(!h.undo());
    assert_eq!(h.object_count(), 2);
}

#[test]
fn test_random_placement_is_seeded() {
    let mut a = TestHarness::with_seed(7);
    let mut b = TestHarness::with_seed(7);
    let ia = a.add(ObjectKind::Block).unwrap();
    let ib = b.add(ObjectKind::Block).unwrap();
    let (oa, ob) = (a.object(ia).unwrap(), b.object(ib).unwrap());
    assert_eq!(oa.position, ob.position);
    assert_eq!(oa.color, ob.color);
    assert!(oa.position[0].abs() <= 10.0 && oa.position[2].abs() <= 10.0);
    assert_eq!(oa.position[1], 0.5);
}

#[test]
fn test_clear_restores_default_scene_undoably() {
    let mut h = TestHarness::new();
    h.add_block_at([1.0, 0.5, 1.0]);
    h.add_block_at([2.0, 0.5, 2.0]);
    h.clear();
    assert_eq!(h.object_count(), 2);
    assert!(h.session.objects().iter().all(|o| o.is_protected()));

    assert!(h.undo());
    assert_eq!(h.object_count(), 4);
}
