//! Object-level operations: add, delete, duplicate

use rand::Rng;
use shared::{Color, ObjectId, ObjectKind, SceneObject};

use super::SceneStore;
use crate::error::SceneError;

/// Position offset applied to a duplicated object
pub const DUPLICATE_OFFSET: [f64; 3] = [2.0, 0.0, 2.0];

/// Half extent of the square area where random blocks land
const RANDOM_SPREAD: f64 = 10.0;

/// Where a newly added object goes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlacementHint {
    /// Blocks land at a random spot near the origin with a random hue,
    /// other kinds go to the origin
    #[default]
    Random,
    /// Explicit position
    At([f64; 3]),
}

impl SceneStore {
    /// Create an object of `kind`, append it and record a snapshot
    pub fn add_object(&mut self, kind: ObjectKind, hint: PlacementHint) -> ObjectId {
        self.end_gesture();
        let id = self.issue_id();

        let mut obj = match hint {
            PlacementHint::At(position) => SceneObject::new(id, kind, position),
            PlacementHint::Random if kind == ObjectKind::Block => {
                let x = self.rng.gen_range(-RANDOM_SPREAD..RANDOM_SPREAD);
                let z = self.rng.gen_range(-RANDOM_SPREAD..RANDOM_SPREAD);
                let mut obj = SceneObject::new(id, kind, [x, 0.5, z]);
                obj.color = Color::from_hsl(self.rng.gen_range(0.0..360.0), 0.7, 0.6);
                obj
            }
            PlacementHint::Random => SceneObject::new(id, kind, [0.0; 3]),
        };
        if !obj.position.iter().all(|v| v.is_finite()) {
            tracing::warn!("Non-finite placement for new {:?}, using origin", kind);
            obj.position = [0.0; 3];
        }

        tracing::debug!("Added {:?} #{} at {:?}", kind, id, obj.position);
        self.scene.objects.push(obj);
        self.commit();
        id
    }

    /// Remove an object. Scaffolding is refused; a missing ID gives `Ok(false)`.
    pub fn delete_object(&mut self, id: ObjectId) -> Result<bool, SceneError> {
        self.end_gesture();
        let Some(index) = self.scene.objects.iter().position(|o| o.id == id) else {
            return Ok(false);
        };

        let obj = &self.scene.objects[index];
        if obj.is_protected() {
            tracing::warn!("Refused to delete protected object '{}' (#{})", obj.name, id);
            return Err(SceneError::Protected {
                id,
                name: obj.name.clone(),
            });
        }

        self.scene.objects.remove(index);
        self.commit();
        Ok(true)
    }

    /// Copy an object next to the original. Returns the new ID.
    pub fn duplicate_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        self.end_gesture();
        let source = self.get(id)?.clone();
        let new_id = self.issue_id();

        let mut copy = source;
        copy.id = new_id;
        copy.name = format!("{} Copy", copy.name);
        copy.scaffold = false;
        for (p, offset) in copy.position.iter_mut().zip(DUPLICATE_OFFSET) {
            *p += offset;
        }

        self.scene.objects.push(copy);
        self.commit();
        Some(new_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SceneDescription;

    fn store() -> SceneStore {
        SceneStore::with_seed(SceneDescription::default_scene(), 42)
    }

    #[test]
    fn test_random_block_within_area() {
        let mut s = store();
        for _ in 0..20 {
            let id = s.add_object(ObjectKind::Block, PlacementHint::Random);
            let obj = s.get(id).unwrap();
            assert!(obj.position[0] >= -10.0 && obj.position[0] < 10.0);
            assert!(obj.position[2] >= -10.0 && obj.position[2] < 10.0);
            assert_eq!(obj.position[1], 0.5);
        }
    }

    #[test]
    fn test_same_seed_same_placement() {
        let mut a = store();
        let mut b = store();
        let ia = a.add_object(ObjectKind::Block, PlacementHint::Random);
        let ib = b.add_object(ObjectKind::Block, PlacementHint::Random);
        assert_eq!(a.get(ia), b.get(ib));
    }

    #[test]
    fn test_non_block_kinds_use_defaults() {
        let mut s = store();
        let id = s.add_object(ObjectKind::Behavior, PlacementHint::Random);
        let obj = s.get(id).unwrap();
        assert_eq!(obj.position, [0.0; 3]);
        assert_eq!(obj.color, ObjectKind::Behavior.default_color());
        assert_eq!(obj.name, "Script");
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut s = store();
        let a = s.add_object(ObjectKind::Block, PlacementHint::Random);
        let b = s.add_object(ObjectKind::Group, PlacementHint::Random);
        assert!(b > a);
        s.delete_object(b).unwrap();
        let c = s.add_object(ObjectKind::Block, PlacementHint::Random);
        assert!(c > b);
    }

    #[test]
    fn test_delete_scaffolding_is_rejected() {
        let mut s = store();
        let before = s.objects().to_vec();
        let err = s.delete_object(1).unwrap_err();
        assert!(matches!(err, SceneError::Protected { id: 1, .. }));
        assert_eq!(s.objects(), before.as_slice());
        assert!(!s.can_undo());
    }

    #[test]
    fn test_delete_missing_is_absent() {
        let mut s = store();
        assert_eq!(s.delete_object(999), Ok(false));
        assert!(!s.can_undo());
    }

    #[test]
    fn test_duplicate_scaffolding_is_not_protected() {
        let mut s = store();
        let copy = s.duplicate_object(2).unwrap();
        let obj = s.get(copy).unwrap();
        assert!(!obj.is_protected());
        assert_eq!(obj.name, "SpawnLocation Copy");
        assert_eq!(s.delete_object(copy), Ok(true));
    }
}
