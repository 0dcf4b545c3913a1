//! Single-field edits from the properties panel

use shared::{clamp_scale, Axis, Color, ObjectId, SceneObject};

use super::SceneStore;

/// One field of one object, with its new value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    Color(Color),
    Position(Axis, f64),
    Rotation(Axis, f64),
    Scale(Axis, f64),
}

impl FieldUpdate {
    /// Write the value into `obj`. Returns `true` if anything changed.
    pub(crate) fn apply_to(&self, obj: &mut SceneObject) -> bool {
        match self {
            FieldUpdate::Name(name) => replace(&mut obj.name, name.clone()),
            FieldUpdate::Color(color) => replace(&mut obj.color, *color),
            FieldUpdate::Position(axis, v) => replace(&mut obj.position[axis.index()], *v),
            FieldUpdate::Rotation(axis, v) => replace(&mut obj.rotation[axis.index()], *v),
            FieldUpdate::Scale(axis, v) => replace(&mut obj.scale[axis.index()], clamp_scale(*v)),
        }
    }

    /// Numeric payload, if any
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            FieldUpdate::Position(_, v) | FieldUpdate::Rotation(_, v) | FieldUpdate::Scale(_, v) => {
                Some(*v)
            }
            FieldUpdate::Name(_) | FieldUpdate::Color(_) => None,
        }
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.numeric_value().map_or(true, f64::is_finite)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl SceneStore {
    /// Discrete edit: one snapshot per change. Returns `true` if the object changed.
    pub fn update_field(&mut self, id: ObjectId, update: FieldUpdate) -> bool {
        self.end_gesture();
        if !update.is_well_formed() {
            tracing::warn!("Ignored non-finite value for #{}: {:?}", id, update);
            return false;
        }
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        if update.apply_to(obj) {
            self.commit();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{SceneDescription, SCALE_EPSILON};

    #[test]
    fn test_discrete_edit_pushes_one_snapshot() {
        let mut s = SceneStore::new(SceneDescription::default_scene());
        assert!(s.update_field(2, FieldUpdate::Position(Axis::X, 3.0)));
        assert_eq!(s.history_len(), 2);
        assert_eq!(s.get(2).unwrap().position[0], 3.0);
    }

    #[test]
    fn test_noop_edit_pushes_nothing() {
        let mut s = SceneStore::new(SceneDescription::default_scene());
        assert!(!s.update_field(2, FieldUpdate::Position(Axis::Y, 0.1)));
        assert_eq!(s.history_len(), 1);
    }

    #[test]
    fn test_scale_is_clamped_not_ignored() {
        let mut s = SceneStore::new(SceneDescription::default_scene());
        assert!(s.update_field(2, FieldUpdate::Scale(Axis::Y, -5.0)));
        assert_eq!(s.get(2).unwrap().scale[1], SCALE_EPSILON);
    }

    #[test]
    fn test_small_positive_scale_is_kept() {
        let mut s = SceneStore::new(SceneDescription::default_scene());
        assert!(s.update_field(2, FieldUpdate::Scale(Axis::X, 0.005)));
        assert_eq!(s.get(2).unwrap().scale[0], 0.005);
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let mut s = SceneStore::new(SceneDescription::default_scene());
        assert!(!s.update_field(2, FieldUpdate::Rotation(Axis::Z, f64::NAN)));
        assert!(!s.update_field(2, FieldUpdate::Scale(Axis::Z, f64::INFINITY)));
        assert_eq!(s.history_len(), 1);
        assert_eq!(s.get(2).unwrap().rotation[2], 0.0);
    }

    #[test]
    fn test_missing_object() {
        let mut s = SceneStore::new(SceneDescription::default_scene());
        assert!(!s.update_field(77, FieldUpdate::Name("x".into())));
    }
}
