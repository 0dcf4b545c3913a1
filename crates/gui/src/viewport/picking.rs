use glam::{Mat4, Vec3};
use shared::{ObjectId, SceneObject};

use super::drawable::object_model_matrix;

/// A ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Same ray expressed in another frame
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box of a unit cube centered at the origin
    pub const UNIT_CUBE: Aabb = Aabb {
        min: Vec3::splat(-0.5),
        max: Vec3::splat(0.5),
    };
}

/// Ray-AABB intersection using the slab method.
/// Returns the ray parameter of the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = ray.direction.recip();

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax || tmin.is_nan() || tmax.is_nan() {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Ray vs an object's oriented unit cube. Returns the world-space distance.
pub fn ray_object(ray: &Ray, obj: &SceneObject) -> Option<f32> {
    let model = object_model_matrix(obj);
    if model.determinant().abs() < f32::EPSILON {
        return None;
    }
    let local = ray.transformed(&model.inverse());
    let t = ray_aabb(&local, &Aabb::UNIT_CUBE)?;
    let hit_world = model.transform_point3(local.at(t));
    Some((hit_world - ray.origin).length())
}

/// Nearest object hit by the ray
pub fn pick_nearest<'a>(
    ray: &Ray,
    objects: impl IntoIterator<Item = &'a SceneObject>,
) -> Option<ObjectId> {
    let mut best: Option<(ObjectId, f32)> = None;

    for obj in objects {
        if let Some(dist) = ray_object(ray, obj) {
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((obj.id, dist));
            }
        }
    }

    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ObjectKind, SceneDescription};

    fn down_ray(x: f32, z: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, 50.0, z),
            direction: Vec3::NEG_Y,
        }
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let r = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(ray_aabb(&r, &Aabb::UNIT_CUBE), Some(4.5));

        let miss = Ray {
            origin: Vec3::new(2.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert!(ray_aabb(&miss, &Aabb::UNIT_CUBE).is_none());
    }

    #[test]
    fn test_nearest_wins() {
        let mut scene = SceneDescription::default_scene();
        scene
            .objects
            .push(SceneObject::new(3, ObjectKind::Block, [0.0, 5.0, 0.0]));
        assert_eq!(pick_nearest(&down_ray(0.0, 0.0), &scene.objects), Some(3));
        // Only the baseplate far from the spawn marker
        assert_eq!(pick_nearest(&down_ray(30.0, 30.0), &scene.objects), Some(1));
        assert_eq!(pick_nearest(&down_ray(80.0, 0.0), &scene.objects), None);
    }

    #[test]
    fn test_rotation_is_respected() {
        let mut obj = SceneObject::new(1, ObjectKind::Block, [0.0; 3]);
        obj.scale = [4.0, 1.0, 1.0];
        assert!(ray_object(&down_ray(1.5, 0.0), &obj).is_some());

        obj.rotation = [0.0, std::f64::consts::FRAC_PI_2, 0.0];
        assert!(ray_object(&down_ray(1.5, 0.0), &obj).is_none());
        assert!(ray_object(&down_ray(0.0, 1.5), &obj).is_some());
    }

    #[test]
    fn test_distance_is_in_world_units() {
        let mut obj = SceneObject::new(1, ObjectKind::Block, [0.0; 3]);
        obj.scale = [1.0, 10.0, 1.0];
        let d = ray_object(&down_ray(0.0, 0.0), &obj).unwrap();
        assert!((d - 45.0).abs() < 1e-3);
    }
}
