//! Axis-aligned box built from six rectangles.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    FlipFace, Material, XyRect, XzRect, YzRect,
};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// An axis-aligned box between two corner points.
///
/// Composed of six oriented rectangles; the faces at the minimum corners are
/// flipped so all normals point out of the box.
pub struct Cuboid {
    box_min: Vec3,
    box_max: Vec3,
    sides: HittableList,
}

impl Cuboid {
    /// Create a new box spanning p0..p1, all faces sharing one material.
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<dyn Material>) -> Self {
        let mut sides = HittableList::new();

        sides.add(Arc::new(XyRect::new(
            p0.x,
            p1.x,
            p0.y,
            p1.y,
            p1.z,
            material.clone(),
        )));
        sides.add(Arc::new(FlipFace::new(Arc::new(XyRect::new(
            p0.x,
            p1.x,
            p0.y,
            p1.y,
            p0.z,
            material.clone(),
        )))));

        sides.add(Arc::new(XzRect::new(
            p0.x,
            p1.x,
            p0.z,
            p1.z,
            p1.y,
            material.clone(),
        )));
        sides.add(Arc::new(FlipFace::new(Arc::new(XzRect::new(
            p0.x,
            p1.x,
            p0.z,
            p1.z,
            p0.y,
            material.clone(),
        )))));

        sides.add(Arc::new(YzRect::new(
            p0.y,
            p1.y,
            p0.z,
            p1.z,
            p1.x,
            material.clone(),
        )));
        sides.add(Arc::new(FlipFace::new(Arc::new(YzRect::new(
            p0.y, p1.y, p0.z, p1.z, p0.x, material,
        )))));

        Self {
            box_min: p0,
            box_max: p1,
            sides,
        }
    }
}

impl Hittable for Cuboid {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        self.sides.hit(ray, ray_t, rng, rec)
    }

    fn bounding_box(&self) -> Aabb {
        // Exact corners, not the union of the padded side boxes
        Aabb::from_points(self.box_min, self.box_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_box() -> Cuboid {
        Cuboid::new(
            Vec3::ZERO,
            Vec3::ONE,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_cuboid_hit_nearest_face() {
        let cuboid = unit_box();

        let ray = Ray::new_simple(Vec3::new(0.5, 0.5, 3.0), -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);
        let mut rec = HitRecord::default();

        assert!(cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng, &mut rec));
        // Front face at z=1 is hit first, not the back face at z=0
        assert!((rec.t - 2.0).abs() < 1e-4);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn test_cuboid_miss() {
        let cuboid = unit_box();

        let ray = Ray::new_simple(Vec3::new(5.0, 5.0, 3.0), -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);
        let mut rec = HitRecord::default();

        assert!(!cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng, &mut rec));
    }

    #[test]
    fn test_cuboid_bbox_exact_corners() {
        let cuboid = Cuboid::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        );

        let bbox = cuboid.bounding_box();
        assert_eq!(bbox.min(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.max(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_cuboid_back_face_from_inside() {
        let cuboid = unit_box();

        // Normals point out of the box, so from inside every face is a back face
        let ray = Ray::new_simple(Vec3::splat(0.5), Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);
        let mut rec = HitRecord::default();

        assert!(cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng, &mut rec));
        assert!(!rec.front_face);
    }
}
