//! Instancing wrappers: translation, Y-axis rotation, face flipping.
//!
//! Each wrapper moves the ray into object space, delegates to the wrapped
//! object, and maps the hit back into world space, so one object can appear
//! in many places without duplicating its geometry.

use crate::hittable::{HitRecord, Hittable};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Moves a wrapped object by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());
        if !self.object.hit(&moved, ray_t, rng, rec) {
            return false;
        }

        rec.p += self.offset;
        rec.set_face_normal(&moved, rec.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.object.bounding_box().translate(self.offset)
    }
}

/// Rotates a wrapped object about the Y axis by a fixed angle.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Aabb,
}

impl RotateY {
    /// Create a rotation wrapper. `angle` is in degrees.
    ///
    /// The bounding box is recomputed once here by rotating all 8 corners of
    /// the child's box and enclosing the result.
    pub fn new(object: Arc<dyn Hittable>, angle: f32) -> Self {
        let radians = angle.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        let child_box = object.bounding_box();
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let x = i as f32 * child_box.x.max + (1 - i) as f32 * child_box.x.min;
                    let y = j as f32 * child_box.y.max + (1 - j) as f32 * child_box.y.min;
                    let z = k as f32 * child_box.z.max + (1 - k) as f32 * child_box.z.min;

                    let newx = cos_theta * x + sin_theta * z;
                    let newz = -sin_theta * x + cos_theta * z;

                    let tester = Vec3::new(newx, y, newz);
                    min = min.min(tester);
                    max = max.max(tester);
                }
            }
        }

        let bbox = Aabb::from_points(min, max);

        Self {
            object,
            sin_theta,
            cos_theta,
            bbox,
        }
    }

    fn to_object_space(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    fn to_world_space(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let rotated = Ray::new(
            self.to_object_space(ray.origin()),
            self.to_object_space(ray.direction()),
            ray.time(),
        );

        if !self.object.hit(&rotated, ray_t, rng, rec) {
            return false;
        }

        rec.p = self.to_world_space(rec.p);
        let normal = self.to_world_space(rec.normal);
        rec.set_face_normal(&rotated, normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Inverts the front/back flag of every hit on the wrapped object.
///
/// Used to reverse the effective normal direction of one-sided geometry,
/// e.g. to make room walls visible from inside.
pub struct FlipFace {
    object: Arc<dyn Hittable>,
}

impl FlipFace {
    pub fn new(object: Arc<dyn Hittable>) -> Self {
        Self { object }
    }
}

impl Hittable for FlipFace {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        if !self.object.hit(ray, ray_t, rng, rec) {
            return false;
        }

        rec.front_face = !rec.front_face;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.object.bounding_box()
    }
}
