//! Constant-density participating medium.

use crate::{
    hittable::{HitRecord, Hittable},
    sampling::gen_f32,
    Isotropic, Material, Texture,
};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// A volume of constant density bounded by another hittable.
///
/// A ray entering the boundary scatters at an exponentially distributed depth
/// or passes straight through when its sampled free path outruns the distance
/// inside. The boundary must be a closed shape with a valid bounding box;
/// a sphere or box works, a bare rectangle does not.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    phase_function: Arc<dyn Material>,
    neg_inv_density: f32,
}

impl ConstantMedium {
    /// Create a medium with the given density and albedo texture.
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            phase_function: Arc::new(Isotropic::new(albedo)),
            neg_inv_density: -1.0 / density,
        }
    }

    /// Convenience constructor with a solid-color albedo.
    pub fn from_color(boundary: Arc<dyn Hittable>, density: f32, color: Vec3) -> Self {
        Self::new(
            boundary,
            density,
            Arc::new(crate::SolidColor::new(color)),
        )
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        // Find where the ray enters and exits the boundary. The second query
        // starts just past the first crossing so it finds the far side even
        // when the ray origin is inside the volume.
        let mut rec1 = HitRecord::default();
        if !self
            .boundary
            .hit(ray, Interval::UNIVERSE, rng, &mut rec1)
        {
            return false;
        }

        let mut rec2 = HitRecord::default();
        if !self.boundary.hit(
            ray,
            Interval::new(rec1.t + 0.0001, f32::INFINITY),
            rng,
            &mut rec2,
        ) {
            return false;
        }

        let mut t_enter = rec1.t.max(ray_t.min);
        let t_exit = rec2.t.min(ray_t.max);

        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f32(rng).max(f32::MIN_POSITIVE).ln();

        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);

        rec.normal = Vec3::X; // arbitrary
        rec.front_face = true; // also arbitrary
        rec.material = self.phase_function.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
