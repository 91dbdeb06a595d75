//! Sphere primitives, static and moving.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;
use std::sync::Arc;

/// A static sphere.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }
}

/// Get the UV coordinates for a point on the unit sphere.
fn get_sphere_uv(p: Vec3) -> (f32, f32) {
    // p is a point on the unit sphere centered at origin
    // phi: angle around Y axis from +X
    // theta: angle up from -Y
    let phi = p.z.atan2(p.x);
    let theta = p.y.asin();

    let u = 1.0 - (phi + PI) / (2.0 * PI);
    let v = (theta + PI / 2.0) / PI;
    (u, v)
}

/// Shared quadratic root selection for sphere intersection.
///
/// Returns the nearest root strictly inside the interval, trying the closer
/// root first. A non-positive discriminant counts as a miss, so tangent rays
/// do not register.
fn nearest_root(half_b: f32, a: f32, discriminant: f32, ray_t: Interval) -> Option<f32> {
    if discriminant <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    let root = (-half_b - sqrtd) / a;
    if ray_t.surrounds(root) {
        return Some(root);
    }

    let root = (-half_b + sqrtd) / a;
    if ray_t.surrounds(root) {
        return Some(root);
    }

    None
}

impl Hittable for Sphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        let Some(root) = nearest_root(half_b, a, discriminant, ray_t) else {
            return false;
        };

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A sphere whose center moves linearly between two points over a time
/// interval, for motion blur.
pub struct MovingSphere {
    center0: Vec3,
    center1: Vec3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl MovingSphere {
    /// Create a new moving sphere.
    ///
    /// The cached bounding box surrounds the sphere at both endpoint times,
    /// so it contains the sphere at every in-between time by linearity.
    pub fn new(
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);
        let bbox = Aabb::surrounding(&box0, &box1);

        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
            bbox,
        }
    }

    /// Center position at the given time, by linear interpolation.
    pub fn center(&self, time: f32) -> Vec3 {
        self.center0
            + ((time - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let center = self.center(ray.time());
        let oc = ray.origin() - center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        let Some(root) = nearest_root(half_b, a, discriminant, ray_t) else {
            return false;
        };

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit_distance() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, gray());

        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rng,
            &mut rec
        ));
        // Ray through the center: hit point is exactly radius from center
        assert!((rec.t - 2.0).abs() < 1e-4);
        assert!(((ray.at(rec.t) - Vec3::new(0.0, 0.0, -3.0)).length() - 1.0).abs() < 1e-4);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_sphere_hit_from_inside_is_back_face() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, gray());

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);
        let mut rng = StdRng::seed_from_u64(42);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rng,
            &mut rec
        ));
        assert!(!rec.front_face);
        // Stored normal still opposes the ray
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, gray());

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(42);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rng,
            &mut rec
        ));
    }

    #[test]
    fn test_sphere_second_root_when_first_excluded() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, gray());

        // Lower bound past the near intersection at t=2
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(2.5, f32::INFINITY), &mut rng, &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_uv_ranges() {
        let (u, v) = get_sphere_uv(Vec3::new(1.0, 0.0, 0.0));
        assert!((0.0..=1.0).contains(&u));
        assert!((v - 0.5).abs() < 1e-5);

        let (_, v) = get_sphere_uv(Vec3::new(0.0, 1.0, 0.0));
        assert!((v - 1.0).abs() < 1e-5);

        let (_, v) = get_sphere_uv(Vec3::new(0.0, -1.0, 0.0));
        assert!(v.abs() < 1e-5);
    }

    #[test]
    fn test_moving_sphere_center_interpolation() {
        let c0 = Vec3::new(0.0, 0.0, 0.0);
        let c1 = Vec3::new(2.0, 0.0, 0.0);
        let sphere = MovingSphere::new(c0, c1, 0.0, 1.0, 0.5, gray());

        // Exact at the boundary times, linear in between
        assert_eq!(sphere.center(0.0), c0);
        assert_eq!(sphere.center(1.0), c1);
        assert_eq!(sphere.center(0.5), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(sphere.center(0.25), Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_moving_sphere_hit_depends_on_time() {
        let sphere = MovingSphere::new(
            Vec3::new(-2.0, 0.0, -5.0),
            Vec3::new(2.0, 0.0, -5.0),
            0.0,
            1.0,
            0.5,
            gray(),
        );
        let mut rng = StdRng::seed_from_u64(42);

        // At t=0 the sphere sits at x=-2; a ray down -Z at x=-2 hits it
        let ray = Ray::new(Vec3::new(-2.0, 0.0, 0.0), -Vec3::Z, 0.0);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng, &mut rec));

        // The same ray fired at shutter close misses
        let ray = Ray::new(Vec3::new(-2.0, 0.0, 0.0), -Vec3::Z, 1.0);
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng, &mut rec));
    }

    #[test]
    fn test_moving_sphere_bbox_covers_both_endpoints() {
        let sphere = MovingSphere::new(
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            0.0,
            1.0,
            0.5,
            gray(),
        );

        let bbox = sphere.bounding_box();
        assert!(bbox.x.min <= -2.5);
        assert!(bbox.x.max >= 2.5);
        assert!(bbox.y.min <= -0.5 && bbox.y.max >= 0.5);
    }
}
