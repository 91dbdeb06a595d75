//! Thin-lens camera with shutter interval for motion blur.

use crate::sampling::{gen_range_f32, random_in_unit_disk};
use ember_math::{Ray, Vec3};
use rand::RngCore;

/// Generates primary rays from normalized film coordinates.
///
/// Rays originate on a lens disk of radius `aperture / 2` and pass through
/// the focus plane, so geometry off the focus distance blurs. Each ray also
/// carries a time sampled uniformly from the shutter interval.
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
    time0: f32,
    time1: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lookfrom: Vec3,
        lookat: Vec3,
        vup: Vec3,
        vfov_degrees: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
        time0: f32,
        time1: f32,
    ) -> Self {
        let theta = vfov_degrees.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        let w = (lookfrom - lookat).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = lookfrom;
        let lower_left_corner =
            origin - half_width * focus_dist * u - half_height * focus_dist * v - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            lens_radius: aperture / 2.0,
            time0,
            time1,
        }
    }

    /// Ray through film coordinates (s, t) in [0,1]^2, with t = 0 at the
    /// bottom of the frame.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let origin = self.origin + offset;

        Ray::new(
            origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - origin,
            gen_range_f32(rng, self.time0, self.time1),
        )
    }
}
