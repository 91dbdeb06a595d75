//! Recursive path-tracing integrator.

use crate::hittable::{HitRecord, Hittable};
use crate::material::Color;
use ember_math::{Interval, Ray};
use rand::RngCore;

/// Radiance arriving along `ray`, estimated by one stochastic path.
///
/// Rays that escape the scene pick up the flat `background` color. At each
/// hit the material's emission is added and, if the material scatters, the
/// bounced ray is traced recursively with its attenuation applied. `depth`
/// counts the remaining bounces; at zero the path is terminated black.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    // Lower bound 0.001 keeps bounce rays from re-hitting their origin
    if !world.hit(ray, Interval::new(0.001, f32::INFINITY), rng, &mut rec) {
        return background;
    }

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            emitted
                + scatter.attenuation
                    * ray_color(&scatter.scattered, background, world, depth - 1, rng)
        }
        None => emitted,
    }
}
