//! ember renderer - progressive CPU path tracing.
//!
//! A Monte Carlo path tracer. Each sample pass shoots one jittered camera ray
//! per pixel across a pool of worker threads and accumulates the results into
//! a shared film; the running average converges toward the true radiance as
//! passes pile up.

mod bvh;
mod camera;
mod cuboid;
mod film;
mod hittable;
mod integrator;
mod material;
mod medium;
mod perlin;
mod rect;
mod render;
mod sampling;
mod scenes;
mod sphere;
mod texture;
mod transform;

pub use bvh::BvhNode;
pub use camera::Camera;
pub use cuboid::Cuboid;
pub use film::Film;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::ray_color;
pub use material::{
    Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use medium::ConstantMedium;
pub use perlin::Perlin;
pub use rect::{XyRect, XzRect, YzRect};
pub use render::render_pass;
pub use sampling::{gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector};
pub use scenes::{
    cornell_box, cornell_gold_fog, cornell_smoke, earth, next_week_final, perlin_spheres,
    random_spheres, scene_by_name, simple_light, single_sphere, three_spheres, two_checker_spheres,
    Scene, SCENE_NAMES,
};
pub use sphere::{MovingSphere, Sphere};
pub use texture::{
    CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture, TextureError, TextureResult,
};
pub use transform::{FlipFace, RotateY, Translate};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Aabb, Interval, Ray, Vec3};

/// Default output width in pixels.
pub const IMAGE_WIDTH: u32 = 800;

/// Default output height in pixels.
pub const IMAGE_HEIGHT: u32 = 400;

/// Maximum ray bounce depth per sample.
pub const MAX_DEPTH: u32 = 50;

/// Default total-sample target for the driver loop.
pub const DEFAULT_SAMPLES: u32 = 256;
