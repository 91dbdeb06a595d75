//! Material scattering models.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use ember_math::{Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// RGB radiance carried along a ray. Components are linear and unbounded.
pub type Color = Vec3;

/// Outcome of a successful scatter event.
pub struct ScatterResult {
    /// Per-channel throughput multiplier for the bounced ray.
    pub attenuation: Color,
    /// Continuation ray leaving the hit point.
    pub scattered: Ray,
}

/// Surface (or volume) response at a hit point.
pub trait Material: Send + Sync {
    /// Produce a scattered ray, or `None` if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Light emitted at the hit point. Zero for non-emissive materials.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for the Fresnel reflectance.
fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = (1.0 - ref_idx) / (1.0 + ref_idx);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Diffuse surface with cosine-weighted bounce distribution.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate direction when the random vector cancels the normal
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Specular reflector with optional fuzz.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered = Ray::new(
            rec.p,
            reflected + self.fuzz * random_in_unit_sphere(rng),
            ray_in.time(),
        );

        // Fuzz can push the bounce below the surface; those rays are absorbed
        if scattered.direction().dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered,
            })
        } else {
            None
        }
    }
}

/// Clear dielectric (glass, water) with Fresnel-weighted reflection.
pub struct Dielectric {
    /// Index of refraction of the interior relative to the exterior.
    index_of_refraction: f32,
}

impl Dielectric {
    pub fn new(index_of_refraction: f32) -> Self {
        Self { index_of_refraction }
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.index_of_refraction
        } else {
            self.index_of_refraction
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction =
            if cannot_refract || reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// Pure emitter: absorbs everything and radiates its texture's color.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }

    pub fn from_color(emit: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(emit)))
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Uniform-direction phase function used inside participating media.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, random_in_unit_sphere(rng), ray_in.time()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at(p: Vec3, normal: Vec3) -> HitRecord<'static> {
        HitRecord {
            p,
            normal,
            t: 1.0,
            front_face: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_lambertian_scatters_into_upper_hemisphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Lambertian::from_color(Color::new(0.5, 0.5, 0.5));
        let rec = hit_at(Vec3::ZERO, Vec3::Y);
        let ray_in = Ray::new_simple(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -1.0, 1.0));

        for _ in 0..100 {
            let result = material
                .scatter(&ray_in, &rec, &mut rng)
                .expect("lambertian always scatters");
            // normal + unit vector always has a positive normal component
            assert!(result.scattered.direction().dot(rec.normal) > 0.0);
            assert_eq!(result.attenuation, Color::new(0.5, 0.5, 0.5));
        }
    }

    #[test]
    fn test_lambertian_preserves_ray_time() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Lambertian::from_color(Color::ONE);
        let rec = hit_at(Vec3::ZERO, Vec3::Y);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.7);

        let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.time(), 0.7);
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Metal::new(Color::new(0.8, 0.8, 0.8), 0.0);
        let rec = hit_at(Vec3::ZERO, Vec3::Y);
        // 45 degree incoming ray
        let ray_in = Ray::new_simple(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));

        let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction().normalize() - expected).length() < 1e-5);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 5.0).fuzz, 1.0);
        assert_eq!(Metal::new(Color::ONE, -0.3).fuzz, 0.0);
        assert_eq!(Metal::new(Color::ONE, 0.4).fuzz, 0.4);
    }

    #[test]
    fn test_metal_grazing_absorption() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Metal::new(Color::ONE, 1.0);
        let rec = hit_at(Vec3::ZERO, Vec3::Y);
        // Near-grazing ray: full fuzz pushes some bounces below the surface
        let ray_in = Ray::new_simple(Vec3::new(-10.0, 0.01, 0.0), Vec3::new(10.0, -0.01, 0.0));

        let mut absorbed = 0;
        for _ in 0..200 {
            if material.scatter(&ray_in, &rec, &mut rng).is_none() {
                absorbed += 1;
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Dielectric::new(1.5);
        // Exiting glass at a shallow angle: must reflect, never refract
        let rec = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            front_face: false,
            ..Default::default()
        };
        let ray_in = Ray::new_simple(Vec3::new(-10.0, 1.0, 0.0), Vec3::new(10.0, -1.0, 0.0));

        for _ in 0..50 {
            let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
            assert!(result.scattered.direction().y > 0.0);
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_refracts_head_on() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Dielectric::new(1.5);
        let rec = hit_at(Vec3::ZERO, Vec3::Y);
        let ray_in = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        // Head-on, Schlick reflectance is ~4%; nearly all samples refract
        let mut refracted = 0;
        for _ in 0..200 {
            let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
            if result.scattered.direction().y < 0.0 {
                refracted += 1;
            }
        }
        assert!(refracted > 150);
    }

    #[test]
    fn test_diffuse_light_emits_and_never_scatters() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = DiffuseLight::from_color(Color::new(4.0, 4.0, 4.0));
        let rec = hit_at(Vec3::ZERO, Vec3::Y);
        let ray_in = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        assert!(material.scatter(&ray_in, &rec, &mut rng).is_none());
        assert_eq!(material.emitted(0.0, 0.0, Vec3::ZERO), Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_default_emission_is_black() {
        let material = Lambertian::from_color(Color::ONE);
        assert_eq!(material.emitted(0.5, 0.5, Vec3::ONE), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_uniformly() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Isotropic::from_color(Color::new(0.9, 0.9, 0.9));
        let rec = hit_at(Vec3::ZERO, Vec3::X);
        let ray_in = Ray::new_simple(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);

        // Directions should land on both sides of the normal
        let mut forward = 0;
        let mut backward = 0;
        for _ in 0..200 {
            let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
            if result.scattered.direction().x > 0.0 {
                forward += 1;
            } else {
                backward += 1;
            }
        }
        assert!(forward > 50 && backward > 50);
    }
}
