//! Perlin noise over a permutation-indexed gradient lattice.

use crate::sampling::random_unit_vector;
use ember_math::Vec3;
use rand::{Rng, RngCore};

const POINT_COUNT: usize = 256;

/// Coherent noise built from a fixed lattice of random unit gradient vectors.
pub struct Perlin {
    ranvec: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    /// Build the gradient lattice and the three axis permutations.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let ranvec = (0..POINT_COUNT).map(|_| random_unit_vector(rng)).collect();

        Self {
            ranvec,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Noise value at a point, in [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, ci) in c.iter_mut().enumerate() {
            for (dj, cj) in ci.iter_mut().enumerate() {
                for (dk, ck) in cj.iter_mut().enumerate() {
                    let idx = self.perm_x[((i + di as i64) & 255) as usize]
                        ^ self.perm_y[((j + dj as i64) & 255) as usize]
                        ^ self.perm_z[((k + dk as i64) & 255) as usize];
                    *ck = self.ranvec[idx];
                }
            }
        }

        trilinear_interp(&c, u, v, w)
    }

    /// Multi-octave turbulence: each octave halves the amplitude and doubles
    /// the frequency. Always non-negative.
    pub fn turb(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();

    // Fisher-Yates shuffle
    for i in (1..POINT_COUNT).rev() {
        let target = rng.gen_range(0..=i);
        p.swap(i, target);
    }

    p
}

/// Hermite-smoothed trilinear interpolation of the corner gradients.
fn trilinear_interp(c: &[[[Vec3; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);
    let mut accum = 0.0;

    for (i, ci) in c.iter().enumerate() {
        for (j, cj) in ci.iter().enumerate() {
            for (k, ck) in cj.iter().enumerate() {
                let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                let weight_v = Vec3::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * ck.dot(weight_v);
            }
        }
    }

    accum
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_is_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        for _ in 0..1000 {
            let p = Vec3::new(
                rng.gen::<f32>() * 20.0 - 10.0,
                rng.gen::<f32>() * 20.0 - 10.0,
                rng.gen::<f32>() * 20.0 - 10.0,
            );
            let n = perlin.noise(p);
            assert!((-1.0..=1.0).contains(&n), "noise {n} out of range at {p:?}");
        }
    }

    #[test]
    fn test_noise_is_deterministic_per_lattice() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        let p = Vec3::new(1.3, 2.7, -0.4);
        assert_eq!(perlin.noise(p), perlin.noise(p));
    }

    #[test]
    fn test_noise_varies_over_space() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        let a = perlin.noise(Vec3::new(0.5, 0.5, 0.5));
        let b = perlin.noise(Vec3::new(7.3, 2.1, 9.8));
        assert!((a - b).abs() > 1e-6);
    }

    #[test]
    fn test_turb_non_negative() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        for _ in 0..200 {
            let p = Vec3::new(
                rng.gen::<f32>() * 10.0,
                rng.gen::<f32>() * 10.0,
                rng.gen::<f32>() * 10.0,
            );
            assert!(perlin.turb(p, 7) >= 0.0);
        }
    }

    #[test]
    fn test_negative_coordinates_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);

        let n = perlin.noise(Vec3::new(-13.7, -0.2, -255.9));
        assert!(n.is_finite());
    }
}
