//! Random sampling helpers.
//!
//! Every generator takes an explicit rng handle; the renderer keeps no
//! global entropy source, so callers control seeding and parallel renders
//! can hand each worker its own stream.

use crate::{Color, Vec3};
use rand::{Rng, RngCore};

/// Uniform random f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Uniform random f32 in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

/// Color with each channel uniform in [0, 1).
pub fn random_color(rng: &mut dyn RngCore) -> Color {
    random_vec3_range(rng, 0.0, 1.0)
}

/// Color with each channel uniform in [min, max).
pub fn random_color_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    random_vec3_range(rng, min, max)
}

/// True when every component is small enough to treat as zero.
///
/// Used to catch degenerate scatter directions before they turn into NaN
/// normals downstream.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < 1e-8
}

/// Generate a random unit vector, uniform over the sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling: draw from the cube until the point lands inside
    // the unit ball. The lower bound keeps the normalize away from
    // denormal blow-up.
    loop {
        let v = random_vec3_range(rng, -1.0, 1.0);
        let len_sq = v.length_squared();
        if len_sq > 1e-7 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f32(rng) * 2.0 - 1.0, gen_f32(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_gen_range_f32() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let x = gen_range_f32(&mut rng, -3.0, 5.0);
            assert!((-3.0..5.0).contains(&x));
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5, "length was {}", v.length());
        }
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-7, 0.0)));
        assert!(!near_zero(Vec3::X));
    }

    #[test]
    fn test_random_color_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let c = random_color_range(&mut rng, 0.5, 1.0);
            assert!(c.min_element() >= 0.5);
            assert!(c.max_element() < 1.0);
        }
    }
}
