use crate::core::models::pose::RigidTransform;
use nalgebra::{Quaternion, Vector3};
use rand::RngCore;
use std::f64::consts::PI;

/// Multiplier of the version-1 generator recurrence.
pub const LCG_MULTIPLIER: u32 = 1_664_525;
/// Increment of the version-1 generator recurrence.
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Deterministic 32-bit linear congruential generator.
///
/// `s <- (1664525 * s + 1013904223) mod 2^32`. The constants are pinned so that
/// pose lists are reproducible bit-for-bit across builds and platforms; changing
/// them changes every docking result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg32 {
    state: u32,
}

impl Lcg32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Next uniform draw, `state / (2^32 - 1)`.
    #[inline]
    pub fn next_unit(&mut self) -> f64 {
        unit_draw(self)
    }
}

/// Uniform draw in `[0, 1]` from the next 32-bit output, `x / (2^32 - 1)`.
#[inline]
pub fn unit_draw<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    rng.next_u32() as f64 / u32::MAX as f64
}

impl RngCore for Lcg32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.step());
        let hi = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Draws a rotation uniformly from SO(3) using Shoemake's method.
///
/// Consumes three draws. The result is a unit quaternion with components
/// `(x, y, z, w)`.
pub fn sample_rotation<R: RngCore + ?Sized>(rng: &mut R) -> Quaternion<f64> {
    let u1 = unit_draw(rng);
    let u2 = unit_draw(rng);
    let u3 = unit_draw(rng);

    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    let t1 = 2.0 * PI * u2;
    let t2 = 2.0 * PI * u3;

    Quaternion::new(b * t2.cos(), a * t1.sin(), a * t1.cos(), b * t2.sin())
}

/// Draws a translation with each axis uniform in `[-max_trans, max_trans]`.
///
/// Consumes three draws in x, y, z order.
pub fn sample_translation<R: RngCore + ?Sized>(rng: &mut R, max_trans: f64) -> Vector3<f64> {
    let x = (unit_draw(rng) * 2.0 - 1.0) * max_trans;
    let y = (unit_draw(rng) * 2.0 - 1.0) * max_trans;
    let z = (unit_draw(rng) * 2.0 - 1.0) * max_trans;
    Vector3::new(x, y, z)
}

/// Draws one rigid-body transform: rotation first, then translation.
pub fn sample_transform<R: RngCore + ?Sized>(rng: &mut R, max_trans: f64) -> RigidTransform {
    let rotation = sample_rotation(rng);
    let translation = sample_translation(rng, max_trans);
    RigidTransform::new(rotation, translation)
}

/// Draws `count` transforms from an [`Lcg32`] seeded with `seed`.
pub fn sample_transforms(seed: u32, count: usize, max_trans: f64) -> Vec<RigidTransform> {
    let mut rng = Lcg32::new(seed);
    (0..count)
        .map(|_| sample_transform(&mut rng, max_trans))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn lcg_matches_reference_recurrence() {
        let mut rng = Lcg32::new(42);
        let first = rng.step();
        let second = rng.step();

        assert_eq!(first, 1_083_814_273);
        assert_eq!(second, 378_494_188);
    }

    #[test]
    fn lcg_wraps_modulo_two_to_the_32() {
        let mut rng = Lcg32::new(u32::MAX);
        let expected = (u64::from(u32::MAX) * u64::from(LCG_MULTIPLIER)
            + u64::from(LCG_INCREMENT))
            % (1u64 << 32);
        assert_eq!(u64::from(rng.step()), expected);
    }

    #[test]
    fn next_unit_is_state_over_u32_max() {
        let mut rng = Lcg32::new(42);
        let u = rng.next_unit();
        assert_eq!(u, 1_083_814_273.0 / 4_294_967_295.0);
        assert!((0.0..=1.0).contains(&u));
    }

    #[test]
    fn same_seed_gives_same_stream() {
        let a = sample_transforms(7, 50, 12.0);
        let b = sample_transforms(7, 50, 12.0);
        let c = sample_transforms(8, 50, 12.0);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn sampled_rotations_are_unit_quaternions() {
        let mut rng = Lcg32::new(1);
        for _ in 0..1000 {
            let q = sample_rotation(&mut rng);
            assert!((q.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn shoemake_components_follow_draw_order() {
        let mut reference = Lcg32::new(99);
        let u1 = reference.next_unit();
        let u2 = reference.next_unit();
        let u3 = reference.next_unit();

        let q = sample_rotation(&mut Lcg32::new(99));

        assert_eq!(q.i, (1.0 - u1).sqrt() * (2.0 * PI * u2).sin());
        assert_eq!(q.j, (1.0 - u1).sqrt() * (2.0 * PI * u2).cos());
        assert_eq!(q.k, u1.sqrt() * (2.0 * PI * u3).sin());
        assert_eq!(q.w, u1.sqrt() * (2.0 * PI * u3).cos());
    }

    #[test]
    fn translation_is_bounded_by_max_trans() {
        let mut rng = Lcg32::new(5);
        for _ in 0..1000 {
            let t = sample_translation(&mut rng, 12.0);
            assert!(t.iter().all(|c| c.abs() <= 12.0));
        }
    }

    #[test]
    fn rotation_is_drawn_before_translation() {
        let mut rng = Lcg32::new(3);
        let t = sample_transform(&mut rng, 10.0);

        let mut manual = Lcg32::new(3);
        let q = sample_rotation(&mut manual);
        let v = sample_translation(&mut manual, 10.0);

        assert_eq!(t.rotation, q);
        assert_eq!(t.translation, v);
        assert_eq!(rng, manual);
    }

    #[test]
    fn rng_core_drives_rand_apis() {
        let mut a = Lcg32::new(11);
        let mut b = Lcg32::new(11);
        let x: u32 = a.random();
        assert_eq!(x, b.next_u32());

        let mut bytes = [0u8; 6];
        a.fill_bytes(&mut bytes);
        let expected = b.step().to_le_bytes();
        assert_eq!(&bytes[..4], &expected);
    }

    #[test]
    fn samplers_accept_any_rng_core() {
        let mut a = StdRng::seed_from_u64(17);
        let mut b = StdRng::seed_from_u64(17);

        let t = sample_transform(&mut a, 8.0);
        let u: Vec<f64> = (0..6).map(|_| unit_draw(&mut b)).collect();

        assert!((t.rotation.norm() - 1.0).abs() < 1e-12);
        assert_eq!(t.translation.x, (u[3] * 2.0 - 1.0) * 8.0);
        assert_eq!(t.translation.z, (u[5] * 2.0 - 1.0) * 8.0);
        assert!(t.translation.iter().all(|c| c.abs() <= 8.0));
    }

    #[test]
    fn generic_sampling_matches_lcg_stream() {
        let mut lcg = Lcg32::new(42);
        let mut dyn_rng: Box<dyn RngCore> = Box::new(Lcg32::new(42));

        assert_eq!(
            sample_transform(&mut lcg, 5.0),
            sample_transform(dyn_rng.as_mut(), 5.0)
        );
    }
}
