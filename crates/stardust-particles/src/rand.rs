//! Lightweight xorshift32 PRNG, one instance per component so a fixed seed
//! reproduces every frame exactly.

use stardust_core::Vec3;
use std::f32::consts::{PI, TAU};

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Generator for one component, derived from a shared seed
    pub fn salted(seed: u32, salt: u32) -> Self {
        Self::new(seed ^ salt.wrapping_mul(0x9E37_79B9))
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits keep the result strictly below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Uniformly distributed unit direction (`theta` uniform, `phi = acos(2u - 1)`)
    pub fn unit_direction(&mut self) -> Vec3 {
        let theta = self.range(0.0, TAU);
        let phi = (self.range(-1.0, 1.0)).clamp(-1.0, 1.0).acos();
        Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        )
    }

    /// Point on a spherical shell with radius in [r_min, r_max)
    pub fn shell_point(&mut self, r_min: f32, r_max: f32) -> Vec3 {
        let radius = self.range(r_min, r_max);
        self.unit_direction() * radius
    }

    /// Elevation angle in [-spread·π/2, spread·π/2)
    pub fn elevation(&mut self, spread: f32) -> f32 {
        (self.next_f32() - 0.5) * PI * spread
    }
}
