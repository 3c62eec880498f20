//! Field-line layer orbiting the pointer.
//!
//! Positions are a closed-form function of time, index and pointer; nothing
//! carries over between frames except the fixed per-particle sizes.

use crate::buffers::AttributeBuffers;
use crate::config::MagneticConfig;
use crate::rand::ParticleRng;
use stardust_core::{Color, Vec3};
use std::f32::consts::TAU;

pub const MAGNETIC_COLOR: Color = Color::new(0.5, 0.8, 1.0);

pub struct MagneticLayer {
    count: usize,
    strength: f32,
    buffers: AttributeBuffers,
}

impl MagneticLayer {
    pub fn new(config: &MagneticConfig, mut rng: ParticleRng) -> Self {
        let mut buffers = AttributeBuffers::with_len(config.count);
        for i in 0..config.count {
            buffers.write(i, Vec3::ZERO, MAGNETIC_COLOR, rng.range(0.1, 0.6));
        }
        let mut layer = Self {
            count: config.count,
            strength: config.strength,
            buffers,
        };
        layer.update(0.0, None);
        layer
    }

    pub fn update(&mut self, time: f32, pointer: Option<Vec3>) {
        let anchor = pointer.unwrap_or(Vec3::ZERO);
        for i in 0..self.count {
            self.buffers
                .set_position(i, anchor + orbit_offset(i, self.count, time) * self.strength);
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn buffers(&self) -> &AttributeBuffers {
        &self.buffers
    }
}

/// Offset of particle `index` from the anchor at time `t`
pub fn orbit_offset(index: usize, count: usize, t: f32) -> Vec3 {
    let i = index as f32;
    let angle = i / count.max(1) as f32 * TAU + t * 0.5;
    let radius = 15.0 + (t * 2.0 + i * 0.1).sin() * 10.0;
    let height = (t + i * 0.2).sin() * 10.0;
    Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
}
