//! Static glow shells whose sprite sizes sparkle around the pointer

use crate::buffers::AttributeBuffers;
use crate::config::{GlowConfig, GlowLayerConfig};
use crate::rand::ParticleRng;
use stardust_core::force::{falloff, smooth_vec3};
use stardust_core::{Color, Vec3};

pub const GLOW_COLOR: Color = Color::new(0.8, 0.8, 1.0);

pub struct GlowLayer {
    scale: f32,
    spotlight_radius: f32,
    pointer_smoothing: f32,
    positions: Vec<Vec3>,
    smoothed_pointer: Vec3,
    rng: ParticleRng,
    buffers: AttributeBuffers,
}

impl GlowLayer {
    pub fn new(glow: &GlowConfig, layer: &GlowLayerConfig, mut rng: ParticleRng) -> Self {
        let positions: Vec<Vec3> = (0..layer.count)
            .map(|_| rng.shell_point(glow.radius_min, glow.radius_max))
            .collect();

        let mut buffers = AttributeBuffers::with_len(positions.len());
        for (i, &p) in positions.iter().enumerate() {
            let size = rng.range(1.0, 3.0) * layer.scale;
            buffers.write(i, p, GLOW_COLOR, size);
        }

        Self {
            scale: layer.scale,
            spotlight_radius: glow.spotlight_radius,
            pointer_smoothing: glow.pointer_smoothing,
            positions,
            smoothed_pointer: Vec3::ZERO,
            rng,
            buffers,
        }
    }

    /// Only sizes change; positions and colors are fixed at construction
    pub fn update(&mut self, pointer: Option<Vec3>) {
        if let Some(p) = pointer {
            self.smoothed_pointer = smooth_vec3(self.smoothed_pointer, p, self.pointer_smoothing);
        }

        for (i, position) in self.positions.iter().enumerate() {
            let intensity = match pointer {
                Some(_) => falloff(
                    position.distance(self.smoothed_pointer),
                    self.spotlight_radius,
                ),
                None => 0.0,
            };
            let jitter = self.rng.range(1.0, 3.0);
            self.buffers
                .set_size(i, jitter * self.scale * (0.5 + intensity * 2.0));
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn smoothed_pointer(&self) -> Vec3 {
        self.smoothed_pointer
    }

    pub fn buffers(&self) -> &AttributeBuffers {
        &self.buffers
    }
}
