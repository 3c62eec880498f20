//! Sparks thrown off the drag position while a drag is in progress

use crate::buffers::AttributeBuffers;
use crate::config::DragParticlesConfig;
use crate::drag::DragState;
use crate::particle::{Particle, ParticlePool};
use crate::rand::ParticleRng;
use stardust_core::{Color, Vec3};
use std::f32::consts::TAU;

pub struct DragEmitter {
    config: DragParticlesConfig,
    pool: ParticlePool,
    rng: ParticleRng,
    timer: f32,
    dropped: u64,
    buffers: AttributeBuffers,
}

impl DragEmitter {
    pub fn new(config: DragParticlesConfig, rng: ParticleRng) -> Self {
        let pool = ParticlePool::new(config.capacity);
        Self {
            config,
            pool,
            rng,
            timer: 0.0,
            dropped: 0,
            buffers: AttributeBuffers::default(),
        }
    }

    pub fn update(&mut self, delta: f32, drag: &DragState) {
        self.timer += delta;

        if drag.dragging && self.timer >= self.config.interval {
            let count = (5.0 + drag.intensity.clamp(0.0, 1.0) * 10.0) as usize;
            self.emit(count, drag);
            self.timer = 0.0;
        }

        let damping = self.config.damping;
        let decay = self.config.decay;
        let shrink = (1.0 - delta * self.config.shrink).max(0.0);
        for p in self.pool.alive_slice_mut() {
            p.position += p.velocity * (delta * 60.0);
            p.velocity *= damping;
            p.life -= delta * decay;
            p.size *= shrink;
        }
        self.pool.compact();

        self.pack();
    }

    fn emit(&mut self, count: usize, drag: &DragState) {
        let push = drag.velocity * 0.1;
        for _ in 0..count {
            let angle = self.rng.range(0.0, TAU);
            let speed = self.rng.range(0.1, 0.6);
            let elevation = self.rng.elevation(0.3);
            let velocity = Vec3::new(
                angle.cos() * elevation.cos() * speed,
                elevation.sin() * speed,
                angle.sin() * elevation.cos() * speed,
            ) - push;
            let size = self.rng.range(0.2, 1.0);
            let color = Color::from_hsl(self.rng.next_f32(), 0.9, self.rng.range(0.5, 0.8));

            if self
                .pool
                .spawn(Particle::new(drag.current, velocity, size, color))
                .is_none()
            {
                self.dropped += 1;
            }
        }
    }

    fn pack(&mut self) {
        let alive = self.pool.alive_slice();
        self.buffers.resize(alive.len());
        for (i, p) in alive.iter().enumerate() {
            self.buffers.write(i, p.position, p.color, p.render_size());
        }
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.alive_slice()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Emissions discarded because the pool was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn buffers(&self) -> &AttributeBuffers {
        &self.buffers
    }

    pub fn clear(&mut self) {
        self.pool.clear();
        self.buffers.clear();
        self.timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn dragging(intensity: f32) -> DragState {
        DragState {
            dragging: true,
            start: Vec3::ZERO,
            current: Vec3::new(2.0, 0.0, 0.0),
            velocity: Vec3::ZERO,
            intensity,
        }
    }

    #[test]
    fn idle_drag_emits_nothing() {
        let mut e = DragEmitter::new(DragParticlesConfig::default(), ParticleRng::new(3));
        for _ in 0..60 {
            e.update(DT, &DragState::default());
        }
        assert!(e.particles().is_empty());
    }

    #[test]
    fn emission_count_follows_intensity() {
        let mut low = DragEmitter::new(DragParticlesConfig::default(), ParticleRng::new(3));
        low.update(DT, &dragging(0.0));
        assert_eq!(low.particles().len(), 5);

        let mut high = DragEmitter::new(DragParticlesConfig::default(), ParticleRng::new(3));
        high.update(DT, &dragging(1.0));
        assert_eq!(high.particles().len(), 15);
    }

    #[test]
    fn pool_is_bounded_and_drops_overflow() {
        let mut e = DragEmitter::new(DragParticlesConfig::default(), ParticleRng::new(5));
        for _ in 0..300 {
            e.update(DT, &dragging(1.0));
            assert!(e.particles().len() <= 500);
        }
        assert_eq!(e.capacity(), 500);
        // 15 per frame with ~75 frames of life fills the pool
        assert!(e.dropped() > 0);
    }

    #[test]
    fn drag_velocity_pushes_sparks_backwards() {
        let mut e = DragEmitter::new(DragParticlesConfig::default(), ParticleRng::new(8));
        let mut drag = dragging(0.5);
        drag.velocity = Vec3::new(20.0, 0.0, 0.0);
        e.update(DT, &drag);
        // Backwards push of 2.0 dominates the 0.6 max random speed
        assert!(e.particles().iter().all(|p| p.velocity.x < 0.0));
    }

    #[test]
    fn sparks_expire_after_release() {
        let mut e = DragEmitter::new(DragParticlesConfig::default(), ParticleRng::new(9));
        e.update(DT, &dragging(1.0));
        let released = DragState::default();
        // life 1.0 at 0.8/s
        for _ in 0..80 {
            e.update(DT, &released);
        }
        assert!(e.particles().is_empty());
        assert!(e.buffers().is_empty());
    }
}
