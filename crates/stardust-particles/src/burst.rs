//! Click-triggered star bursts: radial fans of gravity-affected particles

use crate::buffers::AttributeBuffers;
use crate::config::BurstConfig;
use crate::particle::{swap_retain, Particle};
use crate::rand::ParticleRng;
use stardust_core::{Color, Vec3};
use std::f32::consts::TAU;

/// One click's worth of particles; dropped once all of them expire
pub struct Burst {
    pub id: u64,
    pub origin: Vec3,
    /// Simulation time at spawn, in seconds
    pub created_at: f32,
    pub particles: Vec<Particle>,
}

pub struct BurstEmitter {
    config: BurstConfig,
    bursts: Vec<Burst>,
    rng: ParticleRng,
    next_id: u64,
    buffers: AttributeBuffers,
}

impl BurstEmitter {
    pub fn new(config: BurstConfig, rng: ParticleRng) -> Self {
        Self {
            config,
            bursts: Vec::new(),
            rng,
            next_id: 1,
            buffers: AttributeBuffers::default(),
        }
    }

    /// Emit a radial fan of particles at `origin`
    pub fn spawn(&mut self, origin: Vec3, time: f32) -> u64 {
        // An inverted range degrades to exactly `min_particles`
        let span = self
            .config
            .max_particles
            .saturating_sub(self.config.min_particles);
        let count = self.config.min_particles + self.rng.index(span.max(1));

        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            let speed = self.rng.range(0.1, 0.4);
            let elevation = self.rng.elevation(0.5);
            let velocity = Vec3::new(
                angle.cos() * elevation.cos() * speed,
                elevation.sin() * speed,
                angle.sin() * elevation.cos() * speed,
            );
            let size = self.rng.range(0.2, 0.7);
            let color = Color::from_hsl(
                self.rng.range(0.15, 0.65),
                0.8,
                self.rng.range(0.5, 1.0),
            );
            particles.push(Particle::new(origin, velocity, size, color));
        }

        let id = self.next_id;
        self.next_id += 1;
        log::debug!("burst {id}: {count} particles at {origin:?}");
        self.bursts.push(Burst {
            id,
            origin,
            created_at: time,
            particles,
        });
        id
    }

    pub fn update(&mut self, delta: f32, audio: Option<&[f32]>) {
        let audio = audio.filter(|a| !a.is_empty());
        let gravity = self.config.gravity;
        let decay = self.config.decay;

        for burst in &mut self.bursts {
            for p in &mut burst.particles {
                p.position += p.velocity * (delta * 60.0);
                p.velocity.y -= delta * gravity;
                p.life -= delta * decay;

                // Each particle samples its own random bin
                if let Some(bins) = audio {
                    let value = sanitize(bins[self.rng.index(bins.len())]);
                    p.velocity *= 1.0 + value * 0.2;
                    p.size *= 1.0 + value * 0.5;
                }
            }
            swap_retain(&mut burst.particles, Particle::is_alive);
        }
        swap_retain(&mut self.bursts, |b| !b.particles.is_empty());

        self.pack();
    }

    fn pack(&mut self) {
        let total = self.particle_count();
        self.buffers.resize(total);
        let mut i = 0;
        for p in self.bursts.iter().flat_map(|b| b.particles.iter()) {
            self.buffers.write(i, p.position, p.color, p.render_size());
            i += 1;
        }
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn particle_count(&self) -> usize {
        self.bursts.iter().map(|b| b.particles.len()).sum()
    }

    pub fn buffers(&self) -> &AttributeBuffers {
        &self.buffers
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
        self.buffers.clear();
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn emitter(seed: u32) -> BurstEmitter {
        BurstEmitter::new(BurstConfig::default(), ParticleRng::new(seed))
    }

    #[test]
    fn spawn_count_in_range() {
        for seed in 1..40 {
            let mut e = emitter(seed);
            e.spawn(Vec3::ZERO, 0.0);
            let n = e.particle_count();
            assert!((30..50).contains(&n), "count {n}");
        }
    }

    #[test]
    fn inverted_count_range_spawns_min() {
        let config = BurstConfig {
            min_particles: 50,
            max_particles: 30,
            ..BurstConfig::default()
        };
        let mut e = BurstEmitter::new(config, ParticleRng::new(7));
        e.spawn(Vec3::ZERO, 0.0);
        assert_eq!(e.particle_count(), 50);
        e.update(DT, None);
        assert_eq!(e.bursts().len(), 1);
    }

    #[test]
    fn particles_fan_out_radially() {
        let mut e = emitter(3);
        e.spawn(Vec3::new(1.0, 1.0, 1.0), 2.0);
        let burst = &e.bursts()[0];
        assert_eq!(burst.created_at, 2.0);
        for p in &burst.particles {
            assert_eq!(p.position, Vec3::new(1.0, 1.0, 1.0));
            let speed = p.velocity.length();
            assert!((0.1 - 1e-4..0.4 + 1e-4).contains(&speed), "speed {speed}");
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn gravity_pulls_down() {
        let mut e = emitter(9);
        e.spawn(Vec3::ZERO, 0.0);
        let before: Vec<f32> = e.bursts()[0].particles.iter().map(|p| p.velocity.y).collect();
        e.update(DT, None);
        // swap-remove may reorder, but nothing has died yet
        let mut after: Vec<f32> = e.bursts()[0].particles.iter().map(|p| p.velocity.y).collect();
        let mut expected: Vec<f32> = before.iter().map(|v| v - DT * 0.5).collect();
        after.sort_by(|a, b| a.partial_cmp(b).unwrap());
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (a, b) in after.iter().zip(&expected) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn burst_is_pruned_within_five_seconds() {
        let mut e = emitter(11);
        e.spawn(Vec3::ZERO, 0.0);
        e.spawn(Vec3::new(5.0, 0.0, 0.0), 0.0);
        for _ in 0..(5 * 60) {
            e.update(DT, None);
        }
        assert!(e.bursts().is_empty());
        assert_eq!(e.buffers().len(), 0);
    }

    #[test]
    fn audio_amplifies_size_and_speed() {
        let mut quiet = emitter(21);
        let mut loud = emitter(21);
        quiet.spawn(Vec3::ZERO, 0.0);
        loud.spawn(Vec3::ZERO, 0.0);

        quiet.update(DT, None);
        loud.update(DT, Some(&[1.0; 16]));

        let q: f32 = quiet.bursts()[0].particles.iter().map(|p| p.size).sum();
        let l: f32 = loud.bursts()[0].particles.iter().map(|p| p.size).sum();
        assert!((l - q * 1.5).abs() < 1e-3 * q);
    }

    #[test]
    fn empty_or_garbage_audio_is_harmless() {
        let mut e = emitter(4);
        e.spawn(Vec3::ZERO, 0.0);
        e.update(DT, Some(&[]));
        e.update(DT, Some(&[f32::NAN, -3.0]));
        for p in &e.bursts()[0].particles {
            assert!(p.size.is_finite() && p.size > 0.0);
            assert!(p.velocity.is_finite());
        }
    }

    #[test]
    fn buffers_hold_render_size() {
        let mut e = emitter(8);
        e.spawn(Vec3::ZERO, 0.0);
        e.update(DT, None);
        let n = e.particle_count();
        assert_eq!(e.buffers().len(), n);
        for i in 0..n {
            assert!(e.buffers().size(i) >= 0.0);
            assert!(e.buffers().size(i) < 0.7);
        }
    }
}
