//! Transient particle state and the bounded pools that own it

use stardust_core::{Color, Vec3};

/// A short-lived particle owned by one emitter.
/// `life` starts at 1.0 and the particle is dead once it reaches 0.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub life: f32,
    pub color: Color,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, size: f32, color: Color) -> Self {
        Self {
            position,
            velocity,
            size,
            life: 1.0,
            color,
        }
    }

    pub fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            size: 0.0,
            life: 0.0,
            color: Color::BLACK,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Size handed to the renderer: shrinks together with remaining life
    pub fn render_size(&self) -> f32 {
        self.size * self.life.max(0.0)
    }
}

/// Swap-remove pool for O(1) particle kill and contiguous alive iteration.
pub struct ParticlePool {
    particles: Vec<Particle>,
    alive_count: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let mut particles = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            particles.push(Particle::dead());
        }
        Self {
            particles,
            alive_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    pub fn is_full(&self) -> bool {
        self.alive_count >= self.particles.len()
    }

    /// Spawn one particle, returning a mutable ref to initialize it.
    /// Returns None if pool is full.
    pub fn spawn(&mut self, particle: Particle) -> Option<&mut Particle> {
        if self.is_full() {
            return None;
        }
        let idx = self.alive_count;
        self.particles[idx] = particle;
        self.alive_count += 1;
        Some(&mut self.particles[idx])
    }

    /// Kill expired particles via swap-remove.
    pub fn compact(&mut self) {
        let mut i = 0;
        while i < self.alive_count {
            if !self.particles[i].is_alive() {
                self.alive_count -= 1;
                if i < self.alive_count {
                    self.particles.swap(i, self.alive_count);
                }
                // Don't increment i — the swapped-in particle needs checking
            } else {
                i += 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.alive_count = 0;
    }

    /// Access alive particles slice for reading (first `alive_count` elements)
    pub fn alive_slice(&self) -> &[Particle] {
        &self.particles[..self.alive_count]
    }

    /// Access alive particles mutably
    pub fn alive_slice_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.alive_count]
    }
}

/// Remove every element failing `keep` by swap-remove.
/// Order is not preserved; storage is reused rather than reallocated.
pub fn swap_retain<T>(items: &mut Vec<T>, mut keep: impl FnMut(&T) -> bool) {
    let mut i = 0;
    while i < items.len() {
        if keep(&items[i]) {
            i += 1;
        } else {
            items.swap_remove(i);
        }
    }
}
