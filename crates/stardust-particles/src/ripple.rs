//! Expanding wave-front ripples
//!
//! A ripple is spawned at radius 0, expands by `speed` units per 60 Hz frame
//! and loses intensity as it approaches its maximum radius. It is retired
//! once it reaches that radius or its intensity drops below the floor.

use crate::config::RippleConfig;
use crate::particle::swap_retain;
use crate::rand::ParticleRng;
use stardust_core::force::exponential_smooth;
use stardust_core::{Color, Vec3};

#[derive(Clone, Debug)]
pub struct Ripple {
    pub id: u64,
    pub origin: Vec3,
    pub radius: f32,
    pub max_radius: f32,
    /// In [0, 1]
    pub intensity: f32,
    pub color: Color,
    pub speed: f32,
}

impl Ripple {
    /// Advance one frame. Returns whether the ripple is still active.
    fn advance(&mut self, delta: f32, min_intensity: f32) -> bool {
        self.radius += self.speed * delta * 60.0;
        let remaining = (1.0 - self.radius / self.max_radius).clamp(0.0, 1.0);
        self.intensity = (self.intensity * remaining).clamp(0.0, 1.0);
        self.radius < self.max_radius && self.intensity > min_intensity
    }
}

pub struct RippleGenerator {
    config: RippleConfig,
    ripples: Vec<Ripple>,
    rng: ParticleRng,
    next_id: u64,
    last_pointer: Option<Vec3>,
    /// Smoothed pointer displacement per frame
    pointer_speed: f32,
}

impl RippleGenerator {
    pub fn new(config: RippleConfig, rng: ParticleRng) -> Self {
        Self {
            config,
            ripples: Vec::new(),
            rng,
            next_id: 1,
            last_pointer: None,
            pointer_speed: 0.0,
        }
    }

    /// Large full-intensity ripple from an explicit click
    pub fn spawn_click(&mut self, origin: Vec3) -> u64 {
        let color = Color::from_hsl(self.rng.range(0.5, 0.8), 0.8, 0.6);
        let id = self.push(Ripple {
            id: 0,
            origin,
            radius: 0.0,
            max_radius: self.config.click_max_radius,
            intensity: 1.0,
            color,
            speed: self.config.click_speed,
        });
        log::debug!("click ripple {id} at {origin:?}");
        id
    }

    /// Per-frame update: maybe spawn a movement ripple, then advance and retire.
    pub fn update(&mut self, delta: f32, pointer: Option<Vec3>) {
        if let Some(p) = pointer {
            let moved = self.last_pointer.map(|last| last.distance(p)).unwrap_or(0.0);
            self.pointer_speed =
                exponential_smooth(self.pointer_speed, moved, self.config.speed_smoothing);
            self.last_pointer = Some(p);

            if self.pointer_speed > self.config.move_threshold
                && self.rng.chance(self.config.move_chance)
            {
                self.spawn_movement(p);
            }
        }

        let min_intensity = self.config.min_intensity;
        for ripple in &mut self.ripples {
            let alive = ripple.advance(delta, min_intensity);
            if !alive {
                ripple.intensity = 0.0;
            }
        }
        swap_retain(&mut self.ripples, |r| r.intensity > 0.0);
    }

    fn spawn_movement(&mut self, origin: Vec3) {
        let speed = self.pointer_speed;
        self.push(Ripple {
            id: 0,
            origin,
            radius: 0.0,
            max_radius: 20.0 + speed * 5.0,
            intensity: (speed * 0.3).min(1.0),
            color: Color::from_hsl(0.6, 0.6, 0.7),
            speed: self.config.move_speed,
        });
    }

    fn push(&mut self, mut ripple: Ripple) -> u64 {
        ripple.id = self.next_id;
        self.next_id += 1;
        let id = ripple.id;
        self.ripples.push(ripple);
        id
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn pointer_speed(&self) -> f32 {
        self.pointer_speed
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
        self.last_pointer = None;
        self.pointer_speed = 0.0;
    }
}
