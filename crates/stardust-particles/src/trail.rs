//! Pointer trail: a bounded ring of fading points dropped along the pointer path

use crate::buffers::AttributeBuffers;
use crate::config::TrailConfig;
use crate::rand::ParticleRng;
use stardust_core::{Color, Vec3};
use std::collections::VecDeque;

pub const TRAIL_COLOR: Color = Color::new(0.6, 0.8, 1.0);

#[derive(Clone, Debug)]
pub struct TrailPoint {
    pub position: Vec3,
    pub life: f32,
    pub size: f32,
}

pub struct TrailEmitter {
    config: TrailConfig,
    points: VecDeque<TrailPoint>,
    rng: ParticleRng,
    timer: f32,
    last_emit: Option<Vec3>,
    buffers: AttributeBuffers,
    opacities: Vec<f32>,
}

impl TrailEmitter {
    pub fn new(config: TrailConfig, rng: ParticleRng) -> Self {
        let capacity = config.capacity;
        Self {
            config,
            points: VecDeque::with_capacity(capacity),
            rng,
            timer: 0.0,
            last_emit: None,
            buffers: AttributeBuffers::default(),
            opacities: Vec::with_capacity(capacity),
        }
    }

    pub fn update(&mut self, delta: f32, pointer: Option<Vec3>) {
        self.timer += delta;

        // Decay first so a point emitted this frame starts at full life
        let decay = self.config.decay;
        let shrink = (1.0 - delta * self.config.shrink).max(0.0);
        for point in &mut self.points {
            point.life -= delta * decay;
            point.size *= shrink;
        }
        self.points.retain(|p| p.life > 0.0);

        if let Some(p) = pointer {
            let moved = self
                .last_emit
                .map(|last| last.distance(p) > self.config.min_distance)
                .unwrap_or(true);
            if self.timer >= self.config.interval && moved {
                self.emit(p);
            }
        }

        self.pack();
    }

    fn emit(&mut self, position: Vec3) {
        if self.config.capacity == 0 {
            return;
        }
        while self.points.len() >= self.config.capacity {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint {
            position,
            life: 1.0,
            size: self.rng.range(0.3, 0.8),
        });
        self.timer = 0.0;
        self.last_emit = Some(position);
    }

    fn pack(&mut self) {
        self.buffers.resize(self.points.len());
        self.opacities.clear();
        for (i, p) in self.points.iter().enumerate() {
            self.buffers.write(i, p.position, TRAIL_COLOR, p.size * p.life);
            self.opacities.push(p.life.clamp(0.0, 1.0));
        }
    }

    /// Oldest first
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn buffers(&self) -> &AttributeBuffers {
        &self.buffers
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.buffers.clear();
        self.opacities.clear();
        self.timer = 0.0;
        self.last_emit = None;
    }
}
