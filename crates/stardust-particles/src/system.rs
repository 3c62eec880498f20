//! The particle field: every layer stepped together once per frame

use crate::buffers::AttributeBuffers;
use crate::burst::BurstEmitter;
use crate::config::{FieldConfig, LayerToggles};
use crate::drag::{DragState, DragTracker};
use crate::drag_emitter::DragEmitter;
use crate::glow::GlowLayer;
use crate::magnetic::MagneticLayer;
use crate::rand::ParticleRng;
use crate::ripple::{Ripple, RippleGenerator};
use crate::starfield::{Starfield, StarfieldFrame};
use crate::trail::TrailEmitter;
use stardust_core::Result;
use stardust_runtime::{FrameInput, FrameSystem, InteractionEvent};

const SALT_STARFIELD: u32 = 1;
const SALT_RIPPLES: u32 = 2;
const SALT_BURSTS: u32 = 3;
const SALT_TRAIL: u32 = 4;
const SALT_DRAG_PARTICLES: u32 = 5;
const SALT_MAGNETIC: u32 = 6;
const SALT_GLOW: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Starfield,
    Glow(usize),
    Magnetic,
    Trail,
    Bursts,
    DragParticles,
}

/// One layer's buffers as handed to the renderer
pub struct LayerDrawData<'a> {
    pub kind: LayerKind,
    pub buffers: &'a AttributeBuffers,
    /// Per-particle opacity, for layers that fade by alpha
    pub opacities: Option<&'a [f32]>,
}

/// Counters for one frame, mostly for logging and the headless harness
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldStats {
    pub frame: u64,
    pub stars: usize,
    pub ripples: usize,
    pub bursts: usize,
    pub burst_particles: usize,
    pub trail_points: usize,
    pub drag_particles: usize,
    pub glow_particles: usize,
    pub magnetic_particles: usize,
    pub dragging: bool,
    pub drag_intensity: f32,
}

pub struct ParticleField {
    layers: LayerToggles,
    sensitivity: f32,
    frame: u64,
    starfield: Starfield,
    ripples: RippleGenerator,
    drag: DragTracker,
    bursts: BurstEmitter,
    trail: TrailEmitter,
    drag_particles: DragEmitter,
    glow: Vec<GlowLayer>,
    magnetic: MagneticLayer,
    empty: AttributeBuffers,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        let seed = config.seed;
        let rng = |salt: u32| ParticleRng::salted(seed, salt);

        let glow = config
            .glow
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| GlowLayer::new(&config.glow, layer, rng(SALT_GLOW + i as u32)))
            .collect();

        Self {
            layers: config.layers.clone(),
            sensitivity: config.audio.sensitivity,
            frame: 0,
            starfield: Starfield::new(config.starfield.clone(), rng(SALT_STARFIELD)),
            ripples: RippleGenerator::new(config.ripples.clone(), rng(SALT_RIPPLES)),
            drag: DragTracker::new(config.drag.clone()),
            bursts: BurstEmitter::new(config.bursts.clone(), rng(SALT_BURSTS)),
            trail: TrailEmitter::new(config.trail.clone(), rng(SALT_TRAIL)),
            drag_particles: DragEmitter::new(
                config.drag_particles.clone(),
                rng(SALT_DRAG_PARTICLES),
            ),
            glow,
            magnetic: MagneticLayer::new(&config.magnetic, rng(SALT_MAGNETIC)),
            empty: AttributeBuffers::default(),
        }
    }

    /// Run one simulation step. Never fails; bad input degrades to no effect.
    pub fn step(&mut self, frame: &FrameInput<'_>) {
        let delta = if frame.delta.is_finite() {
            frame.delta.max(0.0)
        } else {
            0.0
        };
        let time = if frame.time.is_finite() { frame.time } else { 0.0 };
        let pointer = frame.pointer.filter(|p| p.is_finite());
        let audio = frame.audio_bins();

        for event in frame.events {
            self.handle_event(event, time);
        }

        self.ripples.update(delta, pointer);
        self.drag.update(delta, pointer);

        if self.layers.bursts {
            self.bursts.update(delta, audio);
        }
        if self.layers.trail {
            self.trail.update(delta, pointer);
        }
        if self.layers.drag_particles {
            self.drag_particles.update(delta, self.drag.state());
        }
        if self.layers.glow {
            for layer in &mut self.glow {
                layer.update(pointer);
            }
        }
        if self.layers.magnetic {
            self.magnetic.update(time, pointer);
        }

        self.starfield.update(&StarfieldFrame {
            time,
            delta,
            pointer,
            ripples: self.ripples.ripples(),
            drag: self.drag.state(),
            audio,
            sensitivity: self.sensitivity,
        });

        self.frame += 1;
    }

    fn handle_event(&mut self, event: &InteractionEvent, time: f32) {
        match *event {
            InteractionEvent::Press(point) => self.drag.press(point),
            InteractionEvent::Release => self.drag.release(),
            InteractionEvent::Click(point) => {
                self.ripples.spawn_click(point);
                if self.layers.bursts {
                    self.bursts.spawn(point, time);
                }
            }
        }
    }

    /// Buffers of every layer, disabled ones empty
    pub fn draw_data(&self) -> Vec<LayerDrawData<'_>> {
        let mut out = Vec::with_capacity(5 + self.glow.len());
        out.push(LayerDrawData {
            kind: LayerKind::Starfield,
            buffers: self.starfield.buffers(),
            opacities: None,
        });
        for (i, layer) in self.glow.iter().enumerate() {
            out.push(LayerDrawData {
                kind: LayerKind::Glow(i),
                buffers: self.enabled(self.layers.glow, layer.buffers()),
                opacities: None,
            });
        }
        out.push(LayerDrawData {
            kind: LayerKind::Magnetic,
            buffers: self.enabled(self.layers.magnetic, self.magnetic.buffers()),
            opacities: None,
        });
        out.push(LayerDrawData {
            kind: LayerKind::Trail,
            buffers: self.enabled(self.layers.trail, self.trail.buffers()),
            opacities: self.layers.trail.then(|| self.trail.opacities()),
        });
        out.push(LayerDrawData {
            kind: LayerKind::Bursts,
            buffers: self.enabled(self.layers.bursts, self.bursts.buffers()),
            opacities: None,
        });
        out.push(LayerDrawData {
            kind: LayerKind::DragParticles,
            buffers: self.enabled(self.layers.drag_particles, self.drag_particles.buffers()),
            opacities: None,
        });
        out
    }

    fn enabled<'a>(&'a self, on: bool, buffers: &'a AttributeBuffers) -> &'a AttributeBuffers {
        if on {
            buffers
        } else {
            &self.empty
        }
    }

    pub fn stats(&self) -> FieldStats {
        let drag = self.drag.state();
        FieldStats {
            frame: self.frame,
            stars: self.starfield.len(),
            ripples: self.ripples.ripples().len(),
            bursts: self.bursts.bursts().len(),
            burst_particles: self.bursts.particle_count(),
            trail_points: self.trail.len(),
            drag_particles: self.drag_particles.particles().len(),
            glow_particles: self.glow.iter().map(GlowLayer::len).sum(),
            magnetic_particles: self.magnetic.len(),
            dragging: drag.dragging,
            drag_intensity: drag.intensity,
        }
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn ripples(&self) -> &[Ripple] {
        self.ripples.ripples()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn bursts(&self) -> &BurstEmitter {
        &self.bursts
    }

    pub fn trail(&self) -> &TrailEmitter {
        &self.trail
    }

    pub fn drag_particles(&self) -> &DragEmitter {
        &self.drag_particles
    }

    pub fn glow_layers(&self) -> &[GlowLayer] {
        &self.glow
    }

    pub fn magnetic(&self) -> &MagneticLayer {
        &self.magnetic
    }

    pub fn layers(&self) -> &LayerToggles {
        &self.layers
    }
}

impl FrameSystem for ParticleField {
    fn initialize(&mut self) -> Result<()> {
        log::info!(
            "[particles] {} stars, {} glow layer(s), {} magnetic",
            self.starfield.len(),
            self.glow.len(),
            self.magnetic.len()
        );
        Ok(())
    }

    fn update(&mut self, frame: &FrameInput<'_>) -> Result<()> {
        self.step(frame);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.ripples.clear();
        self.drag.reset();
        self.bursts.clear();
        self.trail.clear();
        self.drag_particles.clear();
        self.starfield.reset_motion();
        log::info!("[particles] shut down after {} frame(s)", self.frame);
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
