//! Stardust Particles - pointer- and audio-reactive particle field
//!
//! Provides the per-frame simulation of every particle layer:
//! - A fixed 5000-star field combining drift, spotlight, ripple, flow-field,
//!   drag-vortex and audio forces
//! - Ripple and drag state machines fed by pointer events
//! - Self-draining burst, trail and drag-spark emitters
//! - Static glow shells and a pointer-anchored magnetic field layer
//! - Flat position/color/size buffers for the renderer

pub mod buffers;
pub mod burst;
pub mod config;
pub mod drag;
pub mod drag_emitter;
pub mod glow;
pub mod magnetic;
pub mod particle;
pub mod rand;
pub mod ripple;
pub mod starfield;
pub mod system;
pub mod trail;

pub use buffers::AttributeBuffers;
pub use burst::{Burst, BurstEmitter};
pub use config::{FieldConfig, GlowLayerConfig, LayerToggles};
pub use drag::{DragState, DragTracker};
pub use drag_emitter::DragEmitter;
pub use glow::GlowLayer;
pub use magnetic::MagneticLayer;
pub use particle::{Particle, ParticlePool};
pub use ripple::{Ripple, RippleGenerator};
pub use starfield::{Starfield, StarfieldFrame};
pub use system::{FieldStats, LayerDrawData, LayerKind, ParticleField};
pub use trail::{TrailEmitter, TrailPoint};
