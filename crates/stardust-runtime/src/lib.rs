//! Stardust Runtime - Frame loop infrastructure
//!
//! Provides the building blocks that feed the particle simulation once per frame:
//! - `FrameClock` - elapsed time and per-frame delta
//! - `InputState` - pointer position and resolved click/drag events
//! - `Camera` / `PointResolver` - NDC to world picking with a planar fallback
//! - `SpectrumAnalyzer` / `SpectrumSource` - normalized audio magnitudes
//! - `FrameSystem` / `FrameInput` - the per-frame update contract

mod audio;
mod clock;
mod frame;
mod input;
mod picking;
mod system;

pub use audio::{normalize_decibels, NoAudio, SpectrumAnalyzer, SpectrumSource, DEFAULT_BIN_COUNT};
pub use clock::FrameClock;
pub use frame::FrameInput;
pub use input::{InputState, InteractionEvent, PointerEvent};
pub use picking::{Camera, PointResolver, Ray, ScenePicker};
pub use system::FrameSystem;
