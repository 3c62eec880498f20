//! The per-frame input record

use crate::input::InteractionEvent;
use stardust_core::Vec3;

/// Everything a simulation step may read. Passed by reference once per frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Elapsed time in seconds
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
    /// World-space pointer, `None` until picking first resolves it
    pub pointer: Option<Vec3>,
    /// Press/release/click events since the previous frame
    pub events: &'a [InteractionEvent],
    /// Normalized frequency magnitudes, `None` without an audio source
    pub audio: Option<&'a [f32]>,
}

impl<'a> FrameInput<'a> {
    /// A frame with no pointer, events or audio
    pub fn idle(time: f32, delta: f32) -> Self {
        Self {
            time,
            delta,
            pointer: None,
            events: &[],
            audio: None,
        }
    }

    pub fn with_pointer(mut self, pointer: Vec3) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn with_events(mut self, events: &'a [InteractionEvent]) -> Self {
        self.events = events;
        self
    }

    pub fn with_audio(mut self, audio: &'a [f32]) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Audio slice only if it carries at least one bin
    pub fn audio_bins(&self) -> Option<&'a [f32]> {
        self.audio.filter(|a| !a.is_empty())
    }
}
