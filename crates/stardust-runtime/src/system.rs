//! Frame system trait

use crate::frame::FrameInput;
use stardust_core::Result;

/// A system stepped exactly once per rendered frame.
///
/// `update` runs on the render thread and must not block.
pub trait FrameSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame with that frame's inputs
    fn update(&mut self, frame: &FrameInput<'_>) -> Result<()>;

    /// Called at teardown; release pools and detach from inputs
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
