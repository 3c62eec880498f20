//! Pointer input state

use crate::picking::PointResolver;
use stardust_core::Vec3;

/// Window-level pointer event in normalized device coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Moved { ndc: [f32; 2] },
    Pressed { ndc: [f32; 2] },
    Released,
    Clicked { ndc: [f32; 2] },
}

/// Pointer event resolved to world space, as consumed by the simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionEvent {
    /// Pointer went down at a world position (drag start)
    Press(Vec3),
    /// Pointer went up (drag end)
    Release,
    /// Completed click at a world position (ripple, burst)
    Click(Vec3),
}

/// Tracks the resolved pointer position and this frame's interaction events
#[derive(Default)]
pub struct InputState {
    /// Latest hover position on the z = 0 plane, `None` until first resolved
    pointer: Option<Vec3>,
    /// Whether the pointer button is currently held
    pressed: bool,
    /// Events received since the last `end_frame`
    events: Vec<InteractionEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and record one window event
    pub fn handle(&mut self, event: PointerEvent, resolver: &PointResolver) {
        match event {
            PointerEvent::Moved { ndc } => match resolver.resolve_hover(ndc) {
                Some(p) => self.pointer = Some(p),
                None => log::trace!("pointer ray misses the z=0 plane at {ndc:?}"),
            },
            PointerEvent::Pressed { ndc } => {
                self.pressed = true;
                self.events
                    .push(InteractionEvent::Press(resolver.resolve_click(ndc)));
            }
            PointerEvent::Released => {
                if self.pressed {
                    self.pressed = false;
                    self.events.push(InteractionEvent::Release);
                }
            }
            PointerEvent::Clicked { ndc } => {
                self.events
                    .push(InteractionEvent::Click(resolver.resolve_click(ndc)));
            }
        }
    }

    /// Set the world pointer directly (hosts that resolve picking themselves)
    pub fn set_pointer(&mut self, position: Vec3) {
        self.pointer = Some(position);
    }

    /// Record an already-resolved event
    pub fn push(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::Press(_) => self.pressed = true,
            InteractionEvent::Release => self.pressed = false,
            InteractionEvent::Click(_) => {}
        }
        self.events.push(event);
    }

    pub fn pointer(&self) -> Option<Vec3> {
        self.pointer
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    /// Clear per-frame events. Call after the simulation step.
    pub fn end_frame(&mut self) {
        self.events.clear();
    }
}
