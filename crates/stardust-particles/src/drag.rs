//! Drag tracking: pointer down/move/up to a smoothed drag state

use crate::config::DragConfig;
use stardust_core::force::smooth_vec3;
use stardust_core::Vec3;

/// Snapshot read by the main field and the drag emitter each frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    pub start: Vec3,
    pub current: Vec3,
    /// Smoothed world-space velocity in units per second
    pub velocity: Vec3,
    /// In [0, 1]
    pub intensity: f32,
}

pub struct DragTracker {
    config: DragConfig,
    state: DragState,
    last_position: Vec3,
}

impl DragTracker {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::default(),
            last_position: Vec3::ZERO,
        }
    }

    /// Idle -> Dragging at the resolved press point
    pub fn press(&mut self, point: Vec3) {
        self.state.dragging = true;
        self.state.start = point;
        self.state.current = point;
        self.state.intensity = 1.0;
        self.last_position = point;
        log::debug!("drag started at {point:?}");
    }

    /// Dragging -> Idle. Intensity fades out in `update` instead of snapping to 0.
    pub fn release(&mut self) {
        if self.state.dragging {
            log::debug!("drag released at intensity {:.2}", self.state.intensity);
        }
        self.state.dragging = false;
    }

    pub fn update(&mut self, delta: f32, pointer: Option<Vec3>) {
        if self.state.dragging {
            let (Some(p), true) = (pointer, delta > 0.0) else {
                return;
            };
            let instantaneous = (p - self.last_position) * (1.0 / delta);
            self.state.velocity = smooth_vec3(
                self.state.velocity,
                instantaneous,
                self.config.velocity_smoothing,
            );
            self.state.current = p;
            self.state.intensity =
                (self.state.velocity.length() * self.config.intensity_scale).min(1.0);
            self.last_position = p;
        } else if self.state.intensity > 0.0 {
            self.state.intensity =
                (self.state.intensity - delta * self.config.fade_rate).max(0.0);
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = DragState::default();
        self.last_position = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn press_enters_dragging() {
        let mut tracker = DragTracker::new(DragConfig::default());
        tracker.press(Vec3::new(1.0, 2.0, 0.0));
        let s = tracker.state();
        assert!(s.dragging);
        assert_eq!(s.start, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(s.current, s.start);
        assert_eq!(s.intensity, 1.0);
    }

    #[test]
    fn moving_drag_smooths_velocity() {
        let mut tracker = DragTracker::new(DragConfig::default());
        tracker.press(Vec3::ZERO);
        // 0.1 units per frame = 6 units/s
        tracker.update(DT, Some(Vec3::new(0.1, 0.0, 0.0)));
        let s = *tracker.state();
        assert!((s.velocity.x - 6.0 * 0.3).abs() < 1e-3);
        assert!((s.intensity - 6.0 * 0.3 * 0.05).abs() < 1e-3);
        assert_eq!(s.current, Vec3::new(0.1, 0.0, 0.0));

        for i in 2..200 {
            tracker.update(DT, Some(Vec3::new(0.1 * i as f32, 0.0, 0.0)));
        }
        assert!((tracker.state().velocity.x - 6.0).abs() < 1e-2);
        assert!((tracker.state().intensity - 0.3).abs() < 1e-3);
    }

    #[test]
    fn fast_drag_intensity_saturates() {
        let mut tracker = DragTracker::new(DragConfig::default());
        tracker.press(Vec3::ZERO);
        for i in 1..30 {
            tracker.update(DT, Some(Vec3::new(5.0 * i as f32, 0.0, 0.0)));
        }
        assert_eq!(tracker.state().intensity, 1.0);
    }

    #[test]
    fn release_fades_linearly() {
        let mut tracker = DragTracker::new(DragConfig::default());
        tracker.press(Vec3::ZERO);
        tracker.state.intensity = 0.8;
        tracker.release();
        assert!(!tracker.state().dragging);
        assert_eq!(tracker.state().intensity, 0.8);

        // 0.2 s at 60 Hz
        for _ in 0..12 {
            tracker.update(DT, None);
        }
        assert!((tracker.state().intensity - 0.4).abs() < 1e-3);

        for _ in 0..12 {
            tracker.update(DT, None);
        }
        assert!(tracker.state().intensity < 1e-3);
        tracker.update(DT, None);
        assert_eq!(tracker.state().intensity, 0.0);
    }

    #[test]
    fn zero_delta_does_not_divide() {
        let mut tracker = DragTracker::new(DragConfig::default());
        tracker.press(Vec3::ZERO);
        tracker.update(0.0, Some(Vec3::new(1.0, 0.0, 0.0)));
        assert!(tracker.state().velocity.is_finite());
        assert_eq!(tracker.state().velocity, Vec3::ZERO);
    }

    #[test]
    fn can_redrag_after_release() {
        let mut tracker = DragTracker::new(DragConfig::default());
        tracker.press(Vec3::ZERO);
        tracker.release();
        tracker.press(Vec3::new(4.0, 0.0, 0.0));
        assert!(tracker.state().dragging);
        assert_eq!(tracker.state().start, Vec3::new(4.0, 0.0, 0.0));
    }
}
