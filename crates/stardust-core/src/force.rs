//! Force-field primitives shared by every proximity effect.
//!
//! All layers go through these functions so that a given distance produces
//! the same effect strength everywhere.

use crate::types::Vec3;

/// Smallest distance used in any force computation. Coincident positions are
/// treated as being this far apart, which yields maximum falloff intensity.
pub const MIN_DISTANCE: f32 = 1e-4;

/// Linear radial attenuation: 1 at the center, 0 at `radius` and beyond.
pub fn falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || !distance.is_finite() {
        return 0.0;
    }
    (1.0 - distance.max(0.0) / radius).max(0.0)
}

/// `current + (target - current) * factor`
pub fn exponential_smooth(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Component-wise [`exponential_smooth`]
pub fn smooth_vec3(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    Vec3::new(
        exponential_smooth(current.x, target.x, factor),
        exponential_smooth(current.y, target.y, factor),
        exponential_smooth(current.z, target.z, factor),
    )
}

/// Distance between two points, clamped below by [`MIN_DISTANCE`]
pub fn safe_distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b).max(MIN_DISTANCE)
}

/// Proximity of `distance` to a spherical wave front of radius `front`.
/// 1 on the front, falling linearly to 0 at `half_width` either side.
pub fn wave_front(distance: f32, front: f32, half_width: f32) -> f32 {
    falloff((distance - front).abs(), half_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falloff_endpoints() {
        assert!((falloff(0.0, 35.0) - 1.0).abs() < 1e-6);
        assert!((falloff(17.5, 35.0) - 0.5).abs() < 1e-6);
        assert_eq!(falloff(35.0, 35.0), 0.0);
        assert_eq!(falloff(100.0, 35.0), 0.0);
    }

    #[test]
    fn falloff_degenerate_inputs() {
        assert_eq!(falloff(1.0, 0.0), 0.0);
        assert_eq!(falloff(f32::NAN, 10.0), 0.0);
        assert!((falloff(MIN_DISTANCE, 40.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn smoothing_moves_by_factor() {
        assert!((exponential_smooth(0.0, 10.0, 0.3) - 3.0).abs() < 1e-6);
        let v = smooth_vec3(Vec3::ZERO, Vec3::new(10.0, -10.0, 5.0), 0.2);
        assert_eq!(v, Vec3::new(2.0, -2.0, 1.0));
    }

    #[test]
    fn safe_distance_never_zero() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(safe_distance(p, p), MIN_DISTANCE);
    }

    #[test]
    fn wave_front_band() {
        assert!((wave_front(10.0, 10.0, 5.0) - 1.0).abs() < 1e-6);
        assert!((wave_front(12.5, 10.0, 5.0) - 0.5).abs() < 1e-6);
        assert_eq!(wave_front(16.0, 10.0, 5.0), 0.0);
        assert_eq!(wave_front(4.0, 10.0, 5.0), 0.0);
    }
}
