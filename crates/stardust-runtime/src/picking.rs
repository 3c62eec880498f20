//! Pointer picking: NDC coordinates to world-space points
//!
//! The simulation never owns the camera or the scene. The rendering side hands
//! a `Camera` (and optionally a `ScenePicker` for real geometry hits) to a
//! `PointResolver`, which turns pointer coordinates into world positions.

use glam::{Mat4, Vec3 as GVec3};
use stardust_core::Vec3;

/// NDC depth used when unprojecting a pointer for the planar fallback
const FALLBACK_DEPTH: f32 = 0.5;

/// A world-space ray with a normalized direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the plane `z = plane_z`, if it lies in front of the origin
    pub fn intersect_plane_z(&self, plane_z: f32) -> Option<Vec3> {
        if self.direction.z.abs() < 1e-6 {
            return None;
        }
        let t = (plane_z - self.origin.z) / self.direction.z;
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }
}

/// Resolves a ray against whatever geometry the scene contains.
pub trait ScenePicker {
    /// First intersection point along the ray, if any
    fn pick(&self, ray: &Ray) -> Option<Vec3>;
}

/// Perspective camera description
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 50.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov_y_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Projection * view, OpenGL depth convention (NDC z in [-1, 1])
    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(1e-6),
            self.near,
            self.far,
        );
        let view = Mat4::look_at_rh(
            to_glam(self.position),
            to_glam(self.target),
            to_glam(self.up),
        );
        projection * view
    }

    /// World-space point for an NDC position at the given NDC depth
    pub fn unproject(&self, ndc: [f32; 2], depth: f32) -> Vec3 {
        let inverse = self.view_projection().inverse();
        from_glam(inverse.project_point3(GVec3::new(ndc[0], ndc[1], depth)))
    }

    /// Ray from the camera position through an NDC position
    pub fn ray_from_ndc(&self, ndc: [f32; 2]) -> Ray {
        let through = self.unproject(ndc, FALLBACK_DEPTH);
        Ray::new(self.position, through - self.position)
    }
}

/// Turns pointer NDC coordinates into world positions
pub struct PointResolver {
    pub camera: Camera,
    picker: Option<Box<dyn ScenePicker>>,
}

impl PointResolver {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            picker: None,
        }
    }

    pub fn with_picker(mut self, picker: Box<dyn ScenePicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Hover position: the pointer ray's hit on the z = 0 plane.
    /// `None` while the ray runs parallel to the plane or away from it.
    pub fn resolve_hover(&self, ndc: [f32; 2]) -> Option<Vec3> {
        self.camera.ray_from_ndc(ndc).intersect_plane_z(0.0)
    }

    /// Press/click position: first scene hit, otherwise the point where the
    /// camera ray through the unprojected pointer crosses z = 0.
    pub fn resolve_click(&self, ndc: [f32; 2]) -> Vec3 {
        let ray = self.camera.ray_from_ndc(ndc);
        if let Some(hit) = self.picker.as_ref().and_then(|p| p.pick(&ray)) {
            return hit;
        }
        self.planar_fallback(ndc, &ray)
    }

    fn planar_fallback(&self, ndc: [f32; 2], ray: &Ray) -> Vec3 {
        if ray.direction.z.abs() < 1e-6 {
            let p = self.camera.unproject(ndc, FALLBACK_DEPTH);
            return Vec3::new(p.x, p.y, 0.0);
        }
        let distance = -self.camera.position.z / ray.direction.z;
        self.camera.position + ray.direction * distance
    }
}

fn to_glam(v: Vec3) -> GVec3 {
    GVec3::new(v.x, v.y, v.z)
}

fn from_glam(v: GVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FloorPicker;

    impl ScenePicker for FloorPicker {
        fn pick(&self, ray: &Ray) -> Option<Vec3> {
            // Horizontal floor at y = -10
            if ray.direction.y.abs() < 1e-6 {
                return None;
            }
            let t = (-10.0 - ray.origin.y) / ray.direction.y;
            (t >= 0.0).then(|| ray.at(t))
        }
    }

    #[test]
    fn click_without_hit_lands_on_z_plane() {
        let camera = Camera::looking_at(Vec3::new(0.0, 20.0, 50.0), Vec3::new(0.0, 20.0, 0.0));
        let resolver = PointResolver::new(camera);
        let p = resolver.resolve_click([0.0, 0.0]);
        assert!(p.z.abs() < 1e-2, "z = {}", p.z);
        assert!((p.y - 20.0).abs() < 1e-2);
        assert!(p.x.abs() < 1e-2);
        assert!(p.distance(camera.position) > 1.0);
    }

    #[test]
    fn click_prefers_scene_hit() {
        let resolver = PointResolver::new(Camera::default()).with_picker(Box::new(FloorPicker));
        let p = resolver.resolve_click([0.0, -0.5]);
        assert!((p.y + 10.0).abs() < 1e-2);
    }

    #[test]
    fn hover_on_default_camera_hits_origin() {
        let resolver = PointResolver::new(Camera::default());
        let p = resolver.resolve_hover([0.0, 0.0]).unwrap();
        assert!(p.length() < 1e-2, "{p:?}");
    }

    #[test]
    fn hover_parallel_to_plane_is_unresolved() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(ray.intersect_plane_z(0.0).is_none());
        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(away.intersect_plane_z(0.0).is_none());
    }

    #[test]
    fn unproject_center_lies_on_view_axis() {
        let camera = Camera::default();
        let p = camera.unproject([0.0, 0.0], 0.5);
        let axis = (camera.target - camera.position).normalized();
        let offset = p - camera.position;
        let along = offset.dot(&axis);
        let perpendicular = (offset - axis * along).length();
        assert!(perpendicular < 1e-3);
        assert!(along > 0.0);
    }
}
