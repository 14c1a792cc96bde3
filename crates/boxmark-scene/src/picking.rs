//! Ray helpers for click selection and gizmo dragging

use bevy::prelude::*;

/// World-space ray under the cursor, if the cursor is inside the window
pub fn cursor_ray(window: &Window, camera: &Camera, camera_transform: &GlobalTransform) -> Option<Ray3d> {
    let cursor = window.cursor_position()?;
    camera.viewport_to_world(camera_transform, cursor).ok()
}

/// Distance along the ray to an axis-aligned box, `None` on a miss
pub fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = direction.recip();
    let t1 = (min - origin) * inv;
    let t2 = (max - origin) * inv;

    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    if t_far < 0.0 || t_near > t_far {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Closest approach between a gizmo axis line and a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisApproach {
    /// Parameter along the axis (world units from the axis origin)
    pub along_axis: f32,
    /// Parameter along the ray
    pub along_ray: f32,
    /// Gap between the two closest points
    pub distance: f32,
}

/// Closest points between the line `axis_origin + s * axis_dir` and the ray
///
/// Returns `None` when the ray is (nearly) parallel to the axis.
pub fn closest_to_axis(axis_origin: Vec3, axis_dir: Vec3, ray_origin: Vec3, ray_dir: Vec3) -> Option<AxisApproach> {
    let w0 = axis_origin - ray_origin;
    let a = axis_dir.dot(axis_dir);
    let b = axis_dir.dot(ray_dir);
    let c = ray_dir.dot(ray_dir);
    let d = axis_dir.dot(w0);
    let e = ray_dir.dot(w0);

    let denom = a * c - b * b;
    if denom.abs() < 1e-6 {
        return None;
    }

    let s = (b * e - c * d) / denom;
    let t = (a * e - b * d) / denom;
    let on_axis = axis_origin + axis_dir * s;
    let on_ray = ray_origin + ray_dir * t;
    Some(AxisApproach {
        along_axis: s,
        along_ray: t,
        distance: on_axis.distance(on_ray),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_box_front_face() {
        let t = ray_aabb(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn test_ray_misses_offset_box() {
        let t = ray_aabb(Vec3::new(5.0, 0.0, -10.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, None);
    }

    #[test]
    fn test_box_behind_ray_is_missed() {
        let t = ray_aabb(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, None);
    }

    #[test]
    fn test_closest_to_axis_crossing() {
        let approach = closest_to_axis(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 5.0, 0.0), Vec3::NEG_Y).unwrap();
        assert!((approach.along_axis - 2.0).abs() < 1e-5);
        assert!((approach.along_ray - 5.0).abs() < 1e-5);
        assert!(approach.distance < 1e-5);
    }

    #[test]
    fn test_closest_to_axis_skew_gap() {
        let approach = closest_to_axis(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 3.0, 0.5), Vec3::NEG_Y).unwrap();
        assert!((approach.along_axis - 1.0).abs() < 1e-5);
        assert!((approach.distance - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_parallel_ray_has_no_approach() {
        assert!(closest_to_axis(Vec3::ZERO, Vec3::Y, Vec3::new(1.0, 0.0, 0.0), Vec3::Y).is_none());
    }
}
