//! Placement math for cylinders and the preview deformation

use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f64::consts::PI;

use super::Transform;

/// Rotation taking the cylinder's +Y axis onto the direction `start -> end`
pub fn orientation_between(start: &Point3<f64>, end: &Point3<f64>) -> UnitQuaternion<f64> {
    let up = Vector3::y();
    let Some(direction) = (end - start).try_normalize(f64::EPSILON) else {
        return UnitQuaternion::identity();
    };
    // rotation_between has no unique answer for opposite vectors
    UnitQuaternion::rotation_between(&up, &direction)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI))
}

pub fn midpoint(start: &Point3<f64>, end: &Point3<f64>) -> Point3<f64> {
    nalgebra::center(start, end)
}

pub fn quaternion_array(rotation: &UnitQuaternion<f64>) -> [f64; 4] {
    let coords = &rotation.quaternion().coords;
    [coords.x, coords.y, coords.z, coords.w]
}

pub fn quaternion_from_array(rotation: [f64; 4]) -> UnitQuaternion<f64> {
    let [x, y, z, w] = rotation;
    UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(w, x, y, z))
}

/// Transform and length of a cylinder spanning `start -> end`
pub fn span(start: &Point3<f64>, end: &Point3<f64>) -> (Transform, f64) {
    let centre = midpoint(start, end);
    let transform = Transform {
        position: [centre.x, centre.y, centre.z],
        rotation: quaternion_array(&orientation_between(start, end)),
        scale: 1.0,
    };
    (transform, nalgebra::distance(start, end))
}

/// End points of a cylinder with the given transform and length
pub fn span_endpoints(transform: &Transform, length: f64) -> (Point3<f64>, Point3<f64>) {
    let [x, y, z] = transform.position;
    let centre = Point3::new(x, y, z);
    let half = quaternion_from_array(transform.rotation) * Vector3::y() * (length / 2.0);
    (centre - half, centre + half)
}

/// Synthetic vertical offset of the preview animation
pub fn preview_offset(reference: &Point3<f64>, scale: f64) -> f64 {
    (reference.x * PI / 2.0).sin() * 0.5 * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orientation_maps_up_to_direction() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let end = Point3::new(3.0, 0.0, 4.0);
        let rotation = orientation_between(&start, &end);
        let mapped = rotation * Vector3::y();
        assert_relative_eq!(mapped, Vector3::new(0.6, 0.0, 0.8), epsilon = 1e-12);
    }

    #[test]
    fn test_orientation_handles_downward_direction() {
        let rotation = orientation_between(&Point3::new(0.0, 2.0, 0.0), &Point3::origin());
        assert_relative_eq!(rotation * Vector3::y(), -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_points_give_identity() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(orientation_between(&p, &p), UnitQuaternion::identity());
    }

    #[test]
    fn test_span_round_trips_endpoints() {
        let start = Point3::new(1.0, -1.0, 2.0);
        let end = Point3::new(-2.0, 3.0, 0.5);
        let (transform, length) = span(&start, &end);

        assert_relative_eq!(length, nalgebra::distance(&start, &end), epsilon = 1e-12);
        let (a, b) = span_endpoints(&transform, length);
        assert_relative_eq!(a, start, epsilon = 1e-9);
        assert_relative_eq!(b, end, epsilon = 1e-9);
    }

    #[test]
    fn test_preview_offset_follows_sine() {
        assert_relative_eq!(preview_offset(&Point3::new(1.0, 0.0, 0.0), 2.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(preview_offset(&Point3::new(0.0, 5.0, 0.0), 2.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(preview_offset(&Point3::new(1.0, 0.0, 0.0), 0.0), 0.0);
    }
}
