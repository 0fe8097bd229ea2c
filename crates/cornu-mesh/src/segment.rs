//! Two-point line meshes drawn alongside the surface.

use cornu_math::{Point3, Vector3};

use crate::LineMesh;

/// Fraction of the model radius covered by each half of the velocity path.
pub const PATH_EXTENT: f64 = 0.95;

/// Segment from `origin` to the current light position.
///
/// Rebuilt on every animation tick.
pub fn light_indicator(origin: Point3, light: Point3) -> LineMesh {
    LineMesh::segment(origin, light)
}

/// Segment through the origin along `direction`, spanning
/// `±PATH_EXTENT · model_radius`.
///
/// `direction` is normalized here; a zero direction collapses the segment
/// to the origin.
pub fn velocity_path(direction: Vector3, model_radius: f64) -> LineMesh {
    let half = direction.normalize_or_zero() * (model_radius * PATH_EXTENT);
    LineMesh::segment(-half, half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornu_math::DVec3;

    #[test]
    fn test_light_indicator_endpoints() {
        let light = DVec3::new(0.3, -1.2, 5.0);
        let line = light_indicator(DVec3::ZERO, light);
        assert_eq!(line.points, vec![DVec3::ZERO, light]);
    }

    #[test]
    fn test_velocity_path_is_symmetric() {
        let line = velocity_path(DVec3::new(1.0, 1.0, 0.0), 1.0);
        let [a, b] = [line.points[0], line.points[1]];
        assert_eq!(a, -b);
        assert!((b.length() - 0.95).abs() < 1e-12);
        assert!((b.x - b.y).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_path_zero_direction() {
        let line = velocity_path(DVec3::ZERO, 1.0);
        assert_eq!(line.points, vec![DVec3::ZERO, DVec3::ZERO]);
    }
}
