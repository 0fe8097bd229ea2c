use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for &p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    /// Radius of the sphere centered at the origin that encloses the box.
    pub fn origin_radius(&self) -> f64 {
        // Farthest corner: per-axis maximum magnitude.
        Vector3::new(
            self.min.x.abs().max(self.max.x.abs()),
            self.min.y.abs().max(self.max.y.abs()),
            self.min.z.abs().max(self.max.z.abs()),
        )
        .length()
    }
}
