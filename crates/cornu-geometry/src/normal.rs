//! Surface normals from numerically estimated tangents.

use cornu_core::{CornuError, Result, Tolerance};
use cornu_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::derivative::Differentiator;
use crate::surface::Surface;

/// Combines the u and v tangents into a unit normal.
///
/// The normal is `normalize(t_v × t_u)` with both tangents normalized first.
/// That order is paired with the tessellator's winding: the geometric normal
/// of every emitted triangle is `t_u × t_v`, so front faces are the clockwise
/// ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalEstimator {
    pub differentiator: Differentiator,
    pub tolerance: Tolerance,
}

impl NormalEstimator {
    pub fn new(differentiator: Differentiator, tolerance: Tolerance) -> Self {
        Self {
            differentiator,
            tolerance,
        }
    }

    /// Unit normal at `(u, v)` where `at` is the already evaluated surface point.
    ///
    /// Returns [`CornuError::DegenerateNormal`] when a tangent vanishes or
    /// the tangents are parallel.
    pub fn normal_at(&self, surface: &dyn Surface, u: f64, v: f64, at: Point3) -> Result<Vector3> {
        let (du, dv) = self.differentiator.tangents(surface, u, v, at);
        self.from_tangents(du, dv)
            .ok_or(CornuError::DegenerateNormal { u, v })
    }

    /// Unit normal from raw tangents, or `None` if they do not span a plane.
    pub fn from_tangents(&self, du: Vector3, dv: Vector3) -> Option<Vector3> {
        let t_u = self.unit(du)?;
        let t_v = self.unit(dv)?;
        let n = t_v.cross(t_u);
        let sin = n.length();
        if self.tolerance.is_degenerate_angle(sin) {
            return None;
        }
        Some(n / sin)
    }

    fn unit(&self, t: Vector3) -> Option<Vector3> {
        let len = t.length();
        if self.tolerance.is_degenerate_length(len) {
            None
        } else {
            Some(t / len)
        }
    }
}
