//! Spherical surface.

use std::f64::consts::{FRAC_PI_2, TAU};

use cornu_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Surface;

/// A spherical surface parameterized by longitude `u` in `[0, 2*PI]` and
/// latitude `v` in `[-PI/2, PI/2]`.
///
/// Points are computed as:
/// `P(u, v) = center + radius * (cos(v)*cos(u), cos(v)*sin(u), sin(v))`
///
/// The closed-form normal makes it a reference for the numerical estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphericalSurface {
    pub center: Point3,
    pub radius: f64,
}

impl SphericalSurface {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Unit normal pointing away from the center.
    pub fn outward_normal_at(&self, u: f64, v: f64) -> Vector3 {
        DVec3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin())
    }
}

impl Surface for SphericalSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.center + self.radius * self.outward_normal_at(u, v)
    }

    fn domain_u(&self) -> (f64, f64) {
        (0.0, TAU)
    }

    fn domain_v(&self) -> (f64, f64) {
        (-FRAC_PI_2, FRAC_PI_2)
    }
}
