//! Forward-difference partial derivatives of a parametric surface.

use cornu_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Unit the step is divided by when forming the difference quotient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceUnit {
    /// Divide by the step itself. The surface takes radians, so this gives
    /// true derivatives.
    #[default]
    Radians,
    /// Divide by the step converted from degrees to radians. Scales every
    /// tangent by `180 / PI`; normalized tangents, and thus normals, are
    /// unchanged.
    LegacyDegrees,
}

/// Estimates `∂f/∂u` and `∂f/∂v` by forward differences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Differentiator {
    pub delta: f64,
    pub unit: DifferenceUnit,
}

impl Differentiator {
    pub const DEFAULT_DELTA: f64 = 1e-4;

    pub fn new(delta: f64, unit: DifferenceUnit) -> Self {
        Self { delta, unit }
    }

    fn denominator(&self) -> f64 {
        match self.unit {
            DifferenceUnit::Radians => self.delta,
            DifferenceUnit::LegacyDegrees => self.delta.to_radians(),
        }
    }

    /// `(F(u + δ, v) - F(u, v)) / δ`, reusing the already evaluated `at = F(u, v)`.
    pub fn d_du(&self, surface: &dyn Surface, u: f64, v: f64, at: Point3) -> Vector3 {
        (surface.point_at(u + self.delta, v) - at) / self.denominator()
    }

    /// `(F(u, v + δ) - F(u, v)) / δ`, reusing the already evaluated `at = F(u, v)`.
    pub fn d_dv(&self, surface: &dyn Surface, u: f64, v: f64, at: Point3) -> Vector3 {
        (surface.point_at(u, v + self.delta) - at) / self.denominator()
    }

    /// Both partials as `(d_du, d_dv)`.
    pub fn tangents(&self, surface: &dyn Surface, u: f64, v: f64, at: Point3) -> (Vector3, Vector3) {
        (self.d_du(surface, u, v, at), self.d_dv(surface, u, v, at))
    }
}

impl Default for Differentiator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELTA, DifferenceUnit::Radians)
    }
}
