//! Cornucopia surface.

use std::f64::consts::TAU;

use cornu_core::{CornuError, Result, Validate};
use cornu_math::{DVec3, Point3};
use serde::{Deserialize, Serialize};

use super::Surface;

/// Exponential growth rates of the sweep.
///
/// `p` drives the tube radius, `m` the distance of the tube from the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    pub p: f64,
    pub m: f64,
}

impl ShapeParams {
    pub const DEFAULT_P: f64 = 0.15;
    pub const DEFAULT_M: f64 = 0.1;

    pub fn new(p: f64, m: f64) -> Self {
        Self { p, m }
    }
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_P, Self::DEFAULT_M)
    }
}

impl Validate for ShapeParams {
    fn validate(&self) -> Result<()> {
        if !self.p.is_finite() || !self.m.is_finite() {
            return Err(CornuError::InvalidConfig(format!(
                "shape parameters must be finite (p={}, m={})",
                self.p, self.m
            )));
        }
        Ok(())
    }
}

/// A cornucopia: a tube whose radius and offset grow exponentially while it
/// winds around the z axis.
///
/// ```text
/// x = (e^(m·u) + e^(p·u)·cos v) · cos u / 20
/// y = (e^(m·u) + e^(p·u)·cos v) · sin u / 20
/// z =  e^(p·u)·sin v / 20
/// ```
///
/// `u` spans `turns` full turns, `v` one full turn around the tube.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CornucopiaSurface {
    pub shape: ShapeParams,
    pub turns: f64,
}

impl CornucopiaSurface {
    /// Fixed normalization keeping the reference shape near the unit viewing volume.
    pub const SCALE_DIVISOR: f64 = 20.0;
    pub const DEFAULT_TURNS: f64 = 5.0;

    pub fn new(shape: ShapeParams) -> Self {
        Self {
            shape,
            turns: Self::DEFAULT_TURNS,
        }
    }

    pub fn with_turns(mut self, turns: f64) -> Self {
        self.turns = turns;
        self
    }

    /// Center of the tube cross-section at `u`.
    pub fn centerline_at(&self, u: f64) -> Point3 {
        let r = (self.shape.m * u).exp();
        DVec3::new(r * u.cos(), r * u.sin(), 0.0) / Self::SCALE_DIVISOR
    }
}

impl Default for CornucopiaSurface {
    fn default() -> Self {
        Self::new(ShapeParams::default())
    }
}

impl Surface for CornucopiaSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let tube = (self.shape.p * u).exp() / Self::SCALE_DIVISOR;
        let offset = DVec3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin());
        self.centerline_at(u) + tube * offset
    }

    fn domain_u(&self) -> (f64, f64) {
        (0.0, self.turns * TAU)
    }

    fn domain_v(&self) -> (f64, f64) {
        (0.0, TAU)
    }
}
