//! Uniform sampling grid over a surface's parameter domain.

use cornu_core::{CornuError, Result, Validate};
use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Relative slack used when deciding whether a range is a whole number of steps.
const STEP_SNAP: f64 = 1e-9;

/// Parameter ranges and step sizes walked by the tessellator.
///
/// The walk covers `[min, max]` plus one extra step past `max`, so the grid
/// has `ceil((max - min) / step) + 1` cells per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterDomain {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
    pub u_step: f64,
    pub v_step: f64,
}

impl ParameterDomain {
    /// Subdivisions per axis of the reference tessellation.
    pub const DEFAULT_SUBDIVISIONS: usize = 50;

    /// Upper bound on cells per axis, overshoot cell included.
    pub const MAX_CELLS_PER_AXIS: usize = 1024;

    /// Largest subdivision count whose grid stays within [`Self::MAX_CELLS_PER_AXIS`].
    pub const MAX_SUBDIVISIONS: usize = Self::MAX_CELLS_PER_AXIS - 1;

    /// Build a domain whose steps split each range into `u_divs` / `v_divs` parts.
    pub fn from_ranges(
        (u_min, u_max): (f64, f64),
        (v_min, v_max): (f64, f64),
        u_divs: usize,
        v_divs: usize,
    ) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
            u_step: (u_max - u_min) / u_divs as f64,
            v_step: (v_max - v_min) / v_divs as f64,
        }
    }

    /// The surface's own domain split into `u_divs` by `v_divs` steps.
    pub fn for_surface(surface: &dyn Surface, u_divs: usize, v_divs: usize) -> Self {
        Self::from_ranges(surface.domain_u(), surface.domain_v(), u_divs, v_divs)
    }

    /// Number of cells along u, including the overshoot cell.
    ///
    /// Saturates at `usize::MAX` for ranges that cannot be counted; such
    /// domains fail [`Validate`].
    pub fn cells_u(&self) -> usize {
        cell_count(self.u_min, self.u_max, self.u_step).unwrap_or(usize::MAX)
    }

    /// Number of cells along v, including the overshoot cell.
    pub fn cells_v(&self) -> usize {
        cell_count(self.v_min, self.v_max, self.v_step).unwrap_or(usize::MAX)
    }

    /// u parameter of grid line `i`.
    #[inline]
    pub fn u_at(&self, i: usize) -> f64 {
        self.u_min + i as f64 * self.u_step
    }

    /// v parameter of grid line `j`.
    #[inline]
    pub fn v_at(&self, j: usize) -> f64 {
        self.v_min + j as f64 * self.v_step
    }

    /// Vertices emitted for a full walk: two triangles per cell.
    ///
    /// `None` if the count does not fit in `usize`.
    pub fn vertex_count(&self) -> Option<usize> {
        self.cells_u().checked_mul(self.cells_v())?.checked_mul(6)
    }
}

fn cell_count(min: f64, max: f64, step: f64) -> Option<usize> {
    let ratio = (max - min) / step;
    if !ratio.is_finite() || ratio < 0.0 || ratio >= usize::MAX as f64 {
        return None;
    }
    let nearest = ratio.round();
    let steps = if (ratio - nearest).abs() <= STEP_SNAP * nearest.abs().max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    (steps as usize).checked_add(1)
}

impl Default for ParameterDomain {
    fn default() -> Self {
        Self::for_surface(
            &crate::surface::CornucopiaSurface::default(),
            Self::DEFAULT_SUBDIVISIONS,
            Self::DEFAULT_SUBDIVISIONS,
        )
    }
}

impl Validate for ParameterDomain {
    fn validate(&self) -> Result<()> {
        let values = [
            self.u_min,
            self.u_max,
            self.v_min,
            self.v_max,
            self.u_step,
            self.v_step,
        ];
        if values.iter().any(|x| !x.is_finite()) {
            return Err(CornuError::InvalidDomain(format!(
                "all bounds and steps must be finite: {self:?}"
            )));
        }
        if self.u_step <= 0.0 || self.v_step <= 0.0 {
            return Err(CornuError::InvalidDomain(format!(
                "steps must be positive (u_step={}, v_step={})",
                self.u_step, self.v_step
            )));
        }
        if self.u_max <= self.u_min || self.v_max <= self.v_min {
            return Err(CornuError::InvalidDomain(format!(
                "empty range u=[{}, {}] v=[{}, {}]",
                self.u_min, self.u_max, self.v_min, self.v_max
            )));
        }
        let (cells_u, cells_v) = (self.cells_u(), self.cells_v());
        if cells_u > Self::MAX_CELLS_PER_AXIS || cells_v > Self::MAX_CELLS_PER_AXIS {
            return Err(CornuError::InvalidDomain(format!(
                "grid of {cells_u} x {cells_v} cells exceeds {} per axis",
                Self::MAX_CELLS_PER_AXIS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_reference_domain() {
        let domain = ParameterDomain::default();
        assert_eq!(domain.u_min, 0.0);
        assert!((domain.u_max - 10.0 * PI).abs() < 1e-12);
        assert!((domain.v_max - TAU).abs() < 1e-12);
        assert!((domain.u_step - 10.0 * PI / 50.0).abs() < 1e-12);
        // 50 subdivisions plus the overshoot cell
        assert_eq!(domain.cells_u(), 51);
        assert_eq!(domain.cells_v(), 51);
        assert_eq!(domain.vertex_count(), Some(6 * 51 * 51));
        domain.validate().unwrap();
    }

    #[test]
    fn test_partial_last_step_rounds_up() {
        let domain = ParameterDomain {
            u_min: 0.0,
            u_max: 1.0,
            v_min: 0.0,
            v_max: 1.0,
            u_step: 0.3,
            v_step: 0.25,
        };
        // u: 0, 0.3, 0.6, 0.9, 1.2 (< 1.3)
        assert_eq!(domain.cells_u(), 5);
        // v: 0, 0.25, 0.5, 0.75, 1.0 (< 1.25)
        assert_eq!(domain.cells_v(), 5);
    }

    #[test]
    fn test_grid_lines_are_exact_multiples() {
        let domain = ParameterDomain::from_ranges((1.0, 2.0), (0.0, 1.0), 7, 3);
        assert_eq!(domain.u_at(0), 1.0);
        assert_eq!(domain.u_at(3), 1.0 + 3.0 * domain.u_step);
        assert_eq!(domain.v_at(2), 2.0 * domain.v_step);
    }

    #[test]
    fn test_invalid_domains() {
        let mut domain = ParameterDomain::from_ranges((0.0, 1.0), (0.0, 1.0), 4, 4);
        domain.u_step = 0.0;
        assert!(matches!(domain.validate(), Err(CornuError::InvalidDomain(_))));

        let reversed = ParameterDomain::from_ranges((1.0, 0.0), (0.0, 1.0), 4, 4);
        assert!(reversed.validate().is_err());

        let mut nan = ParameterDomain::from_ranges((0.0, 1.0), (0.0, 1.0), 4, 4);
        nan.v_max = f64::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_tiny_step_is_rejected_not_overflowed() {
        let domain = ParameterDomain {
            u_min: 0.0,
            u_max: 1.0,
            v_min: 0.0,
            v_max: 1.0,
            u_step: 1e-300,
            v_step: 0.25,
        };
        assert_eq!(domain.cells_u(), usize::MAX);
        assert_eq!(domain.vertex_count(), None);
        assert!(matches!(domain.validate(), Err(CornuError::InvalidDomain(_))));
    }

    #[test]
    fn test_cell_limit_per_axis() {
        let at_limit = ParameterDomain::from_ranges(
            (0.0, 1.0),
            (0.0, 1.0),
            ParameterDomain::MAX_SUBDIVISIONS,
            1,
        );
        assert_eq!(at_limit.cells_u(), ParameterDomain::MAX_CELLS_PER_AXIS);
        at_limit.validate().unwrap();

        let over = ParameterDomain::from_ranges(
            (0.0, 1.0),
            (0.0, 1.0),
            1,
            ParameterDomain::MAX_CELLS_PER_AXIS,
        );
        assert!(matches!(over.validate(), Err(CornuError::InvalidDomain(_))));
    }
}
