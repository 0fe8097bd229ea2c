//! Surface traits and implementations.

mod cornucopia;
mod spherical;

use cornu_math::Point3;

pub use cornucopia::{CornucopiaSurface, ShapeParams};
pub use spherical::SphericalSurface;

/// Trait for parametric surfaces in 3D space.
///
/// Implementations are evaluated, never wrapped: any finite `(u, v)` is
/// accepted, including values outside the nominal domain.
pub trait Surface: Send + Sync {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Return the u-parameter domain `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64);

    /// Return the v-parameter domain `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64);
}
