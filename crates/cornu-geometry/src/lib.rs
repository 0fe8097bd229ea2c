//! Cornu geometry: parametric surfaces, finite differences, and normal estimation.
//!
//! Everything here is pure math with no rendering dependency.

pub mod derivative;
pub mod domain;
pub mod normal;
pub mod surface;

pub use derivative::{DifferenceUnit, Differentiator};
pub use domain::ParameterDomain;
pub use normal::NormalEstimator;
pub use surface::{CornucopiaSurface, ShapeParams, SphericalSurface, Surface};
