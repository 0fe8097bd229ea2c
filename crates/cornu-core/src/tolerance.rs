/// Thresholds used when estimating surface normals.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Minimum tangent length before normalization (in model units per radian)
    pub linear: f64,
    /// Minimum sine of the angle between the two unit tangents
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-12;
    pub const DEFAULT_ANGULAR: f64 = 1e-9;

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            angular: Self::DEFAULT_ANGULAR,
        }
    }

    /// Check if a length is too small to normalize
    pub fn is_degenerate_length(self, len: f64) -> bool {
        !len.is_finite() || len < self.linear
    }

    /// Check if the sine of an angle is too small to define a plane
    pub fn is_degenerate_angle(self, sin: f64) -> bool {
        !sin.is_finite() || sin < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_length() {
        let tol = Tolerance::default();
        assert!(tol.is_degenerate_length(0.0));
        assert!(tol.is_degenerate_length(f64::NAN));
        assert!(tol.is_degenerate_length(f64::INFINITY));
        assert!(!tol.is_degenerate_length(1e-3));
    }

    #[test]
    fn test_degenerate_angle() {
        let tol = Tolerance::default();
        assert!(tol.is_degenerate_angle(1e-10));
        assert!(tol.is_degenerate_angle(f64::NAN));
        assert!(!tol.is_degenerate_angle(1e-6));
    }
}
