use crate::{DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Affine model transform stored column-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Rotation of `angle` radians about `axis`.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        Self::from_mat4(DMat4::from_axis_angle(axis.normalize(), angle))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    pub fn inverse(&self) -> Option<Transform> {
        let m = self.to_mat4();
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }

    /// Matrix that carries normals into world space.
    ///
    /// Falls back to identity for singular transforms.
    pub fn inverse_transpose(&self) -> Transform {
        self.inverse()
            .map(|inv| Self::from_mat4(inv.to_mat4().transpose()))
            .unwrap_or_else(Self::identity)
    }

    /// Column-major `f32` layout for uniform upload.
    pub fn to_cols_array_f32(&self) -> [f32; 16] {
        self.to_mat4().as_mat4().to_cols_array()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
