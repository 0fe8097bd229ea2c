pub mod aabb;
pub mod transform;

pub use glam::{DMat4, DVec3, DVec4, Mat4};
pub use aabb::Aabb3;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;

/// Narrow a double-precision vector to the `[f32; 3]` layout shaders consume.
pub fn to_f32_array(v: Vector3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}
