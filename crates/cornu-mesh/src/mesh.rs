use cornu_math::{Aabb3, Point3, Vector3};
use serde::Serialize;

/// Non-indexed triangle stream: every three consecutive vertices form one
/// triangle, and `normals[i]` belongs to `positions[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SurfaceMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
}

impl SurfaceMesh {
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
        }
    }

    /// Append one vertex with its normal.
    pub fn push(&mut self, position: Point3, normal: Vector3) {
        self.positions.push(position);
        self.normals.push(normal);
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Append another stream after this one.
    pub fn append(&mut self, other: &mut SurfaceMesh) {
        self.positions.append(&mut other.positions);
        self.normals.append(&mut other.normals);
    }

    /// Geometric normal `(b - a) × (c - a)` of triangle `index`, unnormalized.
    pub fn face_normal(&self, index: usize) -> Vector3 {
        let a = self.positions[index * 3];
        let b = self.positions[index * 3 + 1];
        let c = self.positions[index * 3 + 2];
        (b - a).cross(c - a)
    }

    /// Triangles whose shading normals lean along the geometric normal.
    ///
    /// Front faces are the clockwise ones, so a consistent mesh has every
    /// shading normal opposite to `(b - a) × (c - a)` and this returns zero.
    pub fn winding_mismatches(&self) -> usize {
        (0..self.triangle_count())
            .filter(|&t| {
                let face = self.face_normal(t);
                self.normals[t * 3..t * 3 + 3].iter().any(|n| face.dot(*n) > 0.0)
            })
            .count()
    }

    /// Positions flattened to `x, y, z` triples for buffer upload.
    pub fn flat_positions(&self) -> Vec<f32> {
        flatten(&self.positions)
    }

    /// Normals flattened to `x, y, z` triples for buffer upload.
    pub fn flat_normals(&self) -> Vec<f32> {
        flatten(&self.normals)
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

/// Polyline drawn as a line strip; two points for the indicator segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineMesh {
    pub points: Vec<Point3>,
}

impl LineMesh {
    pub fn segment(from: Point3, to: Point3) -> Self {
        Self {
            points: vec![from, to],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn flat_positions(&self) -> Vec<f32> {
        flatten(&self.points)
    }
}

fn flatten(vectors: &[Vector3]) -> Vec<f32> {
    vectors
        .iter()
        .flat_map(|v| cornu_math::to_f32_array(*v))
        .collect()
}
