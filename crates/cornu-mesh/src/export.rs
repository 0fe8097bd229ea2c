//! JSON export of tessellated streams.

use std::io::Write;
use std::path::Path;

use cornu_core::Result;
use serde::Serialize;

use crate::{SurfaceMesh, TessellationStats};

/// Flat-array document written by [`write_json`].
#[derive(Debug, Serialize)]
pub struct MeshDocument {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub stats: TessellationStats,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl MeshDocument {
    pub fn new(mesh: &SurfaceMesh, stats: TessellationStats) -> Self {
        Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            stats,
            positions: mesh.flat_positions(),
            normals: mesh.flat_normals(),
        }
    }
}

/// Write the mesh as JSON to `path`.
pub fn write_json(mesh: &SurfaceMesh, stats: TessellationStats, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer(&mut writer, &MeshDocument::new(mesh, stats))?;
    writer.flush()?;
    Ok(())
}
