//! Uniform-grid tessellation of parametric surfaces into non-indexed triangle streams.

use cornu_core::{Result, Validate};
use cornu_geometry::{NormalEstimator, ParameterDomain, Surface};
use cornu_math::{Point3, Vector3};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::SurfaceMesh;

/// Vertex order of the two triangles of a cell with corners
/// `a = (u, v)`, `b = (u+du, v)`, `c = (u, v+dv)`, `d = (u+du, v+dv)`.
///
/// Triangle A is `{a, b, c}`, triangle B is `{b, d, c}`; both share the
/// `b`–`c` diagonal.
const CELL_ORDER: [usize; 6] = [0, 1, 2, 1, 3, 2];

/// Counters describing one tessellation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TessellationStats {
    /// Cells emitted as two triangles.
    pub cells: usize,
    /// Corner normals replaced by a neighboring valid normal.
    pub recovered_normals: usize,
    /// Cells dropped because no valid normal was available.
    pub skipped_cells: usize,
}

impl TessellationStats {
    fn absorb(&mut self, other: TessellationStats) {
        self.cells += other.cells;
        self.recovered_normals += other.recovered_normals;
        self.skipped_cells += other.skipped_cells;
    }
}

/// Walks a [`ParameterDomain`] and emits two triangles per grid cell.
///
/// Corner points and normals are evaluated independently for every cell, so
/// corners shared by adjacent cells come out bit-identical.
#[derive(Debug, Clone, Copy)]
pub struct GridTessellator {
    pub domain: ParameterDomain,
    pub estimator: NormalEstimator,
}

struct Corner {
    point: Point3,
    normal: Option<Vector3>,
}

impl GridTessellator {
    pub fn new(domain: ParameterDomain, estimator: NormalEstimator) -> Self {
        Self { domain, estimator }
    }

    /// Tessellate `surface` over the configured domain.
    ///
    /// Rows of cells along `u` are built in parallel and concatenated in
    /// order, so the stream matches a sequential `u`-outer, `v`-inner walk.
    pub fn tessellate(&self, surface: &dyn Surface) -> Result<(SurfaceMesh, TessellationStats)> {
        self.domain.validate()?;

        let cells_u = self.domain.cells_u();
        let cells_v = self.domain.cells_v();

        let rows: Vec<(SurfaceMesh, TessellationStats)> = (0..cells_u)
            .into_par_iter()
            .map(|i| self.tessellate_row(surface, i, cells_v))
            .collect();

        let mut mesh = SurfaceMesh::with_capacity(self.domain.vertex_count().unwrap_or(0));
        let mut stats = TessellationStats::default();
        for (mut row, row_stats) in rows {
            mesh.append(&mut row);
            stats.absorb(row_stats);
        }

        debug!(
            cells_u,
            cells_v,
            vertices = mesh.vertex_count(),
            "tessellated surface"
        );
        if stats.recovered_normals > 0 || stats.skipped_cells > 0 {
            warn!(
                recovered = stats.recovered_normals,
                skipped = stats.skipped_cells,
                "degenerate normals during tessellation"
            );
        }

        Ok((mesh, stats))
    }

    fn sample(&self, surface: &dyn Surface, u: f64, v: f64) -> Corner {
        let point = surface.point_at(u, v);
        let normal = self.estimator.normal_at(surface, u, v, point).ok();
        Corner { point, normal }
    }

    fn tessellate_row(
        &self,
        surface: &dyn Surface,
        i: usize,
        cells_v: usize,
    ) -> (SurfaceMesh, TessellationStats) {
        let u0 = self.domain.u_at(i);
        let u1 = self.domain.u_at(i + 1);

        let mut row = SurfaceMesh::with_capacity(cells_v * 6);
        let mut stats = TessellationStats::default();
        let mut last_valid: Option<Vector3> = None;

        for j in 0..cells_v {
            let v0 = self.domain.v_at(j);
            let v1 = self.domain.v_at(j + 1);

            let corners = [
                self.sample(surface, u0, v0),
                self.sample(surface, u1, v0),
                self.sample(surface, u0, v1),
                self.sample(surface, u1, v1),
            ];

            // Local recovery: another corner of this cell, then the row's last good normal.
            let Some(fallback) = corners.iter().find_map(|c| c.normal).or(last_valid) else {
                debug!(u = u0, v = v0, "skipping cell without a valid normal");
                stats.skipped_cells += 1;
                continue;
            };

            let mut normals = [fallback; 4];
            for (slot, corner) in normals.iter_mut().zip(&corners) {
                match corner.normal {
                    Some(n) => *slot = n,
                    None => stats.recovered_normals += 1,
                }
            }
            if let Some(n) = corners.iter().rev().find_map(|c| c.normal) {
                last_valid = Some(n);
            }

            for &k in &CELL_ORDER {
                row.push(corners[k].point, normals[k]);
            }
            stats.cells += 1;
        }

        (row, stats)
    }
}

impl Default for GridTessellator {
    fn default() -> Self {
        Self::new(ParameterDomain::default(), NormalEstimator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornu_geometry::{CornucopiaSurface, SphericalSurface};
    use cornu_math::DVec3;

    #[test]
    fn test_vertex_count_law() {
        let surface = CornucopiaSurface::default();
        let tess = GridTessellator::default();
        let (mesh, stats) = tess.tessellate(&surface).unwrap();

        assert_eq!(mesh.vertex_count(), 6 * 51 * 51);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(stats.cells, 51 * 51);
        assert_eq!(stats.recovered_normals, 0);
        assert_eq!(stats.skipped_cells, 0);
    }

    #[test]
    fn test_cell_layout() {
        let surface = CornucopiaSurface::default();
        let domain = ParameterDomain::from_ranges((0.0, 1.0), (0.0, 1.0), 1, 1);
        let tess = GridTessellator::new(domain, NormalEstimator::default());
        let (mesh, _) = tess.tessellate(&surface).unwrap();

        let a = surface.point_at(0.0, 0.0);
        let b = surface.point_at(1.0, 0.0);
        let c = surface.point_at(0.0, 1.0);
        let d = surface.point_at(1.0, 1.0);
        assert_eq!(&mesh.positions[0..6], &[a, b, c, b, d, c]);
    }

    #[test]
    fn test_invalid_domain_is_rejected() {
        let surface = CornucopiaSurface::default();
        let mut domain = ParameterDomain::default();
        domain.v_step = -1.0;
        let tess = GridTessellator::new(domain, NormalEstimator::default());
        assert!(tess.tessellate(&surface).is_err());
    }

    #[test]
    fn test_collapsed_surface_skips_every_cell() {
        let point = SphericalSurface::new(DVec3::ZERO, 0.0);
        let (mesh, stats) = GridTessellator::new(
            ParameterDomain::for_surface(&point, 4, 4),
            NormalEstimator::default(),
        )
        .tessellate(&point)
        .unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(stats.skipped_cells, 5 * 5);
    }

    #[test]
    fn test_unbounded_domain_errors_before_walking() {
        let surface = CornucopiaSurface::default();
        let mut domain = ParameterDomain::from_ranges((0.0, 1.0), (0.0, 1.0), 4, 4);
        domain.u_step = 1e-300;
        let err = GridTessellator::new(domain, NormalEstimator::default())
            .tessellate(&surface)
            .unwrap_err();
        assert!(matches!(err, cornu_core::CornuError::InvalidDomain(_)));
    }

    #[test]
    fn test_pole_normals_recovered_from_cell_neighbors() {
        let sphere = SphericalSurface::new(DVec3::ZERO, 2.0);
        let domain = ParameterDomain::for_surface(&sphere, 16, 8);
        let estimator = NormalEstimator::default();
        let (mesh, stats) = GridTessellator::new(domain, estimator)
            .tessellate(&sphere)
            .unwrap();

        assert_eq!(mesh.vertex_count(), 6 * 17 * 9);
        assert_eq!(stats.skipped_cells, 0);
        assert!(stats.recovered_normals > 0);

        // Slot of each corner a, b, c, d within a cell's six vertices.
        let slots = [0, 1, 2, 4];
        let mut substituted = 0;
        for i in 0..domain.cells_u() {
            for j in 0..domain.cells_v() {
                let base = (i * domain.cells_v() + j) * 6;
                let params = [
                    (domain.u_at(i), domain.v_at(j)),
                    (domain.u_at(i + 1), domain.v_at(j)),
                    (domain.u_at(i), domain.v_at(j + 1)),
                    (domain.u_at(i + 1), domain.v_at(j + 1)),
                ];
                let exact: Vec<Option<DVec3>> = params
                    .iter()
                    .map(|&(u, v)| estimator.normal_at(&sphere, u, v, sphere.point_at(u, v)).ok())
                    .collect();
                let valid: Vec<DVec3> = exact.iter().flatten().copied().collect();

                for (k, normal) in exact.iter().enumerate() {
                    let emitted = mesh.normals[base + slots[k]];
                    match normal {
                        Some(n) => assert_eq!(emitted, *n),
                        None => {
                            substituted += 1;
                            assert!(
                                valid.contains(&emitted),
                                "cell ({i}, {j}) corner {k} got {emitted:?}, not a corner normal"
                            );
                        }
                    }
                }
            }
        }
        assert_eq!(substituted, stats.recovered_normals);

        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-3, "Normal not unit length: {}", n.length());
        }
    }
}
