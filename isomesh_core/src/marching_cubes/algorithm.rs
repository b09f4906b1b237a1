//! Per-cube classification and edge interpolation.
//!
//! Answers the three questions the voxel scan asks about a single cube:
//! which configuration its corners form, which triangles that configuration
//! produces, and where on a crossed edge the surface vertex lies.

use crate::types::Point3;

use super::tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

/// Denominators smaller than this are treated as a flat (degenerate) edge.
const DEGENERATE_EPSILON: f32 = 1e-10;

/// Compute the cube configuration index from corner sample values.
///
/// Bit `n` is set when corner `n` is inside the surface, where inside means
/// `value < isovalue`. This is the direction the triangle windings of
/// [`TRI_TABLE`] are built for.
#[inline]
pub fn cube_configuration(corner_values: &[f32; 8], isovalue: f32) -> u8 {
    let mut config = 0u8;
    for (n, &value) in corner_values.iter().enumerate() {
        if value < isovalue {
            config |= 1 << n;
        }
    }
    config
}

/// Interpolation parameter of the surface crossing along an edge.
///
/// Returns the `t` for which `lerp(v0, v1, t) == isovalue`, or `None` when
/// the edge is flat at the isovalue and the parameter is undefined
/// (vanishing denominator).
#[inline]
pub fn crossing_parameter(v0: f32, v1: f32, isovalue: f32) -> Option<f32> {
    let denom = v1 - v0;
    if libm::fabsf(denom) < DEGENERATE_EPSILON {
        return None;
    }
    Some((isovalue - v0) / denom)
}

/// Interpolate the surface vertex position along an edge.
///
/// The parameter is clamped to `[0, 1]` to keep float noise from pushing a
/// vertex off its edge. A degenerate edge falls back to the midpoint rather
/// than producing a NaN position; callers that need to observe that
/// condition should check [`crossing_parameter`] first.
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, isovalue: f32) -> Point3 {
    match crossing_parameter(v0, v1, isovalue) {
        Some(t) => p0.lerp(p1, t.clamp(0.0, 1.0)),
        None => p0.lerp(p1, 0.5),
    }
}

/// The fixed lookup tables consulted during a reconstruction run.
///
/// A read-only collaborator injected into the voxel scan: it maps a corner
/// configuration to its triangulation and exposes the cube's corner and edge
/// layout. The tables themselves are static data; this type only hands out
/// views of them.
#[derive(Debug, Clone, Copy)]
pub struct CaseTable {
    edge_table: &'static [u16; 256],
    tri_table: &'static [[i8; 16]; 256],
    edge_vertices: &'static [(usize, usize); 12],
    corner_offsets: &'static [(usize, usize, usize); 8],
}

impl CaseTable {
    /// The standard 256-entry tables.
    pub const fn classic() -> Self {
        Self {
            edge_table: &EDGE_TABLE,
            tri_table: &TRI_TABLE,
            edge_vertices: &EDGE_VERTICES,
            corner_offsets: &CORNER_OFFSETS,
        }
    }

    /// Bitmask of the edges the surface crosses for a configuration.
    /// Zero exactly when the configuration produces no triangles.
    #[inline]
    pub fn crossing_edges(&self, config: u8) -> u16 {
        self.edge_table[config as usize]
    }

    /// Iterate the triangles of a configuration as triples of edge indices.
    #[inline]
    pub fn triangles_for(&self, config: u8) -> CaseTriangles {
        CaseTriangles {
            row: &self.tri_table[config as usize],
            cursor: 0,
        }
    }

    /// The corner index pair forming an edge.
    #[inline]
    pub fn edge_endpoints(&self, edge: usize) -> (usize, usize) {
        self.edge_vertices[edge]
    }

    /// Offset of a corner from the cube's minimum grid corner.
    #[inline]
    pub fn corner_offset(&self, corner: usize) -> (usize, usize, usize) {
        self.corner_offsets[corner]
    }
}

impl Default for CaseTable {
    fn default() -> Self {
        Self::classic()
    }
}

/// Iterator over the triangles of one configuration.
///
/// Yields triples of edge indices in table order; at most five per
/// configuration.
#[derive(Debug, Clone)]
pub struct CaseTriangles {
    row: &'static [i8; 16],
    cursor: usize,
}

impl Iterator for CaseTriangles {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<[usize; 3]> {
        if self.cursor + 2 >= self.row.len() || self.row[self.cursor] < 0 {
            return None;
        }
        let triangle = [
            self.row[self.cursor] as usize,
            self.row[self.cursor + 1] as usize,
            self.row[self.cursor + 2] as usize,
        ];
        self.cursor += 3;
        Some(triangle)
    }
}
