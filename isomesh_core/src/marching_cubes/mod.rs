//! Case-table driven polygonization of grid cubes.
//!
//! Provides the fixed marching-cubes lookup tables, corner classification
//! against an isovalue, and linear edge interpolation. The per-cube scan and
//! vertex deduplication live in the `isomesh` runtime crate; this module only
//! answers questions about a single cube.

mod algorithm;
mod tables;

pub use algorithm::{
    crossing_parameter, cube_configuration, interpolate_vertex, CaseTable, CaseTriangles,
};
pub use tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};
