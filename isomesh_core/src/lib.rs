//! # isomesh_core
//!
//! Pure algorithms for isosurface extraction from dense scalar grids.
//!
//! This crate holds the math underneath the `isomesh` runtime: geometric
//! types, the fixed marching-cubes lookup tables, cube classification, and
//! edge interpolation. It performs no I/O and no allocation, which keeps it
//! usable from embedded environments.
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support (used only by tests)
//!
//! ## Modules
//!
//! - [`types`]: Core data types (`Point3`, `GridCoord`)
//! - [`marching_cubes`]: Case tables, classification, and edge interpolation
//!
//! ## Usage
//!
//! ```ignore
//! use isomesh_core::{cube_configuration, CaseTable};
//!
//! let table = CaseTable::classic();
//! let config = cube_configuration(&corner_values, isovalue);
//! for [e0, e1, e2] in table.triangles_for(config) {
//!     // resolve the three edge crossings into a triangle
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod marching_cubes;
pub mod types;

pub use marching_cubes::{
    crossing_parameter, cube_configuration, interpolate_vertex, CaseTable, CaseTriangles,
};
pub use types::{GridCoord, Point3};
