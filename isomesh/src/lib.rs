//! # isomesh
//!
//! Isosurface reconstruction from regular scalar volumes.
//!
//! This crate ingests a cubic grid of scalar samples and extracts a
//! triangulated surface approximating a chosen isovalue contour, producing
//! mesh geometry (positions, face indices, flat face color, normals) ready
//! for a downstream renderer. Rendering, interaction, and mesh-format I/O
//! are out of scope and expected to live in the consuming application.
//!
//! ## Quick Start
//!
//! ```ignore
//! use isomesh::IsosurfaceSession;
//!
//! let mut session = IsosurfaceSession::new();
//! session.set_isovalue(0.5);
//!
//! // Load a volume and reconstruct; returns the surface triangle count
//! let triangles = session.load_volume("volume.txt")?;
//! println!("reconstructed {} triangles", triangles);
//!
//! // Re-run at a different threshold
//! session.set_isovalue(0.75);
//! if let Some(mesh) = session.reconstruct()? {
//!     upload(mesh.vertices(), mesh.faces(), mesh.vertex_normals());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`ScalarField`]: the sampled volume in one flat buffer, with its text
//!   reader and cached value range
//! - [`MeshBuilder`] + [`EdgeKey`]: vertex deduplication across the cube
//!   scan via canonical edge keys
//! - [`SurfaceMesh`]: the immutable reconstruction result
//! - [`IsosurfaceSession`]: the control surface tying field, isovalue, and
//!   reconstruction together
//!
//! The per-cube math (case tables, classification, interpolation) lives in
//! the `isomesh_core` crate, re-exported here for convenience.
//!
//! ## Feature Flags
//!
//! - `parallel`: parallel cube scanning via rayon
//!   ([`ScalarField::extract_surface_parallel`])
//!
//! ## Volume Format
//!
//! Plain text: one leading integer `N`, then exactly `N³` whitespace
//! separated floats in nested order with the first coordinate varying
//! slowest. No other header, no versioning.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod extract;
mod field;
mod mesh;
mod session;

pub use error::{IsomeshError, Result};
pub use extract::{EdgeKey, MeshBuilder};
pub use field::ScalarField;
pub use mesh::{ColorMode, MeshStats, SurfaceMesh, DEFAULT_FACE_COLOR};
pub use session::{IsosurfaceSession, SessionState};

// Re-export the core types the public API surfaces
pub use isomesh_core::{CaseTable, GridCoord, Point3};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use isomesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{IsomeshError, Result};
    pub use crate::field::ScalarField;
    pub use crate::mesh::{ColorMode, SurfaceMesh};
    pub use crate::session::{IsosurfaceSession, SessionState};

    pub use isomesh_core::{CaseTable, Point3};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() {
        // A small sphere-ish field: distance from the volume center
        let dim = 8;
        let center = 0.5 * (dim as f32 - 1.0);
        let mut samples = Vec::with_capacity(dim * dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                for k in 0..dim {
                    let di = i as f32 - center;
                    let dj = j as f32 - center;
                    let dk = k as f32 - center;
                    samples.push((di * di + dj * dj + dk * dk).sqrt());
                }
            }
        }

        let field = ScalarField::from_samples(dim, samples).unwrap();
        let mesh = field.extract_surface(2.0).expect("surface expected");

        assert!(mesh.face_count() > 0);
        assert!(mesh.vertex_count() > 0);
        assert_eq!(mesh.face_normals().len(), mesh.face_count());
        assert_eq!(mesh.vertex_normals().len(), mesh.vertex_count());

        // Shared edges mean far fewer unique vertices than face corners
        assert!(mesh.vertex_count() < 3 * mesh.face_count());
    }
}
