//! Reconstruction session: the control surface and its lifecycle state.
//!
//! A session owns the loaded field and the current isovalue, and runs the
//! linear pipeline: load a volume, (re)set the isovalue, reconstruct. There
//! is no partial or incremental reconstruction; every run scans the whole
//! field and produces a fresh mesh.

use std::path::Path;

use isomesh_core::CaseTable;

use crate::error::{IsomeshError, Result};
use crate::field::ScalarField;
use crate::mesh::SurfaceMesh;

/// Observable lifecycle of a reconstruction session.
///
/// Reconstruction itself is synchronous and runs to completion inside
/// [`IsosurfaceSession::reconstruct`], so the in-flight state is never
/// observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No volume has been loaded.
    Unloaded,
    /// A field is installed; no mesh exists for the current isovalue.
    FieldLoaded,
    /// The most recent reconstruction at the current isovalue produced a
    /// surface.
    MeshReady,
}

/// Owns a scalar field and isovalue, and reconstructs surfaces on demand.
pub struct IsosurfaceSession {
    field: Option<ScalarField>,
    isovalue: f32,
    case_table: CaseTable,
    state: SessionState,
}

impl IsosurfaceSession {
    /// Create an empty session with isovalue `0.0` and the classic tables.
    pub fn new() -> Self {
        Self::with_case_table(CaseTable::classic())
    }

    /// Create an empty session with an injected case table.
    pub fn with_case_table(case_table: CaseTable) -> Self {
        Self {
            field: None,
            isovalue: 0.0,
            case_table,
            state: SessionState::Unloaded,
        }
    }

    /// The current isovalue.
    #[inline]
    pub fn isovalue(&self) -> f32 {
        self.isovalue
    }

    /// The current lifecycle state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The installed field, if any.
    #[inline]
    pub fn field(&self) -> Option<&ScalarField> {
        self.field.as_ref()
    }

    /// Set the isovalue, invalidating any previously extracted mesh.
    ///
    /// A session in `MeshReady` drops back to `FieldLoaded`; the engine must
    /// be re-run, meshes are never incrementally patched.
    pub fn set_isovalue(&mut self, isovalue: f32) {
        self.isovalue = isovalue;
        if self.state == SessionState::MeshReady {
            self.state = SessionState::FieldLoaded;
        }
    }

    /// Set the isovalue as a `[0, 1]` fraction of the field's value range.
    ///
    /// # Errors
    /// [`IsomeshError::NoVolumeLoaded`] when no field is installed to take
    /// a range from.
    pub fn set_relative_isovalue(&mut self, fraction: f32) -> Result<()> {
        let field = self.field.as_ref().ok_or(IsomeshError::NoVolumeLoaded)?;
        let isovalue = field.isovalue_at(fraction);
        self.set_isovalue(isovalue);
        Ok(())
    }

    /// Load a volume from a file, replacing any installed field, and run
    /// one reconstruction at the current isovalue.
    ///
    /// Returns the number of surface triangles produced (0 when the surface
    /// is empty). On failure the session keeps its previous field, if any.
    pub fn load_volume<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let field = ScalarField::load(path)?;
        self.field = Some(field);
        self.state = SessionState::FieldLoaded;

        let mesh = self.reconstruct()?;
        Ok(mesh.map_or(0, |m| m.face_count()))
    }

    /// Reconstruct the surface at the current isovalue.
    ///
    /// Produces a fresh mesh value each run; re-running with an unchanged
    /// field and isovalue yields an identical mesh. Returns `Ok(None)` when
    /// the scan completes with zero faces, leaving the session in
    /// `FieldLoaded`.
    ///
    /// # Errors
    /// [`IsomeshError::NoVolumeLoaded`] when no field is installed.
    pub fn reconstruct(&mut self) -> Result<Option<SurfaceMesh>> {
        let field = self.field.as_ref().ok_or(IsomeshError::NoVolumeLoaded)?;
        let mesh = field.extract_surface_with(self.isovalue, &self.case_table);

        match &mesh {
            Some(mesh) => {
                log::info!(
                    "reconstructed {} faces / {} vertices at isovalue {}",
                    mesh.face_count(),
                    mesh.vertex_count(),
                    self.isovalue
                );
                self.state = SessionState::MeshReady;
            }
            None => {
                log::info!("no surface at isovalue {}", self.isovalue);
                self.state = SessionState::FieldLoaded;
            }
        }

        Ok(mesh)
    }
}

impl Default for IsosurfaceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install_ramp_field(session: &mut IsosurfaceSession, dim: usize) {
        let mut samples = Vec::with_capacity(dim * dim * dim);
        for i in 0..dim {
            for _ in 0..dim * dim {
                samples.push(i as f32);
            }
        }
        session.field = Some(ScalarField::from_samples(dim, samples).unwrap());
        session.state = SessionState::FieldLoaded;
    }

    #[test]
    fn test_new_session_is_unloaded() {
        let session = IsosurfaceSession::new();
        assert_eq!(session.state(), SessionState::Unloaded);
        assert_eq!(session.isovalue(), 0.0);
        assert!(session.field().is_none());
    }

    #[test]
    fn test_reconstruct_without_volume_fails() {
        let mut session = IsosurfaceSession::new();
        assert!(matches!(
            session.reconstruct(),
            Err(IsomeshError::NoVolumeLoaded)
        ));
        assert_eq!(session.state(), SessionState::Unloaded);
    }

    #[test]
    fn test_reconstruct_produces_surface_and_state() {
        let mut session = IsosurfaceSession::new();
        install_ramp_field(&mut session, 2);
        session.set_isovalue(0.5);

        let mesh = session.reconstruct().unwrap().expect("surface expected");
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(session.state(), SessionState::MeshReady);
    }

    #[test]
    fn test_empty_surface_leaves_field_loaded() {
        let mut session = IsosurfaceSession::new();
        install_ramp_field(&mut session, 2);
        session.set_isovalue(-1.0);

        let mesh = session.reconstruct().unwrap();
        assert!(mesh.is_none());
        assert_eq!(session.state(), SessionState::FieldLoaded);
    }

    #[test]
    fn test_set_isovalue_invalidates_mesh_state() {
        let mut session = IsosurfaceSession::new();
        install_ramp_field(&mut session, 2);
        session.set_isovalue(0.5);
        session.reconstruct().unwrap();
        assert_eq!(session.state(), SessionState::MeshReady);

        session.set_isovalue(0.25);
        assert_eq!(session.state(), SessionState::FieldLoaded);
    }

    #[test]
    fn test_reconstruct_is_idempotent() {
        let mut session = IsosurfaceSession::new();
        install_ramp_field(&mut session, 3);
        session.set_isovalue(0.5);

        let first = session.reconstruct().unwrap().unwrap();
        let second = session.reconstruct().unwrap().unwrap();

        assert_eq!(first.vertex_count(), second.vertex_count());
        assert_eq!(first.face_count(), second.face_count());
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_relative_isovalue() {
        let mut session = IsosurfaceSession::new();

        // Needs a field for the range
        assert!(matches!(
            session.set_relative_isovalue(0.5),
            Err(IsomeshError::NoVolumeLoaded)
        ));

        install_ramp_field(&mut session, 2);
        session.set_relative_isovalue(0.5).unwrap();
        assert!((session.isovalue() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_load_volume_missing_file_installs_nothing() {
        let mut session = IsosurfaceSession::new();
        let result = session.load_volume("/nonexistent/volume.txt");

        assert!(matches!(result, Err(IsomeshError::Io(_))));
        assert_eq!(session.state(), SessionState::Unloaded);
        assert!(session.field().is_none());
    }
}
