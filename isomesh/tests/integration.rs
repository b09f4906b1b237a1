//! Integration tests for end-to-end session scenarios.

use std::fs;
use std::path::PathBuf;

use isomesh::{ColorMode, IsomeshError, IsosurfaceSession, SessionState};

/// Write a temporary volume file and return its path.
fn write_volume(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("isomesh_{}_{}.txt", std::process::id(), name));
    fs::write(&path, contents).expect("temp volume should be writable");
    path
}

#[test]
fn split_slab_volume_end_to_end() {
    // A 2³ volume with the bottom sample layer at 0 and the top at 1:
    // the 0.5 surface is one quad at mid height.
    let path = write_volume("slab", "2\n0 0 0 0\n1 1 1 1\n");

    let mut session = IsosurfaceSession::new();
    session.set_isovalue(0.5);

    let triangles = session.load_volume(&path).unwrap();
    assert_eq!(triangles, 2);
    assert_eq!(session.state(), SessionState::MeshReady);

    let mesh = session.reconstruct().unwrap().expect("surface expected");
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.color_mode(), ColorMode::PerFace);

    // One vertex per crossed vertical edge, all on the mid plane
    let cell = session.field().unwrap().cell_size();
    for vertex in mesh.vertices() {
        assert!((vertex.x - 0.5 * cell).abs() < 1e-6);
    }

    let _ = fs::remove_file(path);
}

#[test]
fn constant_volume_yields_empty_surface() {
    let path = write_volume("flat", "2\n0 0 0 0 0 0 0 0\n");

    let mut session = IsosurfaceSession::new();
    session.set_isovalue(0.5);

    let triangles = session.load_volume(&path).unwrap();
    assert_eq!(triangles, 0);
    assert_eq!(session.state(), SessionState::FieldLoaded);
    assert!(session.reconstruct().unwrap().is_none());

    let _ = fs::remove_file(path);
}

#[test]
fn truncated_volume_is_rejected() {
    // Declares 3³ = 27 samples but provides 20
    let mut contents = String::from("3\n");
    for v in 0..20 {
        contents.push_str(&format!("{} ", v));
    }
    let path = write_volume("truncated", &contents);

    let mut session = IsosurfaceSession::new();
    let result = session.load_volume(&path);

    assert!(matches!(
        result,
        Err(IsomeshError::TruncatedVolume {
            expected: 27,
            got: 20
        })
    ));
    assert_eq!(session.state(), SessionState::Unloaded);
    assert!(session.field().is_none());

    let _ = fs::remove_file(path);
}

#[test]
fn failed_reload_keeps_previous_field() {
    let good = write_volume("good", "2\n0 0 0 0 1 1 1 1\n");
    let bad = write_volume("bad", "3\n1 2 3\n");

    let mut session = IsosurfaceSession::new();
    session.set_isovalue(0.5);
    session.load_volume(&good).unwrap();

    let result = session.load_volume(&bad);
    assert!(matches!(result, Err(IsomeshError::TruncatedVolume { .. })));

    // The earlier field is still installed and reconstructable
    assert!(session.field().is_some());
    let mesh = session.reconstruct().unwrap().expect("surface expected");
    assert_eq!(mesh.face_count(), 2);

    let _ = fs::remove_file(good);
    let _ = fs::remove_file(bad);
}

#[test]
fn missing_file_reports_io_error() {
    let mut session = IsosurfaceSession::new();
    let result = session.load_volume("/nonexistent/isomesh/volume.txt");

    assert!(matches!(result, Err(IsomeshError::Io(_))));
    assert_eq!(session.state(), SessionState::Unloaded);
}

#[test]
fn isovalue_sweep_over_gradient_volume() {
    // A 4³ ramp along the first axis; every mid-range threshold cuts a
    // plane through it.
    let mut contents = String::from("4\n");
    for i in 0..4 {
        for _ in 0..16 {
            contents.push_str(&format!("{} ", i));
        }
    }
    let path = write_volume("ramp", &contents);

    let mut session = IsosurfaceSession::new();
    session.set_isovalue(1.5);
    let triangles = session.load_volume(&path).unwrap();
    assert!(triangles > 0);

    // Relative isovalue: halfway through the [0, 3] range
    session.set_relative_isovalue(0.5).unwrap();
    assert_eq!(session.state(), SessionState::FieldLoaded);
    assert!((session.isovalue() - 1.5).abs() < 1e-6);

    let mesh = session.reconstruct().unwrap().expect("surface expected");
    let stats = mesh.stats();
    assert_eq!(stats.face_count, mesh.face_count());
    assert!(stats.surface_area > 0.0);

    // Thresholds outside the sampled range produce nothing
    session.set_isovalue(5.0);
    assert!(session.reconstruct().unwrap().is_none());

    let _ = fs::remove_file(path);
}
