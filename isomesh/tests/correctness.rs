//! Property-based tests over randomly generated fields.

use isomesh::ScalarField;
use proptest::prelude::*;

/// Strategy producing a valid field: a dimension in [2, 4] and `dim³`
/// samples in [-1, 1].
fn field_strategy() -> impl Strategy<Value = ScalarField> {
    (2usize..=4)
        .prop_flat_map(|dim| {
            prop::collection::vec(-1.0f32..1.0, dim * dim * dim).prop_map(move |samples| (dim, samples))
        })
        .prop_map(|(dim, samples)| ScalarField::from_samples(dim, samples).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Re-running extraction with unchanged inputs yields the same mesh
    #[test]
    fn extraction_is_idempotent(field in field_strategy(), isovalue in -1.0f32..1.0) {
        let first = field.extract_surface(isovalue);
        let second = field.extract_surface(isovalue);
        prop_assert_eq!(first, second);
    }

    /// Every face references three distinct, in-range vertices
    #[test]
    fn faces_are_well_formed(field in field_strategy(), isovalue in -1.0f32..1.0) {
        if let Some(mesh) = field.extract_surface(isovalue) {
            let vertex_count = mesh.vertex_count() as u32;
            for face in mesh.faces() {
                prop_assert!(face.iter().all(|&v| v < vertex_count));
                prop_assert_ne!(face[0], face[1]);
                prop_assert_ne!(face[1], face[2]);
                prop_assert_ne!(face[0], face[2]);
            }
        }
    }

    /// Every vertex lies on a grid edge: at least two coordinates coincide
    /// with grid lines, and all stay inside the sampled region
    #[test]
    fn vertices_lie_on_grid_edges(field in field_strategy(), isovalue in -1.0f32..1.0) {
        if let Some(mesh) = field.extract_surface(isovalue) {
            let cell = field.cell_size();
            let extent = (field.dim() - 1) as f32 * cell;

            for vertex in mesh.vertices() {
                let mut aligned = 0;
                for component in vertex.as_array() {
                    prop_assert!(component >= -1e-5 && component <= extent + 1e-5);
                    let steps = component / cell;
                    if (steps - steps.round()).abs() < 1e-4 {
                        aligned += 1;
                    }
                }
                prop_assert!(aligned >= 2, "vertex {:?} off-edge", vertex);
            }
        }
    }

    /// An isovalue outside the sampled range produces no surface
    #[test]
    fn out_of_range_isovalue_is_empty(field in field_strategy()) {
        let below = field.min_value() - 1.0;
        let above = field.max_value() + 1.0;

        prop_assert!(field.extract_surface(below).is_none());
        prop_assert!(field.extract_surface(above).is_none());
    }

    /// Normals come out unit length (or zero for degenerate-area faces)
    #[test]
    fn normals_are_normalized(field in field_strategy(), isovalue in -1.0f32..1.0) {
        if let Some(mesh) = field.extract_surface(isovalue) {
            for normal in mesh.face_normals().iter().chain(mesh.vertex_normals()) {
                let len = normal.length();
                prop_assert!(
                    len < 1e-6 || (len - 1.0).abs() < 1e-4,
                    "normal {:?} has length {}",
                    normal,
                    len
                );
            }
        }
    }
}
