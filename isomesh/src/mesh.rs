//! Triangle mesh output types.
//!
//! The reconstruction hands its result to an external renderer as an
//! indexed triangle mesh: insertion-ordered vertex positions, face index
//! triples, one flat color for all faces, and per-face plus per-vertex
//! normals finalized after the full scan.

use isomesh_core::Point3;

/// The flat color assigned to every reconstructed face.
pub const DEFAULT_FACE_COLOR: [f32; 3] = [0.0, 0.0, 1.0];

/// How a mesh's colors are meant to be applied by the consuming renderer.
///
/// Reconstruction always produces [`ColorMode::PerFace`]; the other
/// variants describe meshes arriving from elsewhere in a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// No color information.
    None,
    /// One color per vertex.
    PerVertex,
    /// One color per face.
    PerFace,
}

/// An indexed triangle mesh produced by surface reconstruction.
///
/// Immutable once built: re-running a reconstruction produces a fresh mesh
/// value rather than mutating one already handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    vertices: Vec<Point3>,
    faces: Vec<[u32; 3]>,
    face_color: [f32; 3],
    face_normals: Vec<Point3>,
    vertex_normals: Vec<Point3>,
}

impl SurfaceMesh {
    /// Assemble a mesh from its vertices and faces, finalizing normals.
    ///
    /// Normal computation runs here exactly once, after all faces are known:
    /// face normals from the winding cross product, vertex normals by
    /// area-weighted accumulation of adjacent face cross products.
    pub(crate) fn from_parts(
        vertices: Vec<Point3>,
        faces: Vec<[u32; 3]>,
        face_color: [f32; 3],
    ) -> Self {
        let mut face_normals = Vec::with_capacity(faces.len());
        let mut vertex_normals = vec![Point3::splat(0.0); vertices.len()];

        for face in &faces {
            let a = vertices[face[0] as usize];
            let b = vertices[face[1] as usize];
            let c = vertices[face[2] as usize];

            // Cross product length is twice the face area, so accumulating
            // the raw cross weights vertex normals by area.
            let cross = (b - a).cross(c - a);
            for &index in face {
                vertex_normals[index as usize] = vertex_normals[index as usize] + cross;
            }
            face_normals.push(cross.normalize());
        }

        for normal in &mut vertex_normals {
            *normal = normal.normalize();
        }

        Self {
            vertices,
            faces,
            face_color,
            face_normals,
            vertex_normals,
        }
    }

    /// Number of unique vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangular faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Vertex positions in first-visit order.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Faces as vertex index triples.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// The flat color shared by all faces.
    #[inline]
    pub fn face_color(&self) -> [f32; 3] {
        self.face_color
    }

    /// How the renderer should apply this mesh's colors.
    #[inline]
    pub fn color_mode(&self) -> ColorMode {
        ColorMode::PerFace
    }

    /// Unit face normals, one per face.
    #[inline]
    pub fn face_normals(&self) -> &[Point3] {
        &self.face_normals
    }

    /// Unit vertex normals, one per vertex.
    #[inline]
    pub fn vertex_normals(&self) -> &[Point3] {
        &self.vertex_normals
    }

    /// Compute statistics over the mesh.
    pub fn stats(&self) -> MeshStats {
        let mut surface_area = 0.0;
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);

        for &vertex in &self.vertices {
            bbox_min = bbox_min.min(vertex);
            bbox_max = bbox_max.max(vertex);
        }

        for face in &self.faces {
            let a = self.vertices[face[0] as usize];
            let b = self.vertices[face[1] as usize];
            let c = self.vertices[face[2] as usize];
            surface_area += (b - a).cross(c - a).length() * 0.5;
        }

        MeshStats {
            vertex_count: self.vertices.len(),
            face_count: self.faces.len(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}

/// Mesh statistics.
#[derive(Debug, Clone, Copy)]
pub struct MeshStats {
    /// Number of unique vertices.
    pub vertex_count: usize,
    /// Number of triangular faces.
    pub face_count: usize,
    /// Sum of triangle areas.
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> SurfaceMesh {
        // Two triangles covering the unit square in the xy plane,
        // counter-clockwise seen from +z.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        SurfaceMesh::from_parts(vertices, faces, DEFAULT_FACE_COLOR)
    }

    #[test]
    fn test_counts_and_accessors() {
        let mesh = unit_quad();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.face_color(), DEFAULT_FACE_COLOR);
        assert_eq!(mesh.color_mode(), ColorMode::PerFace);
        assert_eq!(mesh.face_normals().len(), 2);
        assert_eq!(mesh.vertex_normals().len(), 4);
    }

    #[test]
    fn test_face_normals_follow_winding() {
        let mesh = unit_quad();

        for normal in mesh.face_normals() {
            assert!((normal.z - 1.0).abs() < 1e-6, "normal {:?}", normal);
        }
    }

    #[test]
    fn test_vertex_normals_are_unit_length() {
        let mesh = unit_quad();

        for normal in mesh.vertex_normals() {
            assert!((normal.length() - 1.0).abs() < 1e-6);
            assert!((normal.z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_stats() {
        let mesh = unit_quad();
        let stats = mesh.stats();

        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.face_count, 2);
        assert!((stats.surface_area - 1.0).abs() < 1e-6);
        assert_eq!(stats.bbox_min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(stats.bbox_max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_degenerate_area_face_gets_zero_normal() {
        // Collinear vertices: the cross product vanishes and normalize
        // keeps it at zero instead of producing NaN.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_parts(vertices, vec![[0, 1, 2]], DEFAULT_FACE_COLOR);

        let normal = mesh.face_normals()[0];
        assert_eq!(normal, Point3::splat(0.0));
        assert!(normal.x.is_finite());
    }
}
