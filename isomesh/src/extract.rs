//! Surface extraction: the voxel scan, edge-vertex dedup, and mesh assembly.
//!
//! The scan visits every elementary cube of the field, classifies its
//! corners against the isovalue, and triangulates the crossing cubes via
//! the case table. Vertices that lie on an edge shared between neighboring
//! cubes are created once and reused through [`EdgeKey`] lookup.

use std::collections::HashMap;

use isomesh_core::{
    crossing_parameter, cube_configuration, interpolate_vertex, CaseTable, GridCoord, Point3,
};

use crate::field::ScalarField;
use crate::mesh::{SurfaceMesh, DEFAULT_FACE_COLOR};

/// Canonical identifier for a cube edge in global grid coordinates.
///
/// The key is the pair of the edge endpoints' flattened grid indices,
/// ordered so that the same physical edge yields the same key no matter
/// which of its adjacent cubes it is reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(usize, usize);

impl EdgeKey {
    /// Build a canonical key from two flattened endpoint indices.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// Accumulates deduplicated vertices and faces for one reconstruction run.
///
/// Created fresh per run and consumed by [`MeshBuilder::finish`]; nothing
/// in it survives an isovalue change.
pub struct MeshBuilder {
    vertices: Vec<Point3>,
    faces: Vec<[u32; 3]>,
    edge_cache: HashMap<EdgeKey, u32>,
    degenerate_edges: usize,
    rejected_faces: usize,
}

impl MeshBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            edge_cache: HashMap::new(),
            degenerate_edges: 0,
            rejected_faces: 0,
        }
    }

    /// Resolve an edge to its surface vertex, interpolating on first visit.
    ///
    /// A cached key returns its existing vertex index without recomputation.
    /// A flat edge (undefined interpolation parameter) recovers with the
    /// midpoint and is counted and logged rather than propagating NaN into
    /// the geometry.
    pub fn resolve_edge(
        &mut self,
        key: EdgeKey,
        p0: Point3,
        p1: Point3,
        v0: f32,
        v1: f32,
        isovalue: f32,
    ) -> u32 {
        if let Some(&index) = self.edge_cache.get(&key) {
            return index;
        }

        if crossing_parameter(v0, v1, isovalue).is_none() {
            self.degenerate_edges += 1;
            log::warn!(
                "degenerate edge {:?}: flat at isovalue {}, falling back to midpoint",
                key,
                isovalue
            );
        }

        let position = interpolate_vertex(p0, p1, v0, v1, isovalue);
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.edge_cache.insert(key, index);
        index
    }

    /// Append a face, rejecting degenerate index triples.
    ///
    /// Returns whether the face was kept. A face that references the same
    /// vertex twice would have zero area and is dropped (and logged) instead
    /// of entering the mesh.
    pub fn add_face(&mut self, face: [u32; 3]) -> bool {
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            self.rejected_faces += 1;
            log::warn!("rejecting degenerate face {:?}", face);
            return false;
        }
        self.faces.push(face);
        true
    }

    /// Number of unique vertices created so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces kept so far.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of flat edges recovered with the midpoint fallback.
    #[inline]
    pub fn degenerate_edges(&self) -> usize {
        self.degenerate_edges
    }

    /// Number of degenerate faces rejected.
    #[inline]
    pub fn rejected_faces(&self) -> usize {
        self.rejected_faces
    }

    /// Finalize the mesh, computing normals exactly once.
    ///
    /// Returns `None` when no faces were produced (the empty-surface
    /// outcome).
    pub fn finish(self) -> Option<SurfaceMesh> {
        if self.faces.is_empty() {
            return None;
        }
        Some(SurfaceMesh::from_parts(
            self.vertices,
            self.faces,
            DEFAULT_FACE_COLOR,
        ))
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarField {
    /// Extract the isosurface mesh at the given isovalue.
    ///
    /// Returns `None` when the surface does not intersect the volume
    /// (every cube entirely inside or outside).
    pub fn extract_surface(&self, isovalue: f32) -> Option<SurfaceMesh> {
        self.extract_surface_with(isovalue, &CaseTable::classic())
    }

    /// Extract the isosurface using an injected case table.
    ///
    /// Scans every cube with minimum corner `(i, j, k)`,
    /// `0 <= i,j,k <= dim-2`, resolving each case triangle's edges through
    /// the shared vertex cache. Scan order affects vertex insertion order
    /// only, never the vertex set.
    pub fn extract_surface_with(&self, isovalue: f32, table: &CaseTable) -> Option<SurfaceMesh> {
        let cells = self.dim() - 1;
        let cell_size = self.cell_size();
        let mut builder = MeshBuilder::new();
        let mut corner_values = [0f32; 8];

        for i in 0..cells {
            for j in 0..cells {
                for k in 0..cells {
                    let cube = GridCoord::new(i, j, k);

                    for (n, value) in corner_values.iter_mut().enumerate() {
                        let c = cube.offset(table.corner_offset(n));
                        *value = self.sample(c.i, c.j, c.k);
                    }

                    let config = cube_configuration(&corner_values, isovalue);
                    if table.crossing_edges(config) == 0 {
                        continue;
                    }

                    for triangle in table.triangles_for(config) {
                        let mut face = [0u32; 3];
                        for (slot, &edge) in triangle.iter().enumerate() {
                            let (ca, cb) = table.edge_endpoints(edge);
                            let a = cube.offset(table.corner_offset(ca));
                            let b = cube.offset(table.corner_offset(cb));
                            let key =
                                EdgeKey::new(a.flat_index(self.dim()), b.flat_index(self.dim()));
                            face[slot] = builder.resolve_edge(
                                key,
                                a.position(cell_size),
                                b.position(cell_size),
                                corner_values[ca],
                                corner_values[cb],
                                isovalue,
                            );
                        }
                        builder.add_face(face);
                    }
                }
            }
        }

        builder.finish()
    }
}

/// An edge crossing recorded during the parallel scan phase, waiting for
/// the sequential dedup/insert pass.
#[cfg(feature = "parallel")]
struct PendingEdge {
    key: EdgeKey,
    p0: Point3,
    p1: Point3,
    v0: f32,
    v1: f32,
}

#[cfg(feature = "parallel")]
impl ScalarField {
    /// Extract the isosurface with cube scanning parallelized over threads.
    ///
    /// Two phases: a parallel pass classifies cubes and records each case
    /// triangle's edge crossings, then a single-threaded pass resolves them
    /// through the shared vertex cache. Cube order is preserved, so the
    /// result is identical to [`ScalarField::extract_surface`].
    pub fn extract_surface_parallel(&self, isovalue: f32) -> Option<SurfaceMesh> {
        use rayon::prelude::*;

        let table = CaseTable::classic();
        let dim = self.dim();
        let cells = dim - 1;
        let cell_size = self.cell_size();

        let pending: Vec<[PendingEdge; 3]> = (0..cells * cells * cells)
            .into_par_iter()
            .flat_map_iter(|cube_index| {
                let cube = GridCoord::new(
                    cube_index / (cells * cells),
                    cube_index / cells % cells,
                    cube_index % cells,
                );

                let mut corner_values = [0f32; 8];
                for (n, value) in corner_values.iter_mut().enumerate() {
                    let c = cube.offset(table.corner_offset(n));
                    *value = self.sample(c.i, c.j, c.k);
                }

                let config = cube_configuration(&corner_values, isovalue);
                let mut triangles = Vec::new();
                if table.crossing_edges(config) != 0 {
                    for triangle in table.triangles_for(config) {
                        let pending_triangle = triangle.map(|edge| {
                            let (ca, cb) = table.edge_endpoints(edge);
                            let a = cube.offset(table.corner_offset(ca));
                            let b = cube.offset(table.corner_offset(cb));
                            PendingEdge {
                                key: EdgeKey::new(a.flat_index(dim), b.flat_index(dim)),
                                p0: a.position(cell_size),
                                p1: b.position(cell_size),
                                v0: corner_values[ca],
                                v1: corner_values[cb],
                            }
                        });
                        triangles.push(pending_triangle);
                    }
                }
                triangles.into_iter()
            })
            .collect();

        let mut builder = MeshBuilder::new();
        for triangle in &pending {
            let mut face = [0u32; 3];
            for (slot, edge) in triangle.iter().enumerate() {
                face[slot] =
                    builder.resolve_edge(edge.key, edge.p0, edge.p1, edge.v0, edge.v1, isovalue);
            }
            builder.add_face(face);
        }

        builder.finish()
    }
}
