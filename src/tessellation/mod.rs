mod tessellate_cap;
mod tessellate_cylinder;

pub use tessellate_cap::{CapSide, TessellateCap};
pub use tessellate_cylinder::TessellateCylinder;

use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// Parameters controlling how a generalised cylinder is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingParams {
    /// Requested number of segments along the path (`n`). Breakpoint rings
    /// may raise the final count.
    pub path_segments: usize,
    /// Number of segments around the cross-section (`m`).
    pub section_segments: usize,
    /// Close both ends of every cylinder with a triangulated cap.
    pub capped: bool,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            path_segments: 16,
            section_segments: 12,
            capped: false,
        }
    }
}

impl SamplingParams {
    /// Sets the number of segments along the path.
    #[must_use]
    pub fn with_path_segments(mut self, n: usize) -> Self {
        self.path_segments = n;
        self
    }

    /// Sets the number of segments around the cross-section.
    #[must_use]
    pub fn with_section_segments(mut self, m: usize) -> Self {
        self.section_segments = m;
        self
    }

    /// Enables or disables end caps.
    #[must_use]
    pub fn with_caps(mut self, capped: bool) -> Self {
        self.capped = capped;
        self
    }
}

/// Receives the vertices and triangles emitted by the tessellators.
///
/// The tessellators never own or finalize the mesh; any structure that can
/// append indexed vertices and triangles can collect their output.
pub trait MeshBuilder {
    /// Appends a vertex and returns its index.
    fn add_vertex(&mut self, position: Point3, normal: Vector3, uv: Point2) -> u32;

    /// Appends a triangle referring to previously added vertices.
    fn add_triangle(&mut self, indices: [u32; 3]);
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends `other`, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    /// Recomputes vertex normals from the triangles.
    ///
    /// Each vertex normal is the area-weighted sum of its incident face
    /// normals. Vertices without usable faces keep their previous normal.
    pub fn sync_normals(&mut self) {
        let mut accum = vec![Vector3::zeros(); self.vertices.len()];
        for &[a, b, c] in &self.indices {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let (Some(pa), Some(pb), Some(pc)) =
                (self.vertices.get(a), self.vertices.get(b), self.vertices.get(c))
            else {
                continue;
            };
            let face = (pb - pa).cross(&(pc - pa));
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        self.normals.resize(self.vertices.len(), Vector3::zeros());
        for (normal, sum) in self.normals.iter_mut().zip(accum) {
            let len = sum.norm();
            if len > TOLERANCE {
                *normal = sum / len;
            }
        }
    }
}

impl MeshBuilder for TriangleMesh {
    #[allow(clippy::cast_possible_truncation)]
    fn add_vertex(&mut self, position: Point3, normal: Vector3, uv: Point2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    fn add_triangle(&mut self, indices: [u32; 3]) {
        self.indices.push(indices);
    }
}
