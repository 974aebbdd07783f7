use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::{debug, warn};

use crate::error::{Result, TessellationError};
use crate::geometry::carrier::Carrier;
use crate::geometry::cross_section::CrossSection;
use crate::geometry::generalised_cylinder::GeneralisedCylinder;
use crate::geometry::shape_library::ShapeLibrary;
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

use super::MeshBuilder;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Which end of the path a cap closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapSide {
    /// The first ring; the cap faces backwards along the path.
    Start,
    /// The last ring; the cap faces forwards along the path.
    End,
}

/// Closes one end of a generalised cylinder with a flat triangulated cap.
///
/// The end ring is triangulated in the carrier's local `(x, y)` plane with a
/// constrained Delaunay triangulation, so non-convex library shapes are
/// filled correctly.
pub struct TessellateCap<'a> {
    cylinder: &'a GeneralisedCylinder,
    side: CapSide,
    section_segments: usize,
}

impl<'a> TessellateCap<'a> {
    /// Creates a new `TessellateCap` operation.
    #[must_use]
    pub fn new(cylinder: &'a GeneralisedCylinder, side: CapSide, section_segments: usize) -> Self {
        Self {
            cylinder,
            side,
            section_segments,
        }
    }

    /// Emits the cap triangles into `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring has fewer than three samples, if a ring
    /// point cannot be inserted into the triangulation, or if the
    /// cross-section's library shape is missing.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute<B: MeshBuilder>(&self, shapes: &ShapeLibrary, builder: &mut B) -> Result<()> {
        let domain = self.cylinder.domain_v();
        let v = match self.side {
            CapSide::Start => domain.t_min,
            CapSide::End => domain.t_max,
        };
        let (w, _) = self.cylinder.section_parameter(v);
        let mut ring = self
            .cylinder
            .cross_section()
            .cross_section(shapes, w, self.section_segments)?;
        // Last sample duplicates the seam.
        ring.pop();

        let local: Vec<_> = ring.iter().map(|p| SpadePoint2::new(p.x, p.y)).collect();
        let mut cdt = Cdt::new();
        insert_constraint_loop(&mut cdt, &local)?;
        let interior = classify_interior_faces(&cdt);

        let carrier = self.cylinder.carrier();
        let forward = carrier
            .d_orient_dx(v, 0.0, 0.0)
            .cross(&carrier.d_orient_dy(v, 0.0, 0.0));
        let forward = if forward.norm() > TOLERANCE {
            forward.normalize()
        } else {
            Vector3::z()
        };
        let normal = match self.side {
            CapSide::Start => -forward,
            CapSide::End => forward,
        };

        let mut vertex_map: HashMap<usize, u32> = HashMap::new();
        let mut triangles = 0usize;
        for face in cdt.inner_faces() {
            if !interior.contains(&face.fix().index()) {
                continue;
            }
            let mut tri = [0u32; 3];
            for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
                let key = vh.fix().index();
                *slot = if let Some(&existing) = vertex_map.get(&key) {
                    existing
                } else {
                    let pos = vh.position();
                    let world = carrier.orient(v, pos.x, pos.y);
                    let uv = Point2::new(pos.x, pos.y);
                    let idx = builder.add_vertex(Point3::from(world), normal, uv);
                    vertex_map.insert(key, idx);
                    idx
                };
            }
            // Spade yields counter-clockwise faces, which face forward once oriented.
            match self.side {
                CapSide::Start => builder.add_triangle([tri[0], tri[2], tri[1]]),
                CapSide::End => builder.add_triangle(tri),
            }
            triangles += 1;
        }

        debug!(side = ?self.side, triangles, "cap tessellated");
        Ok(())
    }
}

fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(TessellationError::Failed("cap ring needs at least 3 points".into()).into());
    }

    let handles = points
        .iter()
        .map(|&pt| {
            cdt.insert(pt)
                .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (i, &from) in handles.iter().enumerate() {
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        } else {
            warn!(edge = i, "cap ring self-intersects; edge left unconstrained");
        }
    }

    Ok(())
}

/// Marks the faces enclosed by the constraint loop.
///
/// Faces are flooded outward-in from the convex hull; crossing a constraint
/// edge flips parity, and odd-parity faces are inside.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut parity: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if parity.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            parity.insert(idx, depth);
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((fix, depth)) = queue.pop_front() {
        for edge in cdt.face(fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if parity.contains_key(&idx) {
                continue;
            }
            let next = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            parity.insert(idx, next);
            queue.push_back((neighbor.fix(), next));
        }
    }

    parity
        .into_iter()
        .filter(|&(_, depth)| depth % 2 == 1)
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::carrier::{CarrierCurve, CarrierMode};
    use crate::geometry::cross_section::{
        CircularCrossSection, CrossSectionCurve, ScaleInterpCrossSec,
    };
    use crate::geometry::generalised_cylinder::DomainBreakpoint;
    use crate::geometry::interpolator::Interpolator;
    use crate::math::frame::forward_step;
    use crate::math::Vector2;
    use crate::tessellation::TriangleMesh;
    use approx::assert_relative_eq;

    fn tube() -> GeneralisedCylinder {
        let frames = vec![forward_step(0.0), forward_step(2.0)];
        let carrier = CarrierCurve::new(CarrierMode::Linear, &frames).unwrap();
        let cs = CrossSectionCurve::Circular(CircularCrossSection::new(0.5).unwrap());
        GeneralisedCylinder::new(carrier, cs, frames, Vec::new()).unwrap()
    }

    fn face_normal(mesh: &TriangleMesh, tri: [u32; 3]) -> Vector3 {
        let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);
        (b - a).cross(&(c - a))
    }

    #[test]
    fn end_cap_faces_forward() {
        let cyl = tube();
        let mut mesh = TriangleMesh::new();
        TessellateCap::new(&cyl, CapSide::End, 12)
            .execute(&ShapeLibrary::new(), &mut mesh)
            .unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 10);
        for &tri in &mesh.indices {
            assert!(face_normal(&mesh, tri).z > 0.0);
        }
        for (p, n) in mesh.vertices.iter().zip(&mesh.normals) {
            assert_relative_eq!(p.z, 2.0, epsilon = 1e-12);
            assert_relative_eq!(*n, Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn start_cap_faces_backward() {
        let cyl = tube();
        let mut mesh = TriangleMesh::new();
        TessellateCap::new(&cyl, CapSide::Start, 8)
            .execute(&ShapeLibrary::new(), &mut mesh)
            .unwrap();
        assert_eq!(mesh.triangle_count(), 6);
        for &tri in &mesh.indices {
            assert!(face_normal(&mesh, tri).z < 0.0);
        }
        assert!(mesh.vertices.iter().all(|p| p.z.abs() < 1e-12));
    }

    #[test]
    fn non_convex_shape_is_filled_inside_only() {
        // An L-shaped outline, counter-clockwise.
        let outline = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(2.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
        ];
        let mut shapes = ShapeLibrary::new();
        let id = shapes.add(Interpolator::linear(outline.to_vec(), true).unwrap());
        let frames = vec![forward_step(0.0), forward_step(1.0)];
        let carrier = CarrierCurve::new(CarrierMode::Linear, &frames).unwrap();
        let cs = ScaleInterpCrossSec::new(id, Interpolator::linear(vec![1.0, 1.0], false).unwrap());
        let domains = vec![DomainBreakpoint::new(0, 0), DomainBreakpoint::new(1, 1)];
        let cross_section = CrossSectionCurve::Scaled(cs);
        let cyl = GeneralisedCylinder::new(carrier, cross_section, frames, domains).unwrap();

        let mut mesh = TriangleMesh::new();
        TessellateCap::new(&cyl, CapSide::End, 6)
            .execute(&shapes, &mut mesh)
            .unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        let area: f64 = mesh
            .indices
            .iter()
            .map(|&tri| face_normal(&mesh, tri).norm() / 2.0)
            .sum();
        assert_relative_eq!(area, 3.0, epsilon = 1e-9);
        for &tri in &mesh.indices {
            let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);
            let centroid = Vector2::new(a.x + b.x + c.x, a.y + b.y + c.y) / 3.0;
            assert!(!(centroid.x > 1.0 && centroid.y > 1.0));
        }
    }

    #[test]
    fn too_few_points_is_an_error() {
        let cyl = tube();
        let mut mesh = TriangleMesh::new();
        let r = TessellateCap::new(&cyl, CapSide::End, 2).execute(&ShapeLibrary::new(), &mut mesh);
        assert!(r.is_err());
    }
}
