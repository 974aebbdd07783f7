use slotmap::SlotMap;

use crate::error::{LibraryError, Result};
use crate::geometry::interpolator::{BezierInterpolator, Interpolator};
use crate::math::Vector3;

slotmap::new_key_type! {
    /// Unique identifier for a base shape in the cross-section library.
    pub struct ShapeId;
}

/// Radius of the default library shape.
pub const DEFAULT_SHAPE_RADIUS: f64 = 0.1;

/// Arena of base cross-section shapes.
///
/// Cross-sections refer to shapes by [`ShapeId`] (a generational index)
/// rather than by reference, so the library can grow without invalidating
/// them. Shapes are never removed; the library is append-only.
#[derive(Debug, Default, Clone)]
pub struct ShapeLibrary {
    shapes: SlotMap<ShapeId, Interpolator<Vector3>>,
    order: Vec<ShapeId>,
}

impl ShapeLibrary {
    /// Creates a new, empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library holding only [`default_shape`].
    ///
    /// # Errors
    ///
    /// Returns an error if the default shape cannot be constructed.
    pub fn with_default_shape() -> Result<(Self, ShapeId)> {
        let mut library = Self::new();
        let id = library.add(default_shape()?);
        Ok((library, id))
    }

    /// Inserts a base shape and returns its ID.
    pub fn add(&mut self, shape: Interpolator<Vector3>) -> ShapeId {
        let id = self.shapes.insert(shape);
        self.order.push(id);
        id
    }

    /// Returns the shape, or an error if the ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not in the library.
    pub fn shape(&self, id: ShapeId) -> std::result::Result<&Interpolator<Vector3>, LibraryError> {
        self.shapes.get(id).ok_or(LibraryError::ShapeNotFound)
    }

    /// Returns `true` if `id` refers to a shape in this library.
    #[must_use]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Shape IDs in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ShapeId] {
        &self.order
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the library holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Closed Bezier approximation of a circle of radius
/// [`DEFAULT_SHAPE_RADIUS`] in the local xy plane, counter-clockwise.
///
/// # Errors
///
/// Returns an error if the interpolator cannot be constructed.
pub fn default_shape() -> Result<Interpolator<Vector3>> {
    let r = DEFAULT_SHAPE_RADIUS;
    let h = r * 0.5;
    let points = vec![
        Vector3::new(r, 0.0, 0.0),
        Vector3::new(0.0, r, 0.0),
        Vector3::new(-r, 0.0, 0.0),
        Vector3::new(0.0, -r, 0.0),
    ];
    let handles = [
        Vector3::new(0.0, h, 0.0),
        Vector3::new(-h, 0.0, 0.0),
        Vector3::new(0.0, -h, 0.0),
        Vector3::new(h, 0.0, 0.0),
    ];
    let tangents = handles.iter().map(|&t| (t, t)).collect();
    Ok(Interpolator::Bezier(BezierInterpolator::with_tangents(
        points, tangents, true,
    )?))
}
