//! Boundary curve samples.
//!
//! The recognizer only needs the narrow interface the host curve objects
//! expose: an ordered list of knot points and an axis-aligned bounding
//! box with an emptiness flag. `Curve` is that interface as plain data.

use nalgebra::Point3;

use crate::geom::Aabb;

/// Sampled closed boundary curve in operation-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<Point3<f64>>,
    bbox: Option<Aabb>,
}

impl Curve {
    /// Builds a curve from its knot points; the bounding box is derived.
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        let bbox = Aabb::from_points(&points);
        Self { points, bbox }
    }

    /// Ordered knot points.
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of knot points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the curve carries no geometry (degenerate bounding box).
    pub fn is_empty(&self) -> bool {
        self.bbox.is_none()
    }

    /// Bounding box, `None` for an empty curve.
    pub fn bounding_box(&self) -> Option<&Aabb> {
        self.bbox.as_ref()
    }
}
