//! Oriented frames and bounding boxes.
//!
//! A [`Frame`] is an origin plus a right-handed orthonormal triad: the
//! Z axis is the tool approach normal, the X axis the tangent that
//! distinguishes the symmetric candidates of one punch location. Frames
//! double as local coordinate systems, so they support composing a local
//! frame into a parent system and projecting a global frame back into a
//! local one.

use nalgebra::{Matrix3, Point3, Rotation3, Unit, UnitVector3, Vector3};

/// Minimum squared length accepted when normalizing a direction.
const DEGENERATE_EPS: f64 = 1e-12;

/// An origin plus a right-handed orthonormal axis triad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Location of the frame in its parent coordinate system.
    pub origin: Point3<f64>,
    /// Tangent axis; carries the rotational symmetry of a punch pattern.
    pub x_axis: UnitVector3<f64>,
    /// Completes the right-handed triad.
    pub y_axis: UnitVector3<f64>,
    /// Normal (tool approach) axis.
    pub z_axis: UnitVector3<f64>,
}

impl Frame {
    /// World frame at the origin.
    pub fn identity() -> Self {
        Self::from_origin(Point3::origin())
    }

    /// Frame with world-aligned axes at `origin`.
    pub fn from_origin(origin: Point3<f64>) -> Self {
        Self {
            origin,
            x_axis: Vector3::x_axis(),
            y_axis: Vector3::y_axis(),
            z_axis: Vector3::z_axis(),
        }
    }

    /// Builds a frame from a normal and an approximate tangent,
    /// re-orthogonalizing the tangent against the normal.
    ///
    /// Returns `None` when either input is degenerate or the two are
    /// parallel, which callers treat as a geometric skip.
    pub fn try_new(
        origin: Point3<f64>,
        normal: Vector3<f64>,
        tangent: Vector3<f64>,
    ) -> Option<Self> {
        if normal.norm_squared() < DEGENERATE_EPS || tangent.norm_squared() < DEGENERATE_EPS {
            return None;
        }
        let z_axis = Unit::new_normalize(normal);
        let y = z_axis.cross(&tangent);
        if y.norm_squared() < DEGENERATE_EPS {
            return None;
        }
        let y_axis = Unit::new_normalize(y);
        let x_axis = Unit::new_normalize(y_axis.cross(&z_axis));
        Some(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Rotation mapping frame-local coordinates to parent coordinates.
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[
            self.x_axis.into_inner(),
            self.y_axis.into_inner(),
            self.z_axis.into_inner(),
        ]))
    }

    /// Maps a point from frame-local to parent coordinates.
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.origin + self.rotation() * point.coords
    }

    /// Maps a direction from frame-local to parent coordinates.
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation() * vector
    }

    /// Composes `local`, expressed in this frame, into the parent system.
    pub fn transform_frame(&self, local: &Frame) -> Frame {
        let rot = self.rotation();
        Frame {
            origin: self.transform_point(&local.origin),
            x_axis: Unit::new_unchecked(rot * local.x_axis.into_inner()),
            y_axis: Unit::new_unchecked(rot * local.y_axis.into_inner()),
            z_axis: Unit::new_unchecked(rot * local.z_axis.into_inner()),
        }
    }

    /// Projects a frame expressed in the parent system into this frame.
    /// Inverse of [`Frame::transform_frame`].
    pub fn local_frame(&self, global: &Frame) -> Frame {
        let inv = self.rotation().inverse();
        Frame {
            origin: Point3::from(inv * (global.origin - self.origin)),
            x_axis: Unit::new_unchecked(inv * global.x_axis.into_inner()),
            y_axis: Unit::new_unchecked(inv * global.y_axis.into_inner()),
            z_axis: Unit::new_unchecked(inv * global.z_axis.into_inner()),
        }
    }

    /// Same frame with its tangent and binormal rotated by `angle`
    /// radians about the normal axis.
    pub fn rotated_about_normal(&self, angle: f64) -> Frame {
        let rot = Rotation3::from_axis_angle(&self.z_axis, angle);
        Frame {
            origin: self.origin,
            x_axis: Unit::new_unchecked(rot * self.x_axis.into_inner()),
            y_axis: Unit::new_unchecked(rot * self.y_axis.into_inner()),
            z_axis: self.z_axis,
        }
    }

    /// Copy of the frame with its origin Z replaced, used for the safe
    /// and feed-switch planes above a punch point.
    pub fn with_origin_z(&self, z: f64) -> Frame {
        let mut frame = *self;
        frame.origin.z = z;
        frame
    }
}

/// Unsigned angle between two directions, in radians.
///
/// Numerically stable for near-parallel and near-opposite inputs.
pub fn vec_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box enclosing `points`; `None` when the slice is empty.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some(Self { min, max })
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}
