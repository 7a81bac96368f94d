//! # PunchKit Core
//!
//! Core types for punch-machining toolpath computation:
//! oriented frames and bounding boxes, the boundary-curve sample
//! interface, and the typed configuration property tree that operation
//! parameters arrive through.

pub mod curve;
pub mod error;
pub mod geom;
pub mod props;

pub use curve::Curve;
pub use error::{Error, Result};
pub use geom::{vec_angle, Aabb, Frame};
pub use props::PropertyTree;
