//! Punch-pattern descriptor.
//!
//! A pattern describes how many symmetric punch orientations a matched
//! curve produces and at what angles. It is loaded once per planning
//! run from the `"Punching"` property subtree and is immutable
//! afterwards.

use std::f64::consts::PI;

use punchkit_core::{Error, PropertyTree, Result};
use serde::{Deserialize, Serialize};

/// Symmetry template of a punch pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// Rotationally symmetric; position and approach direction only.
    Round,
    /// Four orientations at 90 degree spacing.
    Rectangle,
    /// `ray_count` orientations at uniform spacing.
    Star,
    /// Explicit, possibly non-uniform orientation angles.
    Custom,
}

/// Immutable punch-pattern configuration for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchPattern {
    pub kind: PatternKind,
    /// Number of candidate orientations per location; 0 for Round.
    pub symmetry_count: usize,
    /// Rotation applied to the recognized base tangent, radians.
    pub start_angle_offset: f64,
    /// Absolute orientation angles from the base tangent, radians.
    /// Length equals `symmetry_count`; empty for Round.
    pub symmetry_angles: Vec<f64>,
}

impl PunchPattern {
    /// Round pattern: a single position-plus-direction punch point.
    pub fn round() -> Self {
        Self {
            kind: PatternKind::Round,
            symmetry_count: 0,
            start_angle_offset: 0.0,
            symmetry_angles: Vec::new(),
        }
    }

    /// Rectangle pattern: four orientations 90 degrees apart.
    pub fn rectangle(start_angle_offset: f64) -> Self {
        Self {
            kind: PatternKind::Rectangle,
            symmetry_count: 4,
            start_angle_offset,
            symmetry_angles: uniform_angles(4),
        }
    }

    /// Star pattern with `ray_count` uniformly spaced orientations.
    pub fn star(ray_count: usize, start_angle_offset: f64) -> Self {
        Self {
            kind: PatternKind::Star,
            symmetry_count: ray_count,
            start_angle_offset,
            symmetry_angles: uniform_angles(ray_count),
        }
    }

    /// Custom pattern from explicit orientation angles in radians.
    pub fn custom(symmetry_angles: Vec<f64>, start_angle_offset: f64) -> Self {
        Self {
            kind: PatternKind::Custom,
            symmetry_count: symmetry_angles.len(),
            start_angle_offset,
            symmetry_angles,
        }
    }

    /// True when the pattern constrains position and approach direction
    /// only, leaving the rotation about the normal free.
    pub fn is_5d(&self) -> bool {
        self.symmetry_count == 0
    }

    /// Loads a pattern from its property subtree.
    ///
    /// Keys: `Pattern` (0 Round, 1 Rectangle, 2 Star, 3 Custom),
    /// `RayCount` for Star, `SymmetryAngles` (`;`-separated degrees,
    /// unparsable entries read as 0) for Custom, and `StartAngleOffset`
    /// in degrees.
    pub fn from_props(props: &PropertyTree) -> Result<Self> {
        let start_angle_offset = props.flt("StartAngleOffset")?.to_radians();
        match props.int("Pattern")? {
            0 => Ok(Self::round()),
            1 => Ok(Self::rectangle(start_angle_offset)),
            2 => {
                let ray_count = props.int("RayCount")?;
                if ray_count < 1 {
                    return Err(Error::config("RayCount", "must be at least 1"));
                }
                Ok(Self::star(ray_count as usize, start_angle_offset))
            }
            3 => {
                let angles = props
                    .string("SymmetryAngles")?
                    .split(';')
                    .map(|s| s.trim().parse::<f64>().unwrap_or(0.0).to_radians())
                    .collect();
                Ok(Self::custom(angles, start_angle_offset))
            }
            other => Err(Error::config(
                "Pattern",
                format!("unknown pattern type {other}"),
            )),
        }
    }
}

fn uniform_angles(count: usize) -> Vec<f64> {
    let spacing = 2.0 * PI / count as f64;
    (0..count).map(|i| i as f64 * spacing).collect()
}
