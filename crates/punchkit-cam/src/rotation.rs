//! Reachability-constrained rotation selection.
//!
//! A sequential search against the machine reachability evaluator.
//! Items are processed strictly in visiting order and the evaluator's
//! committed pose persists across items, so the result is a greedy,
//! order-dependent minimal-angular-travel sequence rather than a global
//! optimum. That trade-off is deliberate.
//!
//! Commit policy: for a multi-candidate item nothing is committed until
//! the winning sibling is known; candidates are compared against the
//! orientation the evaluator held before the item began. 5D items commit
//! their single candidate immediately.

use thiserror::Error;
use tracing::debug;

use nalgebra::{Point3, Vector3};
use punchkit_core::{vec_angle, Frame};

use crate::items::PunchItems;

/// Error status reported by the machine evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct MachineError(pub String);

/// Stateful machine reachability oracle.
///
/// `check_position` / `check_pose` compute a tentative machine
/// configuration and report whether it is attainable from the current
/// committed one; `commit` latches the last tentative configuration as
/// current. One instance serves exactly one planning run and is never
/// shared across concurrent resolutions.
pub trait MachineEvaluator {
    /// Prepares the evaluator for a planning run. An explicit error
    /// status here is fatal for the run.
    fn initialize(&mut self) -> std::result::Result<(), MachineError> {
        Ok(())
    }

    /// Position-plus-direction (5-axis) reachability check.
    fn check_position(&mut self, position: Point3<f64>, direction: Vector3<f64>) -> bool;

    /// Full-pose (6-DOF) reachability check.
    fn check_pose(&mut self, frame: &Frame) -> bool;

    /// Latches the last checked configuration as the current pose.
    fn commit(&mut self);

    /// Current committed pose in machine/global coordinates.
    fn absolute_pose(&self) -> Frame;
}

/// Chooses, per item in visiting order, the reachable candidate frame
/// closest in orientation to the machine's current pose. Returns the
/// number of items that resolved.
///
/// `operation_lcs` maps item-local frames into the machine/global
/// system the evaluator works in. The evaluator is exclusively owned
/// and mutated throughout.
pub fn resolve_rotations(
    items: &mut PunchItems,
    evaluator: &mut dyn MachineEvaluator,
    operation_lcs: &Frame,
) -> usize {
    let is_5d = items.pattern.is_5d();
    let mut resolved_count = 0;

    for pos in 0..items.len() {
        let item = items.ordered_item(pos);
        let candidates = item.candidates.clone();
        items.ordered_item_mut(pos).resolved = None;

        // Position-only gate on the shared origin; no state is
        // committed when the location itself is out of reach.
        let first = candidates[0];
        let first_global = operation_lcs.transform_frame(&first);
        if !evaluator.check_position(first_global.origin, first_global.z_axis.into_inner()) {
            debug!(item = items.ordered_index(pos), "punch location unreachable");
            continue;
        }

        if is_5d {
            evaluator.commit();
            items.ordered_item_mut(pos).resolved = Some(first);
            resolved_count += 1;
            continue;
        }

        // Orientation held before this item; every sibling is measured
        // against it so they compete on equal footing.
        let baseline = operation_lcs.local_frame(&evaluator.absolute_pose());
        let mut best: Option<(f64, Frame)> = None;
        for candidate in &candidates {
            let global = operation_lcs.transform_frame(candidate);
            if !evaluator.check_pose(&global) {
                continue;
            }
            let angle = vec_angle(&baseline.x_axis, &candidate.x_axis);
            // strict <, so the earliest candidate wins ties
            if best.map_or(true, |(smallest, _)| angle < smallest) {
                best = Some((angle, *candidate));
            }
        }

        if let Some((angle, winner)) = best {
            // Re-issue the winner so the commit latches its pose, which
            // becomes the baseline for the next item.
            let global = operation_lcs.transform_frame(&winner);
            evaluator.check_pose(&global);
            evaluator.commit();
            items.ordered_item_mut(pos).resolved = Some(winner);
            resolved_count += 1;
            debug!(
                item = items.ordered_index(pos),
                angle, "resolved punch orientation"
            );
        } else {
            debug!(
                item = items.ordered_index(pos),
                "no reachable orientation, item excluded"
            );
        }
    }

    resolved_count
}
