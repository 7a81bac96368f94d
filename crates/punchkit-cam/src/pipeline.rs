//! Pipeline orchestration.
//!
//! One `PunchingOperation` per toolpath-computation invocation:
//! recognize curves into punch items, optimize the visiting order,
//! resolve reachable rotations, and emit the motion sequence. The
//! stages run strictly in that order and the collection is mutated in
//! place throughout; nothing persists across invocations.

use punchkit_core::{Curve, Frame, PropertyTree};
use serde::Serialize;
use tracing::{debug, warn};

use crate::emit::{emit, MotionSink};
use crate::error::Result;
use crate::items::PunchItems;
use crate::pattern::PunchPattern;
use crate::recognize::recognize;
use crate::rotation::{resolve_rotations, MachineEvaluator};
use crate::route::{optimize_order, RoutePlanner};

/// Stage counts of one planning run, for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    /// Curves inspected.
    pub curves: usize,
    /// Items that matched the pattern.
    pub recognized: usize,
    /// Items with a reachable resolved orientation.
    pub resolved: usize,
    /// Items actually emitted.
    pub emitted: usize,
}

/// A configured punch-machining operation.
pub struct PunchingOperation {
    props: PropertyTree,
    /// Operation coordinate system; curves and recognized frames live in
    /// it, the machine evaluator works in the global system.
    lcs: Frame,
    tool_diameter: f64,
}

impl PunchingOperation {
    pub fn new(props: PropertyTree, lcs: Frame, tool_diameter: f64) -> Self {
        Self {
            props,
            lcs,
            tool_diameter,
        }
    }

    /// Computes the full toolpath for `curves`.
    ///
    /// The route planner and machine evaluator are consulted through
    /// their narrow contracts; an explicit error status from either is
    /// fatal, as is missing configuration. Curves that fail recognition
    /// and items the machine cannot reach are skipped, never fatal.
    pub fn calculate(
        &self,
        curves: &[Curve],
        planner: &mut dyn RoutePlanner,
        evaluator: &mut dyn MachineEvaluator,
        sink: &mut dyn MotionSink,
    ) -> Result<PlanSummary> {
        let pattern = PunchPattern::from_props(&self.props.subtree("Punching")?)?;

        let mut items = PunchItems::new(pattern);
        for curve in curves {
            match recognize(curve, &items.pattern) {
                Some(item) => items.push(item),
                None => debug!("curve skipped by pattern recognition"),
            }
        }
        debug!(
            curves = curves.len(),
            recognized = items.len(),
            "pattern recognition finished"
        );
        if items.is_empty() {
            warn!("no curve matched the punch pattern, empty toolpath");
        }

        let optimize = self.props.boolean_or("OptimizeOrder", false)?;
        optimize_order(&mut items, planner, optimize)?;

        evaluator.initialize()?;
        let resolved = resolve_rotations(&mut items, evaluator, &self.lcs);

        let emitted = emit(&items, &self.props, self.tool_diameter, sink)?;

        let summary = PlanSummary {
            curves: curves.len(),
            recognized: items.len(),
            resolved,
            emitted,
        };
        debug!(?summary, "toolpath computation finished");
        Ok(summary)
    }
}
