//! # PunchKit CAM
//!
//! Punch-machining toolpath computation. Given closed boundary curves
//! and a punch-pattern descriptor, the pipeline:
//!
//! - **Pattern Recognizer**: recognizes candidate punch orientations per
//!   curve (Round, Rectangle, Star, Custom symmetry templates)
//! - **Route Optimizer**: orders the punch locations to minimize travel
//!   through an external route-planning service
//! - **Rotation Resolver**: selects, per location, the orientation
//!   reachable by the machine that deviates least from the current tool
//!   pose, against a stateful reachability evaluator
//! - **Toolpath Emitter**: emits the motion sequence through a pluggable
//!   sink using the safe/feed-plane policy
//!
//! External collaborators (route planner, machine evaluator, motion
//! sink) are traits with narrow contracts; test doubles and the bundled
//! nearest-neighbor planner and G-code sink make the crate usable
//! without a host.

pub mod emit;
pub mod error;
pub mod items;
pub mod pattern;
pub mod pipeline;
pub mod recognize;
pub mod rotation;
pub mod route;

pub use emit::{emit, FeedMode, GcodeSink, Levels, MotionEvent, MotionSink, RecordingSink};
pub use error::{Error, Result};
pub use items::{PunchItem, PunchItems};
pub use pattern::{PatternKind, PunchPattern};
pub use pipeline::{PlanSummary, PunchingOperation};
pub use recognize::recognize;
pub use rotation::{resolve_rotations, MachineError, MachineEvaluator};
pub use route::{optimize_order, NearestNeighborPlanner, RouteError, RoutePlanner};
