//! Toolpath emission.
//!
//! Turns the resolved, ordered punch items into a motion sequence
//! through a [`MotionSink`]. Each emitted item is one logically-grouped
//! block labeled by the item's original index, so labels stay stable
//! across reordering: rapid to the safe plane, feed-switch descent,
//! working descent to the punch point, the punch marker, and the return
//! to the safe plane.
//!
//! 5D patterns travel on the position+direction primitive, oriented
//! (6D) patterns on the full-pose primitive; the two are distinct
//! machine commands and are never interchanged.

use nalgebra::{Point3, Vector3};
use punchkit_core::{Frame, PropertyTree, Result as CoreResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::items::PunchItems;

/// Feed selection for subsequent motion commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedMode {
    /// Travel between locations on the safe plane.
    Rapid,
    /// Descent from the safe plane to the feed-switch plane.
    Plunge,
    /// Working descent onto the punch point.
    Working,
    /// Retreat back to the safe plane.
    Return,
}

/// External motion sink contract.
pub trait MotionSink {
    fn begin_group(&mut self, label: &str);
    fn set_feed_mode(&mut self, mode: FeedMode);
    /// 5D motion primitive: position plus approach direction.
    fn move_to_position(&mut self, position: Point3<f64>, direction: Vector3<f64>);
    /// 6D motion primitive: full pose.
    fn move_to_pose(&mut self, frame: &Frame);
    fn add_comment(&mut self, text: &str);
    fn end_group(&mut self);
}

/// Resolved safe and feed-switch plane heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    pub safe: f64,
    pub feed: f64,
}

impl Levels {
    /// Reads the level policy from the property tree.
    ///
    /// `SafeLevel.ReferenceType` 0 selects the absolute value, anything
    /// else an offset from `first_z` (the first resolved point's Z).
    /// `FeedSwitchLevel.ReferenceType` 0 is absolute, 3 a percentage of
    /// the tool diameter, anything else relative. The safe level is
    /// clamped to never sit below the feed-switch level.
    pub fn from_props(
        props: &PropertyTree,
        first_z: f64,
        tool_diameter: f64,
    ) -> CoreResult<Self> {
        let safe = match props.int("SafeLevel.ReferenceType")? {
            0 => props.flt("SafeLevel.AbsValue")?,
            _ => first_z + props.flt("SafeLevel.RelValue")?,
        };
        let feed = match props.int("FeedSwitchLevel.ReferenceType")? {
            0 => props.flt("FeedSwitchLevel.AbsValue")?,
            3 => 0.01 * tool_diameter * props.flt("FeedSwitchLevel.PercentValue")?,
            _ => first_z + props.flt("FeedSwitchLevel.RelValue")?,
        };
        Ok(Self {
            safe: safe.max(feed),
            feed,
        })
    }
}

/// Emits the motion sequence for all resolved items, in visiting order.
/// Items without a resolved frame are skipped silently. Returns the
/// number of items emitted.
pub fn emit(
    items: &PunchItems,
    props: &PropertyTree,
    tool_diameter: f64,
    sink: &mut dyn MotionSink,
) -> Result<usize> {
    let Some(first) = items.first_resolved_frame() else {
        return Ok(0);
    };
    let levels = Levels::from_props(props, first.origin.z, tool_diameter)?;
    debug!(safe = levels.safe, feed = levels.feed, "emitting toolpath");

    let is_5d = items.pattern.is_5d();
    let mut emitted = 0;
    for pos in 0..items.len() {
        let Some(frame) = items.ordered_item(pos).resolved else {
            continue;
        };
        let safe_frame = frame.with_origin_z(levels.safe);
        let feed_frame = frame.with_origin_z(levels.feed);

        sink.begin_group(&format!("Point {}", items.ordered_index(pos)));

        sink.set_feed_mode(FeedMode::Rapid);
        move_to(sink, is_5d, &safe_frame);
        sink.set_feed_mode(FeedMode::Plunge);
        move_to(sink, is_5d, &feed_frame);
        sink.set_feed_mode(FeedMode::Working);
        move_to(sink, is_5d, &frame);

        sink.add_comment("punch");

        sink.set_feed_mode(FeedMode::Return);
        move_to(sink, is_5d, &safe_frame);

        sink.end_group();
        emitted += 1;
    }
    Ok(emitted)
}

fn move_to(sink: &mut dyn MotionSink, is_5d: bool, frame: &Frame) {
    if is_5d {
        sink.move_to_position(frame.origin, frame.z_axis.into_inner());
    } else {
        sink.move_to_pose(frame);
    }
}

/// Structured motion record for tests and inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionEvent {
    BeginGroup(String),
    Feed(FeedMode),
    Position(Point3<f64>, Vector3<f64>),
    Pose(Frame),
    Comment(String),
    EndGroup,
}

/// Sink capturing the motion stream as [`MotionEvent`]s.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<MotionEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Origins of all emitted moves, in order.
    pub fn move_targets(&self) -> Vec<Point3<f64>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MotionEvent::Position(p, _) => Some(*p),
                MotionEvent::Pose(f) => Some(f.origin),
                _ => None,
            })
            .collect()
    }
}

impl MotionSink for RecordingSink {
    fn begin_group(&mut self, label: &str) {
        self.events.push(MotionEvent::BeginGroup(label.to_string()));
    }

    fn set_feed_mode(&mut self, mode: FeedMode) {
        self.events.push(MotionEvent::Feed(mode));
    }

    fn move_to_position(&mut self, position: Point3<f64>, direction: Vector3<f64>) {
        self.events.push(MotionEvent::Position(position, direction));
    }

    fn move_to_pose(&mut self, frame: &Frame) {
        self.events.push(MotionEvent::Pose(*frame));
    }

    fn add_comment(&mut self, text: &str) {
        self.events.push(MotionEvent::Comment(text.to_string()));
    }

    fn end_group(&mut self) {
        self.events.push(MotionEvent::EndGroup);
    }
}

/// Sink rendering the motion stream as commented G-code text.
#[derive(Debug)]
pub struct GcodeSink {
    gcode: String,
    mode: FeedMode,
    /// Feed rate for plunge and return moves (mm/min).
    plunge_rate: f64,
    /// Feed rate for working moves (mm/min).
    working_rate: f64,
}

impl GcodeSink {
    pub fn new(plunge_rate: f64, working_rate: f64) -> Self {
        Self {
            gcode: String::new(),
            mode: FeedMode::Rapid,
            plunge_rate,
            working_rate,
        }
    }

    /// Finished G-code text.
    pub fn finish(self) -> String {
        self.gcode
    }

    fn emit_move(&mut self, position: Point3<f64>) {
        let line = match self.mode {
            FeedMode::Rapid => format!(
                "G0 X{:.3} Y{:.3} Z{:.3}\n",
                position.x, position.y, position.z
            ),
            FeedMode::Working => format!(
                "G1 X{:.3} Y{:.3} Z{:.3} F{:.1}\n",
                position.x, position.y, position.z, self.working_rate
            ),
            FeedMode::Plunge | FeedMode::Return => format!(
                "G1 X{:.3} Y{:.3} Z{:.3} F{:.1}\n",
                position.x, position.y, position.z, self.plunge_rate
            ),
        };
        self.gcode.push_str(&line);
    }
}

impl MotionSink for GcodeSink {
    fn begin_group(&mut self, label: &str) {
        self.gcode.push_str(&format!("; --- {label} ---\n"));
    }

    fn set_feed_mode(&mut self, mode: FeedMode) {
        self.mode = mode;
    }

    fn move_to_position(&mut self, position: Point3<f64>, _direction: Vector3<f64>) {
        self.emit_move(position);
    }

    fn move_to_pose(&mut self, frame: &Frame) {
        self.emit_move(frame.origin);
        let x = frame.x_axis;
        self.gcode
            .push_str(&format!("; tangent I{:.4} J{:.4} K{:.4}\n", x.x, x.y, x.z));
    }

    fn add_comment(&mut self, text: &str) {
        self.gcode.push_str(&format!("; {text}\n"));
    }

    fn end_group(&mut self) {
        self.gcode.push('\n');
    }
}
