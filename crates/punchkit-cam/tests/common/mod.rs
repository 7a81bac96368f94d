//! Shared test doubles and curve builders for the integration tests.
#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use punchkit_cam::{MachineError, MachineEvaluator, RouteError, RoutePlanner};
use punchkit_core::{vec_angle, Curve, Frame};

/// Installs a test-writer tracing subscriber; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Reachability oracle over a square XY region around the origin.
///
/// Positions with |x| or |y| beyond `limit` are unreachable. When
/// `max_tangent_angle` is set, a full pose is additionally reachable
/// only if its tangent lies within that angle of +X. Check calls are
/// counted so tests can assert which checks ran.
pub struct GridMachine {
    pub limit: f64,
    pub max_tangent_angle: Option<f64>,
    pub pose: Frame,
    tentative: Option<Frame>,
    pub position_checks: usize,
    pub pose_checks: usize,
    pub fail_init: bool,
}

impl GridMachine {
    pub fn new(limit: f64) -> Self {
        Self {
            limit,
            max_tangent_angle: None,
            pose: Frame::identity(),
            tentative: None,
            position_checks: 0,
            pose_checks: 0,
            fail_init: false,
        }
    }

    fn position_ok(&self, position: &Point3<f64>) -> bool {
        position.x.abs() <= self.limit && position.y.abs() <= self.limit
    }
}

impl MachineEvaluator for GridMachine {
    fn initialize(&mut self) -> Result<(), MachineError> {
        if self.fail_init {
            Err(MachineError("kinematic model unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_position(&mut self, position: Point3<f64>, direction: Vector3<f64>) -> bool {
        self.position_checks += 1;
        if !self.position_ok(&position) {
            return false;
        }
        self.tentative = Frame::try_new(position, direction, Vector3::x())
            .or_else(|| Frame::try_new(position, direction, Vector3::y()));
        self.tentative.is_some()
    }

    fn check_pose(&mut self, frame: &Frame) -> bool {
        self.pose_checks += 1;
        if !self.position_ok(&frame.origin) {
            return false;
        }
        if let Some(max) = self.max_tangent_angle {
            if vec_angle(&frame.x_axis, &Vector3::x()) > max {
                return false;
            }
        }
        self.tentative = Some(*frame);
        true
    }

    fn commit(&mut self) {
        if let Some(frame) = self.tentative {
            self.pose = frame;
        }
    }

    fn absolute_pose(&self) -> Frame {
        self.pose
    }
}

/// Planner that returns a fixed visiting order.
pub struct StubPlanner {
    pub order: Vec<usize>,
    pub added: usize,
}

impl StubPlanner {
    pub fn with_order(order: Vec<usize>) -> Self {
        Self { order, added: 0 }
    }
}

impl RoutePlanner for StubPlanner {
    fn add_point(&mut self, _position: Point3<f64>, _normal: Vector3<f64>) -> usize {
        self.added += 1;
        self.added - 1
    }

    fn optimal_route(&mut self, visit: &mut dyn FnMut(usize)) -> Result<(), RouteError> {
        for &idx in &self.order {
            visit(idx);
        }
        Ok(())
    }
}

/// Planner that always reports an error status.
pub struct FailingPlanner;

impl RoutePlanner for FailingPlanner {
    fn add_point(&mut self, _position: Point3<f64>, _normal: Vector3<f64>) -> usize {
        0
    }

    fn optimal_route(&mut self, _visit: &mut dyn FnMut(usize)) -> Result<(), RouteError> {
        Err(RouteError("solver rejected the problem".to_string()))
    }
}

/// 10x10 square outline: corners plus edge midpoints, centered at
/// (cx+5, cy+5).
pub fn square_with_midpoints(cx: f64, cy: f64) -> Curve {
    Curve::new(vec![
        Point3::new(cx, cy, 0.0),
        Point3::new(cx + 5.0, cy, 0.0),
        Point3::new(cx + 10.0, cy, 0.0),
        Point3::new(cx + 10.0, cy + 5.0, 0.0),
        Point3::new(cx + 10.0, cy + 10.0, 0.0),
        Point3::new(cx + 5.0, cy + 10.0, 0.0),
        Point3::new(cx, cy + 10.0, 0.0),
        Point3::new(cx, cy + 5.0, 0.0),
    ])
}

/// Star outline with `rays` outer vertices (radius `outer`) alternating
/// with inner vertices (radius `inner`), centered at `center`. The
/// first outer vertex sits on the +X direction.
pub fn star_polygon(center: Point3<f64>, rays: usize, outer: f64, inner: f64) -> Curve {
    let step = std::f64::consts::TAU / rays as f64;
    let mut points = Vec::with_capacity(rays * 2);
    for i in 0..rays {
        let a = i as f64 * step;
        points.push(Point3::new(
            center.x + outer * a.cos(),
            center.y + outer * a.sin(),
            center.z,
        ));
        let b = a + step / 2.0;
        points.push(Point3::new(
            center.x + inner * b.cos(),
            center.y + inner * b.sin(),
            center.z,
        ));
    }
    Curve::new(points)
}
