//! Travel-order optimization boundary.
//!
//! The core submits one representative point per punch item to an
//! external route-planning service and receives the visiting order back
//! through a per-stop callback. The search algorithm itself is behind
//! the [`RoutePlanner`] trait; [`NearestNeighborPlanner`] is a bundled
//! greedy implementation for hosts without their own service.

use nalgebra::{Point3, Vector3};
use thiserror::Error;
use tracing::debug;

use crate::error::{Error, Result};
use crate::items::PunchItems;

/// Error status reported by a route-planning service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RouteError(pub String);

/// External route-search service contract.
pub trait RoutePlanner {
    /// Registers a stop; returns its submission index.
    fn add_point(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> usize;

    /// Computes the route, invoking `visit` once per stop with the
    /// original submission index, in visiting order.
    fn optimal_route(&mut self, visit: &mut dyn FnMut(usize)) -> std::result::Result<(), RouteError>;
}

/// Reorders `items` to minimize tool travel.
///
/// Active only when `enabled` and more than one item exists; otherwise
/// the visiting order is reset to the identity permutation. A planner
/// error status, or a planner response that is not a permutation of the
/// submitted indices, aborts the planning run.
pub fn optimize_order(
    items: &mut PunchItems,
    planner: &mut dyn RoutePlanner,
    enabled: bool,
) -> Result<()> {
    items.reset_order();
    if !enabled || items.len() <= 1 {
        return Ok(());
    }

    for item in items.items() {
        let first = item.first_candidate();
        planner.add_point(first.origin, first.z_axis.into_inner());
    }

    let mut order = Vec::with_capacity(items.len());
    planner.optimal_route(&mut |index| order.push(index))?;

    debug!(items = items.len(), ?order, "route planner returned visiting order");
    if !items.set_visit_order(order) {
        return Err(Error::RouteSearch {
            description: "service returned an order that is not a permutation of the submitted points"
                .to_string(),
        });
    }
    Ok(())
}

/// Greedy nearest-neighbor route: starts at the first submitted stop and
/// repeatedly visits the closest remaining one, breaking distance ties
/// toward the lower index.
#[derive(Debug, Default)]
pub struct NearestNeighborPlanner {
    points: Vec<Point3<f64>>,
}

impl NearestNeighborPlanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoutePlanner for NearestNeighborPlanner {
    fn add_point(&mut self, position: Point3<f64>, _normal: Vector3<f64>) -> usize {
        self.points.push(position);
        self.points.len() - 1
    }

    fn optimal_route(&mut self, visit: &mut dyn FnMut(usize)) -> std::result::Result<(), RouteError> {
        if self.points.is_empty() {
            return Err(RouteError("no points submitted".to_string()));
        }
        let mut remaining: Vec<usize> = (1..self.points.len()).collect();
        let mut current = 0usize;
        visit(current);
        while !remaining.is_empty() {
            let here = self.points[current];
            let mut best_slot = 0;
            let mut best_distance = f64::INFINITY;
            for (slot, &idx) in remaining.iter().enumerate() {
                let distance = nalgebra::distance(&here, &self.points[idx]);
                // strict <, so equal distances keep the lower index
                if distance < best_distance {
                    best_slot = slot;
                    best_distance = distance;
                }
            }
            current = remaining.remove(best_slot);
            visit(current);
        }
        Ok(())
    }
}
