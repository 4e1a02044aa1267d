//! Dijkstra grid pathfinding with proximity risk
//!
//! Same search as [`AStar`](super::astar::AStar) with the heuristic fixed at
//! zero, so it expands uniformly by accumulated (penalty-inflated) cost.

use super::astar::check_endpoints;
use super::proximity::ProximityMap;
use super::search::{grid_search, path_cost};
use robosim_core::{Grid, GridPos, RoboSimResult};

/// Dijkstra planner bound to one grid and one start/target pair
#[derive(Debug, Clone)]
pub struct Dijkstra<'a> {
    grid: &'a Grid,
    start: GridPos,
    target: GridPos,
    proximity: ProximityMap,
}

impl<'a> Dijkstra<'a> {
    pub fn new(
        grid: &'a Grid,
        start: GridPos,
        target: GridPos,
        sensor_range: Option<u32>,
    ) -> RoboSimResult<Self> {
        check_endpoints(grid, start, target)?;

        Ok(Self {
            grid,
            start,
            target,
            proximity: ProximityMap::compute(grid, sensor_range),
        })
    }

    /// Compute the path, empty when the target is unreachable
    pub fn exec(&self) -> Vec<GridPos> {
        grid_search(self.grid, &self.proximity, self.start, self.target, |_| 0.0)
    }

    pub fn path_cost(&self, path: &[GridPos]) -> f64 {
        path_cost(&self.proximity, path)
    }
}
