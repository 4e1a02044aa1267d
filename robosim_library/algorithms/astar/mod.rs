//! A* grid pathfinding with proximity risk
//!
//! Best-first search on a 4-connected [`Grid`]. When a sensor range is
//! configured, cells close to obstacles carry a quadratic penalty (see
//! [`ProximityMap`]) and the heuristic is inflated by the same penalty, so
//! paths keep their distance from obstacles where the layout allows it.
//!
//! Without a range the heuristic is plain Manhattan distance and paths are
//! cost-optimal. With a range the heuristic can overestimate, and the path
//! may cost more than the one [`Dijkstra`](super::dijkstra::Dijkstra) returns.
//!
//! # Example
//!
//! ```rust
//! use robosim_core::{Grid, GridPos};
//! use robosim_library::algorithms::astar::AStar;
//!
//! let grid = Grid::new(5, 5);
//! let astar = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(4, 4), None).unwrap();
//!
//! let path = astar.exec();
//! assert_eq!(path.len(), 9);
//! assert_eq!(path[0], GridPos::new(0, 0));
//! assert_eq!(path[8], GridPos::new(4, 4));
//! ```

use super::proximity::{ProximityMap, PENALTY_FACTOR};
use super::search::{grid_search, path_cost};
use robosim_core::{Grid, GridPos, Placement, RoboSimError, RoboSimResult, SpatialField};

/// A* planner bound to one grid and one start/target pair
#[derive(Debug, Clone)]
pub struct AStar<'a> {
    grid: &'a Grid,
    start: GridPos,
    target: GridPos,
    proximity: ProximityMap,
}

impl<'a> AStar<'a> {
    /// Create a planner; out-of-bounds start or target is rejected
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

    /// Manhattan distance to the target, plus the proximity penalty and a
    /// range-proportional bias when a sensor range is configured
    pub fn heuristic(&self, pos: GridPos) -> f64 {
        let base = pos.manhattan_distance(&self.target) as f64;
        match self.proximity.sensor_range() {
            Some(range) => {
                base + self.proximity.penalty(pos) + range as f64 * PENALTY_FACTOR / 10.0
            }
            None => base,
        }
    }

    /// Compute the path, empty when the target is unreachable
    pub fn exec(&self) -> Vec<GridPos> {
        grid_search(self.grid, &self.proximity, self.start, self.target, |pos| {
            self.heuristic(pos)
        })
    }

    /// Penalty-inflated cost of a path on this planner's grid
    pub fn path_cost(&self, path: &[GridPos]) -> f64 {
        path_cost(&self.proximity, path)
    }

    pub fn proximity(&self) -> &ProximityMap {
        &self.proximity
    }
}

pub(crate) fn check_endpoints(grid: &Grid, start: GridPos, target: GridPos) -> RoboSimResult<()> {
    if !grid.in_bounds(start) {
        return Err(RoboSimError::invalid_position(
            Placement::Start,
            start,
            grid.bounds(),
        ));
    }
    if !grid.in_bounds(target) {
        return Err(RoboSimError::invalid_position(
            Placement::Target,
            target,
            grid.bounds(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
