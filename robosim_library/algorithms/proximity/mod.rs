//! Proximity risk map
//!
//! For every cell of a [`Grid`], the Manhattan distance to the nearest
//! obstacle. Grid planners turn this into a path-cost penalty so routes keep
//! clear of obstacles by at least the sensor range when they can.
//!
//! # Example
//!
//! ```rust
//! use robosim_core::{Grid, GridPos};
//! use robosim_library::algorithms::proximity::ProximityMap;
//!
//! let grid = Grid::with_obstacles(5, 5, [GridPos::new(2, 2)]).unwrap();
//! let map = ProximityMap::compute(&grid, Some(2));
//!
//! assert_eq!(map.get(GridPos::new(2, 2)), Some(0));
//! assert_eq!(map.get(GridPos::new(0, 0)), Some(4));
//! assert_eq!(map.penalty(GridPos::new(2, 3)), 40.0);
//! ```

use robosim_core::{Grid, GridPos};
use std::collections::VecDeque;

/// Scale of the quadratic proximity penalty
pub const PENALTY_FACTOR: f64 = 10.0;

/// Dense cell → distance-to-nearest-obstacle table
#[derive(Debug, Clone)]
pub struct ProximityMap {
    width: usize,
    height: usize,
    distances: Vec<u32>, // index = y * width + x
    sensor_range: Option<u32>,
}

impl ProximityMap {
    /// Build the map with a multi-source breadth-first sweep from every obstacle
    ///
    /// With no obstacles every cell holds `sensor_range + 1`, or 0 when no
    /// range is configured.
    pub fn compute(grid: &Grid, sensor_range: Option<u32>) -> Self {
        let (width, height) = grid.dimensions();

        if grid.obstacles().is_empty() {
            let fill = sensor_range.map(|r| r + 1).unwrap_or(0);
            return Self {
                width,
                height,
                distances: vec![fill; width * height],
                sensor_range,
            };
        }

        let mut distances = vec![u32::MAX; width * height];
        let mut queue = VecDeque::with_capacity(width * height);

        for &obstacle in grid.obstacles() {
            if let Some(index) = grid.index(obstacle) {
                distances[index] = 0;
                queue.push_back(obstacle);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let Some(index) = grid.index(cell) else {
                continue;
            };
            let next = distances[index] + 1;

            for neighbor in cell.neighbors() {
                if let Some(n) = grid.index(neighbor) {
                    if distances[n] > next {
                        distances[n] = next;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        Self {
            width,
            height,
            distances,
            sensor_range,
        }
    }

    /// Distance to the nearest obstacle, `None` outside the map
    pub fn get(&self, pos: GridPos) -> Option<u32> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.distances.get(y * self.width + x).copied()
    }

    pub fn sensor_range(&self) -> Option<u32> {
        self.sensor_range
    }

    /// Quadratic cost for entering `pos`
    ///
    /// Zero without a sensor range. Cells outside the map count as being
    /// `sensor_range + 1` away.
    pub fn penalty(&self, pos: GridPos) -> f64 {
        let Some(range) = self.sensor_range else {
            return 0.0;
        };
        let proximity = self.get(pos).unwrap_or(range + 1);
        let shortfall = (range + 1).saturating_sub(proximity) as f64;
        shortfall * shortfall * PENALTY_FACTOR
    }
}
