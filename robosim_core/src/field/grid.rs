//! Discrete occupancy grid
//!
//! Cells are addressed by [`GridPos`] with `0 <= x < width` and
//! `0 <= y < height`. Obstacle membership is a dense lookup, so queries are
//! O(1); the ordered obstacle list is kept alongside for enumeration.
//!
//! # Example
//!
//! ```rust
//! use robosim_core::field::Grid;
//! use robosim_core::types::GridPos;
//!
//! let mut grid = Grid::new(10, 10);
//! grid.add_obstacle(GridPos::new(5, 5)).unwrap();
//!
//! assert!(grid.is_occupied(GridPos::new(5, 5)));
//! assert!(!grid.in_bounds(GridPos::new(10, 0)));
//! ```

use super::aabb::Aabb;
use super::SpatialField;
use crate::error::{Placement, RoboSimError, RoboSimResult};
use crate::types::{GridPos, Point};
use rand::Rng;

/// 2D occupancy grid
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    occupied: Vec<bool>, // row-major, index = y * width + x
    obstacles: Vec<GridPos>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            occupied: vec![false; width * height],
            obstacles: Vec::new(),
        }
    }

    /// Create a grid with the given obstacle cells
    pub fn with_obstacles(
        width: usize,
        height: usize,
        obstacles: impl IntoIterator<Item = GridPos>,
    ) -> RoboSimResult<Self> {
        let mut grid = Self::new(width, height);
        for pos in obstacles {
            grid.add_obstacle(pos)?;
        }
        Ok(grid)
    }

    /// Mark a cell as an obstacle
    ///
    /// Out-of-bounds cells are rejected rather than clamped.
    pub fn add_obstacle(&mut self, pos: GridPos) -> RoboSimResult<()> {
        let index = self
            .index(pos)
            .ok_or_else(|| {
                RoboSimError::invalid_position(Placement::Obstacle, pos, self.bounds())
            })?;

        if !self.occupied[index] {
            self.occupied[index] = true;
            self.obstacles.push(pos);
        }
        Ok(())
    }

    /// Place `count` obstacles on distinct random free cells, never on `keep_clear`
    pub fn add_random_obstacles(
        &mut self,
        count: usize,
        keep_clear: &[GridPos],
        rng: &mut impl Rng,
    ) -> RoboSimResult<()> {
        let free = self
            .cells()
            .filter(|p| !self.is_occupied(*p) && !keep_clear.contains(p))
            .count();
        if count > free {
            return Err(RoboSimError::InvalidConfig(format!(
                "cannot place {} obstacles, only {} free cells",
                count, free
            )));
        }

        let mut placed = 0;
        while placed < count {
            let pos = GridPos::new(
                rng.gen_range(0..self.width as i32),
                rng.gen_range(0..self.height as i32),
            );
            if self.is_occupied(pos) || keep_clear.contains(&pos) {
                continue;
            }
            self.add_obstacle(pos)?;
            placed += 1;
        }
        Ok(())
    }

    /// Check if a cell lies inside the grid
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Check if a cell is an obstacle (out of bounds is not)
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.index(pos).map(|i| self.occupied[i]).unwrap_or(false)
    }

    /// Check if a cell can be entered
    pub fn is_free_cell(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && !self.is_occupied(pos)
    }

    /// Row-major index of a cell
    pub fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Obstacle cells in insertion order
    pub fn obstacles(&self) -> &[GridPos] {
        &self.obstacles
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| GridPos::new(x, y)))
    }
}

impl SpatialField for Grid {
    fn bounds(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn is_within_bounds(&self, pos: Point) -> bool {
        self.in_bounds(pos.to_grid())
    }

    fn is_obstacle(&self, pos: Point) -> bool {
        self.is_occupied(pos.to_grid())
    }

    /// Obstacle cells are unit squares centred on their coordinates
    fn is_obstacle_in_range(&self, pos: Point, radius: f64) -> bool {
        let reach = radius.max(0.0).ceil() as i32 + 1;
        let center = pos.to_grid();

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let cell = center + (dx, dy);
                if self.is_occupied(cell)
                    && Aabb::from_center(cell.to_point(), 1.0, 1.0).overlaps_circle(pos, radius)
                {
                    return true;
                }
            }
        }
        false
    }

    fn obstacle_positions(&self) -> Vec<Point> {
        self.obstacles.iter().map(|p| p.to_point()).collect()
    }
}
