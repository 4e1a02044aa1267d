//! Spatial fields
//!
//! A spatial field is the static world a planner runs in: fixed bounds plus a
//! set of obstacles. Two representations are provided:
//!
//! - **Grid**: integer cells with O(1) obstacle membership
//! - **Environment**: continuous plane with circular/square obstacles
//!
//! Planners and sensors query either through the [`SpatialField`] trait,
//! which speaks in continuous [`Point`]s. Grid-only planners take a
//! [`Grid`] directly.

pub mod aabb;
pub mod environment;
pub mod grid;
pub mod objects;

pub use aabb::Aabb;
pub use environment::Environment;
pub use grid::Grid;
pub use objects::{EnvObject, ObjectKind, Shape, DEFAULT_OBJECT_RADIUS};

use crate::types::Point;

/// Query interface shared by all fields
pub trait SpatialField {
    /// Field extent as `(width, height)`
    fn bounds(&self) -> (f64, f64);

    fn is_within_bounds(&self, pos: Point) -> bool;

    /// Check if a point lies inside an obstacle
    fn is_obstacle(&self, pos: Point) -> bool;

    /// Check if a body of `radius` centred at `pos` overlaps any obstacle
    fn is_obstacle_in_range(&self, pos: Point, radius: f64) -> bool;

    /// Obstacle centres
    fn obstacle_positions(&self) -> Vec<Point>;

    /// In bounds and clear of obstacles for a body of `radius`
    fn is_free(&self, pos: Point, radius: f64) -> bool {
        self.is_within_bounds(pos) && !self.is_obstacle_in_range(pos, radius)
    }
}

/// A field of either kind, as built by the simulation driver
#[derive(Debug, Clone)]
pub enum World {
    Grid(Grid),
    Continuous(Environment),
}

impl World {
    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            World::Grid(grid) => Some(grid),
            World::Continuous(_) => None,
        }
    }

    pub fn as_environment(&self) -> Option<&Environment> {
        match self {
            World::Grid(_) => None,
            World::Continuous(env) => Some(env),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            World::Grid(_) => "grid",
            World::Continuous(_) => "continuous",
        }
    }
}

impl SpatialField for World {
    fn bounds(&self) -> (f64, f64) {
        match self {
            World::Grid(grid) => grid.bounds(),
            World::Continuous(env) => env.bounds(),
        }
    }

    fn is_within_bounds(&self, pos: Point) -> bool {
        match self {
            World::Grid(grid) => grid.is_within_bounds(pos),
            World::Continuous(env) => env.is_within_bounds(pos),
        }
    }

    fn is_obstacle(&self, pos: Point) -> bool {
        match self {
            World::Grid(grid) => grid.is_obstacle(pos),
            World::Continuous(env) => env.is_obstacle(pos),
        }
    }

    fn is_obstacle_in_range(&self, pos: Point, radius: f64) -> bool {
        match self {
            World::Grid(grid) => grid.is_obstacle_in_range(pos, radius),
            World::Continuous(env) => env.is_obstacle_in_range(pos, radius),
        }
    }

    fn obstacle_positions(&self) -> Vec<Point> {
        match self {
            World::Grid(grid) => grid.obstacle_positions(),
            World::Continuous(env) => env.obstacle_positions(),
        }
    }
}
