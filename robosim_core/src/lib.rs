//! # robosim core
//!
//! Fundamental building blocks shared by the robosim planners and driver:
//!
//! - **Types**: [`Position`](types::Position) with vector arithmetic,
//!   [`GridPos`](types::GridPos) / [`Point`](types::Point) aliases and
//!   cardinal [`Direction`](types::Direction)s
//! - **Fields**: discrete [`Grid`](field::Grid) and continuous
//!   [`Environment`](field::Environment) behind the
//!   [`SpatialField`](field::SpatialField) query trait
//! - **Errors**: [`RoboSimError`] / [`RoboSimResult`]
//!
//! ## Quick Start
//!
//! ```rust
//! use robosim_core::{Grid, GridPos, SpatialField, Point};
//!
//! let grid = Grid::with_obstacles(5, 5, [GridPos::new(2, 2)]).unwrap();
//! assert!(grid.is_obstacle(Point::new(2.0, 2.0)));
//! ```

pub mod error;
pub mod field;
pub mod types;

// Re-export commonly used types for easy access
pub use error::{Placement, RoboSimError, RoboSimResult};
pub use field::{
    Aabb, EnvObject, Environment, Grid, ObjectKind, Shape, SpatialField, World,
    DEFAULT_OBJECT_RADIUS,
};
pub use types::{Direction, GridPos, Point, Position};
