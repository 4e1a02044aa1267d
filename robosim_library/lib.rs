//! # robosim library
//!
//! Planners, sensors and the robot model built on `robosim_core`.
//!
//! ## Structure
//!
//! ```text
//! robosim_library/
//! ── algorithms/     # A*, Dijkstra, RRT, Bug2, proximity risk map
//! ── sensors/        # Ray-casting proximity sensor
//! ── robot/          # Robot body, pose and factory table
//! ── navigator/      # Step-by-step dispatch over all planners
//! ── tools/          # sim2d driver
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use robosim_core::{Grid, GridPos};
//! use robosim_library::AStar;
//!
//! let grid = Grid::with_obstacles(6, 6, [GridPos::new(2, 2)]).unwrap();
//! let path = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(5, 5), Some(1))
//!     .unwrap()
//!     .exec();
//! assert_eq!(path.last(), Some(&GridPos::new(5, 5)));
//! ```

pub mod algorithms;
pub mod navigator;
pub mod robot;
pub mod sensors;

// sim2d lives under tools/ as its own crate

pub use algorithms::astar::AStar;
pub use algorithms::bug2::{Bug2, Bug2State, Bug2Step, Transition};
pub use algorithms::dijkstra::Dijkstra;
pub use algorithms::proximity::{ProximityMap, PENALTY_FACTOR};
pub use algorithms::rrt::{Rrt, RrtConfig, RrtSolution};
pub use navigator::{Navigator, PlannerKind, PlannerSetup, StepOutcome};
pub use robot::{build_robot, Robot, RobotKind, RobotSpec};
pub use sensors::{ProximitySensor, SensorMode, SensorReading};
