//! # robosim - 2D robot navigation
//!
//! Path planners and reactive navigators for a robot moving on an occupancy
//! grid or in a continuous plane with circular and square obstacles.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use robosim::prelude::*;
//!
//! let grid = Grid::with_obstacles(10, 10, [GridPos::new(4, 4)])?;
//! let path = AStar::new(&grid, GridPos::new(1, 1), GridPos::new(8, 8), Some(3))?.exec();
//! assert_eq!(path.first(), Some(&GridPos::new(1, 1)));
//! # Ok::<(), RoboSimError>(())
//! ```
//!
//! ## Features
//!
//! - **Risk-aware grid search** (A* and Dijkstra with a proximity penalty)
//! - **Sampling-based planning** (RRT in any field)
//! - **Reactive navigation** (Bug2 with stuck detection)
//! - **Simulated proximity sensors**

// Re-export core components
pub use robosim_core::{self, *};

// Re-export the planner library with alias
pub use robosim_library as library;

/// The robosim prelude - everything you need to get started
pub mod prelude {
    // Positions and fields
    pub use robosim_core::{
        Direction, EnvObject, Environment, Grid, GridPos, Point, Position, Shape, SpatialField,
        World,
    };

    // Error types
    pub use robosim_core::{Placement, RoboSimError, RoboSimResult};
    pub type Result<T> = RoboSimResult<T>;

    // Planners
    pub use robosim_library::algorithms::path_cost;
    pub use robosim_library::{
        AStar, Bug2, Bug2Step, Dijkstra, ProximityMap, Rrt, RrtConfig, RrtSolution,
    };

    // Robot and navigation
    pub use robosim_library::{
        build_robot, Navigator, PlannerKind, PlannerSetup, ProximitySensor, Robot, RobotSpec,
        SensorMode, StepOutcome,
    };

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export anyhow for error handling
    pub use anyhow::{anyhow, bail, ensure, Context, Result as AnyResult};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get robosim version
pub fn version() -> &'static str {
    VERSION
}
