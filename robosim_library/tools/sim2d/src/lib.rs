//! # sim2d - 2D navigation simulator
//!
//! Runs one planner from `robosim_library` through a configured scenario and
//! reports how the episode went.
//!
//! ## Binary Usage
//! ```bash
//! sim2d --env configs/grid.yaml --robot configs/robot_sensor.yaml --algorithm astar
//! ```
//!
//! ## Library Usage
//! ```rust,no_run
//! use sim2d::{PlannerKind, SimConfig, Simulation};
//!
//! let mut sim = Simulation::new(SimConfig::default(), PlannerKind::Bug2).unwrap();
//! let stats = sim.run();
//! stats.log_summary();
//! ```

pub mod config;
pub mod metrics;
pub mod simulation;

pub use config::{
    load_config_file, AlgorithmConfig, EnvConfig, FieldKind, ObstacleEntry, ObstacleSpec,
    RobotConfig, SensorConfig, ShapeKind, SimConfig,
};
pub use metrics::{SimStats, Summarizer};
pub use robosim_library::PlannerKind;
pub use simulation::{build_world, Simulation};
