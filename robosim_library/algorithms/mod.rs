//! Navigation algorithms
//!
//! Pure planning logic with no I/O. Each planner reads a spatial field and
//! hands back positions; the driver owns the robot and applies moves.
//!
//! # Available Algorithms
//!
//! ## Grid Search
//! - **astar**: A* with proximity-risk heuristic
//! - **dijkstra**: uniform-cost search with the same risk-inflated costs
//! - **proximity**: distance-to-nearest-obstacle risk map both share
//!
//! ## Continuous Planning
//! - **rrt**: Rapidly-exploring Random Tree, grown call by call
//! - **bug2**: reactive boundary following with stuck detection

pub mod astar;
pub mod bug2;
pub mod dijkstra;
pub mod proximity;
pub mod rrt;
mod search;

pub use search::path_cost;
