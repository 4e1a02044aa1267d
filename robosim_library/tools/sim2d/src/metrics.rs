//! Episode summary metrics
//!
//! Tracks wall-clock time, steps, displacement and travelled distance for a
//! single run, and reports them through `tracing` or as JSON.

use robosim_core::Point;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// Final statistics of one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimStats {
    pub algorithm: String,
    /// Wall-clock seconds from start to finish
    pub execution_time: f64,
    pub steps_taken: usize,
    /// Manhattan distance from start to final position, two decimals
    pub total_displacement: f64,
    /// Sum of the lengths of all moves
    pub path_length: f64,
    /// Sensor calls made, absent for robots without a sensor
    pub sensor_readings_count: Option<u64>,
    pub reached: bool,
    pub final_position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<Point>>,
}

impl SimStats {
    /// Emit the summary through `tracing`
    pub fn log_summary(&self) {
        info!("Simulation Summary ({}):", self.algorithm);
        info!("- Execution Time: {:.2} seconds", self.execution_time);
        info!("- Number of Steps Taken: {}", self.steps_taken);
        info!("- Total Displacement: {}", self.total_displacement);
        info!("- Path Length: {:.2}", self.path_length);

        if let Some(count) = self.sensor_readings_count {
            info!("- Sensor Readings Used: {}", count);
        }

        if let Some(trace) = &self.trace {
            let visited: Vec<String> = trace.iter().map(|p| p.to_string()).collect();
            info!("- Path Trace: {}", visited.join(" -> "));
        }

        if self.reached {
            info!("Target was successfully reached.");
        } else {
            warn!("Target not reached. Final position: {}", self.final_position);
        }
    }
}

/// Collects metrics while an episode runs
#[derive(Debug, Clone)]
pub struct Summarizer {
    start_time: Option<Instant>,
    start_pos: Point,
    steps_taken: usize,
    path_length: f64,
    trace: Option<Vec<Point>>,
}

impl Summarizer {
    pub fn new(start_pos: Point, trace_path: bool) -> Self {
        Self {
            start_time: None,
            start_pos,
            steps_taken: 0,
            path_length: 0.0,
            trace: trace_path.then(|| vec![start_pos]),
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Count one consumed step of the budget
    pub fn record_step(&mut self) {
        self.steps_taken += 1;
    }

    pub fn record_move(&mut self, from: Point, to: Point) {
        self.path_length += from.distance(&to);
        if let Some(trace) = self.trace.as_mut() {
            trace.push(to);
        }
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Close the episode and compute the final statistics
    pub fn finish(
        &self,
        algorithm: &str,
        final_position: Point,
        sensor_readings_count: Option<u64>,
        reached: bool,
    ) -> SimStats {
        let execution_time = self
            .start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);

        SimStats {
            algorithm: algorithm.to_string(),
            execution_time,
            steps_taken: self.steps_taken,
            total_displacement: round2(final_position.manhattan_distance(&self.start_pos)),
            path_length: self.path_length,
            sensor_readings_count,
            reached,
            final_position,
            trace: self.trace.clone(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
