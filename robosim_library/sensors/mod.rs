//! Proximity sensor model
//!
//! A ray-casting range sensor that reads clearance around a position in a
//! [`SpatialField`]. Two modes:
//!
//! - **Discrete**: four cardinal bearings by default, cast cell by cell
//! - **Continuous**: a 5° sweep by default, cast in unit sub-steps
//!
//! Every query bumps an atomic counter so the driver can report how many
//! readings an episode used.
//!
//! # Example
//!
//! ```rust
//! use robosim_core::{Grid, GridPos, Point};
//! use robosim_library::sensors::ProximitySensor;
//!
//! let grid = Grid::with_obstacles(5, 5, [GridPos::new(1, 3)]).unwrap();
//! let sensor = ProximitySensor::discrete(3);
//!
//! let reading = sensor.sense(&grid, Point::new(1.0, 1.0), None);
//! assert_eq!(reading.get(90), Some(2.0)); // up: obstacle two cells away
//! assert_eq!(reading.get(0), Some(3.0)); // right: clear for the full range
//! ```

use robosim_core::{Direction, Point, SpatialField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// How the sensor casts its rays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorMode {
    #[default]
    Discrete,
    Continuous,
}

impl SensorMode {
    /// Default angular granularity in degrees
    pub fn default_angle_step(self) -> u32 {
        match self {
            SensorMode::Discrete => 90,
            SensorMode::Continuous => 5,
        }
    }
}

/// Clearance per bearing, ordered by angle in degrees
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReading {
    distances: BTreeMap<u32, f64>,
}

impl SensorReading {
    pub fn insert(&mut self, angle: u32, distance: f64) {
        self.distances.insert(angle, distance);
    }

    pub fn get(&self, angle: u32) -> Option<f64> {
        self.distances.get(&angle).copied()
    }

    /// Reading along a cardinal direction, if that bearing was sampled
    pub fn toward(&self, direction: Direction) -> Option<f64> {
        self.get(bearing(direction))
    }

    /// Smallest clearance of the sweep
    pub fn min(&self) -> Option<f64> {
        self.distances.values().copied().min_by(f64::total_cmp)
    }

    /// Bearing with the largest clearance; the lowest angle wins ties
    pub fn max_clearance(&self) -> Option<(u32, f64)> {
        self.distances
            .iter()
            .fold(None, |best: Option<(u32, f64)>, (&angle, &d)| match best {
                Some((_, best_d)) if best_d >= d => best,
                _ => Some((angle, d)),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.distances.iter().map(|(&a, &d)| (a, d))
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Bearing of a cardinal direction in degrees
pub fn bearing(direction: Direction) -> u32 {
    match direction {
        Direction::Right => 0,
        Direction::Up => 90,
        Direction::Left => 180,
        Direction::Down => 270,
    }
}

/// Ray-casting range sensor
#[derive(Debug)]
pub struct ProximitySensor {
    range: u32,
    angle_step: u32,
    mode: SensorMode,
    readings: AtomicU64,
}

impl Clone for ProximitySensor {
    fn clone(&self) -> Self {
        Self {
            range: self.range,
            angle_step: self.angle_step,
            mode: self.mode,
            readings: AtomicU64::new(self.readings_count()),
        }
    }
}

impl ProximitySensor {
    pub fn new(range: u32, mode: SensorMode) -> Self {
        Self {
            range,
            angle_step: mode.default_angle_step(),
            mode,
            readings: AtomicU64::new(0),
        }
    }

    /// Cardinal, cell-by-cell sensor
    pub fn discrete(range: u32) -> Self {
        Self::new(range, SensorMode::Discrete)
    }

    /// Fine sweep sensor
    pub fn continuous(range: u32) -> Self {
        Self::new(range, SensorMode::Continuous)
    }

    /// Override the angular granularity (degrees, clamped to 1..=360)
    pub fn with_angle_step(mut self, angle_step: u32) -> Self {
        self.angle_step = angle_step.clamp(1, 360);
        self
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    pub fn angle_step(&self) -> u32 {
        self.angle_step
    }

    pub fn mode(&self) -> SensorMode {
        self.mode
    }

    /// Number of sensing calls made so far
    pub fn readings_count(&self) -> u64 {
        self.readings.load(Ordering::Relaxed)
    }

    /// Sample every bearing of the sweep
    ///
    /// With `radius`, a ray stops where a body of that radius would overlap an
    /// obstacle instead of where the ray point enters one.
    pub fn sense(
        &self,
        field: &impl SpatialField,
        pos: Point,
        radius: Option<f64>,
    ) -> SensorReading {
        self.readings.fetch_add(1, Ordering::Relaxed);

        let mut reading = SensorReading::default();
        for angle in (0..360).step_by(self.angle_step as usize) {
            reading.insert(angle, self.cast(field, pos, angle as f64, radius));
        }
        reading
    }

    /// Clearance along a single bearing
    pub fn sense_at_angle(
        &self,
        field: &impl SpatialField,
        pos: Point,
        angle: f64,
        radius: Option<f64>,
    ) -> f64 {
        self.readings.fetch_add(1, Ordering::Relaxed);
        self.cast(field, pos, angle, radius)
    }

    /// Smallest clearance over the sweep, `range` when nothing is in reach
    pub fn min_clearance(&self, field: &impl SpatialField, pos: Point, radius: Option<f64>) -> f64 {
        self.sense(field, pos, radius)
            .min()
            .unwrap_or(self.range as f64)
    }

    fn cast(&self, field: &impl SpatialField, pos: Point, angle: f64, radius: Option<f64>) -> f64 {
        match self.mode {
            SensorMode::Discrete => self.cast_cells(field, pos, angle, radius),
            SensorMode::Continuous => self.cast_steps(field, pos, angle, radius),
        }
    }

    fn cast_cells(
        &self,
        field: &impl SpatialField,
        pos: Point,
        angle: f64,
        radius: Option<f64>,
    ) -> f64 {
        let rad = angle.to_radians();
        for i in 1..=self.range {
            let step = i as f64;
            let offset = Point::new((step * rad.cos()).round(), (step * rad.sin()).round());
            let sample = pos + offset;

            if !field.is_within_bounds(sample) {
                return (i - 1) as f64;
            }
            if blocked(field, sample, radius) {
                return step;
            }
        }
        self.range as f64
    }

    fn cast_steps(
        &self,
        field: &impl SpatialField,
        pos: Point,
        angle: f64,
        radius: Option<f64>,
    ) -> f64 {
        for i in 1..=self.range {
            let step = i as f64;
            let sample = pos + Point::from_polar(angle, step);

            if !field.is_within_bounds(sample) || blocked(field, sample, radius) {
                return step;
            }
        }
        self.range as f64
    }
}

fn blocked(field: &impl SpatialField, sample: Point, radius: Option<f64>) -> bool {
    match radius {
        Some(r) => field.is_obstacle_in_range(sample, r),
        None => field.is_obstacle(sample),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robosim_core::{EnvObject, Environment, Grid, GridPos};

    #[test]
    fn test_cardinal_readings() {
        let grid = Grid::with_obstacles(5, 5, [GridPos::new(1, 3)]).unwrap();
        let sensor = ProximitySensor::discrete(3);

        let reading = sensor.sense(&grid, Point::new(1.0, 1.0), None);
        assert_eq!(reading.len(), 4);
        assert_eq!(reading.toward(Direction::Up), Some(2.0));
        assert_eq!(reading.toward(Direction::Down), Some(1.0));
        assert_eq!(reading.toward(Direction::Left), Some(1.0));
        assert_eq!(reading.toward(Direction::Right), Some(3.0));
    }

    #[test]
    fn test_obstacle_within_and_beyond_range() {
        let grid = Grid::with_obstacles(12, 3, [GridPos::new(5, 1)]).unwrap();
        let sensor = ProximitySensor::discrete(4);

        // Obstacle 4 cells to the right
        let near = sensor.sense(&grid, Point::new(1.0, 1.0), None);
        assert_eq!(near.toward(Direction::Right), Some(4.0));

        // Obstacle 5 cells to the right, beyond range
        let far = sensor.sense(&grid, Point::new(0.0, 1.0), None);
        assert_eq!(far.toward(Direction::Right), Some(4.0));

        let grid = Grid::with_obstacles(12, 3, [GridPos::new(3, 1)]).unwrap();
        let adjacent = sensor.sense(&grid, Point::new(2.0, 1.0), None);
        assert_eq!(adjacent.toward(Direction::Right), Some(1.0));
    }

    #[test]
    fn test_continuous_sweep() {
        let mut env = Environment::new(20.0, 20.0);
        env.add_obstacle_at(Point::new(12.0, 10.0)).unwrap();
        let sensor = ProximitySensor::continuous(5);

        let reading = sensor.sense(&env, Point::new(10.0, 10.0), None);
        assert_eq!(reading.len(), 72);
        assert_eq!(reading.get(0), Some(2.0));
        assert_eq!(reading.get(180), Some(5.0));
        assert_eq!(reading.min(), Some(2.0));
        assert_eq!(sensor.min_clearance(&env, Point::new(10.0, 10.0), None), 2.0);
    }

    #[test]
    fn test_continuous_field_edge() {
        let env = Environment::new(10.0, 10.0);
        let sensor = ProximitySensor::continuous(5);

        // Leaving the field at the third unit step
        assert_eq!(sensor.sense_at_angle(&env, Point::new(7.5, 5.0), 0.0, None), 3.0);
        assert_eq!(sensor.sense_at_angle(&env, Point::new(5.0, 5.0), 90.0, None), 5.0);
    }

    #[test]
    fn test_body_radius_stops_earlier() {
        let mut env = Environment::new(20.0, 20.0);
        env.add_obstacle(EnvObject::obstacle(Point::new(14.0, 10.0))).unwrap();
        let sensor = ProximitySensor::continuous(6);
        let pos = Point::new(10.0, 10.0);

        assert_eq!(sensor.sense_at_angle(&env, pos, 0.0, None), 4.0);
        // A body of radius 1.0 already overlaps the obstacle one step earlier
        assert_eq!(sensor.sense_at_angle(&env, pos, 0.0, Some(1.0)), 3.0);
    }

    #[test]
    fn test_readings_counter() {
        let grid = Grid::new(5, 5);
        let sensor = ProximitySensor::discrete(2);
        let pos = Point::new(2.0, 2.0);

        sensor.sense(&grid, pos, None);
        sensor.sense_at_angle(&grid, pos, 90.0, None);
        sensor.min_clearance(&grid, pos, None);
        assert_eq!(sensor.readings_count(), 3);

        let copy = sensor.clone();
        assert_eq!(copy.readings_count(), 3);
    }

    #[test]
    fn test_angle_step_override() {
        let grid = Grid::new(5, 5);
        let sensor = ProximitySensor::discrete(2).with_angle_step(45);
        assert_eq!(sensor.sense(&grid, Point::new(2.0, 2.0), None).len(), 8);

        let clamped = ProximitySensor::continuous(2).with_angle_step(0);
        assert_eq!(clamped.angle_step(), 1);
    }

    #[test]
    fn test_max_clearance_prefers_lowest_angle() {
        let mut reading = SensorReading::default();
        reading.insert(0, 2.0);
        reading.insert(90, 3.0);
        reading.insert(180, 3.0);
        reading.insert(270, 1.0);

        assert_eq!(reading.max_clearance(), Some((90, 3.0)));
        assert_eq!(reading.min(), Some(1.0));
    }
}
