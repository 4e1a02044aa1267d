//! Robot model
//!
//! A circular body with a pose, a speed and an optional proximity sensor.
//! Robots are owned and moved by the driver; planners only read them.

use crate::sensors::{ProximitySensor, SensorMode, SensorReading};
use robosim_core::{Direction, Point, SpatialField};

/// Default body radius
pub const DEFAULT_ROBOT_RADIUS: f64 = 0.5;
/// Default distance travelled per step
pub const DEFAULT_ROBOT_SPEED: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Robot {
    pub pos: Point,
    pub prev_pos: Option<Point>,
    pub radius: f64,
    pub speed: f64,
    pub sensor: Option<ProximitySensor>,
}

impl Robot {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            prev_pos: None,
            radius: DEFAULT_ROBOT_RADIUS,
            speed: DEFAULT_ROBOT_SPEED,
            sensor: None,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sensor(mut self, sensor: ProximitySensor) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn has_sensor(&self) -> bool {
        self.sensor.is_some()
    }

    pub fn sensor_range(&self) -> Option<u32> {
        self.sensor.as_ref().map(|s| s.range())
    }

    /// Place the robot at `pos`, remembering where it was
    pub fn move_to(&mut self, pos: Point) {
        self.prev_pos = Some(self.pos);
        self.pos = pos;
    }

    /// Take one cardinal step of `speed` if the destination is in bounds and
    /// clear for the robot's body
    pub fn try_move(&mut self, direction: Direction, field: &impl SpatialField) -> bool {
        let next = self.pos + direction.unit() * self.speed;
        if field.is_free(next, self.radius) {
            self.move_to(next);
            true
        } else {
            false
        }
    }

    /// Read the sensor at the current pose, if fitted
    pub fn sense(&self, field: &impl SpatialField) -> Option<SensorReading> {
        self.sensor.as_ref().map(|s| s.sense(field, self.pos, None))
    }

    /// Sensor readings taken so far (zero without a sensor)
    pub fn readings_count(&self) -> u64 {
        self.sensor.as_ref().map_or(0, |s| s.readings_count())
    }
}

/// Robot variants the driver can build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotKind {
    Basic,
    Sensor,
    ContinuousSensor,
}

/// Everything needed to build a robot
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSpec {
    pub start: Point,
    pub radius: f64,
    pub speed: f64,
    pub sensor_range: Option<u32>,
    pub sensor_mode: SensorMode,
    pub angle_step: Option<u32>,
}

impl RobotSpec {
    pub fn kind(&self) -> RobotKind {
        match (self.sensor_range, self.sensor_mode) {
            (None, _) => RobotKind::Basic,
            (Some(_), SensorMode::Discrete) => RobotKind::Sensor,
            (Some(_), SensorMode::Continuous) => RobotKind::ContinuousSensor,
        }
    }
}

type RobotBuilder = fn(&RobotSpec) -> Robot;

const ROBOT_BUILDERS: [(RobotKind, RobotBuilder); 3] = [
    (RobotKind::Basic, build_basic),
    (RobotKind::Sensor, build_sensor),
    (RobotKind::ContinuousSensor, build_continuous_sensor),
];

/// Build the robot variant `spec` describes
pub fn build_robot(spec: &RobotSpec) -> Robot {
    let kind = spec.kind();
    ROBOT_BUILDERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or_else(|| build_basic(spec), |(_, build)| build(spec))
}

fn build_basic(spec: &RobotSpec) -> Robot {
    Robot::new(spec.start)
        .with_radius(spec.radius)
        .with_speed(spec.speed)
}

fn build_sensor(spec: &RobotSpec) -> Robot {
    let sensor = ProximitySensor::discrete(spec.sensor_range.unwrap_or_default());
    build_basic(spec).with_sensor(apply_angle_step(sensor, spec.angle_step))
}

fn build_continuous_sensor(spec: &RobotSpec) -> Robot {
    let sensor = ProximitySensor::continuous(spec.sensor_range.unwrap_or_default());
    build_basic(spec).with_sensor(apply_angle_step(sensor, spec.angle_step))
}

fn apply_angle_step(sensor: ProximitySensor, angle_step: Option<u32>) -> ProximitySensor {
    match angle_step {
        Some(step) => sensor.with_angle_step(step),
        None => sensor,
    }
}
