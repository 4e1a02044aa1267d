//! Scenario configuration
//!
//! Three files describe a run: the environment, the robot and the algorithm
//! tuning. Each is optional and falls back to defaults; YAML and TOML are
//! both accepted, picked by file extension.

use anyhow::{Context, Result};
use robosim_core::{EnvObject, Point, RoboSimError, RoboSimResult, Shape, DEFAULT_OBJECT_RADIUS};
use robosim_library::{RobotSpec, RrtConfig, SensorMode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Field representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Grid,
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
}

/// One obstacle: a bare `[x, y]` or a shaped entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObstacleEntry {
    At(Point),
    Shaped {
        pos: Point,
        #[serde(default)]
        shape: ShapeKind,
        /// Radius for circles, side length for squares
        size: Option<f64>,
    },
}

impl ObstacleEntry {
    pub fn pos(&self) -> Point {
        match self {
            ObstacleEntry::At(pos) | ObstacleEntry::Shaped { pos, .. } => *pos,
        }
    }

    pub fn to_object(&self) -> EnvObject {
        match *self {
            ObstacleEntry::At(pos) => EnvObject::obstacle(pos),
            ObstacleEntry::Shaped { pos, shape, size } => {
                let shape = match shape {
                    ShapeKind::Circle => Shape::Circle {
                        radius: size.unwrap_or(DEFAULT_OBJECT_RADIUS),
                    },
                    ShapeKind::Square => Shape::Square {
                        side: size.unwrap_or(2.0 * DEFAULT_OBJECT_RADIUS),
                    },
                };
                EnvObject::obstacle(pos).with_shape(shape)
            }
        }
    }
}

/// Explicit obstacles, or a number of randomly placed ones
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObstacleSpec {
    Count(usize),
    List(Vec<ObstacleEntry>),
}

impl Default for ObstacleSpec {
    fn default() -> Self {
        ObstacleSpec::List(Vec::new())
    }
}

/// Environment configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub kind: FieldKind,
    /// `[width, height]`
    pub size: [u32; 2],
    pub obstacles: ObstacleSpec,
    pub target_pos: Point,
    /// Step budget for the episode
    pub steps: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            kind: FieldKind::Grid,
            size: [10, 10],
            obstacles: ObstacleSpec::default(),
            target_pos: Point::new(8.0, 8.0),
            steps: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub sensor_range: u32,
    pub continuous: bool,
    /// Angular granularity in degrees, mode default when absent
    pub angle_step: Option<u32>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sensor_range: 3,
            continuous: false,
            angle_step: None,
        }
    }
}

/// Robot configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub start_pos: Point,
    pub radius: f64,
    pub speed: f64,
    pub sensor: Option<SensorConfig>,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            start_pos: Point::new(1.0, 1.0),
            radius: 0.5,
            speed: 1.0,
            sensor: None,
        }
    }
}

impl RobotConfig {
    pub fn to_spec(&self) -> RobotSpec {
        RobotSpec {
            start: self.start_pos,
            radius: self.radius,
            speed: self.speed,
            sensor_range: self.sensor.as_ref().map(|s| s.sensor_range),
            sensor_mode: match &self.sensor {
                Some(s) if s.continuous => SensorMode::Continuous,
                _ => SensorMode::Discrete,
            },
            angle_step: self.sensor.as_ref().and_then(|s| s.angle_step),
        }
    }
}

/// Planner tuning
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    pub rrt: RrtConfig,
}

/// Everything a run needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimConfig {
    pub env: EnvConfig,
    pub robot: RobotConfig,
    pub algorithm: AlgorithmConfig,
    /// Seed for obstacle placement and planner randomness
    pub seed: u64,
    /// Keep and report every visited position
    pub trace_path: bool,
}

impl SimConfig {
    /// Load each part from its file, defaulting the ones not given
    pub fn load(
        env: Option<&Path>,
        robot: Option<&Path>,
        algorithm: Option<&Path>,
    ) -> Result<Self> {
        Ok(Self {
            env: load_or_default(env)?,
            robot: load_or_default(robot)?,
            algorithm: load_or_default(algorithm)?,
            ..Self::default()
        })
    }

    /// Check value ranges; positions are checked against the field when it is built
    pub fn validate(&self) -> RoboSimResult<()> {
        let [width, height] = self.env.size;
        if width == 0 || height == 0 {
            return invalid(format!("env.size must be positive, got [{}, {}]", width, height));
        }
        if self.env.steps == 0 {
            return invalid("env.steps must be non-zero".to_string());
        }
        if !self.robot.radius.is_finite() || self.robot.radius < 0.0 {
            return invalid(format!("robot.radius must be non-negative, got {}", self.robot.radius));
        }
        if !self.robot.speed.is_finite() || self.robot.speed <= 0.0 {
            return invalid(format!("robot.speed must be positive, got {}", self.robot.speed));
        }
        if let Some(sensor) = &self.robot.sensor {
            if sensor.sensor_range == 0 {
                return invalid("robot.sensor.sensor_range must be non-zero".to_string());
            }
            if let Some(step) = sensor.angle_step {
                if step == 0 || step > 360 {
                    return invalid(format!(
                        "robot.sensor.angle_step must be within 1..=360, got {}",
                        step
                    ));
                }
            }
        }
        self.algorithm.rrt.validate()
    }
}

fn invalid(message: String) -> RoboSimResult<()> {
    Err(RoboSimError::InvalidConfig(message))
}

fn load_or_default<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => load_config_file(path),
        None => Ok(T::default()),
    }
}

/// Parse a YAML or TOML file into `T`
pub fn load_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    // Auto-detect format from file extension
    if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content)
            .with_context(|| format!("failed to parse TOML config {}", path.display()))
    } else {
        // Default to YAML for .yaml, .yml, or no extension
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML config {}", path.display()))
    }
}
