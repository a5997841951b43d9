//! Configuration loading for MargaNav.

use std::path::Path;

use serde::Deserialize;

use marga_core::FilterConfig;

use crate::error::{NavError, Result};

/// Main configuration structure.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct NavConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub filter: FilterSection,
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub mission: MissionConfig,
}

/// World file and the obstacles hidden from the planning grid.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    /// Path to the TOML world file.
    #[serde(default = "default_world_file")]
    pub file: String,

    /// Obstacle cells present in the true world but absent from the
    /// planning grid until the robot discovers them.
    #[serde(default)]
    pub hidden_obstacles: Vec<[i32; 2]>,
}

/// Particle filter settings, mirroring `marga_core::FilterConfig`.
#[derive(Clone, Debug, Deserialize)]
pub struct FilterSection {
    #[serde(default = "default_num_particles")]
    pub num_particles: usize,

    /// Odometry translation noise per axis (cells).
    #[serde(default = "default_odom_trans_sigma")]
    pub odom_trans_sigma: f32,

    /// Odometry heading noise (degrees).
    #[serde(default = "default_odom_head_sigma")]
    pub odom_head_sigma: f32,

    /// Marker position matching width (cells).
    #[serde(default = "default_marker_trans_sigma")]
    pub marker_trans_sigma: f32,

    /// Marker facing matching width (degrees).
    #[serde(default = "default_marker_rot_sigma")]
    pub marker_rot_sigma: f32,

    /// Fraction of the belief resampled from weights each cycle.
    #[serde(default = "default_resample_ratio")]
    pub resample_ratio: f64,

    /// Filter random seed (0 for entropy).
    #[serde(default)]
    pub seed: u64,
}

/// Simulated robot settings.
#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    /// Simulation random seed (0 for entropy).
    #[serde(default)]
    pub seed: u64,

    /// True-motion slip per drive (cells).
    #[serde(default = "default_actuation_trans_sigma")]
    pub actuation_trans_sigma: f32,

    /// True-motion slip per turn (degrees).
    #[serde(default = "default_actuation_head_sigma")]
    pub actuation_head_sigma: f32,

    /// Horizontal camera field of view (degrees).
    #[serde(default = "default_camera_fov_deg")]
    pub camera_fov_deg: f32,

    /// Maximum marker detection range (cells).
    #[serde(default = "default_camera_max_range")]
    pub camera_max_range: f32,

    /// Marker observation position noise (cells).
    #[serde(default = "default_sensor_trans_sigma")]
    pub sensor_trans_sigma: f32,

    /// Marker observation facing noise (degrees).
    #[serde(default = "default_sensor_rot_sigma")]
    pub sensor_rot_sigma: f32,

    /// Range at which hidden obstacles are discovered (cells).
    #[serde(default = "default_discover_range")]
    pub discover_range: f32,
}

/// Mission loop settings.
#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    /// Cycle budget before the mission gives up.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,

    /// How close the estimate must come to the goal cell center
    /// (cells).
    #[serde(default = "default_goal_tolerance")]
    pub goal_tolerance: f32,

    /// Monitor thread reporting interval (milliseconds).
    #[serde(default = "default_monitor_interval_ms")]
    pub monitor_interval_ms: u64,
}

// Default value functions
fn default_world_file() -> String {
    "worlds/arena.toml".to_string()
}
fn default_num_particles() -> usize {
    1000
}
fn default_odom_trans_sigma() -> f32 {
    0.05
}
fn default_odom_head_sigma() -> f32 {
    2.0
}
fn default_marker_trans_sigma() -> f32 {
    0.5
}
fn default_marker_rot_sigma() -> f32 {
    20.0
}
fn default_resample_ratio() -> f64 {
    0.95
}
fn default_actuation_trans_sigma() -> f32 {
    0.05
}
fn default_actuation_head_sigma() -> f32 {
    2.0
}
fn default_camera_fov_deg() -> f32 {
    90.0
}
fn default_camera_max_range() -> f32 {
    8.0
}
fn default_sensor_trans_sigma() -> f32 {
    0.1
}
fn default_sensor_rot_sigma() -> f32 {
    5.0
}
fn default_discover_range() -> f32 {
    1.5
}
fn default_max_cycles() -> usize {
    400
}
fn default_goal_tolerance() -> f32 {
    0.7
}
fn default_monitor_interval_ms() -> u64 {
    500
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            file: default_world_file(),
            hidden_obstacles: Vec::new(),
        }
    }
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            num_particles: default_num_particles(),
            odom_trans_sigma: default_odom_trans_sigma(),
            odom_head_sigma: default_odom_head_sigma(),
            marker_trans_sigma: default_marker_trans_sigma(),
            marker_rot_sigma: default_marker_rot_sigma(),
            resample_ratio: default_resample_ratio(),
            seed: 0,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            actuation_trans_sigma: default_actuation_trans_sigma(),
            actuation_head_sigma: default_actuation_head_sigma(),
            camera_fov_deg: default_camera_fov_deg(),
            camera_max_range: default_camera_max_range(),
            sensor_trans_sigma: default_sensor_trans_sigma(),
            sensor_rot_sigma: default_sensor_rot_sigma(),
            discover_range: default_discover_range(),
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
            goal_tolerance: default_goal_tolerance(),
            monitor_interval_ms: default_monitor_interval_ms(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NavConfig =
            toml::from_str(&content).map_err(|e| NavError::Config(e.to_string()))?;
        Ok(config)
    }
}

impl FilterSection {
    /// The core filter configuration this section describes.
    pub fn to_filter_config(&self) -> FilterConfig {
        FilterConfig {
            num_particles: self.num_particles,
            odom_trans_sigma: self.odom_trans_sigma,
            odom_head_sigma: self.odom_head_sigma,
            marker_trans_sigma: self.marker_trans_sigma,
            marker_rot_sigma: self.marker_rot_sigma,
            resample_ratio: self.resample_ratio,
            seed: self.seed,
        }
    }
}
