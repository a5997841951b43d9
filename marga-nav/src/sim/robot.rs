//! The simulated robot.

use std::collections::HashSet;

use marga_core::core::{Coord, Pose};
use marga_core::grid::{Grid, MarkerObservation};

use crate::config::SimConfig;

use super::noise::NoiseGenerator;

/// Step length used when checking a drive for collisions (cells).
const DRIVE_STEP: f32 = 0.1;

/// One actuation step of the robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    /// Rotate in place by the given signed angle.
    TurnInPlace { degrees: f32 },
    /// Drive forward along the current heading.
    DriveStraight { cells: f32 },
}

/// Simulated differential-drive robot on the grid.
///
/// The true obstacle set is the planning grid's obstacles plus the
/// hidden ones from the configuration; the true pose takes actuation
/// noise the mission never sees directly.
pub struct SimRobot {
    true_pose: Pose,
    true_obstacles: HashSet<Coord>,
    hidden: Vec<Coord>,
    width: i32,
    height: i32,
    config: SimConfig,
    noise: NoiseGenerator,
}

impl SimRobot {
    /// Place a robot at the grid's start cell, facing +x.
    pub fn new(grid: &Grid, hidden: Vec<Coord>, config: SimConfig) -> Self {
        let (x, y) = grid.start().center();
        let mut true_obstacles: HashSet<Coord> = grid.obstacles().collect();
        true_obstacles.extend(hidden.iter().copied());

        Self {
            true_pose: Pose::new(x, y, 0.0),
            true_obstacles,
            hidden,
            width: grid.width(),
            height: grid.height(),
            config: config.clone(),
            noise: NoiseGenerator::new(config.seed),
        }
    }

    /// The true pose, for logging and tests only.
    pub fn true_pose(&self) -> Pose {
        self.true_pose
    }

    /// Execute a motion command against the true world.
    ///
    /// Returns the robot-frame odometry delta the platform believes it
    /// performed. The true pose additionally takes actuation noise, so
    /// the filter's odometry sigmas model real slip. A drive that
    /// would enter a true obstacle is clipped at the last free
    /// position, and the clipped distance is what gets reported.
    pub fn execute(&mut self, cmd: MotionCommand) -> Pose {
        match cmd {
            MotionCommand::TurnInPlace { degrees } => {
                let slip = self.noise.gaussian(self.config.actuation_head_sigma);
                self.true_pose = self.true_pose.apply_local(&Pose::new(0.0, 0.0, degrees + slip));
                Pose::new(0.0, 0.0, degrees)
            }
            MotionCommand::DriveStraight { cells } => {
                let free = self.free_distance(cells);
                let slip_x = self.noise.gaussian(self.config.actuation_trans_sigma);
                let slip_y = self.noise.gaussian(self.config.actuation_trans_sigma);
                self.true_pose = self
                    .true_pose
                    .apply_local(&Pose::new(free + slip_x, slip_y, 0.0));
                Pose::new(free, 0.0, 0.0)
            }
        }
    }

    /// How far the robot can drive forward before hitting a true
    /// obstacle or the grid edge, up to `cells`.
    fn free_distance(&self, cells: f32) -> f32 {
        let mut travelled = 0.0f32;
        while travelled < cells {
            let step = DRIVE_STEP.min(cells - travelled);
            let probe = self
                .true_pose
                .apply_local(&Pose::new(travelled + step, 0.0, 0.0));
            if !self.is_truly_free(probe.x, probe.y) {
                break;
            }
            travelled += step;
        }
        travelled
    }

    fn is_truly_free(&self, x: f32, y: f32) -> bool {
        let c = Grid::cell_of(x, y);
        c.x >= 0
            && c.x < self.width
            && c.y >= 0
            && c.y < self.height
            && !self.true_obstacles.contains(&c)
    }

    /// Markers currently visible to the camera, in the robot frame
    /// with sensor noise applied.
    ///
    /// A marker is visible when it is within `camera_max_range` and
    /// its bearing is inside the horizontal field of view.
    pub fn observe_markers(&mut self, grid: &Grid) -> Vec<MarkerObservation> {
        let half_fov = self.config.camera_fov_deg / 2.0;
        let mut observations = Vec::new();

        for marker in grid.markers() {
            let rel = MarkerObservation::from_pose(&marker.pose().relative_to(&self.true_pose));
            if rel.range() > self.config.camera_max_range || rel.bearing_deg().abs() > half_fov {
                continue;
            }
            observations.push(MarkerObservation::new(
                rel.x + self.noise.gaussian(self.config.sensor_trans_sigma),
                rel.y + self.noise.gaussian(self.config.sensor_trans_sigma),
                rel.heading + self.noise.gaussian(self.config.sensor_rot_sigma),
            ));
        }
        observations
    }

    /// Hidden obstacles within discovery range of the true pose.
    pub fn visible_hidden_obstacles(&self) -> Vec<Coord> {
        self.hidden
            .iter()
            .copied()
            .filter(|c| {
                let (cx, cy) = c.center();
                let dx = cx - self.true_pose.x;
                let dy = cy - self.true_pose.y;
                (dx * dx + dy * dy).sqrt() <= self.config.discover_range
            })
            .collect()
    }
}
