//! Odometry-driven motion model.
//!
//! Propagates a pose hypothesis by a robot-frame odometry delta, then
//! perturbs it with zero-mean Gaussian noise: translation noise per
//! axis in cells, heading noise in degrees.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::core::Pose;

/// Gaussian noise widths for the motion update.
#[derive(Debug, Clone, Copy)]
pub struct MotionModelConfig {
    /// Translation noise per axis (cells, one standard deviation).
    pub trans_sigma: f32,
    /// Heading noise (degrees, one standard deviation).
    pub head_sigma: f32,
}

impl Default for MotionModelConfig {
    fn default() -> Self {
        Self {
            trans_sigma: 0.05,
            head_sigma: 2.0,
        }
    }
}

impl MotionModelConfig {
    /// Noise-free preset: the motion update becomes the exact odometry
    /// composition.
    pub fn exact() -> Self {
        Self {
            trans_sigma: 0.0,
            head_sigma: 0.0,
        }
    }
}

/// Samples noisy pose propagations.
#[derive(Debug, Clone)]
pub struct MotionModel {
    config: MotionModelConfig,
}

impl MotionModel {
    /// Create a motion model.
    pub fn new(config: MotionModelConfig) -> Self {
        Self { config }
    }

    /// Propagate `pose` by the robot-frame `odom` delta and perturb.
    ///
    /// The delta's translation is rotated into the pose's own frame
    /// before translating, so two particles facing different ways move
    /// in different world directions under the same odometry.
    pub fn sample<R: Rng>(&self, pose: &Pose, odom: &Pose, rng: &mut R) -> Pose {
        let moved = pose.apply_local(odom);
        Pose::new(
            moved.x + gaussian(self.config.trans_sigma, rng),
            moved.y + gaussian(self.config.trans_sigma, rng),
            moved.heading + gaussian(self.config.head_sigma, rng),
        )
    }
}

/// Zero-mean Gaussian sample with the given standard deviation.
fn gaussian<R: Rng>(sigma: f32, rng: &mut R) -> f32 {
    if sigma == 0.0 {
        return 0.0;
    }
    let n: f32 = rng.sample(StandardNormal);
    n * sigma
}
