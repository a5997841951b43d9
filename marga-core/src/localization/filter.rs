//! Monte Carlo localization over the marker grid.
//!
//! The filter owns its configuration and random source; the particle
//! belief is owned by the caller and flows through the update
//! operations by value. One cycle is:
//!
//! 1. [`ParticleFilter::motion_update`] with the odometry delta,
//! 2. [`ParticleFilter::measurement_update`] with the marker
//!    observations from the camera,
//! 3. [`ParticleFilter::estimate`] for the consensus pose.
//!
//! The measurement update resamples by inverse transform sampling on
//! the cumulative weight distribution, then unconditionally injects a
//! small fraction of fresh random particles so the belief can recover
//! from committing to a wrong mode.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::math::{deg_to_rad, rad_to_deg};
use crate::core::Pose;
use crate::grid::{Grid, MarkerObservation};

use super::motion::{MotionModel, MotionModelConfig};
use super::particle::Particle;
use super::sensor::MarkerSensorModel;

/// Configuration for the marker localization filter.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Number of particles in the belief.
    pub num_particles: usize,

    /// Odometry translation noise per axis (cells).
    pub odom_trans_sigma: f32,
    /// Odometry heading noise (degrees).
    pub odom_head_sigma: f32,

    /// Marker position matching width (cells).
    pub marker_trans_sigma: f32,
    /// Marker facing matching width (degrees).
    pub marker_rot_sigma: f32,

    /// Fraction of the belief drawn from the weighted distribution at
    /// each measurement update. The remainder is injected as fresh
    /// random particles.
    pub resample_ratio: f64,

    /// Random seed for deterministic behavior (0 for entropy).
    pub seed: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            num_particles: 1000,
            odom_trans_sigma: 0.05,
            odom_head_sigma: 2.0,
            marker_trans_sigma: 0.5,
            marker_rot_sigma: 20.0,
            resample_ratio: 0.95,
            seed: 0,
        }
    }
}

impl FilterConfig {
    /// Preset for clean simulated odometry.
    pub fn low_noise() -> Self {
        Self {
            odom_trans_sigma: 0.02,
            odom_head_sigma: 1.0,
            ..Default::default()
        }
    }

    /// Preset for global localization on larger grids.
    pub fn global_localization() -> Self {
        Self {
            num_particles: 5000,
            ..Default::default()
        }
    }
}

/// Marker-based Monte Carlo localization filter.
#[derive(Debug)]
pub struct ParticleFilter {
    config: FilterConfig,
    motion_model: MotionModel,
    sensor_model: MarkerSensorModel,
    rng: SmallRng,
}

impl ParticleFilter {
    /// Create a filter. Seed 0 draws from entropy; any other seed
    /// reproduces the run exactly.
    pub fn new(config: FilterConfig) -> Self {
        let rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };
        let motion_model = MotionModel::new(MotionModelConfig {
            trans_sigma: config.odom_trans_sigma,
            head_sigma: config.odom_head_sigma,
        });
        let sensor_model =
            MarkerSensorModel::new(config.marker_trans_sigma, config.marker_rot_sigma);

        Self {
            config,
            motion_model,
            sensor_model,
            rng,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// A fresh uniform belief of `num_particles` random particles.
    pub fn random_belief(&mut self, grid: &Grid) -> Vec<Particle> {
        Particle::create_random(self.config.num_particles, grid, &mut self.rng)
    }

    /// Propagate the belief by a robot-frame odometry delta.
    ///
    /// Each particle moves by the delta rotated into its own frame,
    /// then takes Gaussian odometry noise. Cardinality is preserved
    /// exactly; particles may leave the grid and are handled by the
    /// next measurement update.
    pub fn motion_update(&mut self, particles: &[Particle], odom: &Pose) -> Vec<Particle> {
        particles
            .iter()
            .map(|p| Particle::new(self.motion_model.sample(&p.pose, odom, &mut self.rng)))
            .collect()
    }

    /// Reweight and resample the belief against marker observations.
    ///
    /// With no observations the belief passes through unchanged. A
    /// degenerate belief, where every weight is zero, is replaced by a
    /// fresh random one rather than dividing by zero. On every other
    /// path the output is `floor(resample_ratio * num_particles)`
    /// inverse-CDF draws from the weighted input plus fresh random
    /// particles for the remainder, injected unconditionally. The
    /// configured `num_particles`, not the input length, fixes the
    /// output size, so an undersized belief is restored to the
    /// configured count here.
    pub fn measurement_update(
        &mut self,
        grid: &Grid,
        particles: Vec<Particle>,
        observations: &[MarkerObservation],
    ) -> Vec<Particle> {
        if observations.is_empty() {
            return particles;
        }

        let weights = self.weigh(grid, &particles, observations);
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            log::warn!("all particle weights are zero, re-randomizing the belief");
            return self.random_belief(grid);
        }

        // Cumulative distribution over normalized weights.
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut acc = 0.0;
        for w in &weights {
            acc += w / total;
            cumulative.push(acc);
        }

        let n = self.config.num_particles;
        let resampled = ((self.config.resample_ratio * n as f64).floor() as usize).min(n);

        let mut next = Vec::with_capacity(n);
        for _ in 0..resampled {
            let r: f64 = self.rng.gen_range(0.0..1.0);
            // Rounding can leave the last cumulative bucket short of 1.0.
            let idx = cumulative.partition_point(|&c| c < r).min(particles.len() - 1);
            next.push(particles[idx]);
        }
        for _ in resampled..n {
            next.push(Particle::random(grid, &mut self.rng));
        }
        next
    }

    /// Transient importance weights, parallel to the particles.
    ///
    /// A particle off the grid or on an obstacle weighs zero. Otherwise
    /// each observation contributes its best Gaussian match across the
    /// map markers as this particle would see them, and the
    /// contributions sum.
    fn weigh(
        &self,
        grid: &Grid,
        particles: &[Particle],
        observations: &[MarkerObservation],
    ) -> Vec<f64> {
        let markers = grid.markers();
        particles
            .iter()
            .map(|p| {
                if !grid.is_free(p.pose.x, p.pose.y) {
                    return 0.0;
                }
                let predicted: Vec<MarkerObservation> = markers
                    .iter()
                    .map(|m| MarkerObservation::from_pose(&m.pose().relative_to(&p.pose)))
                    .collect();
                observations
                    .iter()
                    .map(|obs| self.sensor_model.best_match(&predicted, obs))
                    .sum()
            })
            .collect()
    }

    /// Consensus pose: mean position with a circular mean heading.
    ///
    /// Headings average through their sine and cosine sums so a belief
    /// split across the ±180 boundary does not collapse to zero. An
    /// empty belief estimates the origin.
    pub fn estimate(&self, particles: &[Particle]) -> Pose {
        if particles.is_empty() {
            return Pose::origin();
        }

        let mut sum_x = 0.0f32;
        let mut sum_y = 0.0f32;
        let mut sum_sin = 0.0f32;
        let mut sum_cos = 0.0f32;
        for p in particles {
            sum_x += p.pose.x;
            sum_y += p.pose.y;
            let rad = deg_to_rad(p.pose.heading);
            sum_sin += rad.sin();
            sum_cos += rad.cos();
        }

        let n = particles.len() as f32;
        Pose::new(sum_x / n, sum_y / n, rad_to_deg(sum_sin.atan2(sum_cos)))
    }
}
