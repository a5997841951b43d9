//! Monte Carlo localization.
//!
//! The belief over the robot's pose is a set of [`Particle`]
//! hypotheses. [`ParticleFilter`] propagates the belief through noisy
//! odometry ([`MotionModel`]) and reweights it against wall-marker
//! observations ([`MarkerSensorModel`]) before importance resampling.

mod filter;
mod motion;
mod particle;
mod sensor;

pub use filter::{FilterConfig, ParticleFilter};
pub use motion::{MotionModel, MotionModelConfig};
pub use particle::Particle;
pub use sensor::MarkerSensorModel;
