//! Seeded Gaussian noise source shared by the simulated robot.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Draws the actuation and sensor perturbations for [`SimRobot`].
///
/// [`SimRobot`]: super::SimRobot
#[derive(Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Seed 0 draws from OS entropy; any other seed replays the same
    /// perturbation sequence run after run.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// A zero-mean Gaussian draw scaled by `sigma`. A sigma of zero
    /// short-circuits to exactly 0.0 so noise-free test runs stay
    /// bit-reproducible.
    #[inline]
    pub fn gaussian(&mut self, sigma: f32) -> f32 {
        if sigma == 0.0 {
            return 0.0;
        }
        let n: f32 = self.rng.sample(StandardNormal);
        n * sigma
    }
}
