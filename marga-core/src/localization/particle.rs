//! Pose hypotheses.

use rand::Rng;

use crate::core::Pose;
use crate::grid::Grid;

/// A single pose hypothesis.
///
/// Importance weights are transient to the measurement update and are
/// never stored on the particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pose: Pose,
}

impl Particle {
    /// Create a particle at the given pose.
    #[inline]
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    /// A particle at the center of a uniformly random free cell with a
    /// uniformly random heading.
    pub fn random<R: Rng>(grid: &Grid, rng: &mut R) -> Self {
        let (x, y) = grid.random_free_cell(rng).center();
        let heading = rng.gen_range(-180.0f32..180.0);
        Self::new(Pose::new(x, y, heading))
    }

    /// A batch of random particles.
    pub fn create_random<R: Rng>(count: usize, grid: &Grid, rng: &mut R) -> Vec<Particle> {
        (0..count).map(|_| Self::random(grid, rng)).collect()
    }
}
