//! Marker observation likelihoods.
//!
//! Scores an observed marker against a predicted one with an
//! unnormalized Gaussian kernel over the position and facing errors.
//! Correspondence is greedy: an observation is scored against every
//! map marker and the best match wins, so the model needs no data
//! association step.

use crate::core::math::heading_diff_deg;
use crate::grid::MarkerObservation;

/// Gaussian kernel widths for marker matching.
#[derive(Debug, Clone, Copy)]
pub struct MarkerSensorModel {
    /// Position error width (cells, one standard deviation).
    pub trans_sigma: f32,
    /// Facing error width (degrees, one standard deviation).
    pub rot_sigma: f32,
}

impl Default for MarkerSensorModel {
    fn default() -> Self {
        Self {
            trans_sigma: 0.5,
            rot_sigma: 20.0,
        }
    }
}

impl MarkerSensorModel {
    /// Create a sensor model with the given kernel widths.
    pub fn new(trans_sigma: f32, rot_sigma: f32) -> Self {
        Self {
            trans_sigma,
            rot_sigma,
        }
    }

    /// Unnormalized likelihood of seeing `observed` when the marker
    /// actually sits at `predicted`, both in the robot frame.
    ///
    /// Returns 1.0 at zero error and falls off with the squared
    /// position and facing errors. The facing error is the shortest
    /// angular difference, so headings compare correctly across ±180.
    pub fn likelihood(&self, predicted: &MarkerObservation, observed: &MarkerObservation) -> f64 {
        let dx = (predicted.x - observed.x) as f64;
        let dy = (predicted.y - observed.y) as f64;
        let dh = heading_diff_deg(observed.heading, predicted.heading) as f64;

        let st2 = (self.trans_sigma as f64) * (self.trans_sigma as f64);
        let sr2 = (self.rot_sigma as f64) * (self.rot_sigma as f64);

        let q = (dx * dx) / (2.0 * st2) + (dy * dy) / (2.0 * st2) + (dh * dh) / (2.0 * sr2);
        (-q).exp()
    }

    /// Best likelihood of `observed` across all predicted markers.
    ///
    /// Zero when there are no predictions, which makes a marker-less
    /// grid weigh every particle at zero.
    pub fn best_match(&self, predicted: &[MarkerObservation], observed: &MarkerObservation) -> f64 {
        predicted
            .iter()
            .map(|p| self.likelihood(p, observed))
            .fold(0.0, f64::max)
    }
}
