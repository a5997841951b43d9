//! Wall markers and their observations.

use serde::{Deserialize, Serialize};

use crate::core::math::{normalize_deg, rad_to_deg};
use crate::core::Pose;

/// An oriented landmark fixed to a wall cell.
///
/// Position is in continuous grid units; `heading` is the direction the
/// marker faces, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f32,
    pub y: f32,
    /// Facing direction in degrees.
    pub heading: f32,
    /// Free-text identifier; empty when unnamed.
    #[serde(default)]
    pub label: String,
}

impl Marker {
    /// Create a marker.
    pub fn new(x: f32, y: f32, heading: f32, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            heading: normalize_deg(heading),
            label: label.into(),
        }
    }

    /// The marker's pose on the grid.
    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.heading)
    }
}

/// A marker detection expressed in the observing robot's frame.
///
/// `x` is forward of the robot and `y` to its left, both in cell units;
/// `heading` is the marker's facing relative to the robot's heading, in
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerObservation {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl MarkerObservation {
    /// Create an observation, normalizing the relative heading.
    #[inline]
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_deg(heading),
        }
    }

    /// Reinterpret a robot-frame relative pose as an observation.
    #[inline]
    pub fn from_pose(relative: &Pose) -> Self {
        Self::new(relative.x, relative.y, relative.heading)
    }

    /// Straight-line distance from the robot to the marker.
    #[inline]
    pub fn range(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Bearing from the robot's forward axis to the marker, in degrees.
    #[inline]
    pub fn bearing_deg(&self) -> f32 {
        rad_to_deg(self.y.atan2(self.x))
    }
}
