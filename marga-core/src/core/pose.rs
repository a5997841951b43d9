//! Robot pose on the grid plane.

use super::math::{deg_to_rad, heading_diff_deg, normalize_deg};

/// A pose: position in continuous grid-cell units, heading in degrees.
///
/// The heading follows the grid convention: 0° along +x,
/// counter-clockwise positive, canonical range (-180, 180].
/// Constructors normalize the heading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees, (-180, 180].
    pub heading: f32,
}

impl Pose {
    /// Create a pose, normalizing the heading.
    #[inline]
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_deg(heading),
        }
    }

    /// The origin pose (0, 0, 0°).
    #[inline]
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Apply a displacement expressed in this pose's local frame.
    ///
    /// Rotates `(delta.x, delta.y)` by the current heading, translates,
    /// and adds the heading change. This is the composition used for
    /// odometry deltas: x forward, y left, heading counter-clockwise.
    ///
    /// # Example
    /// ```
    /// use marga_core::core::Pose;
    ///
    /// let pose = Pose::new(2.0, 1.0, 90.0); // facing +y
    /// let moved = pose.apply_local(&Pose::new(1.0, 0.0, 0.0));
    /// assert!((moved.x - 2.0).abs() < 1e-5);
    /// assert!((moved.y - 2.0).abs() < 1e-5);
    /// ```
    #[inline]
    pub fn apply_local(&self, delta: &Pose) -> Pose {
        let (sin, cos) = deg_to_rad(self.heading).sin_cos();
        Pose::new(
            self.x + delta.x * cos - delta.y * sin,
            self.y + delta.x * sin + delta.y * cos,
            self.heading + delta.heading,
        )
    }

    /// Express this pose in `reference`'s local frame.
    ///
    /// Inverse of [`Pose::apply_local`]:
    /// `reference.apply_local(&pose.relative_to(&reference))` recovers
    /// `pose`. The heading of the result is the shortest signed
    /// difference between the two headings.
    #[inline]
    pub fn relative_to(&self, reference: &Pose) -> Pose {
        let (sin, cos) = deg_to_rad(reference.heading).sin_cos();
        let dx = self.x - reference.x;
        let dy = self.y - reference.y;
        Pose::new(
            dx * cos + dy * sin,
            -dx * sin + dy * cos,
            heading_diff_deg(reference.heading, self.heading),
        )
    }

    /// Euclidean distance to another pose's position.
    #[inline]
    pub fn distance_to(&self, other: &Pose) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Approximate equality with separate position and heading
    /// tolerances. Heading comparison wraps at ±180.
    pub fn approx_eq(&self, other: &Pose, pos_epsilon: f32, heading_epsilon_deg: f32) -> bool {
        self.distance_to(other) <= pos_epsilon
            && heading_diff_deg(self.heading, other.heading).abs() <= heading_epsilon_deg
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.1}°)", self.x, self.y, self.heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes_heading() {
        let pose = Pose::new(1.0, 2.0, 450.0);
        assert_relative_eq!(pose.heading, 90.0, epsilon = 1e-4);

        let pose = Pose::new(0.0, 0.0, -180.0);
        assert_relative_eq!(pose.heading, 180.0, epsilon = 1e-6);
    }

    #[test]
    fn test_apply_local_identity_heading() {
        let pose = Pose::new(3.0, 4.0, 0.0);
        let moved = pose.apply_local(&Pose::new(1.0, 0.5, 0.0));
        assert_relative_eq!(moved.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(moved.y, 4.5, epsilon = 1e-5);
        assert_relative_eq!(moved.heading, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_apply_local_rotated() {
        // Facing +y: local forward becomes world +y
        let pose = Pose::new(0.0, 0.0, 90.0);
        let moved = pose.apply_local(&Pose::new(2.0, 0.0, 0.0));
        assert_relative_eq!(moved.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(moved.y, 2.0, epsilon = 1e-5);

        // Facing -x: local forward becomes world -x, local left becomes world -y
        let pose = Pose::new(0.0, 0.0, 180.0);
        let moved = pose.apply_local(&Pose::new(1.0, 1.0, 0.0));
        assert_relative_eq!(moved.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(moved.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_apply_local_adds_heading() {
        let pose = Pose::new(0.0, 0.0, 170.0);
        let moved = pose.apply_local(&Pose::new(0.0, 0.0, 20.0));
        assert_relative_eq!(moved.heading, -170.0, epsilon = 1e-4);
    }

    #[test]
    fn test_relative_to_roundtrip() {
        let reference = Pose::new(2.0, -1.0, 37.0);
        let pose = Pose::new(5.0, 3.0, -120.0);

        let rel = pose.relative_to(&reference);
        let back = reference.apply_local(&rel);

        assert!(back.approx_eq(&pose, 1e-4, 1e-3));
    }

    #[test]
    fn test_relative_to_axes() {
        // A point one cell ahead of a robot facing +y is at local (1, 0)
        let reference = Pose::new(0.0, 0.0, 90.0);
        let pose = Pose::new(0.0, 1.0, 90.0);
        let rel = pose.relative_to(&reference);
        assert_relative_eq!(rel.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(rel.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(rel.heading, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_distance_to() {
        let a = Pose::new(0.0, 0.0, 0.0);
        let b = Pose::new(3.0, 4.0, 90.0);
        assert_relative_eq!(a.distance_to(&b), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_approx_eq_heading_wrap() {
        let a = Pose::new(1.0, 1.0, 179.5);
        let b = Pose::new(1.0, 1.0, -179.5);
        assert!(a.approx_eq(&b, 1e-6, 1.5));
        assert!(!a.approx_eq(&b, 1e-6, 0.5));
    }
}
