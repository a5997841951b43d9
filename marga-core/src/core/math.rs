//! Angle utilities for degree-based headings.
//!
//! All headings are in degrees with canonical range (-180, 180].
//! Counter-clockwise rotation is positive, 0° points along +x.
//! Trigonometry converts to radians internally.

use std::f32::consts::PI;

/// Normalize a heading in degrees to (-180, 180].
///
/// # Example
/// ```
/// use marga_core::core::math::normalize_deg;
///
/// assert_eq!(normalize_deg(270.0), -90.0);
/// assert_eq!(normalize_deg(-270.0), 90.0);
/// // Both boundary representations map to +180
/// assert_eq!(normalize_deg(180.0), 180.0);
/// assert_eq!(normalize_deg(-180.0), 180.0);
/// ```
#[inline]
pub fn normalize_deg(deg: f32) -> f32 {
    let mut h = deg % 360.0;
    if h > 180.0 {
        h -= 360.0;
    } else if h <= -180.0 {
        h += 360.0;
    }
    h
}

/// Signed shortest angular difference from `from` to `to`, in degrees.
///
/// Positive result means counter-clockwise rotation from `from` to
/// `to`. Result is in (-180, 180].
///
/// # Example
/// ```
/// use marga_core::core::math::heading_diff_deg;
///
/// assert_eq!(heading_diff_deg(0.0, 90.0), 90.0);
/// // Crossing the ±180 boundary takes the short way around
/// assert_eq!(heading_diff_deg(170.0, -170.0), 20.0);
/// ```
#[inline]
pub fn heading_diff_deg(from: f32, to: f32) -> f32 {
    normalize_deg(to - from)
}

/// Check if two headings are approximately equal (within tolerance).
///
/// Handles wrap-around at ±180 correctly.
#[inline]
pub fn headings_approx_equal(a: f32, b: f32, tolerance_deg: f32) -> bool {
    heading_diff_deg(a, b).abs() <= tolerance_deg
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Square of a value. Useful for avoiding `pow(x, 2)`.
#[inline]
pub fn sq(x: f32) -> f32 {
    x * x
}
