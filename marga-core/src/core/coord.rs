//! Integer grid coordinates.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell coordinate on the grid.
///
/// Cells are unit squares; the cell `(x, y)` covers the continuous
/// region `[x, x+1) × [y, y+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of the cell in continuous grid units.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    /// Euclidean distance between cell coordinates.
    #[inline]
    pub fn distance(&self, other: &Coord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev distance: the number of 8-connected moves between two
    /// cells when cost is ignored.
    #[inline]
    pub fn chebyshev_distance(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, other: Coord) -> Coord {
        Coord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, other: Coord) -> Coord {
        Coord::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[i32; 2]> for Coord {
    #[inline]
    fn from(xy: [i32; 2]) -> Self {
        Coord::new(xy[0], xy[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center() {
        let (x, y) = Coord::new(3, -2).center();
        assert_relative_eq!(x, 3.5, epsilon = 1e-6);
        assert_relative_eq!(y, -1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_distance() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-6);
        assert_relative_eq!(b.distance(&a), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Coord::new(1, 1);
        assert_eq!(a.chebyshev_distance(&Coord::new(4, 2)), 3);
        assert_eq!(a.chebyshev_distance(&Coord::new(2, 2)), 1);
        assert_eq!(a.chebyshev_distance(&a), 0);
    }

    #[test]
    fn test_operators() {
        let a = Coord::new(2, 3);
        let b = Coord::new(-1, 1);
        assert_eq!(a + b, Coord::new(1, 4));
        assert_eq!(a - b, Coord::new(3, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(7, -3).to_string(), "(7, -3)");
    }

    #[test]
    fn test_from_array() {
        assert_eq!(Coord::from([4, 5]), Coord::new(4, 5));
    }
}
