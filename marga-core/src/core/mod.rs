//! Core geometric types: coordinates, poses, angle math.

pub mod coord;
pub mod math;
pub mod pose;

pub use coord::Coord;
pub use pose::Pose;
