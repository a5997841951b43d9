//! Simulated robot for the closed-loop demonstration.
//!
//! The simulator keeps the true pose and the true obstacle set to
//! itself; the mission loop only sees what a real platform would
//! report: odometry deltas, marker observations from a field-of-view
//! limited camera, and obstacle discoveries at close range.

mod noise;
mod robot;

pub use noise::NoiseGenerator;
pub use robot::{MotionCommand, SimRobot};
