//! Grid path planning.

mod astar;

pub use astar::{heuristic, search, search_to_first_goal, PlannedPath, PlanningError};
