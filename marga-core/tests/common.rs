//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use marga_core::core::{Coord, Pose};
use marga_core::grid::{Grid, Marker, MarkerObservation};

/// A small arena with markers on the west and east walls and one
/// obstacle block in the middle.
pub fn arena() -> Grid {
    let mut grid = Grid::new(12, 10, 25.0);
    grid.set_start(Coord::new(1, 1));
    grid.add_goal(Coord::new(10, 8));

    grid.add_marker(Marker::new(0.0, 5.0, 0.0, "west"));
    grid.add_marker(Marker::new(11.0, 5.0, 180.0, "east"));
    grid.add_marker(Marker::new(6.0, 9.0, -90.0, "north"));

    for y in 3..7 {
        grid.add_obstacle(Coord::new(6, y));
    }
    grid
}

/// An open grid with no obstacles or markers.
pub fn open_grid(side: i32) -> Grid {
    Grid::new(side, side, 25.0)
}

/// Noise-free observations of every marker as seen from `pose`.
pub fn perfect_observations(grid: &Grid, pose: &Pose) -> Vec<MarkerObservation> {
    grid.markers()
        .iter()
        .map(|m| MarkerObservation::from_pose(&m.pose().relative_to(pose)))
        .collect()
}

/// A vertical wall at `x` spanning the grid's full height except for a
/// one-cell gap at `gap_y`.
pub fn add_wall_with_gap(grid: &mut Grid, x: i32, gap_y: i32) {
    for y in 0..grid.height() {
        if y != gap_y {
            grid.add_obstacle(Coord::new(x, y));
        }
    }
}
