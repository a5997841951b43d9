//! TOML world files.
//!
//! A world file describes a complete grid: dimensions, physical scale,
//! obstacle cells, wall markers, the start cell, and goal cells.
//! Loading validates the description and fails fast on an inconsistent
//! world instead of letting it surface later as a planning error.
//!
//! ```toml
//! width = 26
//! height = 18
//! scale = 25.0
//! start = [3, 2]
//! goals = [[22, 15]]
//! obstacles = [[12, 4], [12, 5]]
//!
//! [[markers]]
//! x = 0.0
//! y = 9.0
//! heading = 0.0
//! label = "west-wall"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::Coord;
use crate::grid::{Grid, Marker};

/// Errors from loading or validating a world file.
#[derive(Error, Debug)]
pub enum WorldError {
    #[error("failed to read world file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse world file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid world: {0}")]
    Invalid(String),
}

/// On-disk world schema.
#[derive(Debug, Deserialize)]
struct WorldFile {
    width: i32,
    height: i32,
    #[serde(default = "default_scale")]
    scale: f32,
    start: [i32; 2],
    #[serde(default)]
    goals: Vec<[i32; 2]>,
    #[serde(default)]
    obstacles: Vec<[i32; 2]>,
    #[serde(default)]
    markers: Vec<Marker>,
}

fn default_scale() -> f32 {
    25.0
}

impl Grid {
    /// Load a grid from a TOML world file.
    pub fn from_world_file(path: &Path) -> Result<Grid, WorldError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_world_str(&content)
    }

    /// Parse a grid from TOML world text.
    pub fn from_world_str(text: &str) -> Result<Grid, WorldError> {
        let world: WorldFile = toml::from_str(text)?;
        world.into_grid()
    }
}

impl WorldFile {
    fn into_grid(self) -> Result<Grid, WorldError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(WorldError::Invalid(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.scale > 0.0) {
            return Err(WorldError::Invalid(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }

        let mut grid = Grid::new(self.width, self.height, self.scale);

        for xy in self.obstacles {
            let c = Coord::from(xy);
            if !grid.in_bounds(c) {
                return Err(WorldError::Invalid(format!(
                    "obstacle {} outside the {}x{} grid",
                    c, self.width, self.height
                )));
            }
            grid.add_obstacle(c);
        }

        for marker in self.markers {
            if !grid.in_bounds(Grid::cell_of(marker.x, marker.y)) {
                return Err(WorldError::Invalid(format!(
                    "marker '{}' at ({}, {}) outside the grid",
                    marker.label, marker.x, marker.y
                )));
            }
            grid.add_marker(marker);
        }

        let start = Coord::from(self.start);
        if !grid.is_cell_free(start) {
            return Err(WorldError::Invalid(format!(
                "start cell {} is blocked or out of bounds",
                start
            )));
        }
        grid.set_start(start);

        for xy in self.goals {
            let goal = Coord::from(xy);
            if !grid.is_cell_free(goal) {
                return Err(WorldError::Invalid(format!(
                    "goal cell {} is blocked or out of bounds",
                    goal
                )));
            }
            grid.add_goal(goal);
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        width = 4
        height = 3
        start = [0, 0]
    "#;

    #[test]
    fn test_minimal_world() {
        let grid = Grid::from_world_str(MINIMAL).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.scale(), 25.0); // default
        assert_eq!(grid.start(), Coord::new(0, 0));
        assert!(grid.goals().is_empty());
        assert!(grid.markers().is_empty());
    }

    #[test]
    fn test_full_world() {
        let text = r#"
            width = 6
            height = 5
            scale = 50.0
            start = [1, 1]
            goals = [[4, 4], [5, 0]]
            obstacles = [[2, 2], [3, 2]]

            [[markers]]
            x = 0.0
            y = 2.0
            heading = 0.0
            label = "west"

            [[markers]]
            x = 5.0
            y = 2.0
            heading = 180.0
        "#;
        let grid = Grid::from_world_str(text).unwrap();
        assert_eq!(grid.scale(), 50.0);
        assert_eq!(grid.obstacle_count(), 2);
        assert_eq!(grid.goals(), &[Coord::new(4, 4), Coord::new(5, 0)]);
        assert_eq!(grid.markers().len(), 2);
        assert_eq!(grid.markers()[0].label, "west");
        assert_eq!(grid.markers()[1].label, ""); // label is optional
        assert!(!grid.is_cell_free(Coord::new(2, 2)));
    }

    #[test]
    fn test_blocked_start_rejected() {
        let text = r#"
            width = 4
            height = 4
            start = [1, 1]
            obstacles = [[1, 1]]
        "#;
        let err = Grid::from_world_str(text).unwrap_err();
        assert!(matches!(err, WorldError::Invalid(_)));
        assert!(err.to_string().contains("start"));
    }

    #[test]
    fn test_blocked_goal_rejected() {
        let text = r#"
            width = 4
            height = 4
            start = [0, 0]
            goals = [[2, 2]]
            obstacles = [[2, 2]]
        "#;
        let err = Grid::from_world_str(text).unwrap_err();
        assert!(matches!(err, WorldError::Invalid(_)));
        assert!(err.to_string().contains("goal"));
    }

    #[test]
    fn test_out_of_bounds_obstacle_rejected() {
        let text = r#"
            width = 4
            height = 4
            start = [0, 0]
            obstacles = [[4, 0]]
        "#;
        let err = Grid::from_world_str(text).unwrap_err();
        assert!(matches!(err, WorldError::Invalid(_)));
    }

    #[test]
    fn test_out_of_bounds_start_rejected() {
        let text = r#"
            width = 4
            height = 4
            start = [-1, 0]
        "#;
        assert!(Grid::from_world_str(text).is_err());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let text = r#"
            width = 0
            height = 4
            start = [0, 0]
        "#;
        let err = Grid::from_world_str(text).unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }

    #[test]
    fn test_negative_scale_rejected() {
        let text = r#"
            width = 4
            height = 4
            scale = -1.0
            start = [0, 0]
        "#;
        let err = Grid::from_world_str(text).unwrap_err();
        assert!(err.to_string().contains("scale"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Grid::from_world_str("width = ").unwrap_err();
        assert!(matches!(err, WorldError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let grid = Grid::from_world_file(file.path()).unwrap();
        assert_eq!(grid.width(), 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Grid::from_world_file(Path::new("/nonexistent/world.toml")).unwrap_err();
        assert!(matches!(err, WorldError::Io(_)));
    }
}
