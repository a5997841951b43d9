//! Marker-based Monte Carlo localization and A* grid planning.
//!
//! The crate has two engines over one shared data model:
//!
//! - [`localization`] — a particle filter estimating a robot's pose on
//!   a grid world from odometry deltas and relative observations of
//!   wall markers.
//! - [`planning`] — A* search producing 8-connected lowest-cost paths
//!   between grid cells, with an explicit no-path result for
//!   replanning loops.
//!
//! [`grid::Grid`] holds the world: free and obstacle cells, markers,
//! the start cell and goal cells. Worlds load from TOML files via
//! [`Grid::from_world_file`](grid::Grid::from_world_file).
//!
//! Both engines are synchronous call-and-return algorithms with no
//! internal locking; callers own the grid and the particle belief and
//! synchronize access themselves when sharing them across threads.
//!
//! ```
//! use marga_core::core::Coord;
//! use marga_core::grid::Grid;
//! use marga_core::planning;
//!
//! let mut grid = Grid::new(6, 6, 25.0);
//! grid.add_obstacle(Coord::new(2, 0));
//!
//! let path = planning::search(&grid, Coord::new(0, 0), Coord::new(5, 0)).unwrap();
//! assert_eq!(path.cells.first(), Some(&Coord::new(0, 0)));
//! assert_eq!(path.cells.last(), Some(&Coord::new(5, 0)));
//! ```

pub mod core;
pub mod grid;
pub mod io;
pub mod localization;
pub mod planning;

pub use crate::core::{Coord, Pose};
pub use crate::grid::{Grid, Marker, MarkerObservation};
pub use crate::io::WorldError;
pub use crate::localization::{FilterConfig, Particle, ParticleFilter};
pub use crate::planning::{PlannedPath, PlanningError};
