//! Grid world model: dimensions, obstacles, markers, start and goals.
//!
//! Cells are unit squares addressed by integer [`Coord`]s; continuous
//! positions (poses, particles) live in the same units, so flooring a
//! position yields its cell. `scale` converts a cell edge to physical
//! millimetres for consumers that need real distances.
//!
//! Mutation that can affect planning bumps a version counter. A path
//! computed against an older version is stale; callers run a fresh
//! search rather than patching the old frontier.

mod markers;

pub use markers::{Marker, MarkerObservation};

use std::collections::HashSet;

use rand::Rng;

use crate::core::Coord;

/// Cost of an orthogonal move between adjacent cells.
pub const ORTHOGONAL_COST: f32 = 1.0;
/// Cost of a diagonal move between adjacent cells.
pub const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;

/// Neighbor offsets with edge costs, clockwise from north.
const NEIGHBOR_OFFSETS: [(i32, i32, f32); 8] = [
    (0, 1, ORTHOGONAL_COST),  // N
    (1, 1, DIAGONAL_COST),    // NE
    (1, 0, ORTHOGONAL_COST),  // E
    (1, -1, DIAGONAL_COST),   // SE
    (0, -1, ORTHOGONAL_COST), // S
    (-1, -1, DIAGONAL_COST),  // SW
    (-1, 0, ORTHOGONAL_COST), // W
    (-1, 1, DIAGONAL_COST),   // NW
];

/// The world model shared by the localizer and the planner.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    scale: f32,
    obstacles: HashSet<Coord>,
    markers: Vec<Marker>,
    start: Coord,
    goals: Vec<Coord>,
    version: u64,
}

impl Grid {
    /// Create an empty grid. Start defaults to (0, 0) with no goals.
    ///
    /// Dimensions must be positive; world files validate this before
    /// construction.
    pub fn new(width: i32, height: i32, scale: f32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            scale,
            obstacles: HashSet::new(),
            markers: Vec::new(),
            start: Coord::new(0, 0),
            goals: Vec::new(),
            version: 0,
        }
    }

    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Physical size of a cell edge in millimetres.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Mutation counter. Changes whenever planning inputs change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The cell containing a continuous position.
    #[inline]
    pub fn cell_of(x: f32, y: f32) -> Coord {
        Coord::new(x.floor() as i32, y.floor() as i32)
    }

    /// Whether a cell lies on the grid.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    /// Whether a cell is on the grid and not an obstacle.
    #[inline]
    pub fn is_cell_free(&self, c: Coord) -> bool {
        self.in_bounds(c) && !self.obstacles.contains(&c)
    }

    /// Whether a continuous position lies on a free cell.
    ///
    /// False for positions off the grid.
    #[inline]
    pub fn is_free(&self, x: f32, y: f32) -> bool {
        self.is_cell_free(Self::cell_of(x, y))
    }

    /// Free neighbors of a cell with edge costs: up to 8 entries,
    /// orthogonal moves cost 1, diagonal moves cost √2. Off-grid and
    /// obstacle cells are omitted. Order is fixed (clockwise from
    /// north) so searches are deterministic.
    pub fn neighbors(&self, c: Coord) -> Vec<(Coord, f32)> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy, cost)| (Coord::new(c.x + dx, c.y + dy), cost))
            .filter(|(n, _)| self.is_cell_free(*n))
            .collect()
    }

    /// Insert an obstacle. Returns true when the grid changed; the
    /// version is bumped only in that case. Out-of-bounds cells are
    /// ignored.
    pub fn add_obstacle(&mut self, c: Coord) -> bool {
        if !self.in_bounds(c) {
            return false;
        }
        let inserted = self.obstacles.insert(c);
        if inserted {
            self.version += 1;
        }
        inserted
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Iterate over the obstacle cells.
    pub fn obstacles(&self) -> impl Iterator<Item = Coord> + '_ {
        self.obstacles.iter().copied()
    }

    /// The start cell.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Move the start cell. Bumps the version.
    pub fn set_start(&mut self, c: Coord) {
        self.start = c;
        self.version += 1;
    }

    /// Goal cells in insertion order.
    pub fn goals(&self) -> &[Coord] {
        &self.goals
    }

    /// The first goal, if any.
    pub fn first_goal(&self) -> Option<Coord> {
        self.goals.first().copied()
    }

    /// Append a goal cell. Bumps the version.
    pub fn add_goal(&mut self, c: Coord) {
        self.goals.push(c);
        self.version += 1;
    }

    /// Remove all goals. Bumps the version.
    pub fn clear_goals(&mut self) {
        self.goals.clear();
        self.version += 1;
    }

    /// The markers on this grid.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Add a marker. Markers do not affect planning, so the version is
    /// unchanged.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// A uniformly random free cell.
    ///
    /// Samples by rejection; the grid must contain at least one free
    /// cell (worlds loaded from files always do, since their start cell
    /// is validated free).
    pub fn random_free_cell<R: Rng>(&self, rng: &mut R) -> Coord {
        loop {
            let c = Coord::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if self.is_cell_free(c) {
                return c;
            }
        }
    }
}
