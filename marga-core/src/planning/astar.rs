//! A* search over the grid.
//!
//! Nodes live in an arena (`Vec` plus a coordinate index) and refer to
//! their parents by arena index. The open list is a binary heap keyed
//! on `f = g + h` with an insertion sequence number breaking ties, so
//! two searches of the same grid pop nodes in the same order and
//! produce the same path. A popped entry whose node was closed in the
//! meantime is stale and skipped instead of being removed eagerly.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use thiserror::Error;

use crate::core::Coord;
use crate::grid::Grid;

/// Why a search could not produce a path.
///
/// `NoPathFound` is an ordinary outcome for callers to branch on: a
/// goal walled off by discovered obstacles is expected at runtime. The
/// other variants are invalid inputs and fail fast.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("start cell {0} is blocked or out of bounds")]
    StartBlocked(Coord),

    #[error("goal cell {0} is blocked or out of bounds")]
    GoalBlocked(Coord),

    #[error("grid has no goal cell")]
    MissingGoal,

    #[error("no path exists between start and goal")]
    NoPathFound,
}

/// A successful search result.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    /// Path cells from start to goal inclusive.
    pub cells: Vec<Coord>,
    /// Total edge cost of the path (the goal's g value).
    pub cost: f32,
    /// Nodes taken from the open list and closed during the search.
    pub expanded: usize,
}

impl PlannedPath {
    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path has no cells. Successful searches never
    /// produce an empty path.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The final cell, if any.
    pub fn goal(&self) -> Option<Coord> {
        self.cells.last().copied()
    }
}

/// Straight-line distance between two cells.
///
/// Admissible and consistent for the 8-connected move set with √2
/// diagonals; a Manhattan heuristic would overestimate across
/// diagonal moves.
#[inline]
pub fn heuristic(a: Coord, b: Coord) -> f32 {
    a.distance(&b)
}

/// Arena entry. Parents are arena indices, never pointers.
#[derive(Debug)]
struct SearchNode {
    coord: Coord,
    /// Best known cost from the start. Infinity until first relaxed.
    g: f32,
    /// Heuristic to the goal, computed once per node.
    h: f32,
    parent: Option<usize>,
    closed: bool,
}

/// Open-list entry. Min-order on `f`, FIFO on `seq` for equal `f`.
#[derive(Debug)]
struct OpenEntry {
    f: f32,
    seq: u64,
    idx: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; earlier insertions win ties.
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a lowest-cost path from `start` to `goal` on the grid.
///
/// The goal test happens on selection from the open list, not on
/// generation, which is what makes the first accepted path optimal.
/// The search holds no state between calls; when the grid mutates,
/// callers discard the previous path and search again.
pub fn search(grid: &Grid, start: Coord, goal: Coord) -> Result<PlannedPath, PlanningError> {
    if !grid.is_cell_free(start) {
        return Err(PlanningError::StartBlocked(start));
    }
    if !grid.is_cell_free(goal) {
        return Err(PlanningError::GoalBlocked(goal));
    }
    if start == goal {
        return Ok(PlannedPath {
            cells: vec![start],
            cost: 0.0,
            expanded: 0,
        });
    }

    let mut arena: Vec<SearchNode> = Vec::new();
    let mut index: HashMap<Coord, usize> = HashMap::new();
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;

    arena.push(SearchNode {
        coord: start,
        g: 0.0,
        h: heuristic(start, goal),
        parent: None,
        closed: false,
    });
    index.insert(start, 0);
    open.push(OpenEntry {
        f: arena[0].h,
        seq,
        idx: 0,
    });

    let mut expanded = 0usize;

    while let Some(entry) = open.pop() {
        let idx = entry.idx;
        if arena[idx].closed {
            continue; // stale entry, node already finalized
        }

        if arena[idx].coord == goal {
            let cells = reconstruct(&arena, idx);
            let cost = arena[idx].g;
            log::debug!(
                "search {} -> {}: {} cells, cost {:.2}, {} expanded",
                start,
                goal,
                cells.len(),
                cost,
                expanded
            );
            return Ok(PlannedPath {
                cells,
                cost,
                expanded,
            });
        }

        arena[idx].closed = true;
        expanded += 1;

        let current_coord = arena[idx].coord;
        let current_g = arena[idx].g;

        for (neighbor, edge_cost) in grid.neighbors(current_coord) {
            let nidx = match index.get(&neighbor) {
                Some(&i) => i,
                None => {
                    arena.push(SearchNode {
                        coord: neighbor,
                        g: f32::INFINITY,
                        h: heuristic(neighbor, goal),
                        parent: None,
                        closed: false,
                    });
                    let i = arena.len() - 1;
                    index.insert(neighbor, i);
                    i
                }
            };

            if arena[nidx].closed {
                continue;
            }

            let tentative = current_g + edge_cost;
            if tentative >= arena[nidx].g {
                continue;
            }

            arena[nidx].g = tentative;
            arena[nidx].parent = Some(idx);
            seq += 1;
            open.push(OpenEntry {
                f: tentative + arena[nidx].h,
                seq,
                idx: nidx,
            });
        }
    }

    log::debug!(
        "search {} -> {}: no path after {} expanded",
        start,
        goal,
        expanded
    );
    Err(PlanningError::NoPathFound)
}

/// Plan from the grid's start cell to its first goal.
pub fn search_to_first_goal(grid: &Grid) -> Result<PlannedPath, PlanningError> {
    let goal = grid.first_goal().ok_or(PlanningError::MissingGoal)?;
    search(grid, grid.start(), goal)
}

/// Walk parent indices from the goal node back to the start.
fn reconstruct(arena: &[SearchNode], goal_idx: usize) -> Vec<Coord> {
    let mut cells = Vec::new();
    let mut current = Some(goal_idx);
    while let Some(idx) = current {
        cells.push(arena[idx].coord);
        current = arena[idx].parent;
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{DIAGONAL_COST, ORTHOGONAL_COST};
    use approx::assert_relative_eq;

    fn empty_grid(side: i32) -> Grid {
        Grid::new(side, side, 25.0)
    }

    /// Every step on a path must be a single 8-connected move onto a
    /// free cell.
    fn assert_valid_path(grid: &Grid, path: &PlannedPath, start: Coord, goal: Coord) {
        assert_eq!(path.cells.first(), Some(&start));
        assert_eq!(path.cells.last(), Some(&goal));
        for pair in path.cells.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(&pair[1]), 1);
            assert!(grid.is_cell_free(pair[1]));
        }
    }

    #[test]
    fn test_diagonal_across_empty_grid() {
        let grid = empty_grid(4);
        let path = search(&grid, Coord::new(0, 0), Coord::new(3, 3)).unwrap();

        assert_valid_path(&grid, &path, Coord::new(0, 0), Coord::new(3, 3));
        assert_eq!(path.len(), 4); // pure diagonal
        assert_relative_eq!(path.cost, 3.0 * DIAGONAL_COST, epsilon = 1e-5);
    }

    #[test]
    fn test_straight_line_costs_orthogonal() {
        let grid = empty_grid(5);
        let path = search(&grid, Coord::new(0, 2), Coord::new(4, 2)).unwrap();
        assert_relative_eq!(path.cost, 4.0 * ORTHOGONAL_COST, epsilon = 1e-5);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_obstacle_forces_diagonal_detour() {
        let mut grid = empty_grid(4);
        grid.add_obstacle(Coord::new(1, 0));

        let path = search(&grid, Coord::new(0, 0), Coord::new(3, 0)).unwrap();
        assert_valid_path(&grid, &path, Coord::new(0, 0), Coord::new(3, 0));

        // The detour rises to y=1 through (1,1) or (2,1) and costs two
        // diagonals plus one orthogonal, more than the blocked straight
        // line would have.
        assert!(path
            .cells
            .iter()
            .any(|c| *c == Coord::new(1, 1) || *c == Coord::new(2, 1)));
        assert_relative_eq!(
            path.cost,
            2.0 * DIAGONAL_COST + ORTHOGONAL_COST,
            epsilon = 1e-5
        );
        assert!(path.cost > 3.0 * ORTHOGONAL_COST);
    }

    #[test]
    fn test_enclosed_goal_has_no_path() {
        let mut grid = empty_grid(6);
        let goal = Coord::new(4, 4);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if (dx, dy) != (0, 0) {
                    grid.add_obstacle(Coord::new(goal.x + dx, goal.y + dy));
                }
            }
        }

        let err = search(&grid, Coord::new(0, 0), goal).unwrap_err();
        assert_eq!(err, PlanningError::NoPathFound);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = empty_grid(4);
        let path = search(&grid, Coord::new(2, 2), Coord::new(2, 2)).unwrap();
        assert_eq!(path.cells, vec![Coord::new(2, 2)]);
        assert_eq!(path.cost, 0.0);
        assert_eq!(path.expanded, 0);
    }

    #[test]
    fn test_blocked_start_fails_fast() {
        let mut grid = empty_grid(4);
        grid.add_obstacle(Coord::new(0, 0));

        let err = search(&grid, Coord::new(0, 0), Coord::new(3, 3)).unwrap_err();
        assert_eq!(err, PlanningError::StartBlocked(Coord::new(0, 0)));
    }

    #[test]
    fn test_blocked_and_out_of_bounds_goal_fail_fast() {
        let mut grid = empty_grid(4);
        grid.add_obstacle(Coord::new(3, 3));

        let err = search(&grid, Coord::new(0, 0), Coord::new(3, 3)).unwrap_err();
        assert_eq!(err, PlanningError::GoalBlocked(Coord::new(3, 3)));

        let err = search(&grid, Coord::new(0, 0), Coord::new(9, 9)).unwrap_err();
        assert_eq!(err, PlanningError::GoalBlocked(Coord::new(9, 9)));
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut grid = empty_grid(8);
        grid.add_obstacle(Coord::new(3, 3));
        grid.add_obstacle(Coord::new(3, 4));
        grid.add_obstacle(Coord::new(4, 3));

        let first = search(&grid, Coord::new(0, 0), Coord::new(7, 7)).unwrap();
        let second = search(&grid, Coord::new(0, 0), Coord::new(7, 7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_to_first_goal() {
        let mut grid = empty_grid(5);
        grid.set_start(Coord::new(0, 0));

        assert_eq!(
            search_to_first_goal(&grid).unwrap_err(),
            PlanningError::MissingGoal
        );

        grid.add_goal(Coord::new(4, 4));
        grid.add_goal(Coord::new(0, 4));
        let path = search_to_first_goal(&grid).unwrap();
        assert_eq!(path.goal(), Some(Coord::new(4, 4)));
    }

    #[test]
    fn test_heuristic_is_euclidean() {
        assert_relative_eq!(
            heuristic(Coord::new(0, 0), Coord::new(3, 4)),
            5.0,
            epsilon = 1e-6
        );
        assert_eq!(heuristic(Coord::new(2, 2), Coord::new(2, 2)), 0.0);
    }

    #[test]
    fn test_heuristic_never_overestimates_path_cost() {
        let grid = empty_grid(7);
        let start = Coord::new(0, 0);
        for x in 0..7 {
            for y in 0..7 {
                let goal = Coord::new(x, y);
                let path = search(&grid, start, goal).unwrap();
                assert!(
                    heuristic(start, goal) <= path.cost + 1e-4,
                    "heuristic overestimates cost to {}",
                    goal
                );
            }
        }
    }
}
