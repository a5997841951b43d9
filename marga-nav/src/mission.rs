//! The closed-loop mission: localize, plan, follow, replan.
//!
//! One cycle is: discover obstacles near the robot, re-plan when the
//! grid changed or no path exists, derive the next motion command from
//! the path, execute it, run a full filter cycle on the resulting
//! odometry and observations, then publish a snapshot. The mission
//! ends when the estimate reaches the goal, the cycle budget runs out,
//! or planning fails persistently.

use tracing::{debug, info, warn};

use marga_core::core::math::{heading_diff_deg, rad_to_deg};
use marga_core::core::{Coord, Pose};
use marga_core::grid::Grid;
use marga_core::localization::Particle;
use marga_core::planning::{self, PlannedPath, PlanningError};
use marga_core::ParticleFilter;

use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::shared::{BeliefSnapshot, SharedBelief};
use crate::sim::{MotionCommand, SimRobot};

/// Turn toward the next cell when misaligned beyond this (degrees).
const TURN_TOLERANCE_DEG: f32 = 10.0;
/// A path cell counts as reached within this distance (cells).
const CELL_TOLERANCE: f32 = 0.3;
/// Consecutive failed searches before the mission gives up.
const MAX_NO_PATH_STREAK: usize = 10;

/// How a mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    /// The estimate reached the goal cell.
    GoalReached { cycles: usize },
    /// The cycle budget ran out first.
    CyclesExhausted,
    /// Planning kept failing after obstacle discovery.
    PathUnavailable,
}

/// Run the mission to completion.
///
/// Owns the grid, the filter, the simulated robot, and the belief; the
/// only shared state is the published snapshot.
pub fn run(config: &NavConfig, mut grid: Grid, belief_out: &SharedBelief) -> Result<MissionOutcome> {
    let goal = grid
        .first_goal()
        .ok_or(NavError::Planning(PlanningError::MissingGoal))?;
    let (goal_x, goal_y) = goal.center();

    let hidden: Vec<Coord> = config
        .world
        .hidden_obstacles
        .iter()
        .map(|&xy| Coord::from(xy))
        .collect();
    let mut robot = SimRobot::new(&grid, hidden, config.sim.clone());

    let mut filter = ParticleFilter::new(config.filter.to_filter_config());

    // The start cell is known, so the belief begins concentrated there
    // and the motion noise spreads it out (tracking, not kidnapped
    // start).
    let (sx, sy) = grid.start().center();
    let mut belief = vec![
        Particle::new(Pose::new(sx, sy, 0.0));
        filter.config().num_particles
    ];
    let mut estimate = filter.estimate(&belief);

    let mut path: Option<PlannedPath> = None;
    let mut path_index = 0usize;
    let mut planned_version = grid.version();
    let mut last_expanded = 0usize;
    let mut no_path_streak = 0usize;

    info!(
        "mission start: {} -> {}, {} markers, {} hidden obstacles",
        grid.start(),
        goal,
        grid.markers().len(),
        config.world.hidden_obstacles.len()
    );

    for cycle in 1..=config.mission.max_cycles {
        // Obstacle discovery invalidates the current path via the
        // grid's version counter.
        for c in robot.visible_hidden_obstacles() {
            if grid.add_obstacle(c) {
                info!("discovered obstacle at {}", c);
            }
        }

        let stale = path.is_none() || planned_version != grid.version();
        if stale {
            let from = Grid::cell_of(estimate.x, estimate.y);
            match planning::search(&grid, from, goal) {
                Ok(p) => {
                    debug!(
                        "planned {} cells from {} (cost {:.2}, {} expanded)",
                        p.len(),
                        from,
                        p.cost,
                        p.expanded
                    );
                    last_expanded = p.expanded;
                    path = Some(p);
                    path_index = 1;
                    planned_version = grid.version();
                    no_path_streak = 0;
                }
                Err(err) => {
                    warn!("planning from {} failed: {}", from, err);
                    path = None;
                    planned_version = grid.version();
                    no_path_streak += 1;
                    if no_path_streak >= MAX_NO_PATH_STREAK {
                        return Ok(MissionOutcome::PathUnavailable);
                    }
                }
            }
        }

        let cmd = match &path {
            Some(p) => {
                // Advance past cells the estimate has already reached.
                while path_index + 1 < p.cells.len() {
                    let (cx, cy) = p.cells[path_index].center();
                    let dx = cx - estimate.x;
                    let dy = cy - estimate.y;
                    if (dx * dx + dy * dy).sqrt() > CELL_TOLERANCE {
                        break;
                    }
                    path_index += 1;
                }
                next_command(&estimate, p.cells[path_index.min(p.cells.len() - 1)])
            }
            // No path this cycle: turn in place, which costs nothing
            // and lets the camera sweep for markers.
            None => MotionCommand::TurnInPlace { degrees: 30.0 },
        };

        let odom = robot.execute(cmd);
        belief = filter.motion_update(&belief, &odom);
        let observations = robot.observe_markers(&grid);
        belief = filter.measurement_update(&grid, belief, &observations);
        estimate = filter.estimate(&belief);

        publish(
            belief_out,
            BeliefSnapshot {
                cycle,
                estimate,
                particle_count: belief.len(),
                path: path.as_ref().map(|p| p.cells.clone()),
                grid_version: grid.version(),
                expanded: last_expanded,
            },
        );

        let dx = goal_x - estimate.x;
        let dy = goal_y - estimate.y;
        if (dx * dx + dy * dy).sqrt() <= config.mission.goal_tolerance {
            info!(
                "goal {} reached in {} cycles (estimate {}, truth {})",
                goal,
                cycle,
                estimate,
                robot.true_pose()
            );
            return Ok(MissionOutcome::GoalReached { cycles: cycle });
        }
    }

    warn!(
        "cycle budget of {} exhausted, estimate {}",
        config.mission.max_cycles, estimate
    );
    Ok(MissionOutcome::CyclesExhausted)
}

/// Turn toward the next cell if misaligned, otherwise drive to it.
fn next_command(estimate: &Pose, next: Coord) -> MotionCommand {
    let (nx, ny) = next.center();
    let dx = nx - estimate.x;
    let dy = ny - estimate.y;
    let distance = (dx * dx + dy * dy).sqrt();
    let bearing = rad_to_deg(dy.atan2(dx));
    let error = heading_diff_deg(estimate.heading, bearing);

    if error.abs() > TURN_TOLERANCE_DEG {
        MotionCommand::TurnInPlace { degrees: error }
    } else {
        MotionCommand::DriveStraight {
            cells: distance.min(1.0),
        }
    }
}

fn publish(belief_out: &SharedBelief, snapshot: BeliefSnapshot) {
    if let Ok(mut guard) = belief_out.write() {
        *guard = snapshot;
    }
}
