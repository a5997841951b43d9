//! MargaNav - closed-loop localization and planning demo.
//!
//! Loads a TOML configuration and world file, then runs a simulated
//! robot through the localize → plan → follow → discover → replan
//! loop: a particle filter tracks the pose from noisy odometry and
//! wall-marker sightings while A* replans whenever a hidden obstacle
//! turns up. The mission thread publishes belief snapshots that a
//! monitor thread logs at a fixed interval.

mod config;
mod error;
mod mission;
mod shared;
mod sim;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use marga_core::grid::Grid;

use config::NavConfig;
use error::Result;
use mission::MissionOutcome;
use shared::Monitor;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marga_nav=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("MargaNav v{}", env!("CARGO_PKG_VERSION"));

    match run(&config) {
        Ok(MissionOutcome::GoalReached { cycles }) => {
            info!("mission succeeded in {} cycles", cycles);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            warn!("mission failed: {:?}", outcome);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("mission error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Resolve the configuration: an explicit path argument, `marga.toml`
/// next to the binary, or built-in defaults.
fn load_config(args: &[String]) -> Result<NavConfig> {
    if let Some(path) = args.get(1) {
        let path = Path::new(path);
        info!("loading configuration from {:?}", path);
        return NavConfig::load(path);
    }

    let fallback = Path::new("marga.toml");
    if fallback.exists() {
        info!("loading configuration from marga.toml");
        NavConfig::load(fallback)
    } else {
        warn!("no configuration file found, using defaults");
        Ok(NavConfig::default())
    }
}

fn run(config: &NavConfig) -> Result<MissionOutcome> {
    let world_path = Path::new(&config.world.file);
    let grid = Grid::from_world_file(world_path)?;
    info!(
        "world {:?}: {}x{} cells, {} markers, {} obstacles",
        world_path,
        grid.width(),
        grid.height(),
        grid.markers().len(),
        grid.obstacle_count()
    );

    let belief = shared::new_shared_belief();
    let monitor = Monitor::spawn(
        Arc::clone(&belief),
        Duration::from_millis(config.mission.monitor_interval_ms),
    );

    let outcome = mission::run(config, grid, &belief);

    monitor.stop();
    outcome
}
