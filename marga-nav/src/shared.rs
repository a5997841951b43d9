//! Shared belief snapshots and the monitor thread.
//!
//! The mission thread owns the grid, the filter, and the belief; it
//! publishes an immutable [`BeliefSnapshot`] after every cycle through
//! an `Arc<RwLock<...>>`. The monitor thread is the only other reader
//! and logs one status line per interval until it is told to stop.

use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use tracing::{error, info};

use marga_core::core::{Coord, Pose};

/// One published view of the mission state.
#[derive(Debug, Clone, Default)]
pub struct BeliefSnapshot {
    pub cycle: usize,
    pub estimate: Pose,
    pub particle_count: usize,
    /// The current planned path, if one exists.
    pub path: Option<Vec<Coord>>,
    pub grid_version: u64,
    /// Nodes expanded by the most recent search.
    pub expanded: usize,
}

/// Handle on the shared snapshot.
pub type SharedBelief = Arc<RwLock<BeliefSnapshot>>;

/// Create an empty shared snapshot.
pub fn new_shared_belief() -> SharedBelief {
    Arc::new(RwLock::new(BeliefSnapshot::default()))
}

/// Background thread logging belief snapshots at a fixed interval.
pub struct Monitor {
    handle: JoinHandle<()>,
    shutdown_tx: Sender<()>,
}

impl Monitor {
    /// Spawn the monitor thread.
    pub fn spawn(belief: SharedBelief, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("monitor".into())
            .spawn(move || run(belief, interval, shutdown_rx))
            .expect("failed to spawn monitor thread");

        Self {
            handle,
            shutdown_tx,
        }
    }

    /// Signal shutdown and wait for the thread to finish.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if self.handle.join().is_err() {
            error!("monitor thread panicked");
        }
    }
}

fn run(belief: SharedBelief, interval: Duration, shutdown: Receiver<()>) {
    let ticker = tick(interval);
    loop {
        select! {
            recv(ticker) -> _ => {
                let snapshot = match belief.read() {
                    Ok(guard) => guard.clone(),
                    Err(_) => return, // writer panicked, nothing left to report
                };
                let path_len = snapshot.path.as_ref().map_or(0, |p| p.len());
                info!(
                    "cycle {}: estimate {}, {} particles, path {} cells (grid v{}, {} expanded)",
                    snapshot.cycle,
                    snapshot.estimate,
                    snapshot.particle_count,
                    path_len,
                    snapshot.grid_version,
                    snapshot.expanded,
                );
            }
            recv(shutdown) -> _ => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_starts_and_stops_cleanly() {
        let belief = new_shared_belief();
        belief.write().unwrap().cycle = 3;

        let monitor = Monitor::spawn(Arc::clone(&belief), Duration::from_millis(10));
        thread::sleep(Duration::from_millis(30));
        monitor.stop();
    }

    #[test]
    fn test_snapshot_is_cloned_not_shared() {
        let belief = new_shared_belief();
        let read = belief.read().unwrap().clone();
        belief.write().unwrap().cycle = 9;
        assert_eq!(read.cycle, 0);
    }
}
