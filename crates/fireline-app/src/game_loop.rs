//! Game loop thread: runs the simulation engine at the tick rate.
//!
//! The engine is created inside the thread so it never crosses threads.
//! Commands arrive via `mpsc`. Each snapshot is sent to the driver's
//! channel and stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use fireline_core::constants::TICK_RATE;
use fireline_core::error::SimError;
use fireline_core::state::DrillSnapshot;
use fireline_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. The loop ends on
/// `Shutdown`, when the command channel disconnects, or when the snapshot
/// receiver is dropped.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<DrillSnapshot>>>,
    snapshot_tx: mpsc::Sender<DrillSnapshot>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), SimError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("fireline-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot, &snapshot_tx);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until shutdown or disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<DrillSnapshot>>,
    snapshot_tx: &mpsc::Sender<DrillSnapshot>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    info!("Game loop running at {} Hz", TICK_RATE);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Drill(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("Game loop stopped at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for polling, then hand it to the driver
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        if snapshot_tx.send(snapshot).is_err() {
            debug!("Snapshot receiver dropped; stopping game loop");
            return;
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = tick_duration(engine.time_scale());
        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Wall-clock length of one tick at the given time scale.
pub fn tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}
