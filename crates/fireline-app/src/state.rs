//! State shared between the game loop thread and its driver.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use fireline_core::commands::DrillCommand;
use fireline_core::state::DrillSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A drill command to forward to the simulation engine.
    Drill(DrillCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles for talking to a running game loop.
///
/// The sender sits behind a `Mutex` so the state can be shared across
/// threads (`Sender` is `Send` but not `Sync`).
pub struct AppState {
    /// `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<DrillSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the loop. Returns false if no loop is running.
    pub fn send(&self, command: DrillCommand) -> bool {
        let Ok(lock) = self.command_tx.lock() else {
            return false;
        };
        match lock.as_ref() {
            Some(tx) => tx.send(GameLoopCommand::Drill(command)).is_ok(),
            None => false,
        }
    }

    /// Ask the loop to stop. Safe to call when nothing is running.
    pub fn shutdown(&self) {
        if let Ok(mut lock) = self.command_tx.lock() {
            if let Some(tx) = lock.take() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
    }

    /// Copy of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<DrillSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}
