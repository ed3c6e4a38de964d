//! Driver state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::info;

use armada_core::commands::PlayerCommand;
use armada_core::state::SimSnapshot;
use armada_sim::{ConfigError, SimConfig};

use crate::game_loop;

/// Latest snapshot written by the game loop after every frame.
pub type SharedSnapshot = Arc<Mutex<Option<SimSnapshot>>>;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the simulation.
    Player(PlayerCommand),
    /// Stop the AI scheduler and end the loop.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotRunning,
    #[error("game loop has exited")]
    LoopGone,
    #[error("game loop thread panicked")]
    LoopPanicked,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Handle to a running game loop.
struct LoopHandle {
    command_tx: mpsc::Sender<LoopCommand>,
    thread: JoinHandle<()>,
}

/// Owns the game loop lifecycle: start, command forwarding, snapshot
/// polling and shutdown.
#[derive(Default)]
pub struct DriverState {
    running: Option<LoopHandle>,
    latest_snapshot: SharedSnapshot,
}

impl DriverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the simulation and start the game loop thread.
    pub fn start(&mut self, config: SimConfig) -> Result<(), DriverError> {
        if self.running.is_some() {
            return Err(DriverError::AlreadyRunning);
        }
        let (command_tx, thread) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;
        self.running = Some(LoopHandle { command_tx, thread });
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Forward a player command; it runs at the next frame boundary.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), DriverError> {
        let handle = self.running.as_ref().ok_or(DriverError::NotRunning)?;
        handle
            .command_tx
            .send(LoopCommand::Player(command))
            .map_err(|_| DriverError::LoopGone)
    }

    /// Latest snapshot, if the loop has completed a frame.
    pub fn snapshot(&self) -> Option<SimSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    pub fn shared_snapshot(&self) -> SharedSnapshot {
        self.latest_snapshot.clone()
    }

    /// Stop the loop and wait for its thread to exit.
    pub fn shutdown(&mut self) -> Result<(), DriverError> {
        let handle = self.running.take().ok_or(DriverError::NotRunning)?;
        // The loop may already have exited; joining is what matters.
        let _ = handle.command_tx.send(LoopCommand::Shutdown);
        handle.thread.join().map_err(|_| DriverError::LoopPanicked)?;
        info!("game loop stopped");
        Ok(())
    }
}

impl Drop for DriverState {
    fn drop(&mut self) {
        if self.running.is_some() {
            let _ = self.shutdown();
        }
    }
}
