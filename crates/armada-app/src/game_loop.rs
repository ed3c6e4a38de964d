//! Game loop thread: runs the simulation at a fixed frame rate and
//! publishes snapshots.
//!
//! The simulation is built on the caller's thread so configuration errors
//! surface before anything is spawned, then moved into the loop. Commands
//! arrive via `mpsc`; the latest snapshot is stored in shared state for
//! polling.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use armada_core::constants::{FRAME_DT, FRAME_RATE};
use armada_core::state::SimSnapshot;
use armada_sim::{HeadlessRenderer, SimConfig, Simulation};

use crate::state::{DriverError, LoopCommand, SharedSnapshot};

/// Wall-clock duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Frames between periodic progress logs.
const LOG_EVERY_FRAMES: u64 = FRAME_RATE as u64 * 10;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: SharedSnapshot,
) -> Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>), DriverError> {
    let mut renderer = HeadlessRenderer::new();
    renderer.add_ground_plane();
    let sim = Simulation::new(config, renderer)?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let thread = std::thread::Builder::new()
        .name("armada-game-loop".into())
        .spawn(move || run_game_loop(sim, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, thread))
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    mut sim: Simulation<HeadlessRenderer>,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    info!(frame_rate = FRAME_RATE, "game loop started");
    let mut next_frame_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut sim, &cmd_rx) {
            sim.stop_ai();
            info!(
                frame = sim.time().frame,
                elapsed_secs = sim.time().elapsed_secs,
                units = sim.unit_count(),
                "game loop shutting down"
            );
            return;
        }

        // 2. Advance one frame
        let snapshot = sim.tick(FRAME_DT);
        if snapshot.time.frame % LOG_EVERY_FRAMES == 0 {
            debug!(
                frame = snapshot.time.frame,
                units = snapshot.units.len(),
                ai_passes = sim.ai_scheduler().passes(),
                "frame"
            );
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset rather than spiral into catch-up.
            next_frame_time = now;
        }
    }
}

/// Queue every pending command. Returns false when the loop should stop.
fn drain_commands(sim: &mut Simulation<HeadlessRenderer>, cmd_rx: &mpsc::Receiver<LoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(LoopCommand::Player(cmd)) => sim.queue_command(cmd),
            Ok(LoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}
