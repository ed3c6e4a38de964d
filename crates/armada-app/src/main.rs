//! Headless ARMADA driver.
//!
//! Runs the sandbox in real time for a fixed wall-clock duration, with the
//! faction AI playing every auto-controlled faction, then prints a summary.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use armada_app::core::commands::PlayerCommand;
use armada_app::state::DriverState;
use armada_sim::SimConfig;

#[derive(Debug, Parser)]
#[command(name = "armada", about = "Run the ARMADA fleet sandbox headless")]
struct Args {
    /// JSON simulation config; defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Wall-clock seconds to run before shutting down.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// JSON array of player commands sent once the loop is running.
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let commands: Vec<PlayerCommand> = match &args.commands {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    let mut driver = DriverState::new();
    driver.start(config)?;
    for command in commands {
        driver.send_command(command)?;
    }

    thread::sleep(Duration::from_secs_f64(args.seconds.max(0.0)));
    driver.shutdown()?;

    let Some(snapshot) = driver.snapshot() else {
        info!("no frame completed");
        return Ok(());
    };
    info!(
        frames = snapshot.time.frame,
        elapsed_secs = snapshot.time.elapsed_secs,
        units = snapshot.units.len(),
        "run finished"
    );
    for faction in &snapshot.factions {
        info!(
            faction = %faction.id,
            ships = faction.ship_count,
            stations = faction.station_count,
            auto = faction.auto_controlled,
            "faction summary"
        );
    }
    if args.dump {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
