//! Simulation engine for ARMADA.
//!
//! Owns the hecs ECS world of ships and stations, the pending move order,
//! the production ledger and the AI scheduler, and turns pointer events
//! into commands through the `CommandRouter`.

pub mod config;
pub mod engine;
pub mod headless;
pub mod orders;
pub mod production;
pub mod router;
pub mod scheduler;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use armada_core as core;
pub use config::{ConfigError, SimConfig};
pub use engine::Simulation;
pub use headless::HeadlessRenderer;
pub use router::CommandRouter;
