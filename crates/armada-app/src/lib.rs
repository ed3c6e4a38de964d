//! ARMADA headless driver.
//!
//! Runs a `Simulation` on its own thread at a fixed frame rate and exposes
//! it through a command channel and a shared latest-snapshot slot.

pub mod game_loop;
pub mod state;

pub use armada_core as core;
