//! Core types and definitions for the ARMADA sandbox.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid mapping, factions, components, commands, snapshots, events,
//! the presentation contract, and constants. It has no dependency on
//! the ECS or any runtime driver.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod faction;
pub mod grid;
pub mod render;
pub mod state;
pub mod types;

pub use error::SimError;

#[cfg(test)]
mod tests;
