//! Faction AI for ARMADA.
//!
//! Pure decision functions for AI-controlled factions: which idle ships
//! move and where, and where stations place newly built ships.
//! No ECS dependency; operates on plain data and a caller-supplied RNG.

pub mod decision;
pub mod profiles;

pub use armada_core as core;
pub use decision::{decide_ship_order, production_cell, rendezvous_offset, ShipOrder, StationSite};
pub use profiles::{AiProfile, StationTargetPolicy};
