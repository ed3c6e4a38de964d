//! Systems that operate on the simulation world.
//!
//! `transit` and `snapshot` are pure functions over `&mut World` / `&World`.
//! `faction_ai` drives the same store operations a player would use, so it
//! takes the whole simulation.

pub mod faction_ai;
pub mod snapshot;
pub mod transit;
