//! Player commands sent from the input layer to the simulation.
//!
//! Commands either execute immediately (`Simulation::execute`) or are
//! queued and drained at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::{GridCell, UnitId};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Production ---
    /// Create a player ship at a grid cell.
    CreateShip { cell: GridCell },
    /// Build a ship from a station, subject to the production cooldown.
    CreateShipFromStation { station: UnitId },

    // --- Movement ---
    /// Arm the pending move order with this ship ("Move to...").
    OrderMove { ship: UnitId },
    /// Complete the pending move order at a cell.
    SelectMoveTarget { cell: GridCell },
    /// Clear the pending move order.
    CancelMove,
    /// Move a ship directly, bypassing the pending slot.
    MoveShip { ship: UnitId, cell: GridCell },

    // --- Factions ---
    /// Flip AI control for the faction owning this station.
    ToggleFactionAi { station: UnitId },
}
