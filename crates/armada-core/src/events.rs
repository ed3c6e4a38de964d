//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::UnitKind;
use crate::faction::FactionId;
use crate::types::{GridCell, UnitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    UnitCreated {
        unit: UnitId,
        kind: UnitKind,
        faction: FactionId,
        cell: GridCell,
    },
    UnitDestroyed {
        unit: UnitId,
    },
    TransitStarted {
        ship: UnitId,
        from: GridCell,
        to: GridCell,
        duration_secs: f64,
    },
    TransitCompleted {
        ship: UnitId,
        cell: GridCell,
    },
    /// A production attempt hit the station cooldown.
    ProductionBlocked {
        station: UnitId,
        remaining_secs: f64,
    },
    FactionAiToggled {
        faction: FactionId,
        enabled: bool,
    },
    MoveOrderPending {
        ship: UnitId,
    },
    MoveOrderCleared,
}
