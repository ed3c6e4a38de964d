//! Simulation snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::UnitKind;
use crate::events::SimEvent;
use crate::faction::FactionId;
use crate::types::{GridCell, RenderHandle, SimTime, UnitId, WorldPos};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    /// All units, sorted by id.
    pub units: Vec<UnitView>,
    pub factions: Vec<FactionView>,
    /// Ship awaiting a destination click, if any.
    pub pending_move: Option<UnitId>,
    /// Events raised since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// Read-only view of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub faction: FactionId,
    pub cell: GridCell,
    pub position: WorldPos,
    pub heading: f64,
    pub render: RenderHandle,
    /// Ships only.
    pub speed: Option<f64>,
    pub in_transit: bool,
    /// Destination of the active transit (ships only).
    pub destination: Option<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionView {
    pub id: FactionId,
    pub name: String,
    pub color: u32,
    pub auto_controlled: bool,
    pub is_player: bool,
    pub ship_count: u32,
    pub station_count: u32,
}
