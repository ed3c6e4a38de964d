//! ECS components for hecs entities.
//!
//! Every unit carries a `Unit` (fields shared by all units) and a
//! `UnitBody` (the ship/station sum type). Components are plain data;
//! game logic lives in the simulation systems.

use serde::{Deserialize, Serialize};

use crate::enums::UnitKind;
use crate::faction::FactionId;
use crate::types::{GridCell, RenderHandle, UnitId, WorldPos};

/// Fields shared by ships and stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    /// Owning faction. The unit refers to it; it does not own it.
    pub faction: FactionId,
    /// Authoritative grid cell. Updated only when a transit completes.
    pub cell: GridCell,
    /// Current world position as last pushed to the renderer.
    pub position: WorldPos,
    /// Facing angle about the vertical axis (radians).
    pub heading: f64,
    /// Presentation object owned by this unit.
    pub render: RenderHandle,
}

/// Variant-specific state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitBody {
    Ship(ShipState),
    Station(StationState),
}

impl UnitBody {
    pub fn kind(&self) -> UnitKind {
        match self {
            UnitBody::Ship(_) => UnitKind::Ship,
            UnitBody::Station(_) => UnitKind::Station,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipState {
    /// World units per second.
    pub speed: f64,
    /// Active transit, if the ship is moving.
    pub transit: Option<Transit>,
}

impl ShipState {
    pub fn is_in_transit(&self) -> bool {
        self.transit.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationState {
    /// Ships built by this station so far.
    pub ships_produced: u32,
}

/// Animated move between two grid cells, owned by the ship it animates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transit {
    pub origin_cell: GridCell,
    /// Cell committed on arrival; reserved for occupancy while in flight.
    pub destination_cell: GridCell,
    pub origin: WorldPos,
    pub destination: WorldPos,
    /// Simulation time at which the transit started (seconds).
    pub start_secs: f64,
    /// distance / speed (seconds).
    pub duration_secs: f64,
    /// Heading computed once at transit start.
    pub heading: f64,
}
