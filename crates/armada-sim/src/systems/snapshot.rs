//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only: it never modifies the world.

use std::collections::HashMap;

use hecs::World;

use armada_core::components::{ShipState, Unit, UnitBody};
use armada_core::enums::UnitKind;
use armada_core::events::SimEvent;
use armada_core::faction::{FactionId, FactionRegistry};
use armada_core::state::{FactionView, SimSnapshot, UnitView};
use armada_core::types::{SimTime, UnitId};

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    factions: &FactionRegistry,
    time: &SimTime,
    pending_move: Option<UnitId>,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let units = build_units(world);
    SimSnapshot {
        time: *time,
        factions: build_factions(factions, &units),
        units,
        pending_move,
        events,
    }
}

pub(crate) fn unit_view(unit: &Unit, body: &UnitBody) -> UnitView {
    let (speed, in_transit, destination) = match body {
        UnitBody::Ship(ShipState { speed, transit }) => (
            Some(*speed),
            transit.is_some(),
            transit.as_ref().map(|t| t.destination_cell),
        ),
        UnitBody::Station(_) => (None, false, None),
    };
    UnitView {
        id: unit.id,
        kind: body.kind(),
        faction: unit.faction.clone(),
        cell: unit.cell,
        position: unit.position,
        heading: unit.heading,
        render: unit.render,
        speed,
        in_transit,
        destination,
    }
}

fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&Unit, &UnitBody)>()
        .iter()
        .map(|(_, (unit, body))| unit_view(unit, body))
        .collect();
    units.sort_by_key(|u| u.id);
    units
}

fn build_factions(factions: &FactionRegistry, units: &[UnitView]) -> Vec<FactionView> {
    let mut counts: HashMap<&FactionId, (u32, u32)> = HashMap::new();
    for unit in units {
        let entry = counts.entry(&unit.faction).or_default();
        match unit.kind {
            UnitKind::Ship => entry.0 += 1,
            UnitKind::Station => entry.1 += 1,
        }
    }

    factions
        .list()
        .iter()
        .map(|faction| {
            let (ship_count, station_count) = counts.get(&faction.id).copied().unwrap_or_default();
            FactionView {
                id: faction.id.clone(),
                name: faction.name.clone(),
                color: faction.color,
                auto_controlled: faction.auto_controlled,
                is_player: factions.is_player(&faction.id),
                ship_count,
                station_count,
            }
        })
        .collect()
}
