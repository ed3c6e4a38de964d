//! Faction AI decision pass.
//!
//! For each auto-controlled faction: idle ships may receive a move order
//! (decided by `armada_faction_ai`), then every station tries to produce.
//! Orders go through the same store operations a player uses.

use hecs::World;
use serde::Serialize;
use tracing::debug;

use armada_core::components::{Unit, UnitBody};
use armada_core::faction::FactionId;
use armada_core::render::RenderAdapter;
use armada_core::types::{GridCell, UnitId};
use armada_faction_ai::{decide_ship_order, StationSite};

use crate::engine::Simulation;

/// What one pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AiPassReport {
    /// Auto-controlled factions processed.
    pub factions: u32,
    pub orders_issued: u32,
    pub ships_produced: u32,
}

impl AiPassReport {
    /// True when the pass changed nothing.
    pub fn is_idle(&self) -> bool {
        self.orders_issued == 0 && self.ships_produced == 0
    }
}

/// Run one decision pass. A no-op when no faction is auto-controlled.
pub fn run<R: RenderAdapter>(sim: &mut Simulation<R>) -> AiPassReport {
    let mut report = AiPassReport::default();
    let ai_factions = sim.factions.auto_controlled_ids();
    if ai_factions.is_empty() {
        return report;
    }

    let stations = station_sites(&sim.world);

    for faction in &ai_factions {
        report.factions += 1;

        for (ship, cell) in idle_ships(&sim.world, faction) {
            let Some(order) = decide_ship_order(&sim.config.ai, faction, cell, &stations, &mut sim.rng) else {
                continue;
            };
            if sim.move_ship_to(ship, order.target()).is_some() {
                report.orders_issued += 1;
            }
        }

        let own_stations: Vec<UnitId> = stations
            .iter()
            .filter(|s| &s.faction == faction)
            .map(|s| s.id)
            .collect();
        for station in own_stations {
            if sim.attempt_production(station).is_some() {
                report.ships_produced += 1;
            }
        }
    }

    debug!(
        factions = report.factions,
        orders = report.orders_issued,
        produced = report.ships_produced,
        "AI pass complete"
    );
    report
}

/// Every station in the world, in id order.
fn station_sites(world: &World) -> Vec<StationSite> {
    let mut sites: Vec<StationSite> = world
        .query::<(&Unit, &UnitBody)>()
        .iter()
        .filter(|(_, (_, body))| matches!(body, UnitBody::Station(_)))
        .map(|(_, (unit, _))| StationSite {
            id: unit.id,
            faction: unit.faction.clone(),
            cell: unit.cell,
        })
        .collect();
    sites.sort_by_key(|s| s.id);
    sites
}

/// Non-transiting ships of `faction`, in id order.
fn idle_ships(world: &World, faction: &FactionId) -> Vec<(UnitId, GridCell)> {
    let mut ships: Vec<(UnitId, GridCell)> = world
        .query::<(&Unit, &UnitBody)>()
        .iter()
        .filter(|(_, (unit, _))| &unit.faction == faction)
        .filter_map(|(_, (unit, body))| match body {
            UnitBody::Ship(ship) if !ship.is_in_transit() => Some((unit.id, unit.cell)),
            _ => None,
        })
        .collect();
    ships.sort_by_key(|(id, _)| *id);
    ships
}
