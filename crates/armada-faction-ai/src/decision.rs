//! Per-ship and per-station decisions for AI factions.
//!
//! Pure functions that compute movement targets and spawn cells from
//! plain inputs. The simulation applies the results.

use rand::seq::SliceRandom;
use rand::Rng;

use armada_core::faction::FactionId;
use armada_core::types::{GridCell, UnitId};

use crate::profiles::{AiProfile, StationTargetPolicy};

/// A station as seen by the AI when picking rendezvous targets.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSite {
    pub id: UnitId,
    pub faction: FactionId,
    pub cell: GridCell,
}

/// Movement order chosen for one idle ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipOrder {
    /// Random cell within the wander range of the ship.
    Wander { target: GridCell },
    /// Cell next to a station.
    Rendezvous { station: UnitId, target: GridCell },
}

impl ShipOrder {
    pub fn target(&self) -> GridCell {
        match *self {
            ShipOrder::Wander { target } | ShipOrder::Rendezvous { target, .. } => target,
        }
    }
}

/// Decide whether an idle ship moves this pass and where to.
///
/// Returns `None` when the ship sits this pass out.
pub fn decide_ship_order<R: Rng + ?Sized>(
    profile: &AiProfile,
    faction: &FactionId,
    ship_cell: GridCell,
    stations: &[StationSite],
    rng: &mut R,
) -> Option<ShipOrder> {
    if !rng.gen_bool(profile.move_chance.clamp(0.0, 1.0)) {
        return None;
    }

    if rng.gen_bool(profile.wander_chance.clamp(0.0, 1.0)) {
        return Some(wander(profile, ship_cell, rng));
    }

    let candidates: Vec<&StationSite> = match profile.station_targets {
        StationTargetPolicy::AnyOwner => stations.iter().collect(),
        StationTargetPolicy::OwnFaction => stations.iter().filter(|s| &s.faction == faction).collect(),
    };

    match candidates.choose(rng) {
        Some(station) => {
            let (dx, dy) = rendezvous_offset(rng, profile.station_offset_range);
            Some(ShipOrder::Rendezvous {
                station: station.id,
                target: station.cell.offset(dx, dy),
            })
        }
        // No stations to visit: wander instead.
        None => Some(wander(profile, ship_cell, rng)),
    }
}

fn wander<R: Rng + ?Sized>(profile: &AiProfile, ship_cell: GridCell, rng: &mut R) -> ShipOrder {
    let range = profile.wander_range;
    let dx = rng.gen_range(-range..=range);
    let dy = rng.gen_range(-range..=range);
    ShipOrder::Wander {
        target: ship_cell.offset(dx, dy),
    }
}

/// Random offset in `[-range, range]` on each axis, never `(0, 0)`.
///
/// A zero offset is coerced to `(1, dy)`, i.e. `(1, 0)`, so the result
/// never lands exactly on the station.
pub fn rendezvous_offset<R: Rng + ?Sized>(rng: &mut R, range: i32) -> (i32, i32) {
    let dx = rng.gen_range(-range..=range);
    let dy = rng.gen_range(-range..=range);
    if dx == 0 && dy == 0 {
        (1, dy)
    } else {
        (dx, dy)
    }
}

/// Cell at which a station places a newly built ship.
pub fn production_cell<R: Rng + ?Sized>(station_cell: GridCell, profile: &AiProfile, rng: &mut R) -> GridCell {
    let (dx, dy) = rendezvous_offset(rng, profile.station_offset_range);
    station_cell.offset(dx, dy)
}
