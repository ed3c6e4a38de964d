//! Station production and its cooldown ledger.
//!
//! The ledger is the only record of when a station last built a ship.
//! Player menus and the faction AI both go through
//! `Simulation::attempt_production`, so the cooldown check and the stamp
//! can never diverge between callers.

use std::collections::HashMap;

use tracing::{debug, info};

use armada_core::components::{Unit, UnitBody};
use armada_core::constants::TIME_EPSILON;
use armada_core::events::SimEvent;
use armada_core::render::RenderAdapter;
use armada_core::types::UnitId;
use armada_faction_ai::production_cell;

use crate::engine::Simulation;

/// Station id -> simulation time of its last ship.
#[derive(Debug, Clone, Default)]
pub struct ProductionLedger {
    cooldown_secs: f64,
    last_created: HashMap<UnitId, f64>,
}

impl ProductionLedger {
    pub fn new(cooldown_secs: f64) -> Self {
        Self {
            cooldown_secs,
            last_created: HashMap::new(),
        }
    }

    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown_secs
    }

    /// A station that never produced is ready.
    pub fn is_ready(&self, station: UnitId, now: f64) -> bool {
        match self.last_created.get(&station) {
            Some(&last) => now - last + TIME_EPSILON >= self.cooldown_secs,
            None => true,
        }
    }

    pub fn remaining_secs(&self, station: UnitId, now: f64) -> f64 {
        match self.last_created.get(&station) {
            Some(_) if self.is_ready(station, now) => 0.0,
            Some(&last) => self.cooldown_secs - (now - last),
            None => 0.0,
        }
    }

    pub fn last_created(&self, station: UnitId) -> Option<f64> {
        self.last_created.get(&station).copied()
    }

    fn stamp(&mut self, station: UnitId, now: f64) {
        self.last_created.insert(station, now);
    }

    pub(crate) fn forget(&mut self, station: UnitId) {
        self.last_created.remove(&station);
    }
}

impl<R: RenderAdapter> Simulation<R> {
    /// Build a ship from `station` if its cooldown has elapsed.
    ///
    /// The ship appears at a random offset next to the station and the
    /// ledger is stamped with the current time. Returns `None` for
    /// non-stations and while cooling down.
    pub fn attempt_production(&mut self, station: UnitId) -> Option<UnitId> {
        let entity = *self.index.get(&station)?;
        let (station_cell, faction) = {
            let mut query = self.world.query_one::<(&Unit, &UnitBody)>(entity).ok()?;
            let (unit, body) = query.get()?;
            if !matches!(body, UnitBody::Station(_)) {
                debug!(unit = %station, "production ignored: not a station");
                return None;
            }
            (unit.cell, unit.faction.clone())
        };

        let now = self.time.elapsed_secs;
        if !self.ledger.is_ready(station, now) {
            let remaining_secs = self.ledger.remaining_secs(station, now);
            debug!(unit = %station, remaining_secs, "production on cooldown");
            self.events.push(SimEvent::ProductionBlocked {
                station,
                remaining_secs,
            });
            return None;
        }

        let cell = production_cell(station_cell, &self.config.ai, &mut self.rng);
        let ship = self.create_ship(cell, &faction);
        self.ledger.stamp(station, now);
        if let Ok(mut body) = self.world.get::<&mut UnitBody>(entity) {
            if let UnitBody::Station(state) = &mut *body {
                state.ships_produced += 1;
            }
        }

        info!(station = %station, ship = %ship, faction = %faction, %cell, "station produced ship");
        Some(ship)
    }

    /// Seconds until `station` may produce again; 0 when ready.
    pub fn production_remaining_secs(&self, station: UnitId) -> f64 {
        self.ledger.remaining_secs(station, self.time.elapsed_secs)
    }
}
