//! Entity store: unit creation, occupancy, free-cell search, move orders
//! and render-handle lookup.
//!
//! Occupancy uses destination reservation: a resting unit occupies its
//! cell, a transiting ship occupies the cell it is flying to.

use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;

use tracing::{debug, warn};

use armada_core::components::{ShipState, StationState, Transit, Unit, UnitBody};
use armada_core::constants::*;
use armada_core::events::SimEvent;
use armada_core::faction::FactionId;
use armada_core::grid::{chebyshev_ring, grid_to_world, world_to_grid};
use armada_core::render::{RenderAdapter, ShapeSpec};
use armada_core::state::UnitView;
use armada_core::types::{GridCell, RenderHandle, UnitId, WorldPos};
use armada_core::SimError;

use crate::engine::Simulation;
use crate::systems::snapshot::unit_view;
use crate::systems::transit;

/// Color used for units whose faction is missing from the roster.
const UNKNOWN_FACTION_COLOR: u32 = 0x888888;

/// Longest sub-part chain followed when resolving a render handle.
const MAX_PARENT_DEPTH: usize = 16;

/// Cell a unit blocks for occupancy purposes.
pub(crate) fn occupied_cell(unit: &Unit, body: &UnitBody) -> GridCell {
    match body {
        UnitBody::Ship(ShipState {
            transit: Some(transit),
            ..
        }) => transit.destination_cell,
        _ => unit.cell,
    }
}

impl<R: RenderAdapter> Simulation<R> {
    /// Create a ship at `cell`. No occupancy check: callers that care
    /// resolve a free cell first.
    pub fn create_ship(&mut self, cell: GridCell, faction: &FactionId) -> UnitId {
        let shape = ShapeSpec::ShipHull {
            width: SHIP_WIDTH,
            height: SHIP_WIDTH / 2.0,
            length: SHIP_LENGTH,
        };
        let body = UnitBody::Ship(ShipState {
            speed: self.config.ship_speed,
            transit: None,
        });
        self.spawn_unit(cell, faction, SHIP_ELEVATION, shape, body)
    }

    /// Create a station at `cell`. No occupancy check.
    pub fn create_station(&mut self, cell: GridCell, faction: &FactionId) -> UnitId {
        let shape = ShapeSpec::StationDisc {
            radius: STATION_RADIUS,
            thickness: STATION_RADIUS / 2.0,
            segments: STATION_SEGMENTS,
        };
        let body = UnitBody::Station(StationState::default());
        self.spawn_unit(cell, faction, STATION_ELEVATION, shape, body)
    }

    fn spawn_unit(
        &mut self,
        cell: GridCell,
        faction: &FactionId,
        elevation: f64,
        shape: ShapeSpec,
        body: UnitBody,
    ) -> UnitId {
        let color = match self.factions.get(faction) {
            Ok(f) => f.color,
            Err(err) => {
                warn!(%err, "creating unit for unknown faction");
                UNKNOWN_FACTION_COLOR
            }
        };

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;

        let position = grid_to_world(cell, elevation);
        let render = self.renderer.create_render_object(&shape, color, position);
        let kind = body.kind();

        let entity = self.world.spawn((
            Unit {
                id,
                faction: faction.clone(),
                cell,
                position,
                heading: 0.0,
                render,
            },
            body,
        ));
        self.index.insert(id, entity);
        self.render_owners.insert(render, id);

        debug!(unit = %id, %kind, faction = %faction, %cell, "unit created");
        self.events.push(SimEvent::UnitCreated {
            unit: id,
            kind,
            faction: faction.clone(),
            cell,
        });
        id
    }

    pub fn is_position_occupied(&self, cell: GridCell) -> bool {
        self.is_position_occupied_excluding(cell, None)
    }

    /// Occupancy check that ignores `exclude`, used when a unit re-checks
    /// its own cell.
    pub fn is_position_occupied_excluding(&self, cell: GridCell, exclude: Option<UnitId>) -> bool {
        self.world
            .query::<(&Unit, &UnitBody)>()
            .iter()
            .any(|(_, (unit, body))| Some(unit.id) != exclude && occupied_cell(unit, body) == cell)
    }

    fn occupied_cells(&self, exclude: Option<UnitId>) -> HashSet<GridCell> {
        self.world
            .query::<(&Unit, &UnitBody)>()
            .iter()
            .filter(|(_, (unit, _))| Some(unit.id) != exclude)
            .map(|(_, (unit, body))| occupied_cell(unit, body))
            .collect()
    }

    pub fn find_free_position_near(&self, cell: GridCell, max_radius: u32) -> GridCell {
        self.find_free_position_near_excluding(cell, max_radius, None)
    }

    /// `cell` if free, else the first free cell on Chebyshev rings
    /// 1..=max_radius in ring scan order (dx ascending, then dy ascending).
    ///
    /// When every ring is full the result is `cell + (max_radius + 1)` on
    /// both axes, which is not checked and may itself be occupied.
    /// `max_radius` is capped at `MAX_FREE_SEARCH_RADIUS`.
    pub fn find_free_position_near_excluding(
        &self,
        cell: GridCell,
        max_radius: u32,
        exclude: Option<UnitId>,
    ) -> GridCell {
        let max_radius = max_radius.min(MAX_FREE_SEARCH_RADIUS);
        let occupied = self.occupied_cells(exclude);
        if !occupied.contains(&cell) {
            return cell;
        }
        for radius in 1..=max_radius {
            if let Some(free) = chebyshev_ring(cell, radius).find(|c| !occupied.contains(c)) {
                return free;
            }
        }
        let step = i32::try_from(max_radius).unwrap_or(i32::MAX).saturating_add(1);
        let fallback = cell.offset(step, step);
        debug!(%cell, max_radius, %fallback, "free-position search exhausted");
        fallback
    }

    /// Send a ship toward `target`, resolved to the nearest free cell.
    ///
    /// A ship already in transit is redirected from where it currently is.
    /// Unknown units and stations are ignored. Returns the resolved
    /// destination.
    pub fn move_ship_to(&mut self, ship: UnitId, target: GridCell) -> Option<GridCell> {
        let Some(&entity) = self.index.get(&ship) else {
            debug!(unit = %ship, "move order ignored: unknown unit");
            return None;
        };
        let now = self.time.elapsed_secs;

        let (origin, speed) = {
            let mut query = self.world.query_one::<(&Unit, &UnitBody)>(entity).ok()?;
            let (unit, body) = query.get()?;
            let UnitBody::Ship(state) = body else {
                debug!(unit = %ship, "move order ignored: not a ship");
                return None;
            };
            let origin = match &state.transit {
                Some(active) => transit::position_at(active, now),
                None => unit.position,
            };
            (origin, state.speed)
        };

        let radius = self.config.free_search_radius;
        let destination_cell = self.find_free_position_near_excluding(target, radius, Some(ship));
        let destination = grid_to_world(destination_cell, SHIP_ELEVATION);
        let origin_cell = world_to_grid(origin);

        let dx = destination.x - origin.x;
        let dz = destination.z - origin.z;
        let distance = (dx * dx + dz * dz).sqrt();

        let (unit, body) = self
            .world
            .query_one_mut::<(&mut Unit, &mut UnitBody)>(entity)
            .ok()?;
        let UnitBody::Ship(state) = body else {
            return None;
        };

        if distance <= f64::EPSILON {
            // Already there: commit without a transit.
            state.transit = None;
            unit.cell = destination_cell;
            unit.position = destination;
            self.renderer.set_position(unit.render, destination);
            self.events.push(SimEvent::TransitCompleted {
                ship,
                cell: destination_cell,
            });
            return Some(destination_cell);
        }

        let duration_secs = distance / speed;
        let heading = dz.atan2(dx) - FRAC_PI_2;
        state.transit = Some(Transit {
            origin_cell,
            destination_cell,
            origin,
            destination,
            start_secs: now,
            duration_secs,
            heading,
        });
        unit.heading = heading;
        // Ships snap to their final heading at departure.
        self.renderer.set_rotation(unit.render, heading);

        debug!(
            unit = %ship,
            from = %origin_cell,
            to = %destination_cell,
            requested = %target,
            duration_secs,
            "transit started"
        );
        self.events.push(SimEvent::TransitStarted {
            ship,
            from: origin_cell,
            to: destination_cell,
            duration_secs,
        });
        Some(destination_cell)
    }

    /// Reverse lookup from a picked render object (or one of its sub-parts)
    /// to the unit that owns it.
    pub fn find_unit_by_render_handle(&self, handle: RenderHandle) -> Result<UnitId, SimError> {
        let mut current = Some(handle);
        for _ in 0..MAX_PARENT_DEPTH {
            let Some(h) = current else { break };
            if let Some(&id) = self.render_owners.get(&h) {
                return Ok(id);
            }
            current = self.renderer.parent_of(h);
        }
        Err(SimError::RenderHandleNotFound(handle))
    }

    /// Render handles of every unit, in unit id order, for pointer picking.
    pub fn all_render_handles(&self) -> Vec<RenderHandle> {
        let mut owned: Vec<(UnitId, RenderHandle)> = self
            .render_owners
            .iter()
            .map(|(&handle, &id)| (id, handle))
            .collect();
        owned.sort_unstable();
        owned.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Remove a unit and release its render object.
    pub fn destroy_unit(&mut self, id: UnitId) -> Result<(), SimError> {
        let entity = *self.index.get(&id).ok_or(SimError::UnitNotFound(id))?;
        let render = self
            .world
            .get::<&Unit>(entity)
            .map(|unit| unit.render)
            .map_err(|_| SimError::UnitNotFound(id))?;
        self.world.despawn(entity).map_err(|_| SimError::UnitNotFound(id))?;
        self.index.remove(&id);

        self.renderer.remove_render_object(render);
        self.render_owners.remove(&render);
        self.ledger.forget(id);
        if self.pending_move == Some(id) {
            self.pending_move = None;
            self.events.push(SimEvent::MoveOrderCleared);
        }

        debug!(unit = %id, "unit destroyed");
        self.events.push(SimEvent::UnitDestroyed { unit: id });
        Ok(())
    }

    pub fn unit(&self, id: UnitId) -> Option<UnitView> {
        let entity = *self.index.get(&id)?;
        let mut query = self.world.query_one::<(&Unit, &UnitBody)>(entity).ok()?;
        query.get().map(|(unit, body)| unit_view(unit, body))
    }

    /// Views of every unit, sorted by id.
    pub fn units(&self) -> Vec<UnitView> {
        let mut views: Vec<UnitView> = self
            .world
            .query::<(&Unit, &UnitBody)>()
            .iter()
            .map(|(_, (unit, body))| unit_view(unit, body))
            .collect();
        views.sort_by_key(|v| v.id);
        views
    }

    pub fn units_of(&self, faction: &FactionId) -> Vec<UnitView> {
        self.units().into_iter().filter(|v| &v.faction == faction).collect()
    }

    pub fn unit_count(&self) -> usize {
        self.index.len()
    }

    /// Current world position of a unit, interpolated if it is in transit.
    pub fn unit_position(&self, id: UnitId) -> Option<WorldPos> {
        let entity = *self.index.get(&id)?;
        let mut query = self.world.query_one::<(&Unit, &UnitBody)>(entity).ok()?;
        let (unit, body) = query.get()?;
        Some(match body {
            UnitBody::Ship(ShipState {
                transit: Some(active),
                ..
            }) => transit::position_at(active, self.time.elapsed_secs),
            _ => unit.position,
        })
    }
}
