//! Pending move order: the single "which ship awaits a destination click" slot.

use tracing::debug;

use armada_core::components::UnitBody;
use armada_core::events::SimEvent;
use armada_core::render::RenderAdapter;
use armada_core::types::{GridCell, UnitId};

use crate::engine::Simulation;

impl<R: RenderAdapter> Simulation<R> {
    /// Arm the pending move order with `ship`, replacing any previous one.
    /// Returns false (and leaves the slot untouched) if `ship` is not a ship.
    pub fn set_target_ship_for_move(&mut self, ship: UnitId) -> bool {
        let is_ship = self
            .index
            .get(&ship)
            .and_then(|&entity| self.world.get::<&UnitBody>(entity).ok())
            .is_some_and(|body| matches!(*body, UnitBody::Ship(_)));
        if !is_ship {
            debug!(unit = %ship, "move order not armed: not a ship");
            return false;
        }
        self.pending_move = Some(ship);
        self.events.push(SimEvent::MoveOrderPending { ship });
        true
    }

    /// Complete the pending move order at `cell`.
    ///
    /// Returns true and clears the slot only if an order was pending;
    /// otherwise does nothing and returns false.
    pub fn handle_move_target_selection(&mut self, cell: GridCell) -> bool {
        self.complete_pending_move(cell).is_some()
    }

    /// Like `handle_move_target_selection`, but reports the ship and the
    /// cell `move_ship_to` resolved for it (`None` when the ship could not
    /// be moved). Returns `None` when no order was pending.
    pub fn complete_pending_move(&mut self, cell: GridCell) -> Option<(UnitId, Option<GridCell>)> {
        let ship = self.pending_move.take()?;
        let resolved = self.move_ship_to(ship, cell);
        self.events.push(SimEvent::MoveOrderCleared);
        Some((ship, resolved))
    }

    /// Clear the pending move order, if any.
    pub fn cancel_pending_move(&mut self) {
        if self.pending_move.take().is_some() {
            self.events.push(SimEvent::MoveOrderCleared);
        }
    }

    pub fn pending_move(&self) -> Option<UnitId> {
        self.pending_move
    }
}
