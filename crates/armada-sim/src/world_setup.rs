//! Initial fleet placement for a fresh sandbox.

use armada_core::faction::FactionId;
use armada_core::render::RenderAdapter;
use armada_core::types::GridCell;

use crate::engine::Simulation;

/// Spacing between the home corners of successive AI factions.
const AI_BASE_SPACING: i32 = 10;

impl<R: RenderAdapter> Simulation<R> {
    /// Place the demo fleet: three player ships and a station in the
    /// south-west, and for the n-th AI faction (base b = 10 * (n + 1))
    /// ships at (b, b) and (b + 2, b + 2) plus a station at (b + 4, b + 4).
    pub fn create_initial_entities(&mut self) {
        let player = self.factions.player_id().clone();
        self.create_ship(GridCell::new(-10, -10), &player);
        self.create_ship(GridCell::new(-8, -12), &player);
        self.create_ship(GridCell::new(-12, -8), &player);
        self.create_station(GridCell::new(-10, -14), &player);

        let others: Vec<FactionId> = self.factions.non_player().map(|f| f.id.clone()).collect();
        for (index, faction) in others.iter().enumerate() {
            let base = AI_BASE_SPACING * (index as i32 + 1);
            self.create_ship(GridCell::new(base, base), faction);
            self.create_ship(GridCell::new(base + 2, base + 2), faction);
            self.create_station(GridCell::new(base + 4, base + 4), faction);
        }
    }
}
