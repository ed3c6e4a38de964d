//! Transit animation system.
//!
//! Each frame, moves every transiting ship along its straight line:
//! position = lerp(origin, destination, elapsed / duration). On arrival
//! the ship commits its destination cell and becomes idle.

use hecs::World;

use armada_core::components::{Transit, Unit, UnitBody};
use armada_core::constants::TIME_EPSILON;
use armada_core::events::SimEvent;
use armada_core::render::RenderAdapter;
use armada_core::types::WorldPos;

/// Fraction of the transit completed at `now`, in [0, 1].
///
/// Reaches exactly 1 once the elapsed time is within `TIME_EPSILON` of the
/// duration, so frame-step rounding never delays arrival by a frame.
pub fn progress(transit: &Transit, now: f64) -> f64 {
    let elapsed = now - transit.start_secs;
    if elapsed + TIME_EPSILON >= transit.duration_secs {
        return 1.0;
    }
    (elapsed / transit.duration_secs).clamp(0.0, 1.0)
}

/// Interpolated world position at `now`.
pub fn position_at(transit: &Transit, now: f64) -> WorldPos {
    transit
        .origin
        .lerp(transit.destination, progress(transit, now))
}

/// Advance all transits to `now`, pushing positions to the renderer.
pub fn run<R: RenderAdapter>(world: &mut World, renderer: &mut R, now: f64, events: &mut Vec<SimEvent>) {
    for (_entity, (unit, body)) in world.query_mut::<(&mut Unit, &mut UnitBody)>() {
        let UnitBody::Ship(ship) = body else {
            continue;
        };
        let Some((t, position, destination_cell)) = ship
            .transit
            .as_ref()
            .map(|active| (progress(active, now), position_at(active, now), active.destination_cell))
        else {
            continue;
        };

        unit.position = position;
        renderer.set_position(unit.render, position);

        if t >= 1.0 {
            unit.cell = destination_cell;
            ship.transit = None;
            tracing::debug!(unit = %unit.id, cell = %destination_cell, "transit completed");
            events.push(SimEvent::TransitCompleted {
                ship: unit.id,
                cell: destination_cell,
            });
        }
    }
}
