//! Grid/world coordinate mapping.
//!
//! Pure functions, no state. Grid x maps to world x, grid y maps to world z,
//! and world y carries the caller-supplied elevation.

use crate::types::{GridCell, WorldPos};

/// Snap a world position to the nearest grid cell. Elevation is dropped.
pub fn world_to_grid(position: WorldPos) -> GridCell {
    GridCell {
        x: position.x.round() as i32,
        y: position.z.round() as i32,
    }
}

/// World position of a grid cell at the given elevation.
pub fn grid_to_world(cell: GridCell, elevation: f64) -> WorldPos {
    WorldPos::new(f64::from(cell.x), elevation, f64::from(cell.y))
}

/// Cells on the Chebyshev ring of `radius` around `center`, i.e. every cell
/// with `max(|dx|, |dy|) == radius`.
///
/// Scan order is dx ascending, then dy ascending, so ring 1 around the
/// origin starts at (-1, -1) and ends at (1, 1). Radius 0 yields the center.
pub fn chebyshev_ring(center: GridCell, radius: u32) -> impl Iterator<Item = GridCell> {
    let r = radius as i32;
    (-r..=r).flat_map(move |dx| {
        (-r..=r).filter_map(move |dy| {
            if dx.abs() == r || dy.abs() == r {
                Some(center.offset(dx, dy))
            } else {
                None
            }
        })
    })
}
