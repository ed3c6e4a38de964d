//! Contract with the external presentation layer.
//!
//! The simulation never draws anything itself. It asks a `RenderAdapter` to
//! create, place, rotate and remove objects, and to answer pointer ray
//! queries. The per-frame callback is inverted: the driver calls
//! `Simulation::advance_frame` once per rendered frame.

use serde::{Deserialize, Serialize};

use crate::types::{RenderHandle, ScreenPoint, WorldPos};

/// Geometry requested for a presentation object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeSpec {
    /// Box hull: `width` across, `height` tall, `length` along the bow axis.
    ShipHull { width: f64, height: f64, length: f64 },
    /// Flat cylinder.
    StationDisc { radius: f64, thickness: f64, segments: u32 },
    /// Square pick plane lying on the grid.
    GroundPlane { size: f64 },
}

impl ShapeSpec {
    /// Radius of the shape's footprint on the grid plane.
    pub fn footprint_radius(&self) -> f64 {
        match *self {
            ShapeSpec::ShipHull { width, length, .. } => width.max(length) / 2.0,
            ShapeSpec::StationDisc { radius, .. } => radius,
            ShapeSpec::GroundPlane { size } => size / 2.0,
        }
    }
}

/// One object hit by a pointer ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub handle: RenderHandle,
    /// World-space intersection point.
    pub point: WorldPos,
}

pub trait RenderAdapter {
    fn create_render_object(&mut self, shape: &ShapeSpec, color: u32, position: WorldPos) -> RenderHandle;

    fn set_position(&mut self, handle: RenderHandle, position: WorldPos);

    /// Rotation about the vertical axis (radians).
    fn set_rotation(&mut self, handle: RenderHandle, angle: f64);

    fn remove_render_object(&mut self, handle: RenderHandle);

    /// Objects under the pointer among `candidates` and their children,
    /// nearest first.
    fn intersect_ray(&self, screen: ScreenPoint, candidates: &[RenderHandle]) -> Vec<RayHit>;

    /// Parent object of a sub-part, if `handle` is one.
    fn parent_of(&self, _handle: RenderHandle) -> Option<RenderHandle> {
        None
    }

    /// Screen pixels to normalized device coordinates in [-1, 1].
    fn screen_to_normalized(&self, screen: ScreenPoint) -> (f64, f64);
}
