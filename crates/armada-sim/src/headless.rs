//! Headless presentation adapter.
//!
//! Keeps render objects in memory and answers pointer rays with a fixed
//! top-down orthographic camera, so the router and the driver work without
//! a real scene. Footprints are circles (squares for the ground plane).

use std::collections::BTreeMap;

use armada_core::constants::GRID_SIZE;
use armada_core::render::{RayHit, RenderAdapter, ShapeSpec};
use armada_core::types::{RenderHandle, ScreenPoint, WorldPos};

/// Ground plane sits just below the grid lines.
const GROUND_PLANE_ELEVATION: f64 = -0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderObject {
    pub shape: ShapeSpec,
    pub color: u32,
    /// World position, or offset from the parent for sub-parts.
    pub position: WorldPos,
    pub rotation: f64,
    pub parent: Option<RenderHandle>,
}

/// Camera looking straight down at the grid. Screen x follows world x,
/// screen y follows world z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopDownCamera {
    pub center_x: f64,
    pub center_z: f64,
    pub pixels_per_unit: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for TopDownCamera {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_z: 0.0,
            pixels_per_unit: 10.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    objects: BTreeMap<RenderHandle, RenderObject>,
    next_handle: u64,
    camera: TopDownCamera,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(camera: TopDownCamera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    /// Add the pick plane covering the whole grid.
    pub fn add_ground_plane(&mut self) -> RenderHandle {
        self.insert(RenderObject {
            shape: ShapeSpec::GroundPlane { size: GRID_SIZE },
            color: 0x444444,
            position: WorldPos::new(0.0, GROUND_PLANE_ELEVATION, 0.0),
            rotation: 0.0,
            parent: None,
        })
    }

    /// Add a sub-part that moves with `parent`. `offset` is relative to it.
    pub fn attach_child(&mut self, parent: RenderHandle, shape: ShapeSpec, offset: WorldPos) -> Option<RenderHandle> {
        let color = self.objects.get(&parent)?.color;
        Some(self.insert(RenderObject {
            shape,
            color,
            position: offset,
            rotation: 0.0,
            parent: Some(parent),
        }))
    }

    pub fn object(&self, handle: RenderHandle) -> Option<&RenderObject> {
        self.objects.get(&handle)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn camera(&self) -> &TopDownCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut TopDownCamera {
        &mut self.camera
    }

    /// Absolute world position, following the parent chain.
    pub fn world_position(&self, handle: RenderHandle) -> Option<WorldPos> {
        let object = self.objects.get(&handle)?;
        match object.parent {
            Some(parent) => Some(self.world_position(parent)? + object.position),
            None => Some(object.position),
        }
    }

    /// Screen pixel at which a world position is drawn.
    pub fn world_to_screen(&self, position: WorldPos) -> ScreenPoint {
        let cam = &self.camera;
        ScreenPoint::new(
            (position.x - cam.center_x) * cam.pixels_per_unit + cam.viewport_width / 2.0,
            (position.z - cam.center_z) * cam.pixels_per_unit + cam.viewport_height / 2.0,
        )
    }

    /// World (x, z) under a screen pixel.
    pub fn screen_to_ground(&self, screen: ScreenPoint) -> (f64, f64) {
        let cam = &self.camera;
        let (nx, ny) = self.screen_to_normalized(screen);
        let half_w = cam.viewport_width / 2.0 / cam.pixels_per_unit;
        let half_h = cam.viewport_height / 2.0 / cam.pixels_per_unit;
        (cam.center_x + nx * half_w, cam.center_z - ny * half_h)
    }

    fn insert(&mut self, object: RenderObject) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(handle, object);
        handle
    }

    fn descends_from(&self, handle: RenderHandle, ancestors: &[RenderHandle]) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            if ancestors.contains(&h) {
                return true;
            }
            current = self.objects.get(&h).and_then(|o| o.parent);
        }
        false
    }
}

impl RenderAdapter for HeadlessRenderer {
    fn create_render_object(&mut self, shape: &ShapeSpec, color: u32, position: WorldPos) -> RenderHandle {
        self.insert(RenderObject {
            shape: *shape,
            color,
            position,
            rotation: 0.0,
            parent: None,
        })
    }

    fn set_position(&mut self, handle: RenderHandle, position: WorldPos) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.position = position;
        }
    }

    fn set_rotation(&mut self, handle: RenderHandle, angle: f64) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.rotation = angle;
        }
    }

    /// Removes the object and its sub-parts.
    fn remove_render_object(&mut self, handle: RenderHandle) {
        let doomed: Vec<RenderHandle> = self
            .objects
            .keys()
            .copied()
            .filter(|&h| self.descends_from(h, &[handle]))
            .collect();
        for h in doomed {
            self.objects.remove(&h);
        }
    }

    fn intersect_ray(&self, screen: ScreenPoint, candidates: &[RenderHandle]) -> Vec<RayHit> {
        let (x, z) = self.screen_to_ground(screen);
        let mut hits: Vec<(f64, RayHit)> = self
            .objects
            .iter()
            .filter(|&(&handle, _)| self.descends_from(handle, candidates))
            .filter_map(|(&handle, object)| {
                let center = self.world_position(handle)?;
                let dx = x - center.x;
                let dz = z - center.z;
                let inside = match object.shape {
                    ShapeSpec::GroundPlane { size } => dx.abs() <= size / 2.0 && dz.abs() <= size / 2.0,
                    shape => dx.hypot(dz) <= shape.footprint_radius(),
                };
                inside.then(|| {
                    (
                        dx.hypot(dz),
                        RayHit {
                            handle,
                            point: WorldPos::new(x, center.y, z),
                        },
                    )
                })
            })
            .collect();

        // Camera looks down: higher objects are nearer; ties go to the
        // object whose center is closest to the pointer.
        hits.sort_by(|(da, a), (db, b)| {
            b.point
                .y
                .total_cmp(&a.point.y)
                .then(da.total_cmp(db))
                .then(a.handle.cmp(&b.handle))
        });
        hits.into_iter().map(|(_, hit)| hit).collect()
    }

    fn parent_of(&self, handle: RenderHandle) -> Option<RenderHandle> {
        self.objects.get(&handle)?.parent
    }

    fn screen_to_normalized(&self, screen: ScreenPoint) -> (f64, f64) {
        (
            (screen.x / self.camera.viewport_width) * 2.0 - 1.0,
            -(screen.y / self.camera.viewport_height) * 2.0 + 1.0,
        )
    }
}
