//! Simulation constants and tuning parameters.

// --- Driver ---

/// Frame rate of the headless driver (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame at the default frame rate.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

// --- Ships ---

/// Default ship speed in world units per second.
pub const SHIP_DEFAULT_SPEED: f64 = 10.0;

/// Elevation at which ships are placed and fly.
pub const SHIP_ELEVATION: f64 = 1.0;

/// Ship hull width (world x before rotation).
pub const SHIP_WIDTH: f64 = 2.0;

/// Ship hull length.
pub const SHIP_LENGTH: f64 = 4.0;

// --- Stations ---

/// Elevation at which stations are placed.
pub const STATION_ELEVATION: f64 = 0.5;

/// Station disc radius.
pub const STATION_RADIUS: f64 = 3.0;

/// Radial segments of the station disc.
pub const STATION_SEGMENTS: u32 = 32;

// --- Placement ---

/// Default ring limit for the free-position search.
pub const FREE_SEARCH_RADIUS: u32 = 5;

/// Largest ring limit a config may ask for.
pub const MAX_FREE_SEARCH_RADIUS: u32 = 1000;

/// Side length of the ground plane used for click-to-cell picking.
pub const GRID_SIZE: f64 = 1000.0;

/// Slack for comparing accumulated simulation time against a deadline.
pub const TIME_EPSILON: f64 = 1e-9;

// --- Production ---

/// Minimum time between two ships from the same station (2 minutes).
pub const PRODUCTION_COOLDOWN_SECS: f64 = 120.0;

// --- Faction AI ---

/// Interval between AI decision passes (seconds).
pub const AI_DECISION_INTERVAL_SECS: f64 = 2.0;

/// Chance that an idle AI ship receives an order on a pass.
pub const AI_MOVE_CHANCE: f64 = 0.5;

/// Chance that an ordered ship wanders rather than visiting a station.
pub const AI_WANDER_CHANCE: f64 = 0.7;

/// Maximum wander offset on each axis (cells).
pub const AI_WANDER_RANGE: i32 = 50;

/// Maximum offset from a station on each axis, for rendezvous and spawning.
pub const AI_STATION_OFFSET_RANGE: i32 = 3;

/// Upper bound for the configurable wander and station offsets (cells).
pub const AI_MAX_OFFSET_RANGE: i32 = 1000;
