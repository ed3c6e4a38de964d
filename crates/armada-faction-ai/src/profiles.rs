//! Tunable behaviour profile shared by every AI faction.

use serde::{Deserialize, Serialize};

use armada_core::constants::*;

/// Which stations an AI ship may pick for a rendezvous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationTargetPolicy {
    /// Any station, whoever owns it. AI ships will visit enemy and player
    /// stations too.
    #[default]
    AnyOwner,
    /// Only stations of the ship's own faction.
    OwnFaction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiProfile {
    /// Seconds between decision passes.
    pub decision_interval_secs: f64,
    /// Per idle ship, per pass.
    pub move_chance: f64,
    /// Given a move, chance of wandering instead of visiting a station.
    pub wander_chance: f64,
    /// Max wander offset per axis (cells).
    pub wander_range: i32,
    /// Max offset per axis around a station (cells).
    pub station_offset_range: i32,
    pub station_targets: StationTargetPolicy,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            decision_interval_secs: AI_DECISION_INTERVAL_SECS,
            move_chance: AI_MOVE_CHANCE,
            wander_chance: AI_WANDER_CHANCE,
            wander_range: AI_WANDER_RANGE,
            station_offset_range: AI_STATION_OFFSET_RANGE,
            station_targets: StationTargetPolicy::default(),
        }
    }
}

impl AiProfile {
    /// Describe the first out-of-range field, if any.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.decision_interval_secs > 0.0) {
            return Err(format!(
                "decision_interval_secs must be positive, got {}",
                self.decision_interval_secs
            ));
        }
        for (name, p) in [
            ("move_chance", self.move_chance),
            ("wander_chance", self.wander_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be within [0, 1], got {p}"));
            }
        }
        for (name, range) in [
            ("wander_range", self.wander_range),
            ("station_offset_range", self.station_offset_range),
        ] {
            if !(0..=AI_MAX_OFFSET_RANGE).contains(&range) {
                return Err(format!("{name} must be within [0, {AI_MAX_OFFSET_RANGE}], got {range}"));
            }
        }
        Ok(())
    }
}
