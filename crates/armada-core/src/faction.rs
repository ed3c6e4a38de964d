//! Faction registry: the fixed roster of ownership groups.
//!
//! The roster is built once at startup. Only the `auto_controlled` flag may
//! change afterwards.

use std::collections::HashSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Unique faction key, e.g. `"player"` or `"alpha"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(pub String);

impl FactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FactionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// An ownership group for ships and stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    /// Display color as 0xRRGGBB.
    pub color: u32,
    /// Whether the faction AI drives this faction's units.
    #[serde(default)]
    pub auto_controlled: bool,
}

impl Faction {
    pub fn new(id: &str, name: &str, color: u32, auto_controlled: bool) -> Self {
        Self {
            id: FactionId::from(id),
            name: name.to_owned(),
            color,
            auto_controlled,
        }
    }

    /// Color as a CSS hex string, e.g. `#3498db`.
    pub fn css_color(&self) -> String {
        format!("#{:06x}", self.color & 0x00ff_ffff)
    }
}

/// The four factions of the default sandbox: one player, three AI.
pub fn default_roster() -> Vec<Faction> {
    vec![
        Faction::new("player", "Player Faction", 0x3498db, false),
        Faction::new("alpha", "Alpha Federation", 0xe74c3c, true),
        Faction::new("beta", "Beta Coalition", 0x2ecc71, true),
        Faction::new("gamma", "Gamma Empire", 0xf39c12, true),
    ]
}

/// Ordered faction roster with exactly one designated player faction.
#[derive(Debug, Clone)]
pub struct FactionRegistry {
    factions: Vec<Faction>,
    player: FactionId,
    player_index: usize,
}

impl FactionRegistry {
    /// Build a registry. Fails if ids repeat or `player` is not in the roster.
    pub fn new(factions: Vec<Faction>, player: FactionId) -> Result<Self, SimError> {
        let mut seen = HashSet::new();
        for faction in &factions {
            if !seen.insert(faction.id.clone()) {
                return Err(SimError::DuplicateFaction(faction.id.clone()));
            }
        }
        let player_index = factions
            .iter()
            .position(|f| f.id == player)
            .ok_or_else(|| SimError::FactionNotFound(player.clone()))?;
        Ok(Self {
            factions,
            player,
            player_index,
        })
    }

    /// All factions in roster order.
    pub fn list(&self) -> &[Faction] {
        &self.factions
    }

    pub fn get(&self, id: &FactionId) -> Result<&Faction, SimError> {
        self.factions
            .iter()
            .find(|f| &f.id == id)
            .ok_or_else(|| SimError::FactionNotFound(id.clone()))
    }

    pub fn player(&self) -> &Faction {
        &self.factions[self.player_index]
    }

    pub fn player_id(&self) -> &FactionId {
        &self.player
    }

    pub fn is_player(&self, id: &FactionId) -> bool {
        *id == self.player
    }

    /// Uniformly random faction other than the player's.
    /// `None` when the roster holds only the player faction.
    pub fn random_non_player<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Faction> {
        let candidates: Vec<&Faction> = self
            .factions
            .iter()
            .filter(|f| f.id != self.player)
            .collect();
        candidates.choose(rng).copied()
    }

    /// Factions other than the player's, in roster order.
    pub fn non_player(&self) -> impl Iterator<Item = &Faction> {
        self.factions.iter().filter(move |f| f.id != self.player)
    }

    /// Ids of every faction currently flagged for AI control, in roster order.
    pub fn auto_controlled_ids(&self) -> Vec<FactionId> {
        self.factions
            .iter()
            .filter(|f| f.auto_controlled)
            .map(|f| f.id.clone())
            .collect()
    }

    pub fn set_auto_controlled(&mut self, id: &FactionId, enabled: bool) -> Result<(), SimError> {
        let faction = self
            .factions
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| SimError::FactionNotFound(id.clone()))?;
        faction.auto_controlled = enabled;
        Ok(())
    }
}

impl Default for FactionRegistry {
    fn default() -> Self {
        Self {
            factions: default_roster(),
            player: FactionId::from("player"),
            player_index: 0,
        }
    }
}
