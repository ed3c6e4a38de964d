//! Simulation context, the single owner of all mutable sandbox state.
//!
//! `Simulation` owns the hecs world, the faction roster, the pending move
//! slot, the production ledger and the AI scheduler. There are no globals:
//! independent simulations (one per test, for instance) never share state.
//! All mutation runs to completion on the caller's thread.

use std::collections::{HashMap, VecDeque};

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use armada_core::commands::PlayerCommand;
use armada_core::components::{Unit, UnitBody};
use armada_core::events::SimEvent;
use armada_core::faction::{FactionId, FactionRegistry};
use armada_core::render::RenderAdapter;
use armada_core::state::SimSnapshot;
use armada_core::types::{RenderHandle, SimTime, UnitId};
use armada_core::SimError;

use crate::config::{ConfigError, SimConfig};
use crate::production::ProductionLedger;
use crate::scheduler::AiScheduler;
use crate::systems;
use crate::systems::faction_ai::AiPassReport;

pub struct Simulation<R: RenderAdapter> {
    pub(crate) world: World,
    pub(crate) factions: FactionRegistry,
    pub(crate) renderer: R,
    pub(crate) time: SimTime,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) config: SimConfig,
    pub(crate) next_unit_id: u32,
    /// Stable unit id -> hecs entity.
    pub(crate) index: HashMap<UnitId, hecs::Entity>,
    /// Render handle -> owning unit, for pointer picking.
    pub(crate) render_owners: HashMap<RenderHandle, UnitId>,
    /// Ship awaiting a destination click.
    pub(crate) pending_move: Option<UnitId>,
    pub(crate) ledger: ProductionLedger,
    pub(crate) ai_scheduler: AiScheduler,
    command_queue: VecDeque<PlayerCommand>,
    pub(crate) events: Vec<SimEvent>,
}

impl<R: RenderAdapter> Simulation<R> {
    /// Create a new simulation. Populates the demo fleet when the config
    /// asks for it.
    pub fn new(config: SimConfig, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let factions = FactionRegistry::new(config.factions.clone(), config.player_faction.clone())?;

        let mut sim = Self {
            world: World::new(),
            factions,
            renderer,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_unit_id: 0,
            index: HashMap::new(),
            render_owners: HashMap::new(),
            pending_move: None,
            ledger: ProductionLedger::new(config.production_cooldown_secs),
            ai_scheduler: AiScheduler::new(config.ai.decision_interval_secs),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            config,
        };

        if sim.config.populate_initial_units {
            sim.create_initial_entities();
        }
        info!(
            seed = sim.config.seed,
            factions = sim.factions.list().len(),
            units = sim.index.len(),
            "simulation ready"
        );
        Ok(sim)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one rendered frame: drain commands, move transiting ships,
    /// run the AI pass if it is due, and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> SimSnapshot {
        self.process_commands();
        self.advance_frame(dt);
        if self.ai_scheduler.poll(self.time.elapsed_secs) {
            self.run_ai_pass();
        }
        self.snapshot()
    }

    /// Per-frame callback: advance the clock and animate transits.
    pub fn advance_frame(&mut self, dt: f64) {
        self.time.advance(dt);
        systems::transit::run(
            &mut self.world,
            &mut self.renderer,
            self.time.elapsed_secs,
            &mut self.events,
        );
    }

    /// One AI decision pass over every auto-controlled faction.
    /// Independent of the scheduler, so drivers and tests can call it directly.
    pub fn run_ai_pass(&mut self) -> AiPassReport {
        systems::faction_ai::run(self)
    }

    /// Teardown hook: no further AI passes will be scheduled.
    pub fn stop_ai(&mut self) {
        self.ai_scheduler.stop();
    }

    /// Build a snapshot, handing over the events raised since the last one.
    pub fn snapshot(&mut self) -> SimSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.factions,
            &self.time,
            self.pending_move,
            events,
        )
    }

    /// Execute a player command immediately.
    ///
    /// Commands that target units the player does not own are dropped.
    pub fn execute(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::CreateShip { cell } => {
                let player = self.factions.player_id().clone();
                self.create_ship(cell, &player);
            }
            PlayerCommand::CreateShipFromStation { station } => {
                if self.is_player_owned(station) {
                    self.attempt_production(station);
                }
            }
            PlayerCommand::OrderMove { ship } => {
                if self.is_player_owned(ship) {
                    self.set_target_ship_for_move(ship);
                }
            }
            PlayerCommand::SelectMoveTarget { cell } => {
                self.handle_move_target_selection(cell);
            }
            PlayerCommand::CancelMove => self.cancel_pending_move(),
            PlayerCommand::MoveShip { ship, cell } => {
                if self.is_player_owned(ship) {
                    self.move_ship_to(ship, cell);
                }
            }
            PlayerCommand::ToggleFactionAi { station } => {
                if self.is_player_owned(station) {
                    self.toggle_faction_ai(station);
                }
            }
        }
    }

    /// Flip AI control for the faction owning `station`.
    /// Returns the new flag, or `None` if `station` is not a station.
    pub fn toggle_faction_ai(&mut self, station: UnitId) -> Option<bool> {
        let entity = *self.index.get(&station)?;
        let faction = {
            let mut query = self.world.query_one::<(&Unit, &UnitBody)>(entity).ok()?;
            let (unit, body) = query.get()?;
            if !matches!(body, UnitBody::Station(_)) {
                debug!(unit = %station, "AI toggle ignored: not a station");
                return None;
            }
            unit.faction.clone()
        };
        let enabled = !self.factions.get(&faction).ok()?.auto_controlled;
        self.set_faction_auto_controlled(&faction, enabled).ok()?;
        Some(enabled)
    }

    pub fn set_faction_auto_controlled(&mut self, faction: &FactionId, enabled: bool) -> Result<(), SimError> {
        self.factions.set_auto_controlled(faction, enabled)?;
        info!(faction = %faction, enabled, "faction AI control changed");
        self.events.push(SimEvent::FactionAiToggled {
            faction: faction.clone(),
            enabled,
        });
        Ok(())
    }

    /// Whether the unit exists and belongs to the player faction.
    pub fn is_player_owned(&self, unit: UnitId) -> bool {
        let owned = self
            .index
            .get(&unit)
            .and_then(|&entity| self.world.get::<&Unit>(entity).ok())
            .is_some_and(|u| self.factions.is_player(&u.faction));
        if !owned {
            debug!(unit = %unit, "command ignored: unit is not player-owned");
        }
        owned
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn factions(&self) -> &FactionRegistry {
        &self.factions
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn ai_scheduler(&self) -> &AiScheduler {
        &self.ai_scheduler
    }

    pub fn ledger(&self) -> &ProductionLedger {
        &self.ledger
    }

    /// Events raised since the last snapshot, without building one.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.execute(command);
        }
    }
}
