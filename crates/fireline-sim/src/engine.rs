//! Simulation engine for the drill.
//!
//! `SimulationEngine` owns the hecs world (extinguishers), the fire
//! coordinator, and the clock. It applies queued commands at the tick
//! boundary, runs the systems, and produces a `DrillSnapshot` per tick.
//! Completely headless, so runs are deterministic for a given seed.

use std::collections::VecDeque;
use std::sync::mpsc;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use fireline_core::commands::DrillCommand;
use fireline_core::components::Extinguisher;
use fireline_core::config::ScenarioConfig;
use fireline_core::constants::{DT, MAX_TIME_SCALE};
use fireline_core::enums::DrillPhase;
use fireline_core::error::SimError;
use fireline_core::events::FireEvent;
use fireline_core::state::DrillSnapshot;
use fireline_core::types::{ExtinguisherId, Position, SimTime};

use crate::coordinator::FireCoordinator;
use crate::scenario;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal). Used by real-time pacing.
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all drill state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: DrillPhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    scenario_name: Option<String>,
    coordinator: FireCoordinator,
    command_queue: VecDeque<DrillCommand>,
    events: Vec<FireEvent>,
    subscribers: Vec<mpsc::Sender<FireEvent>>,
    alarm_active: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: DrillPhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            scenario_name: None,
            coordinator: FireCoordinator::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            subscribers: Vec::new(),
            alarm_active: false,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: DrillCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = DrillCommand>) {
        self.command_queue.extend(commands);
    }

    /// Receive every notification as it is published at the end of a tick.
    /// Dropped receivers are pruned on the next publish.
    pub fn subscribe(&mut self) -> mpsc::Receiver<FireEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Load a layout and wait in `Setup` for `StartScenario`.
    pub fn load_scenario(&mut self, config: ScenarioConfig) -> Result<(), SimError> {
        let coordinator = world_setup::setup_scene(&mut self.world, &config)?;
        info!(
            "Loaded scenario '{}' ({} fires, {} extinguishers)",
            config.name,
            config.fires.len(),
            config.extinguishers.len()
        );
        self.coordinator = coordinator;
        self.scenario_name = Some(config.name);
        self.time = SimTime::default();
        self.phase = DrillPhase::Setup;
        self.alarm_active = false;
        Ok(())
    }

    /// Advance the simulation by one nominal tick.
    pub fn tick(&mut self) -> DrillSnapshot {
        self.tick_dt(DT)
    }

    /// Advance by one tick of length `dt` seconds and return the snapshot.
    pub fn tick_dt(&mut self, dt: f64) -> DrillSnapshot {
        self.process_commands();

        if self.phase == DrillPhase::Active {
            self.time.advance_by(dt);
            self.run_systems(dt.max(0.0));
        }
        fireline_hazard::order_tick_notifications(&mut self.events);
        systems::alarm::run(&self.coordinator, &mut self.alarm_active, &mut self.events);

        let events = std::mem::take(&mut self.events);
        self.publish(&events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.scenario_name.as_deref(),
            &self.coordinator,
            self.alarm_active,
            events,
        )
    }

    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn alarm_active(&self) -> bool {
        self.alarm_active
    }

    pub fn scenario_name(&self) -> Option<&str> {
        self.scenario_name.as_deref()
    }

    /// Read-only access to the hazard sites and totals.
    pub fn coordinator(&self) -> &FireCoordinator {
        &self.coordinator
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands. Failures are logged and skipped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(e) = self.handle_command(command) {
                warn!("Command rejected: {e}");
            }
        }
    }

    /// Handle a single command at the current time.
    fn handle_command(&mut self, command: DrillCommand) -> Result<(), SimError> {
        let now = self.time.elapsed_secs;
        let tick = self.time.tick;

        match command {
            DrillCommand::LoadScenario { scenario } => {
                self.load_scenario(scenario::build_scenario(scenario))?;
            }
            DrillCommand::LoadCustomScenario { config } => {
                self.load_scenario(config)?;
            }
            DrillCommand::StartScenario => {
                if self.scenario_name.is_none() {
                    return Err(SimError::InvalidConfig("no scenario loaded".into()));
                }
                if self.phase == DrillPhase::Setup {
                    self.coordinator.start(now, &mut self.rng, &mut self.events);
                    self.phase = DrillPhase::Active;
                    info!("Drill started");
                }
            }
            DrillCommand::ResetScenario => {
                if self.scenario_name.is_none() {
                    return Err(SimError::InvalidConfig("no scenario loaded".into()));
                }
                self.coordinator
                    .reset_scenario(now, &mut self.rng, &mut self.events);
                self.phase = DrillPhase::Active;
            }
            DrillCommand::Pause => {
                if self.phase == DrillPhase::Active {
                    self.phase = DrillPhase::Paused;
                }
            }
            DrillCommand::Resume => {
                if self.phase == DrillPhase::Paused {
                    self.phase = DrillPhase::Active;
                }
            }
            DrillCommand::SetTimeScale { scale } => {
                if !scale.is_finite() {
                    return Err(SimError::InvalidConfig(format!(
                        "time scale must be finite, got {scale}"
                    )));
                }
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
            DrillCommand::StartFire { fire_id } => {
                self.coordinator.start_fire(fire_id, now, &mut self.events)?;
            }
            DrillCommand::ReportContact { fire_id } => {
                self.coordinator
                    .report_contact(fire_id, now, &mut self.events)?;
            }
            DrillCommand::ReportSuppressionContact { fire_id, timestamp } => {
                let at = timestamp.unwrap_or(now);
                self.coordinator
                    .report_suppression_contact(fire_id, at, &mut self.events)?;
            }
            DrillCommand::ForceExtinguish { fire_id } => {
                self.coordinator
                    .force_extinguish(fire_id, now, tick, &mut self.events)?;
            }
            DrillCommand::ResetFire { fire_id } => {
                self.coordinator
                    .reset_fire(fire_id, now, tick, &mut self.rng, &mut self.events)?;
                if self.phase == DrillPhase::Complete {
                    self.phase = DrillPhase::Active;
                }
            }
            DrillCommand::SetAutoIgnition {
                fire_id,
                auto_ignition,
            } => {
                self.coordinator.set_auto_ignition(
                    fire_id,
                    auto_ignition,
                    now,
                    tick,
                    &mut self.rng,
                    &mut self.events,
                )?;
            }
            DrillCommand::SetDischarge {
                extinguisher_id,
                discharging,
            } => {
                let mut ext = self.extinguisher_mut::<Extinguisher>(extinguisher_id)?;
                ext.discharging = discharging;
            }
            DrillCommand::MoveExtinguisher {
                extinguisher_id,
                position,
            } => {
                let mut pos = self.extinguisher_mut::<Position>(extinguisher_id)?;
                *pos = position;
            }
        }
        Ok(())
    }

    fn extinguisher_mut<T: hecs::Component>(
        &mut self,
        id: ExtinguisherId,
    ) -> Result<hecs::RefMut<'_, T>, SimError> {
        let entity = world_setup::find_extinguisher(&self.world, id)
            .ok_or(SimError::UnknownExtinguisher(id))?;
        self.world
            .get::<&mut T>(entity)
            .map_err(|_| SimError::UnknownExtinguisher(id))
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;
        // 1. Extinguisher proximity -> suppression contact
        systems::suppression::run(&self.world, &mut self.coordinator, now, &mut self.events);
        // 2. Site updates and the settle-delayed completion check
        if self
            .coordinator
            .update(now, dt, self.time.tick, &mut self.events)
            .is_some()
        {
            self.phase = DrillPhase::Complete;
        }
    }

    /// Fan out this tick's notifications, dropping closed subscribers.
    fn publish(&mut self, events: &[FireEvent]) {
        if events.is_empty() || self.subscribers.is_empty() {
            return;
        }
        self.subscribers
            .retain(|tx| events.iter().all(|event| tx.send(event.clone()).is_ok()));
    }
}
