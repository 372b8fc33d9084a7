//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, ingests player input, runs all
//! systems in a fixed order, and produces `FrameSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::HashMap;
use std::path::Path;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use vanguard_ai::profiles::AiProfile;
use vanguard_core::commands::InputEvent;
use vanguard_core::components::{Kinematics, Unit};
use vanguard_core::enums::Pilot;
use vanguard_core::error::Result;
use vanguard_core::events::{HitEvent, SimEvent};
use vanguard_core::lockon::LockOnTracker;
use vanguard_core::state::FrameSnapshot;
use vanguard_core::tuning::Tuning;
use vanguard_core::types::{SimClock, Step, UnitId};

use crate::controller::InputTracker;
use crate::systems;
use crate::world_setup::{self, UnitSpec};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
    pub ai_profile: AiProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
            ai_profile: AiProfile::default(),
        }
    }
}

impl SimConfig {
    /// Default config with the tunables read from a JSON file.
    pub fn with_tuning_file(seed: u64, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tuning = Tuning::load(path).inspect_err(|err| {
            warn!(path = %path.display(), %err, "rejected tuning file");
        })?;
        Ok(Self {
            seed,
            tuning,
            ..Self::default()
        })
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    clock: SimClock,
    tuning: Tuning,
    ai_profile: AiProfile,
    lock_on: LockOnTracker,
    rng: ChaCha8Rng,
    /// Remaining globally frozen ticks.
    hit_freeze: u32,
    next_unit_id: u32,
    next_projectile_id: u32,
    units: HashMap<UnitId, Entity>,
    events: Vec<SimEvent>,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create an empty engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            clock: SimClock::default(),
            lock_on: LockOnTracker::from_tuning(&config.tuning),
            tuning: config.tuning,
            ai_profile: config.ai_profile,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            hit_freeze: 0,
            next_unit_id: 1,
            next_projectile_id: 1,
            units: HashMap::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Add a unit to the roster.
    pub fn spawn_unit(&mut self, spec: UnitSpec) -> UnitId {
        let (id, entity) =
            world_setup::spawn_unit(&mut self.world, &mut self.next_unit_id, &spec, &self.tuning);
        self.units.insert(id, entity);
        id
    }

    /// Spawn the default player-vs-AI duel. Returns (player, ai).
    pub fn setup_duel(&mut self) -> (UnitId, UnitId) {
        let spawned =
            world_setup::setup_duel(&mut self.world, &mut self.next_unit_id, &self.tuning);
        self.units.extend(spawned.iter().copied());
        (spawned[0].0, spawned[1].0)
    }

    /// Feed a key event to a player-piloted unit, stamped with the current
    /// simulation time. Events for unknown or AI units are ignored.
    pub fn push_input(&mut self, unit: UnitId, event: InputEvent) {
        let Some(&entity) = self.units.get(&unit) else {
            debug!(unit = unit.0, "input for unknown unit dropped");
            return;
        };
        if let Ok(mut tracker) = self.world.get::<&mut InputTracker>(entity) {
            tracker.handle(event, self.clock.now_secs, &self.tuning);
        }
    }

    /// Advance the simulation by one host frame and return the snapshot.
    ///
    /// While a hit-freeze is armed the tick only counts it down: no unit or
    /// projectile moves and the clock does not advance.
    pub fn tick(&mut self, delta_secs: f64) -> FrameSnapshot {
        if self.hit_freeze > 0 {
            self.hit_freeze -= 1;
        } else {
            let step = Step::from_delta(delta_secs);
            self.clock.advance(&step);
            self.run_systems(step);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Resolve a hit immediately. Hits raised inside a tick go through the
    /// same path at the end of that tick.
    pub fn apply_hit(&mut self, hit: HitEvent) -> bool {
        let listener = self.listener_position();
        systems::combat::apply_hit(
            &mut self.world,
            &hit,
            self.clock.now_secs,
            &mut self.hit_freeze,
            listener,
            &mut self.events,
        )
    }

    /// Current published state without advancing.
    pub fn snapshot(&self) -> FrameSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.clock, self.hit_freeze, Vec::new())
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    /// Remaining frozen ticks.
    pub fn hit_freeze(&self) -> u32 {
        self.hit_freeze
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// ECS entity backing a unit.
    pub fn entity(&self, unit: UnitId) -> Option<Entity> {
        self.units.get(&unit).copied()
    }

    /// Mutable access to the world (for scenario setup in tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run all systems in order.
    fn run_systems(&mut self, step: Step) {
        let now = self.clock.now_secs;
        // 1. Player input -> intents
        systems::intents::run(&mut self.world, now, &self.tuning);
        // 2. Targets and lock-on
        systems::targeting::run(&mut self.world, &self.lock_on);
        // 3. AI decisions -> intents
        systems::ai::run(&mut self.world, &self.ai_profile, &mut self.rng, now);
        // 4. Action controllers + physics
        let mut requests = systems::control::run(&mut self.world, &self.tuning, step, now);
        self.events.append(&mut requests.events);
        // 5. Projectiles: tracking cuts, flight, hits, expiry, then new shots
        systems::projectiles::cut_tracking(&mut self.world, &requests.cut_tracking);
        systems::projectiles::run(
            &mut self.world,
            &self.tuning,
            &step,
            &mut requests.hits,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        for shot in &requests.shots {
            systems::projectiles::spawn(
                &mut self.world,
                &mut self.next_projectile_id,
                shot,
                &self.tuning,
                &mut self.events,
            );
        }
        // 6. Combat resolution
        for hit in &requests.hits {
            self.apply_hit(*hit);
        }
    }

    /// Position of the first player-piloted unit: the audio listener.
    fn listener_position(&self) -> Option<DVec3> {
        self.world
            .query::<(&Unit, &Kinematics)>()
            .iter()
            .filter(|(_, (unit, _))| unit.pilot == Pilot::Player)
            .min_by_key(|(_, (unit, _))| unit.id)
            .map(|(_, (_, kin))| kin.position)
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> FrameSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.clock, self.hit_freeze, events)
    }
}
