//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the arena, and the player,
//! processes lifecycle commands, applies per-tick input, runs all systems,
//! and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use survivor_arena::{ArenaLayout, SpatialWorld};
use survivor_core::commands::{InputFrame, PlayerCommand};
use survivor_core::enums::{GamePhase, HeroKind};
use survivor_core::events::{GameEvent, SkillBonusNotice};
use survivor_core::state::GameStateSnapshot;
use survivor_core::types::SimTime;

use crate::config::SimConfig;
use crate::player::PlayerState;
use crate::systems;
use crate::systems::combat::Kill;
use crate::systems::wave_spawner::WaveSchedule;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    hero: HeroKind,
    config: SimConfig,
    rng: ChaCha8Rng,
    spatial: SpatialWorld,
    player: PlayerState,
    schedule: WaveSchedule,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    skill_bonus: Option<SkillBonusNotice>,
    /// When a hostile last landed a contact hit.
    last_contact_ms: Option<u64>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The arena is
    /// generated immediately; the engine waits in the menu.
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            hero: config.hero,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spatial: SpatialWorld::open(),
            player: PlayerState::new(config.hero),
            schedule: WaveSchedule::from_config(&config),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            skill_bonus: None,
            last_contact_ms: None,
            config,
        };
        engine.build_arena();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Input is ignored outside the active phase.
    pub fn tick(&mut self, input: &InputFrame) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(input);
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.player,
            &self.spatial,
            &self.schedule,
            events,
            self.skill_bonus,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Hero used for the next encounter.
    pub fn hero(&self) -> HeroKind {
        self.hero
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn spatial(&self) -> &SpatialWorld {
        &self.spatial
    }

    pub fn schedule(&self) -> &WaveSchedule {
        &self.schedule
    }

    /// Spawn a hostile at a fixed position (for testing).
    #[cfg(test)]
    pub fn spawn_test_hostile(
        &mut self,
        kind: survivor_core::enums::HostileKind,
        position: survivor_core::types::Position,
    ) -> hecs::Entity {
        world_setup::spawn_hostile(&mut self.world, kind, position)
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    #[cfg(test)]
    pub fn schedule_mut(&mut self) -> &mut WaveSchedule {
        &mut self.schedule
    }

    /// Swap in a hand-built arena (for testing).
    #[cfg(test)]
    pub fn set_spatial(&mut self, spatial: SpatialWorld) {
        self.spatial = spatial;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SelectHero { hero } => {
                if self.phase == GamePhase::Menu {
                    self.hero = hero;
                    self.player = PlayerState::new(hero);
                }
            }
            PlayerCommand::StartEncounter => {
                if self.phase == GamePhase::Menu {
                    self.reset_encounter();
                    self.phase = GamePhase::Active;
                    log::info!("encounter started as {:?}", self.hero);
                }
            }
            PlayerCommand::Restart => {
                self.build_arena();
                self.reset_encounter();
                self.phase = GamePhase::Active;
                log::info!("simulation restarted as {:?}", self.hero);
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Fresh world, arena, and initial pickups. Draws from the engine RNG.
    fn build_arena(&mut self) {
        self.world = World::new();
        let layout = ArenaLayout {
            obstacle_count: self.config.obstacle_count,
            ..Default::default()
        };
        self.spatial = SpatialWorld::generate(&mut self.rng, &layout);
        world_setup::place_initial_pickups(&mut self.world, &mut self.rng, &self.spatial);
    }

    /// Fresh player, clock, and spawn schedule on the current arena.
    fn reset_encounter(&mut self) {
        self.player = PlayerState::new(self.hero);
        self.schedule = WaveSchedule::from_config(&self.config);
        self.time = SimTime::default();
        self.events.clear();
        self.skill_bonus = None;
        self.last_contact_ms = None;
    }

    fn run_systems(&mut self, input: &InputFrame) {
        let now_ms = self.time.elapsed_ms;

        self.apply_input(input, now_ms);

        systems::projectiles::run(&mut self.world, &self.spatial, &mut self.despawn_buffer);

        let blasts = systems::ordnance::run(
            &mut self.world,
            &self.spatial,
            self.player.position,
            &mut self.events,
        );
        for blast in &blasts {
            let kills = systems::combat::blast_damage(&mut self.world, blast, now_ms);
            self.settle_kills(&kills, now_ms);
            if blast.hits_player && self.hit_player() {
                return;
            }
        }

        systems::hostile_movement::run(
            &mut self.world,
            &self.spatial,
            self.player.position,
            &mut self.rng,
        );

        if let Some(weapon) = self.player.update_reload(now_ms) {
            self.events.push(GameEvent::ReloadComplete { weapon });
        }
        self.player.update_windows(now_ms);

        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.schedule,
            &self.spatial,
            self.player.position,
            now_ms,
            &mut self.events,
        );

        systems::pickups::collect_power_ups(
            &mut self.world,
            &mut self.player,
            now_ms,
            &mut self.events,
        );

        let kills = systems::combat::projectile_hits(&mut self.world, now_ms, &mut self.despawn_buffer);
        self.settle_kills(&kills, now_ms);

        if systems::combat::contact_hit(
            &self.world,
            self.player.position,
            now_ms,
            &mut self.last_contact_ms,
        ) && self.hit_player()
        {
            return;
        }

        systems::pickups::collect_weapons(&mut self.world, &mut self.player, &mut self.events);

        if self.spatial.in_exit(&self.player.bounds()) {
            self.phase = GamePhase::Won;
            log::info!(
                "exit reached at tick {} with score {}",
                self.time.tick,
                self.player.score
            );
        }

        systems::cleanup::run(&mut self.world, &self.spatial, &mut self.despawn_buffer);
    }

    /// Movement, aim, weapon handling, ability, then fire.
    fn apply_input(&mut self, input: &InputFrame, now_ms: u64) {
        self.player.move_by(input.move_x, input.move_y, &self.spatial);
        self.player.aim_at(input.aim);

        if let Some(slot) = input.switch_to_slot {
            self.player.switch_to_slot(slot);
        }
        if let Some(direction) = input.switch_relative {
            self.player.switch_relative(direction);
        }
        if input.reload_pressed {
            self.player.start_reload(now_ms);
        }
        if input.ability_pressed {
            if let Some(ability) = self.player.activate_ability(now_ms) {
                self.events.push(GameEvent::AbilityActivated { ability });
                log::info!("{ability:?} activated at tick {}", self.time.tick);
            }
        }
        if input.fire_held {
            for shot in self.player.shoot(input.aim, now_ms) {
                world_setup::spawn_shot(&mut self.world, shot);
            }
        }
    }

    fn settle_kills(&mut self, kills: &[Kill], now_ms: u64) {
        if kills.is_empty() {
            return;
        }
        let boss_died = systems::combat::settle_kills(
            &mut self.world,
            kills,
            &mut self.player,
            now_ms,
            &mut self.events,
            &mut self.skill_bonus,
        );
        if boss_died {
            self.schedule.boss_defeated = true;
        }
    }

    /// Apply one hit to the player. Returns true if the encounter ended.
    fn hit_player(&mut self) -> bool {
        let died = self.player.take_hit();
        self.events.push(GameEvent::PlayerHit {
            remaining_health: self.player.health,
        });
        if died {
            self.phase = GamePhase::Lost;
            log::info!(
                "player down at tick {} with score {}",
                self.time.tick,
                self.player.score
            );
        }
        died
    }
}
