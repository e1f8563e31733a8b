//! The simulation engine: owns the world, the formation table and all
//! per-run state, applies queued player commands at tick boundaries
//! and runs the system passes in a fixed order.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use voidrun_core::commands::PlayerCommand;
use voidrun_core::components::{Enemy, Explosion, Ship, ShipSystems};
use voidrun_core::constants::{
    AFTER_LIFE_SECS, EXPLOSION_SECS, FIELD_HEIGHT, FIRING_COST_LASER, LASER_SPEED_PLAYER,
    MAX_FORMATIONS, MAX_FORMATION_WIDTH, RECHARGE_DISTANCE, RECHARGE_RESOURCE_AMOUNT,
    RECHARGE_SECS, SPEED_X, SPEED_Y,
};
use voidrun_core::enums::{BeamOwner, RunMode, Tier};
use voidrun_core::events::GameEvent;
use voidrun_core::state::GameStateSnapshot;
use voidrun_core::types::{FormationId, Position, SimTime, Velocity};

use crate::formation::{create_formation, Formation};
use crate::session::{Census, RechargeState, RespawnPolicy, ScoreState};
use crate::spawn;
use crate::systems;
use crate::systems::black_hole::BlackHole;

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for the run's random number generator. Two engines with
    /// the same seed and command sequence evolve identically.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 93 }
    }
}

pub struct GameEngine {
    world: World,
    formations: Vec<Formation>,
    time: SimTime,
    run_mode: RunMode,
    current_level: u32,
    /// Set once the current level has seen a spawn, so an empty field
    /// only ends the level after there was something to clear.
    level_had_enemies: bool,
    seed: u64,
    rng: ChaCha8Rng,
    census: Census,
    score: ScoreState,
    respawn: RespawnPolicy,
    recharge: RechargeState,
    black_hole: BlackHole,
    after_life_since: f64,
    commands: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    despawn_buffer: Vec<Entity>,
}

impl GameEngine {
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        world.spawn((
            Ship,
            Position::default(),
            Velocity::new(0.0, SPEED_Y, 0.0),
            ShipSystems::default(),
        ));
        let black_hole = BlackHole::regenerate(&mut rng, 0.0);

        Self {
            world,
            formations: vec![Formation::inert(); MAX_FORMATIONS],
            time: SimTime::default(),
            run_mode: RunMode::MainMenu,
            current_level: 0,
            level_had_enemies: false,
            seed: config.seed,
            rng,
            census: Census::default(),
            score: ScoreState::new(),
            respawn: RespawnPolicy::new(0.0),
            recharge: RechargeState::new(0.0),
            black_hole,
            after_life_since: 0.0,
            commands: VecDeque::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Queues a player command for the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.commands.push_back(command);
    }

    /// Advances the simulation by one tick and returns the resulting
    /// state view, with the events of this tick drained into it.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();
        match self.run_mode {
            RunMode::Running => {
                self.run_systems();
                self.time.advance();
            }
            RunMode::AfterLife => {
                self.run_after_life();
                self.time.advance();
            }
            RunMode::MainMenu | RunMode::Paused => {}
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.formations,
            &self.black_hole,
            &self.time,
            self.run_mode,
            self.current_level,
            &self.score,
            &self.census,
            events,
        )
    }

    /// Spawns a formation of up to `amount` enemies led by `top_tier`,
    /// back rows one tier weaker per row. `nr_units` and `offset_y`
    /// stagger the formations of one wave. Returns the formation's
    /// table id, or `None` when the table is full or no ship exists.
    pub fn spawn_formation(
        &mut self,
        top_tier: Tier,
        formation_width: usize,
        amount: usize,
        nr_units: usize,
        offset_y: f64,
    ) -> Option<FormationId> {
        let (_, ship_position, _) = systems::ship_state(&self.world)?;
        let Some(slot) = self.formations.iter().position(Formation::is_inert) else {
            log::warn!("formation table full ({MAX_FORMATIONS}); spawn request dropped");
            return None;
        };

        self.formations[slot] = create_formation(
            top_tier,
            formation_width,
            slot,
            nr_units,
            offset_y,
            ship_position.y,
            self.current_level,
        );

        let formation = &mut self.formations[slot];
        for rank_index in 0..amount.min(formation.ranks.len()) {
            // Back rows carry one tier less per row behind the front.
            let row = formation.ranks[rank_index].coordinate.y;
            let tier = top_tier.step_down(row.saturating_sub(1) as u32);
            let position = formation.position + formation.ranks[rank_index].local_position;
            let direction = formation.velocity;
            spawn::add_enemy(
                &mut self.world,
                &mut self.census,
                tier,
                position,
                direction,
                Some((slot, &mut *formation)),
            );
        }
        if amount > 0 {
            self.level_had_enemies = true;
        }
        log::debug!(
            "spawned formation {slot}: width {formation_width}, {amount} enemies, top tier {top_tier:?}"
        );
        Some(slot)
    }

    /// Clears the field, advances the level counter and announces it.
    /// Wave population is the driver's job, prompted by the
    /// `LevelCleared` event. Usually the field is already empty when
    /// this runs; a driver-forced advance despawns any stragglers.
    pub fn advance_level(&mut self) {
        self.despawn_buffer.clear();
        {
            let mut query = self.world.query::<&Enemy>();
            for (entity, _) in query.iter() {
                self.despawn_buffer.push(entity);
            }
        }
        for entity in std::mem::take(&mut self.despawn_buffer) {
            spawn::remove_enemy(
                &mut self.world,
                &mut self.census,
                &mut self.formations,
                entity,
            );
        }
        for formation in &mut self.formations {
            formation.clear();
        }
        self.current_level += 1;
        self.level_had_enemies = false;
        self.events
            .push(GameEvent::LevelCleared { next_level: self.current_level });
        log::info!("level {} reached", self.current_level);
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    pub fn time(&self) -> &SimTime {
        &self.time
    }

    pub fn level(&self) -> u32 {
        self.current_level
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn census(&self) -> &Census {
        &self.census
    }

    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                PlayerCommand::StartGame => self.start_game(),
                PlayerCommand::Pause => {
                    if self.run_mode == RunMode::Running {
                        self.run_mode = RunMode::Paused;
                    }
                }
                PlayerCommand::Resume => {
                    if self.run_mode == RunMode::Paused {
                        self.run_mode = RunMode::Running;
                    }
                }
                PlayerCommand::SteerShip { velocity_x } => {
                    if self.run_mode == RunMode::Running {
                        let clamped = velocity_x.clamp(-SPEED_X, SPEED_X);
                        for (_, (_, velocity)) in
                            self.world.query_mut::<(&Ship, &mut Velocity)>()
                        {
                            velocity.0.x = clamped;
                        }
                    }
                }
                PlayerCommand::FireLaser => self.fire_player_laser(),
            }
        }
    }

    fn fire_player_laser(&mut self) {
        if self.run_mode != RunMode::Running || self.score.resource < FIRING_COST_LASER {
            return;
        }
        let Some((_, ship_position, ship_velocity)) = systems::ship_state(&self.world) else {
            return;
        };
        self.score.resource -= FIRING_COST_LASER;
        spawn::add_laser_beam(
            &mut self.world,
            &mut self.census,
            &mut self.score,
            &mut self.events,
            BeamOwner::Player,
            ship_position,
            DVec3::new(0.0, LASER_SPEED_PLAYER, 0.0),
            1.0,
            None,
            ship_velocity.y,
        );
    }

    fn start_game(&mut self) {
        self.world = World::new();
        self.world.spawn((
            Ship,
            Position::default(),
            Velocity::new(0.0, SPEED_Y, 0.0),
            ShipSystems::default(),
        ));
        self.formations = vec![Formation::inert(); MAX_FORMATIONS];
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.census = Census::default();
        self.score = ScoreState::new();
        self.respawn = RespawnPolicy::new(0.0);
        self.recharge = RechargeState::new(0.0);
        self.black_hole = BlackHole::regenerate(&mut self.rng, 0.0);
        self.current_level = 0;
        self.level_had_enemies = false;
        self.events.clear();

        self.advance_level();
        self.run_mode = RunMode::Running;
        log::info!("run started (seed {})", self.seed);
    }

    fn run_systems(&mut self) {
        self.advance_logistics();

        systems::enemy_ai::run(
            &mut self.world,
            &mut self.formations,
            &mut self.census,
            &mut self.score,
            &mut self.events,
            &self.time,
        );
        systems::ship::run(&mut self.world, &mut self.score, &self.time);
        systems::formation_advance::run(
            &mut self.world,
            &mut self.formations,
            &self.time,
            self.current_level,
        );
        let mut ship_destroyed = systems::enemy_motion::run(
            &mut self.world,
            &mut self.formations,
            &mut self.census,
            &mut self.events,
            &self.time,
            self.current_level,
        );
        ship_destroyed |= systems::laser::run(
            &mut self.world,
            &mut self.census,
            &mut self.formations,
            &mut self.score,
            &mut self.respawn,
            &mut self.events,
            &self.time,
            self.current_level,
        );
        systems::bonus::run(
            &mut self.world,
            &mut self.census,
            &mut self.score,
            &mut self.events,
            &self.time,
        );
        ship_destroyed |= systems::black_hole::run(
            &mut self.black_hole,
            &mut self.world,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
            &self.time,
        );
        self.retire_explosions();

        if self.census.enemies_total == 0 && self.level_had_enemies {
            self.advance_level();
        }
        if ship_destroyed {
            self.score.resource = 0.0;
            self.events.push(GameEvent::PlayerDied);
            self.run_mode = RunMode::AfterLife;
            self.after_life_since = self.time.game_secs;
            log::info!(
                "run over at level {} with score {}",
                self.current_level,
                self.score.score
            );
        }
    }

    /// The enemy side keeps moving briefly after the player's death so
    /// the final explosions play out, then the engine falls back to
    /// the main menu.
    fn run_after_life(&mut self) {
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.formations,
            &mut self.census,
            &mut self.score,
            &mut self.events,
            &self.time,
        );
        systems::formation_advance::run(
            &mut self.world,
            &mut self.formations,
            &self.time,
            self.current_level,
        );
        let _ = systems::enemy_motion::run(
            &mut self.world,
            &mut self.formations,
            &mut self.census,
            &mut self.events,
            &self.time,
            self.current_level,
        );
        let _ = systems::laser::run(
            &mut self.world,
            &mut self.census,
            &mut self.formations,
            &mut self.score,
            &mut self.respawn,
            &mut self.events,
            &self.time,
            self.current_level,
        );
        self.retire_explosions();

        if self.time.game_secs - self.after_life_since > AFTER_LIFE_SECS {
            self.run_mode = RunMode::MainMenu;
        }
    }

    /// Once-per-grant housekeeping: the distance recharge trickle and
    /// the warp respawn penalty.
    fn advance_logistics(&mut self) {
        let Some((_, ship_position, _)) = systems::ship_state(&self.world) else {
            return;
        };
        let now = self.time.game_secs;

        if ship_position.y > self.recharge.next_beyond_y && now > self.recharge.next_at {
            self.score.resource += RECHARGE_RESOURCE_AMOUNT;
            self.recharge.next_beyond_y = ship_position.y + RECHARGE_DISTANCE;
            self.recharge.next_at = now + RECHARGE_SECS;
        }

        if ship_position.y > self.respawn.add_enemy_beyond_y {
            self.player_warped_around(ship_position.y);
        }
    }

    /// The player has outrun the field for a full cycle without a
    /// kill. Pacifism is not a winning strategy: a penalty formation
    /// spawns, larger on every repeat.
    fn player_warped_around(&mut self, ship_y: f64) {
        let quota = self.respawn.warp_enemy_quota;
        let width = (1.0 + f64::from(quota).sqrt()) as usize;
        let width = width.clamp(1, MAX_FORMATION_WIDTH);
        let amount = (quota as usize).min(width * width);
        log::info!("player warped a full field without a kill; spawning {amount} enemies");
        self.spawn_formation(Tier::Fighter1, width, amount, 1, 0.0);
        self.respawn.add_enemy_beyond_y = ship_y + FIELD_HEIGHT * 1.6;
        self.respawn.warp_enemy_quota = quota + 2;
    }

    fn retire_explosions(&mut self) {
        let now = self.time.game_secs;
        self.despawn_buffer.clear();
        {
            let mut query = self.world.query::<&Explosion>();
            for (entity, explosion) in query.iter() {
                if now - explosion.started_at > EXPLOSION_SECS {
                    self.despawn_buffer.push(entity);
                }
            }
        }
        for entity in self.despawn_buffer.drain(..) {
            if self.world.despawn(entity).is_ok() {
                self.census.explosions = self.census.explosions.saturating_sub(1);
            }
        }
    }
}
