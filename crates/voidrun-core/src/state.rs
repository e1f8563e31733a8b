//! Game state snapshot: the read-only view handed to the rendering and
//! audio subsystems after each tick. They never mutate core state.

use serde::{Deserialize, Serialize};

use crate::enums::{BeamOwner, MotionMode, RunMode, Tier};
use crate::events::GameEvent;
use crate::types::{Color, Position, SimTime, Velocity};

/// Complete visible state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub run_mode: RunMode,
    pub level: u32,
    pub ship: ShipView,
    pub enemies: Vec<EnemyView>,
    pub formations: Vec<FormationView>,
    pub beams: Vec<BeamView>,
    pub bubbles: Vec<BubbleView>,
    pub explosions: Vec<ExplosionView>,
    pub black_hole: BlackHoleView,
    pub score: ScoreView,
    /// Events drained this tick, for sound triggering and HUD notices.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    pub velocity: Velocity,
    pub hit_flash: bool,
    pub weapons: [bool; crate::constants::NR_WEAPONS],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub tier: Tier,
    pub color: Color,
    pub hit_points: i32,
    pub mode: MotionMode,
    pub hit_flash: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormationView {
    pub position: Position,
    pub velocity: Velocity,
    pub rank_count: usize,
    pub occupied_ranks: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamView {
    pub position: Position,
    pub velocity: Velocity,
    pub owner: BeamOwner,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BubbleView {
    pub position: Position,
    pub tier: Tier,
    pub resource: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Position,
    /// 0.0 (just spawned) .. 1.0 (about to be removed).
    pub progress: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlackHoleView {
    pub position: Position,
    pub distance_to_ship: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: f64,
    pub resource: f64,
    pub best_resource: f64,
    pub shots_fired: u32,
    pub shots_missed: u32,
    pub shots_en_route: u32,
    pub enemies_killed: u32,
    pub active_enemies_total: usize,
    pub active_enemies_by_tier: [usize; crate::constants::NR_TIERS],
}
