//! Per-run bookkeeping: score and resource, entity census, and the two
//! pacing trackers (warp respawn penalty and distance recharge).

use voidrun_core::constants::{
    FIELD_HEIGHT, INITIAL_RESOURCE, MIN_WARP_ENEMIES, NR_TIERS, RECHARGE_DISTANCE, RECHARGE_SECS,
};

/// Score, resource reserve and shot statistics of the current run.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: f64,
    /// Doubles as the ship's health pool and its ammunition reserve.
    pub resource: f64,
    pub best_resource: f64,
    pub shots_fired: u32,
    pub shots_missed: u32,
    /// Player beams currently in flight.
    pub shots_en_route: u32,
    pub enemies_killed: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            resource: INITIAL_RESOURCE,
            best_resource: INITIAL_RESOURCE,
            ..Self::default()
        }
    }
}

/// Live entity counts, kept in lockstep with every spawn and despawn.
/// The zero-enemies condition that ends a level reads these instead of
/// scanning the world.
#[derive(Debug, Clone, Default)]
pub struct Census {
    pub enemies_total: usize,
    pub enemies_by_tier: [usize; NR_TIERS],
    pub beams: usize,
    pub bubbles: usize,
    pub explosions: usize,
}

/// Anti-pacifist pacing: if the player warps a full field height
/// without a kill, a penalty formation spawns. The quota grows with
/// every warp and resets on the next kill.
#[derive(Debug, Clone)]
pub struct RespawnPolicy {
    /// Ship y beyond which the penalty triggers.
    pub add_enemy_beyond_y: f64,
    pub warp_enemy_quota: u32,
}

impl RespawnPolicy {
    pub fn new(ship_y: f64) -> Self {
        let mut policy = Self {
            add_enemy_beyond_y: 0.0,
            warp_enemy_quota: MIN_WARP_ENEMIES,
        };
        policy.reset(ship_y);
        policy
    }

    /// Re-arms both trackers, as happens after every player kill.
    pub fn reset(&mut self, ship_y: f64) {
        self.add_enemy_beyond_y = ship_y + FIELD_HEIGHT * 1.6;
        self.warp_enemy_quota = MIN_WARP_ENEMIES;
    }
}

/// Slow resource trickle: one unit once the ship has covered both the
/// recharge distance and the recharge time since the last grant.
#[derive(Debug, Clone, Default)]
pub struct RechargeState {
    pub next_beyond_y: f64,
    pub next_at: f64,
}

impl RechargeState {
    pub fn new(ship_y: f64) -> Self {
        Self {
            next_beyond_y: ship_y + RECHARGE_DISTANCE,
            next_at: RECHARGE_SECS,
        }
    }
}
