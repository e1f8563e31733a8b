//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Field geometry ---

/// Lateral extent of the playfield (field units).
pub const FIELD_WIDTH: f64 = 200.0;

/// Forward extent of the playfield.
pub const FIELD_HEIGHT: f64 = 1000.0;

pub const FIELD_MIN_X: f64 = -FIELD_WIDTH / 2.0;
pub const FIELD_MAX_X: f64 = FIELD_WIDTH / 2.0;

// --- Ship ---

/// Collision radius of the player's ship.
pub const SHIP_SIZE: f64 = 2.0;

/// Ship hull length, basis for the minimum shooting distance.
pub const SHIP_LENGTH: f64 = 4.0;

/// Lateral / forward base speeds (units per second).
pub const SPEED_X: f64 = 75.0;
pub const SPEED_Y: f64 = 100.0;

// --- Entity pools (soft caps) ---

pub const MAX_ENEMIES: usize = 100;
pub const MAX_LASER_BEAMS: usize = 1000;
pub const MAX_BONUS_BUBBLES: usize = MAX_ENEMIES;
pub const MAX_EXPLOSIONS: usize = MAX_ENEMIES;
pub const MAX_FORMATIONS: usize = 64;

// --- Formations ---

/// Maximum requested formation width (rows grow up to this many ranks).
pub const MAX_FORMATION_WIDTH: usize = 8;

/// Structural maximum of ranks in one formation.
pub const MAX_FORMATION_RANKS: usize = MAX_FORMATION_WIDTH * MAX_FORMATION_WIDTH;

/// Maximum entries in a rank's refill priority list.
pub const NR_FILLFROM_RANKS: usize = 5;

/// Distance between neighbouring ranks (world units per logical step).
pub const FORMATION_SPACING: f64 = 10.0;

/// Duration of a rank-to-rank transit (seconds).
pub const RANK_TRANSIT_SECS: f64 = 1.0;

// --- Enemy AI ---

/// Start shooting when this near to the player (forward distance).
pub const AI_MAX_SHOOT_DISTANCE: f64 = 2.0 * FIELD_HEIGHT / 5.0;

/// Don't shoot if very close.
pub const AI_MIN_SHOOT_DISTANCE: f64 = 6.0 * SHIP_LENGTH;

/// How far behind the player an enemy may still open fire.
pub const AI_SHOOT_BEHIND_DISTANCE: f64 = 50.0;

/// Base firing interval of the lowest tier (seconds).
pub const ENEMY_BASE_SHOOT_INTERVAL_SECS: f64 = 3.0;

/// Shoot-interval scaling for fighter tiers.
pub const ENEMY_TIER_SHOOT_FACTOR: f64 = 9.0;

/// Shoot-interval scaling for the mothership tier.
pub const MOTHERSHIP_SHOOT_FACTOR: f64 = 19.0;

pub const MOTHERSHIP_AGGRESSIVENESS: f64 = 9.0;

/// Forward offset added to the ship position when a mothership aims.
pub const MOTHERSHIP_PRE_AIM_OFFSET: f64 = 17.0;

/// Resource a mothership drops on destruction.
pub const MOTHERSHIP_SCORE: f64 = 100.0;

// --- Laser beams ---

pub const LASER_SPEED_PLAYER: f64 = 300.0;
pub const LASER_SPEED_ENEMY: f64 = 200.0;
pub const LASER_SPEED_MOTHERSHIP: f64 = 300.0;

/// Resource cost of a single player shot.
pub const FIRING_COST_LASER: f64 = 1.0;

// --- Collision / sizes ---

/// Base collision radius of an enemy; grows with remaining hit points.
pub const ENEMY_SIZE_FACTOR: f64 = 3.0;

// --- Timers ---

/// Flash the object to indicate a non-lethal hit (seconds).
pub const HIT_FLASH_SECS: f64 = 0.075;

/// Extra run state to let animations finish after the player's death.
pub const AFTER_LIFE_SECS: f64 = 0.5;

/// Lifetime of an explosion entity (seconds).
pub const EXPLOSION_SECS: f64 = 0.45;

// --- Resource / score ---

/// Start with some resource reserve.
pub const INITIAL_RESOURCE: f64 = 99.0;

/// Minimum resource subtracted when the ship is hit.
pub const LASER_HIT_PENALTY_MIN: f64 = 50.0;

/// Distance that must be travelled to regain resource.
pub const RECHARGE_DISTANCE: f64 = 100.0;

/// Time that must have passed to regain resource (seconds).
pub const RECHARGE_SECS: f64 = 1.0;

pub const RECHARGE_RESOURCE_AMOUNT: f64 = 1.0;

/// Score multiplier applied to an enemy's resource value on a kill.
pub const BONUS_FACTOR_SCORE: f64 = 10.0;

// --- Bonus bubbles ---

pub const BONUS_BUBBLE_MIN_RADIUS: f64 = 0.0;
pub const BONUS_BUBBLE_MAX_RADIUS: f64 = 25.0;

// --- Warp respawn policy ---

/// Penalty enemies spawned when the player warps a full field height
/// without killing anything; grows by two per warp.
pub const MIN_WARP_ENEMIES: u32 = 4;

// --- Black hole ---

/// Per-tick drift of the black hole (field units).
pub const BLACK_HOLE_DRIFT_PER_TICK: f64 = 0.5;

/// Radius within which the hole drains the player's resource.
pub const BLACK_HOLE_RADIUS_RESOURCE: f64 = 35.0;

/// Distance at which the hole destroys the ship outright.
pub const BLACK_HOLE_RADIUS_KILL: f64 = 5.0;

/// The hole's gameplay centre sits behind its visual anchor.
pub const BLACK_HOLE_OFFSET_Y: f64 = -50.0;

// --- Tiers ---

/// Kinds of enemies (three fighter tiers plus the mothership).
pub const NR_TIERS: usize = 4;

/// Number of unlockable ship weapon slots.
pub const NR_WEAPONS: usize = 4;
