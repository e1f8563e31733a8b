//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World-space position (field units). x = lateral, y = scroll direction
/// (forward, away from the player's start), z = depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// World-space velocity (field units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Formation-relative logical rank address. Used only for neighbour
/// lookup within a formation, never for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

/// Index of a formation in the engine's formation table.
pub type FormationId = usize;

/// Index of a rank within a formation's rank array.
pub type RankIndex = usize;

/// RGB colour for tier-keyed rendering (0.0..1.0 per channel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed game time in seconds. All stored deadlines (fire
    /// cooldowns, transit start, hit flash) compare against this.
    pub game_secs: f64,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }
}

impl Velocity {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Speed magnitude (units per second).
    pub fn speed(&self) -> f64 {
        self.0.length()
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.game_secs += self.dt();
    }
}
