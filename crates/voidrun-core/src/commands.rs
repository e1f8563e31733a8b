//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions the core reacts to. Everything else
/// (menu navigation, camera) is handled outside the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start (or restart) a run from the main menu.
    StartGame,
    Pause,
    Resume,
    /// Set the ship's lateral velocity (clamped to the field speed).
    SteerShip { velocity_x: f64 },
    /// Fire the primary laser. Costs resource; no-op when broke.
    FireLaser,
}
