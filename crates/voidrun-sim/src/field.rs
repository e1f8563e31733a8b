//! Playfield geometry helpers: the wraparound that keeps everything in
//! a band around the ever-advancing ship.

use glam::DVec3;

use voidrun_core::constants::FIELD_HEIGHT;

/// Forward span of a level. Later levels stretch a little so enemies
/// re-enter further ahead.
pub fn level_length(level: u32) -> f64 {
    FIELD_HEIGHT / 4.0 + 0.1 * f64::from(level)
}

/// Where wrapped objects re-enter the field, ahead of the ship.
pub fn entry_line_y(ship_y: f64, level: u32) -> f64 {
    ship_y + 0.15 * FIELD_HEIGHT + level_length(level)
}

/// Wraps a position that has fallen too far behind the ship back to the
/// entry line. Enemies and formations the player outruns come back for
/// another pass instead of being lost forever.
pub fn normalize_position_y(ship_y: f64, level: u32, position: &mut DVec3) {
    if position.y - ship_y < -FIELD_HEIGHT / 8.0 {
        position.y = entry_line_y(ship_y, level);
    }
}
