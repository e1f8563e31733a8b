//! VOIDRUN simulation: a headless, deterministic, fixed-tick engine
//! for the formation and enemy subsystem.
//!
//! The engine owns a `hecs` world plus the formation table and exposes
//! a command-in / snapshot-out surface. An external driver queues
//! player commands, calls [`engine::GameEngine::tick`] at the fixed
//! rate and renders the returned snapshot; wave population happens on
//! the driver side, prompted by `LevelCleared` events.

pub mod engine;
pub mod field;
pub mod formation;
pub mod session;
pub mod spawn;
pub mod systems;

pub use engine::{GameEngine, SimConfig};
