//! Formation geometry and enemy decision logic for VOIDRUN.
//!
//! Pure functions over plain data: the triangular rank layout with its
//! refill adjacency, tier stat profiles, and the per-enemy fire /
//! course-reversal decisions. No ECS dependency; the sim crate applies
//! the results to the world.

pub mod gunnery;
pub mod layout;
pub mod profiles;

#[cfg(test)]
mod tests;
