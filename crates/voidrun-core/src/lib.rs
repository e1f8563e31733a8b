//! Core types and definitions for the VOIDRUN simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry types, components, commands, snapshot views, events and
//! tuning constants. It has no dependency on the ECS or any runtime.

pub mod collision;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
