//! Simulation engine for SURVIVOR.
//!
//! Owns the hecs ECS world and the player state, runs systems at a fixed
//! tick rate, and produces GameStateSnapshots for the frontend.

pub mod config;
pub mod engine;
pub mod player;
pub mod systems;
pub mod world_setup;

pub use config::{ConfigError, SimConfig};
pub use engine::SimulationEngine;
pub use survivor_core as core;
