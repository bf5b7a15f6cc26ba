//! Arena geometry for SURVIVOR.
//!
//! Obstacle layout, exit region, and the pure collision queries
//! used by hostile movement, projectiles, and spawn placement.

pub use survivor_core as core;

pub mod generate;
pub mod spatial;

// Re-export key types for convenience.
pub use generate::ArenaLayout;
pub use spatial::{Footprint, SpatialWorld};
