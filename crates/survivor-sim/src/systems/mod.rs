//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state. Anything a system needs from the engine, such as
//! the arena, the player, or the RNG, is passed in explicitly.

pub mod cleanup;
pub mod combat;
pub mod hostile_movement;
pub mod ordnance;
pub mod pickups;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;
