//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// A hostile actor pursuing the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub kind: HostileKind,
    /// Collision size (bounding square side, and proximity radius).
    pub size: f64,
    /// Units per tick.
    pub speed: f64,
    pub health: f64,
    pub max_health: f64,
    /// Timestamp of the last damage taken, for hit-flash feedback.
    pub last_damage_ms: Option<u64>,
    /// Angle toward the player (radians), refreshed each movement step.
    pub facing: f64,
}

/// Per-hostile memory used by the movement ladder to escape local traps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AvoidanceMemory {
    /// Consecutive-failure score. Bounded by twice the stuck threshold.
    pub stuck_counter: u32,
    /// Position at the end of the previous movement step.
    pub last_position: Position,
    /// Heading override used while `avoidance_timer` is positive.
    pub avoidance_angle: f64,
    /// Remaining ticks of avoidance mode.
    pub avoidance_timer: u32,
}

/// Projectile flight variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Straight line.
    Standard,
    /// Retargets toward the nearest hostile while `window_remaining` ticks remain.
    Homing { window_remaining: u32 },
}

/// A player-fired projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: f64,
    pub size: f64,
    /// Fixed flight speed (units per tick).
    pub speed: f64,
}

/// A thrown area-effect charge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ordnance {
    pub damage: f64,
    pub explosion_radius: f64,
    pub size: f64,
    /// Ticks spent flying.
    pub flight_ticks: u32,
    /// Flight ticks at which the charge auto-detonates.
    pub max_flight_ticks: u32,
    pub exploded: bool,
    /// Ticks elapsed since detonation.
    pub explosion_ticks: u32,
    /// Set once the blast damage has been resolved.
    pub blast_applied: bool,
}

/// What a pickup grants on collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    Weapon(WeaponKind),
    PowerUp {
        kind: PowerUpKind,
        duration_ms: u64,
    },
}

/// A collectible lying in the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Player centre must come closer than this to collect.
    pub radius: f64,
    /// Logically destroyed once set.
    pub collected: bool,
}
