//! Events emitted by the simulation for HUD and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Per-tick gameplay events for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave was composed.
    WaveSpawned { wave: u32, placed: u32 },
    /// The boss entered the arena.
    BossSpawned { position: Position },
    /// A hostile was killed.
    HostileKilled { kind: HostileKind, position: Position },
    /// The boss died; survivors were converted and spawning halted.
    BossDefeated { position: Position },
    /// Kill-streak milestone bonus.
    SkillBonus { amount: u64, streak: u32 },
    /// Ordnance detonated.
    Detonation { position: Position, radius: f64 },
    /// The player took a hit.
    PlayerHit { remaining_health: u32 },
    /// The player picked up a weapon.
    WeaponAcquired { weapon: WeaponKind },
    /// The player collected a power-up.
    PowerUpCollected { kind: PowerUpKind },
    /// The hero ability was activated.
    AbilityActivated { ability: AbilityKind },
    /// A reload finished.
    ReloadComplete { weapon: WeaponKind },
}

/// Latest skill-bonus notification for timed HUD display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillBonusNotice {
    pub amount: u64,
    pub awarded_at_ms: u64,
}
