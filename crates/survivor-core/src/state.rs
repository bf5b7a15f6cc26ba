//! Game state snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, SkillBonusNotice};
use crate::types::{Position, Rect, SimTime, Velocity};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub hostiles: Vec<HostileView>,
    pub projectiles: Vec<ProjectileView>,
    pub ordnance: Vec<OrdnanceView>,
    pub pickups: Vec<PickupView>,
    pub obstacles: Vec<Rect>,
    pub exit: Rect,
    pub wave: WaveView,
    pub events: Vec<GameEvent>,
    /// Most recent streak bonus, kept while it is still worth displaying.
    pub skill_bonus: Option<SkillBonusNotice>,
}

/// Full player state block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub hero: HeroKind,
    pub position: Position,
    pub size: f64,
    pub aim_angle: f64,
    pub health: u32,
    pub max_health: u32,
    pub slots: Vec<SlotView>,
    pub current_slot: usize,
    pub grenades: u32,
    pub reload: Option<ReloadView>,
    pub ability_charge: f64,
    pub ability: Option<TimedEffectView<AbilityKind>>,
    pub power_up: Option<TimedEffectView<PowerUpKind>>,
    pub score: u64,
    pub kills: KillsView,
    pub streak: u32,
}

/// One weapon slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotView {
    pub weapon: Option<WeaponKind>,
    /// Current ammunition (throwable count for grenades).
    pub ammo: u32,
    /// Ammunition capacity (None for the throwable).
    pub max_ammo: Option<u32>,
}

/// In-progress reload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReloadView {
    pub weapon: WeaponKind,
    pub started_ms: u64,
    /// Shells loaded so far (shotgun only, zero otherwise).
    pub shells_loaded: u32,
}

/// A timed buff window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimedEffectView<K> {
    pub kind: K,
    pub ends_at_ms: u64,
    pub remaining_ms: u64,
}

/// Kill counters by category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct KillsView {
    pub standard: u32,
    pub fast: u32,
    pub boss: u32,
    pub total: u32,
}

/// A live hostile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub id: u64,
    pub kind: HostileKind,
    pub position: Position,
    pub size: f64,
    pub health: f64,
    pub max_health: f64,
    pub facing: f64,
    pub last_damage_ms: Option<u64>,
    /// Whether avoidance mode is currently steering this hostile.
    pub avoiding: bool,
}

/// A live projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Position,
    pub velocity: Velocity,
    pub size: f64,
    pub homing: bool,
}

/// A live charge or explosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdnanceView {
    pub id: u64,
    pub position: Position,
    pub size: f64,
    pub exploded: bool,
    pub explosion_radius: f64,
    /// 0.0 at detonation, 1.0 when the explosion is about to be removed.
    pub explosion_progress: f64,
}

/// An uncollected pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u64,
    pub position: Position,
    pub radius: f64,
    pub weapon: Option<WeaponKind>,
    pub power_up: Option<PowerUpKind>,
}

/// Spawn director status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_index: u32,
    pub spawned: u32,
    pub cap: u32,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
}
