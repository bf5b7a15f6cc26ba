//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use survivor_arena::SpatialWorld;
use survivor_core::components::*;
use survivor_core::constants::{EXPLOSION_WINDOW_TICKS, SKILL_BONUS_DISPLAY_MS};
use survivor_core::enums::*;
use survivor_core::events::{GameEvent, SkillBonusNotice};
use survivor_core::state::*;
use survivor_core::types::{Position, SimTime, Velocity};

use super::wave_spawner::WaveSchedule;
use crate::player::{get_weapon_profile, PlayerState, ReloadState, TimedEffect};

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    player: &PlayerState,
    spatial: &SpatialWorld,
    schedule: &WaveSchedule,
    events: Vec<GameEvent>,
    skill_bonus: Option<SkillBonusNotice>,
) -> GameStateSnapshot {
    let now_ms = time.elapsed_ms;

    GameStateSnapshot {
        time: *time,
        phase,
        player: build_player(player, now_ms),
        hostiles: build_hostiles(world),
        projectiles: build_projectiles(world),
        ordnance: build_ordnance(world),
        pickups: build_pickups(world),
        obstacles: spatial.obstacles().to_vec(),
        exit: spatial.exit(),
        wave: schedule.view(),
        events,
        skill_bonus: skill_bonus
            .filter(|n| now_ms.saturating_sub(n.awarded_at_ms) < SKILL_BONUS_DISPLAY_MS),
    }
}

fn view_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

fn build_player(player: &PlayerState, now_ms: u64) -> PlayerView {
    let slots = player
        .slots
        .iter()
        .map(|slot| SlotView {
            weapon: *slot,
            ammo: slot.map(|w| player.ammo_of(w)).unwrap_or(0),
            max_ammo: slot.and_then(|w| get_weapon_profile(w).max_ammo),
        })
        .collect();

    let reload = match player.reload {
        ReloadState::Idle => None,
        ReloadState::Reloading {
            weapon,
            started_ms,
            shells_loaded,
        } => Some(ReloadView {
            weapon,
            started_ms,
            shells_loaded,
        }),
    };

    PlayerView {
        hero: player.hero,
        position: player.position,
        size: player.size,
        aim_angle: player.aim_angle,
        health: player.health,
        max_health: player.max_health,
        slots,
        current_slot: player.current_slot,
        grenades: player.grenades,
        reload,
        ability_charge: player.ability_charge,
        ability: player.ability.map(|e| effect_view(e, now_ms)),
        power_up: player.power_up.map(|e| effect_view(e, now_ms)),
        score: player.score,
        kills: KillsView {
            standard: player.kills.standard,
            fast: player.kills.fast,
            boss: player.kills.boss,
            total: player.kills.total,
        },
        streak: player.streak,
    }
}

fn effect_view<K: Copy>(effect: TimedEffect<K>, now_ms: u64) -> TimedEffectView<K> {
    TimedEffectView {
        kind: effect.kind,
        ends_at_ms: effect.ends_at_ms,
        remaining_ms: effect.remaining_ms(now_ms),
    }
}

/// Live hostiles, sorted by id.
fn build_hostiles(world: &World) -> Vec<HostileView> {
    let mut hostiles: Vec<HostileView> = world
        .query::<(&Position, &Hostile, &AvoidanceMemory)>()
        .iter()
        .filter(|(_, (_, h, _))| h.health > 0.0)
        .map(|(entity, (pos, h, mem))| HostileView {
            id: view_id(entity),
            kind: h.kind,
            position: *pos,
            size: h.size,
            health: h.health,
            max_health: h.max_health,
            facing: h.facing,
            last_damage_ms: h.last_damage_ms,
            avoiding: mem.avoidance_timer > 0,
        })
        .collect();
    hostiles.sort_by_key(|h| h.id);
    hostiles
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .map(|(entity, (pos, vel, p))| ProjectileView {
            id: view_id(entity),
            position: *pos,
            velocity: *vel,
            size: p.size,
            homing: matches!(p.kind, ProjectileKind::Homing { .. }),
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_ordnance(world: &World) -> Vec<OrdnanceView> {
    let mut ordnance: Vec<OrdnanceView> = world
        .query::<(&Position, &Ordnance)>()
        .iter()
        .map(|(entity, (pos, o))| OrdnanceView {
            id: view_id(entity),
            position: *pos,
            size: o.size,
            exploded: o.exploded,
            explosion_radius: o.explosion_radius,
            explosion_progress: if o.exploded {
                (f64::from(o.explosion_ticks) / f64::from(EXPLOSION_WINDOW_TICKS)).min(1.0)
            } else {
                0.0
            },
        })
        .collect();
    ordnance.sort_by_key(|o| o.id);
    ordnance
}

/// Uncollected pickups, sorted by id.
fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Position, &Pickup)>()
        .iter()
        .filter(|(_, (_, p))| !p.collected)
        .map(|(entity, (pos, p))| {
            let (weapon, power_up) = match p.kind {
                PickupKind::Weapon(w) => (Some(w), None),
                PickupKind::PowerUp { kind, .. } => (None, Some(kind)),
            };
            PickupView {
                id: view_id(entity),
                position: *pos,
                radius: p.radius,
                weapon,
                power_up,
            }
        })
        .collect();
    pickups.sort_by_key(|p| p.id);
    pickups
}
