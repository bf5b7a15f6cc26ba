//! Combat resolution: projectile hits, blast damage, kill accounting,
//! the boss-death rule, and hostile contact.

use hecs::{Entity, World};

use survivor_core::components::{Hostile, Projectile};
use survivor_core::constants::{CONTACT_DAMAGE_COOLDOWN_MS, CONTACT_REACH};
use survivor_core::enums::{HostileKind, WeaponKind};
use survivor_core::events::{GameEvent, SkillBonusNotice};
use survivor_core::types::Position;
use survivor_hostile_ai::profiles::get_profile;

use super::ordnance::Blast;
use crate::player::PlayerState;
use crate::world_setup::spawn_weapon_pickup;

/// A hostile that died this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub kind: HostileKind,
    pub position: Position,
}

/// Damage one hostile. Returns the kill if this hit took it to zero.
///
/// Hostiles already at zero are ignored. The variant's attenuation is
/// applied before subtracting.
pub fn apply_damage(world: &mut World, entity: Entity, damage: f64, now_ms: u64) -> Option<Kill> {
    let (pos, hostile) = world
        .query_one_mut::<(&Position, &mut Hostile)>(entity)
        .ok()?;
    if hostile.health <= 0.0 {
        return None;
    }

    hostile.health -= get_profile(hostile.kind).effective_damage(damage);
    hostile.last_damage_ms = Some(now_ms);
    if hostile.health > 0.0 {
        return None;
    }
    hostile.health = 0.0;
    Some(Kill {
        kind: hostile.kind,
        position: *pos,
    })
}

/// Resolve projectile-hostile contact. Each projectile damages the first live
/// hostile it touches and is removed.
pub fn projectile_hits(
    world: &mut World,
    now_ms: u64,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<Kill> {
    despawn_buffer.clear();

    let projectiles: Vec<(Entity, Position, f64, f64)> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(e, (pos, p))| (e, *pos, p.size, p.damage))
        .collect();
    let hostiles: Vec<(Entity, Position, f64)> = world
        .query::<(&Position, &Hostile)>()
        .iter()
        .map(|(e, (pos, h))| (e, *pos, h.size))
        .collect();

    let mut kills = Vec::new();
    for (projectile, at, size, damage) in projectiles {
        let struck = hostiles.iter().find(|(hostile, pos, hostile_size)| {
            at.distance_to(pos) < size + hostile_size && is_alive(world, *hostile)
        });
        if let Some((hostile, _, _)) = struck {
            kills.extend(apply_damage(world, *hostile, damage, now_ms));
            despawn_buffer.push(projectile);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    kills
}

/// Damage every hostile caught in a blast.
pub fn blast_damage(world: &mut World, blast: &Blast, now_ms: u64) -> Vec<Kill> {
    blast
        .hostiles
        .iter()
        .filter_map(|hostile| apply_damage(world, *hostile, blast.damage, now_ms))
        .collect()
}

/// Credit kills to the player and apply the boss-death rule.
///
/// Returns true if the boss was among the kills.
pub fn settle_kills(
    world: &mut World,
    kills: &[Kill],
    player: &mut PlayerState,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
    skill_bonus: &mut Option<SkillBonusNotice>,
) -> bool {
    let mut boss_died = false;

    for kill in kills {
        events.push(GameEvent::HostileKilled {
            kind: kill.kind,
            position: kill.position,
        });

        if let Some(amount) = player.record_kill(kill.kind) {
            events.push(GameEvent::SkillBonus {
                amount,
                streak: player.streak,
            });
            *skill_bonus = Some(SkillBonusNotice {
                amount,
                awarded_at_ms: now_ms,
            });
        }

        if kill.kind == HostileKind::Boss {
            boss_died = true;
            let converted = convert_survivors(world);
            spawn_weapon_pickup(world, WeaponKind::Minigun, kill.position);
            events.push(GameEvent::BossDefeated {
                position: kill.position,
            });
            log::info!(
                "boss defeated at ({:.0}, {:.0}), {converted} survivors converted",
                kill.position.x,
                kill.position.y
            );
        }
    }

    boss_died
}

/// Turn every live hostile into a Fast one in place. Position and current
/// health are kept. Returns how many were converted.
pub fn convert_survivors(world: &mut World) -> usize {
    let fast = get_profile(HostileKind::Fast);
    let mut converted = 0;
    for (_, hostile) in world.query_mut::<&mut Hostile>() {
        if hostile.health <= 0.0 {
            continue;
        }
        hostile.kind = HostileKind::Fast;
        hostile.size = fast.size;
        hostile.speed = fast.speed;
        hostile.max_health = fast.health;
        converted += 1;
    }
    converted
}

/// Whether a hostile lands a contact hit this tick.
///
/// Contact hits share one global cooldown. The first hostile in reach lands
/// the hit and restarts the cooldown.
pub fn contact_hit(
    world: &World,
    player: Position,
    now_ms: u64,
    last_contact_ms: &mut Option<u64>,
) -> bool {
    if last_contact_ms.is_some_and(|last| now_ms.saturating_sub(last) <= CONTACT_DAMAGE_COOLDOWN_MS) {
        return false;
    }

    let in_reach = world
        .query::<(&Position, &Hostile)>()
        .iter()
        .any(|(_, (pos, h))| h.health > 0.0 && pos.distance_to(&player) < h.size + CONTACT_REACH);
    if in_reach {
        *last_contact_ms = Some(now_ms);
    }
    in_reach
}

fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Hostile>(entity)
        .is_ok_and(|h| h.health > 0.0)
}
