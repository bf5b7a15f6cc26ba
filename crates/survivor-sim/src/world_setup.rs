//! Entity spawn factories for setting up the simulation world.
//!
//! Creates hostiles, projectiles, ordnance, and pickups with
//! appropriate component bundles, plus the seeded placement helpers.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use survivor_arena::SpatialWorld;
use survivor_core::components::*;
use survivor_core::constants::*;
use survivor_core::enums::*;
use survivor_core::types::{Position, Rect, Velocity};
use survivor_hostile_ai::ladder::Probe;
use survivor_hostile_ai::profiles::get_profile;

use crate::player::Shot;

/// Weapon pickups scattered at the start of every encounter.
const INITIAL_WEAPON_PICKUPS: [WeaponKind; 5] = [
    WeaponKind::MachineGun,
    WeaponKind::Shotgun,
    WeaponKind::Grenade,
    WeaponKind::MachineGun,
    WeaponKind::Grenade,
];

/// Spawn a hostile with its variant's stats.
pub fn spawn_hostile(world: &mut World, kind: HostileKind, position: Position) -> hecs::Entity {
    let profile = get_profile(kind);
    world.spawn((
        position,
        Hostile {
            kind,
            size: profile.size,
            speed: profile.speed,
            health: profile.health,
            max_health: profile.health,
            last_damage_ms: None,
            facing: 0.0,
        },
        AvoidanceMemory {
            last_position: position,
            ..Default::default()
        },
    ))
}

/// Turn a fired shot into a projectile or ordnance entity.
pub fn spawn_shot(world: &mut World, shot: Shot) -> hecs::Entity {
    match shot {
        Shot::Bullet {
            origin,
            angle,
            speed,
            damage,
            homing,
        } => {
            let kind = if homing {
                ProjectileKind::Homing {
                    window_remaining: HOMING_WINDOW_TICKS,
                }
            } else {
                ProjectileKind::Standard
            };
            world.spawn((
                origin,
                Velocity::from_angle(angle, speed),
                Projectile {
                    kind,
                    damage,
                    size: PROJECTILE_SIZE,
                    speed,
                },
            ))
        }
        Shot::Grenade {
            origin,
            angle,
            speed,
            damage,
            radius,
        } => world.spawn((
            origin,
            Velocity::from_angle(angle, speed),
            Ordnance {
                damage,
                explosion_radius: radius,
                size: ORDNANCE_SIZE,
                flight_ticks: 0,
                max_flight_ticks: ORDNANCE_MAX_FLIGHT_TICKS,
                exploded: false,
                explosion_ticks: 0,
                blast_applied: false,
            },
        )),
    }
}

pub fn spawn_weapon_pickup(world: &mut World, weapon: WeaponKind, position: Position) -> hecs::Entity {
    world.spawn((
        position,
        Pickup {
            kind: PickupKind::Weapon(weapon),
            radius: WEAPON_PICKUP_SIZE + WEAPON_PICKUP_REACH,
            collected: false,
        },
    ))
}

pub fn spawn_power_up(world: &mut World, kind: PowerUpKind, position: Position) -> hecs::Entity {
    let duration_ms = match kind {
        PowerUpKind::InstaKill => INSTA_KILL_DURATION_MS,
    };
    world.spawn((
        position,
        Pickup {
            kind: PickupKind::PowerUp { kind, duration_ms },
            radius: POWERUP_PICKUP_RADIUS,
            collected: false,
        },
    ))
}

/// Scatter the starting weapon pickups and the insta-kill power-up.
/// A pickup with no clear spot after its attempt budget is skipped.
pub fn place_initial_pickups(world: &mut World, rng: &mut ChaCha8Rng, spatial: &SpatialWorld) {
    for weapon in INITIAL_WEAPON_PICKUPS {
        match find_pickup_point(rng, spatial, WEAPON_PICKUP_SIZE) {
            Some(position) => {
                spawn_weapon_pickup(world, weapon, position);
            }
            None => log::debug!("no room for {weapon:?} pickup"),
        }
    }

    match find_pickup_point(rng, spatial, POWERUP_PICKUP_RADIUS) {
        Some(position) => {
            spawn_power_up(world, PowerUpKind::InstaKill, position);
        }
        None => log::debug!("no room for insta-kill pickup"),
    }
}

/// Random integer point inset from the edges whose square of half-side
/// `half_extent` misses every obstacle.
fn find_pickup_point(
    rng: &mut ChaCha8Rng,
    spatial: &SpatialWorld,
    half_extent: f64,
) -> Option<Position> {
    let lo = PICKUP_MARGIN as i64;
    let hi = (spatial.extent() - PICKUP_MARGIN) as i64;

    (0..PICKUP_PLACEMENT_ATTEMPTS).find_map(|_| {
        let at = Position::new(rng.gen_range(lo..=hi) as f64, rng.gen_range(lo..=hi) as f64);
        let region = Rect::centered(at, half_extent * 2.0);
        (!spatial.intersects_obstacle(&region)).then_some(at)
    })
}

/// Random spawn point for a hostile of `kind`: far enough from the player and
/// clear of obstacles. None once the attempt budget is spent.
pub fn find_spawn_point(
    rng: &mut ChaCha8Rng,
    spatial: &SpatialWorld,
    player: Position,
    kind: HostileKind,
) -> Option<Position> {
    let profile = get_profile(kind);
    let probe = Probe {
        position: player,
        size: profile.size,
        speed: profile.speed,
        world: spatial,
        actors: &[],
        exclude: None,
    };
    let lo = SPAWN_MARGIN as i64;
    let hi = (spatial.extent() - SPAWN_MARGIN) as i64;

    (0..SPAWN_PLACEMENT_ATTEMPTS).find_map(|_| {
        let at = Position::new(rng.gen_range(lo..=hi) as f64, rng.gen_range(lo..=hi) as f64);
        (at.distance_to(&player) > MIN_SPAWN_DISTANCE && probe.is_clear(at)).then_some(at)
    })
}
