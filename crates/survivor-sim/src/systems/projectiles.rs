//! Projectile flight: integration, homing guidance, and obstacle/bounds pruning.

use glam::DVec2;
use hecs::{Entity, World};

use survivor_arena::SpatialWorld;
use survivor_core::components::{Hostile, Projectile, ProjectileKind};
use survivor_core::types::{Position, Rect, Velocity};

/// Advance every projectile one tick and despawn the ones that left the map
/// or struck an obstacle.
pub fn run(world: &mut World, spatial: &SpatialWorld, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let targets: Vec<Position> = world
        .query::<(&Position, &Hostile)>()
        .iter()
        .filter(|(_, (_, h))| h.health > 0.0)
        .map(|(_, (pos, _))| *pos)
        .collect();

    for (entity, (pos, vel, projectile)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Projectile)>()
    {
        if let ProjectileKind::Homing { window_remaining } = &mut projectile.kind {
            if *window_remaining > 0 {
                if let Some(target) = nearest(pos, &targets) {
                    *vel = steer_toward(pos, &target, projectile.speed, *vel);
                }
                *window_remaining -= 1;
            }
        }

        *pos = Position::from_vec(pos.as_vec() + DVec2::new(vel.x, vel.y));

        let bounds = Rect::centered(*pos, projectile.size);
        if !spatial.contains_point(pos) || spatial.intersects_obstacle(&bounds) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Closest target by straight-line distance.
pub fn nearest(from: &Position, targets: &[Position]) -> Option<Position> {
    targets
        .iter()
        .copied()
        .min_by(|a, b| from.distance_to(a).total_cmp(&from.distance_to(b)))
}

/// Velocity of magnitude `speed` pointing at `target`. Keeps `current` when
/// the target sits exactly on the projectile.
fn steer_toward(from: &Position, target: &Position, speed: f64, current: Velocity) -> Velocity {
    let delta = target.as_vec() - from.as_vec();
    match delta.try_normalize() {
        Some(dir) => Velocity::new(dir.x * speed, dir.y * speed),
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_core::components::AvoidanceMemory;
    use survivor_core::enums::HostileKind;

    use crate::player::Shot;
    use crate::world_setup::{spawn_hostile, spawn_shot};

    fn fire(world: &mut World, origin: Position, angle: f64, homing: bool) -> Entity {
        spawn_shot(
            world,
            Shot::Bullet {
                origin,
                angle,
                speed: 10.0,
                damage: 1.0,
                homing,
            },
        )
    }

    #[test]
    fn test_straight_flight() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut buffer = Vec::new();
        let e = fire(&mut world, Position::new(100.0, 100.0), 0.0, false);

        run(&mut world, &spatial, &mut buffer);
        let pos = *world.get::<&Position>(e).unwrap();
        assert!((pos.x - 110.0).abs() < 1e-10);
        assert!((pos.y - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_removed_out_of_bounds() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut buffer = Vec::new();
        let e = fire(&mut world, Position::new(5.0, 100.0), std::f64::consts::PI, false);

        run(&mut world, &spatial, &mut buffer);
        assert!(!world.contains(e));
    }

    #[test]
    fn test_removed_on_obstacle() {
        let mut world = World::new();
        let spatial = SpatialWorld::new(
            vec![Rect::new(110.0, 80.0, 30.0, 40.0)],
            survivor_arena::spatial::default_exit(),
            survivor_core::constants::MAP_SIZE,
        );
        let mut buffer = Vec::new();
        let e = fire(&mut world, Position::new(100.0, 100.0), 0.0, false);

        run(&mut world, &spatial, &mut buffer);
        assert!(!world.contains(e));
    }

    #[test]
    fn test_homing_turns_toward_nearest() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut buffer = Vec::new();
        spawn_hostile(&mut world, HostileKind::Standard, Position::new(100.0, 400.0));
        spawn_hostile(&mut world, HostileKind::Standard, Position::new(900.0, 900.0));
        // Fired east, nearest target is due south
        let e = fire(&mut world, Position::new(100.0, 100.0), 0.0, true);

        run(&mut world, &spatial, &mut buffer);
        let vel = *world.get::<&Velocity>(e).unwrap();
        assert!(vel.x.abs() < 1e-10);
        assert!((vel.y - 10.0).abs() < 1e-10);
        let projectile = *world.get::<&Projectile>(e).unwrap();
        assert_eq!(
            projectile.kind,
            ProjectileKind::Homing {
                window_remaining: survivor_core::constants::HOMING_WINDOW_TICKS - 1
            }
        );
    }

    #[test]
    fn test_homing_window_expires() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut buffer = Vec::new();
        let e = world.spawn((
            Position::new(700.0, 700.0),
            Velocity::new(1.0, 0.0),
            Projectile {
                kind: ProjectileKind::Homing { window_remaining: 0 },
                damage: 1.0,
                size: 5.0,
                speed: 1.0,
            },
        ));
        world.spawn((
            Position::new(700.0, 800.0),
            Hostile {
                kind: HostileKind::Standard,
                size: 18.0,
                speed: 3.0,
                health: 3.0,
                max_health: 3.0,
                last_damage_ms: None,
                facing: 0.0,
            },
            AvoidanceMemory::default(),
        ));

        run(&mut world, &spatial, &mut buffer);
        let vel = *world.get::<&Velocity>(e).unwrap();
        assert_eq!(vel, Velocity::new(1.0, 0.0));
    }

    #[test]
    fn test_homing_without_targets_flies_straight() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut buffer = Vec::new();
        let e = fire(&mut world, Position::new(100.0, 100.0), 0.0, true);

        run(&mut world, &spatial, &mut buffer);
        let pos = *world.get::<&Position>(e).unwrap();
        assert!((pos.x - 110.0).abs() < 1e-10);
    }
}
