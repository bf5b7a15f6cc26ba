//! Cleanup system: removes dead hostiles, collected pickups, and spent ordnance.

use hecs::{Entity, World};

use survivor_arena::SpatialWorld;
use survivor_core::components::{Hostile, Ordnance, Pickup};
use survivor_core::constants::EXPLOSION_WINDOW_TICKS;
use survivor_core::types::Position;

/// Despawn everything that finished this tick.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, spatial: &SpatialWorld, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, hostile) in world.query_mut::<&Hostile>() {
        if hostile.health <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if pickup.collected {
            despawn_buffer.push(entity);
        }
    }

    // Explosions linger for a short window; charges that leave the map go at once.
    for (entity, (pos, charge)) in world.query_mut::<(&Position, &Ordnance)>() {
        let finished = charge.exploded && charge.explosion_ticks >= EXPLOSION_WINDOW_TICKS;
        if finished || !spatial.contains_point(pos) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_core::enums::{HostileKind, WeaponKind};
    use survivor_core::types::Velocity;

    use crate::world_setup::{spawn_hostile, spawn_weapon_pickup};

    fn charge(exploded: bool, explosion_ticks: u32) -> Ordnance {
        Ordnance {
            damage: 5.0,
            explosion_radius: 80.0,
            size: 8.0,
            flight_ticks: 10,
            max_flight_ticks: 90,
            exploded,
            explosion_ticks,
            blast_applied: exploded,
        }
    }

    #[test]
    fn test_removes_finished_entities() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut buffer = Vec::new();

        let alive = spawn_hostile(&mut world, HostileKind::Standard, Position::new(300.0, 300.0));
        let dead = spawn_hostile(&mut world, HostileKind::Standard, Position::new(400.0, 300.0));
        world.get::<&mut Hostile>(dead).unwrap().health = 0.0;

        let pickup = spawn_weapon_pickup(&mut world, WeaponKind::Shotgun, Position::new(500.0, 500.0));
        world.get::<&mut Pickup>(pickup).unwrap().collected = true;

        let at = Position::new(600.0, 600.0);
        let still = Velocity::new(0.0, 0.0);
        let flying = world.spawn((at, still, charge(false, 0)));
        let lingering = world.spawn((at, still, charge(true, EXPLOSION_WINDOW_TICKS - 1)));
        let spent = world.spawn((at, still, charge(true, EXPLOSION_WINDOW_TICKS)));
        let lost = world.spawn((Position::new(-10.0, 600.0), still, charge(false, 0)));

        run(&mut world, &spatial, &mut buffer);

        assert!(world.contains(alive));
        assert!(!world.contains(dead));
        assert!(!world.contains(pickup));
        assert!(world.contains(flying));
        assert!(world.contains(lingering));
        assert!(!world.contains(spent));
        assert!(!world.contains(lost));
        assert!(buffer.is_empty());
    }
}
