//! Thrown charges: flight, detonation triggers, and the one-shot blast query.

use glam::DVec2;
use hecs::{Entity, World};

use survivor_arena::SpatialWorld;
use survivor_core::components::{Hostile, Ordnance};
use survivor_core::events::GameEvent;
use survivor_core::types::{Position, Rect, Velocity};

/// Resolved blast of one detonation. Damage is applied by the combat system.
#[derive(Debug, Clone, PartialEq)]
pub struct Blast {
    pub position: Position,
    pub damage: f64,
    /// Live hostiles within the radius (inclusive).
    pub hostiles: Vec<Entity>,
    /// Whether the player stood within the radius (inclusive).
    pub hits_player: bool,
}

/// Advance every charge one tick. Returns the blasts that resolved this tick.
pub fn run(
    world: &mut World,
    spatial: &SpatialWorld,
    player: Position,
    events: &mut Vec<GameEvent>,
) -> Vec<Blast> {
    let targets: Vec<(Entity, Position, f64)> = world
        .query::<(&Position, &Hostile)>()
        .iter()
        .filter(|(_, (_, h))| h.health > 0.0)
        .map(|(e, (pos, h))| (e, *pos, h.size))
        .collect();

    let mut blasts = Vec::new();

    for (_entity, (pos, vel, charge)) in
        world.query_mut::<(&mut Position, &Velocity, &mut Ordnance)>()
    {
        if charge.exploded {
            charge.explosion_ticks += 1;
        } else {
            *pos = Position::from_vec(pos.as_vec() + DVec2::new(vel.x, vel.y));
            charge.flight_ticks += 1;
            charge.exploded = should_detonate(pos, charge, spatial, &targets);
        }

        if charge.exploded && !charge.blast_applied {
            charge.blast_applied = true;
            let radius = charge.explosion_radius;
            let hostiles = targets
                .iter()
                .filter(|(_, at, _)| pos.distance_to(at) <= radius)
                .map(|(e, _, _)| *e)
                .collect();
            events.push(GameEvent::Detonation {
                position: *pos,
                radius,
            });
            blasts.push(Blast {
                position: *pos,
                damage: charge.damage,
                hostiles,
                hits_player: pos.distance_to(&player) <= radius,
            });
        }
    }

    blasts
}

/// Flight ceiling first, then hostile proximity, then obstacle contact.
fn should_detonate(
    pos: &Position,
    charge: &Ordnance,
    spatial: &SpatialWorld,
    targets: &[(Entity, Position, f64)],
) -> bool {
    if charge.flight_ticks >= charge.max_flight_ticks {
        return true;
    }
    if targets
        .iter()
        .any(|(_, at, size)| pos.distance_to(at) < charge.size + size)
    {
        return true;
    }
    spatial.intersects_obstacle(&Rect::centered(*pos, charge.size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_core::constants::*;
    use survivor_core::enums::HostileKind;

    use crate::player::Shot;
    use crate::world_setup::{spawn_hostile, spawn_shot};

    fn throw(world: &mut World, origin: Position, angle: f64) -> Entity {
        spawn_shot(
            world,
            Shot::Grenade {
                origin,
                angle,
                speed: GRENADE_SPEED,
                damage: GRENADE_DAMAGE,
                radius: GRENADE_EXPLOSION_RADIUS,
            },
        )
    }

    fn charge(world: &World, e: Entity) -> Ordnance {
        *world.get::<&Ordnance>(e).unwrap()
    }

    #[test]
    fn test_detonates_at_flight_ceiling() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut events = Vec::new();
        // Thrown along the diagonal from a corner so it stays inside the map
        let e = throw(&mut world, Position::new(200.0, 200.0), std::f64::consts::FRAC_PI_4);
        let far_player = Position::new(1400.0, 100.0);

        for tick in 1..ORDNANCE_MAX_FLIGHT_TICKS {
            let blasts = run(&mut world, &spatial, far_player, &mut events);
            assert!(blasts.is_empty(), "early detonation at tick {tick}");
            assert!(!charge(&world, e).exploded);
        }

        let blasts = run(&mut world, &spatial, far_player, &mut events);
        assert_eq!(blasts.len(), 1);
        let c = charge(&world, e);
        assert!(c.exploded);
        assert!(c.blast_applied);
        assert_eq!(c.flight_ticks, ORDNANCE_MAX_FLIGHT_TICKS);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_explosion_stops_and_counts() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut events = Vec::new();
        let e = throw(&mut world, Position::new(200.0, 200.0), 0.0);
        {
            let mut c = world.get::<&mut Ordnance>(e).unwrap();
            c.flight_ticks = c.max_flight_ticks - 1;
        }

        run(&mut world, &spatial, Position::new(1400.0, 1400.0), &mut events);
        let at = *world.get::<&Position>(e).unwrap();

        for _ in 0..5 {
            let blasts = run(&mut world, &spatial, Position::new(1400.0, 1400.0), &mut events);
            assert!(blasts.is_empty());
        }
        assert_eq!(*world.get::<&Position>(e).unwrap(), at);
        assert_eq!(charge(&world, e).explosion_ticks, 5);
    }

    #[test]
    fn test_detonates_on_hostile_proximity() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut events = Vec::new();
        let hostile = spawn_hostile(&mut world, HostileKind::Standard, Position::new(230.0, 200.0));
        let e = throw(&mut world, Position::new(200.0, 200.0), 0.0);

        let blasts = run(&mut world, &spatial, Position::new(1400.0, 1400.0), &mut events);
        assert!(charge(&world, e).exploded);
        assert_eq!(blasts[0].hostiles, vec![hostile]);
        assert!(!blasts[0].hits_player);
    }

    #[test]
    fn test_detonates_on_obstacle() {
        let mut world = World::new();
        let spatial = SpatialWorld::new(
            vec![Rect::new(208.0, 150.0, 40.0, 100.0)],
            survivor_arena::spatial::default_exit(),
            MAP_SIZE,
        );
        let mut events = Vec::new();
        let e = throw(&mut world, Position::new(200.0, 200.0), 0.0);

        run(&mut world, &spatial, Position::new(1400.0, 1400.0), &mut events);
        assert!(charge(&world, e).exploded);
    }

    #[test]
    fn test_blast_radius_is_inclusive() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut events = Vec::new();
        let e = throw(&mut world, Position::new(500.0, 500.0), 0.0);
        {
            let mut vel = world.get::<&mut Velocity>(e).unwrap();
            *vel = Velocity::new(0.0, 0.0);
            let mut c = world.get::<&mut Ordnance>(e).unwrap();
            c.flight_ticks = c.max_flight_ticks - 1;
        }
        let on_edge = spawn_hostile(
            &mut world,
            HostileKind::Standard,
            Position::new(500.0 + GRENADE_EXPLOSION_RADIUS, 500.0),
        );
        let beyond = spawn_hostile(
            &mut world,
            HostileKind::Standard,
            Position::new(500.0, 500.0 + GRENADE_EXPLOSION_RADIUS + 0.001),
        );
        let player = Position::new(500.0 - GRENADE_EXPLOSION_RADIUS, 500.0);

        let blasts = run(&mut world, &spatial, player, &mut events);
        assert_eq!(blasts.len(), 1);
        assert!(blasts[0].hostiles.contains(&on_edge));
        assert!(!blasts[0].hostiles.contains(&beyond));
        assert!(blasts[0].hits_player);
        assert!((blasts[0].damage - GRENADE_DAMAGE).abs() < 1e-10);
    }

    #[test]
    fn test_blast_resolves_once() {
        let mut world = World::new();
        let spatial = SpatialWorld::open();
        let mut events = Vec::new();
        spawn_hostile(&mut world, HostileKind::Standard, Position::new(220.0, 200.0));
        throw(&mut world, Position::new(200.0, 200.0), 0.0);

        let first = run(&mut world, &spatial, Position::new(200.0, 200.0), &mut events);
        let second = run(&mut world, &spatial, Position::new(200.0, 200.0), &mut events);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(events.len(), 1);
    }
}
