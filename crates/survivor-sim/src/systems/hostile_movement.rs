//! Hostile pursuit: runs the movement ladder for every live hostile.

use hecs::{Entity, World};
use rand::Rng;

use survivor_arena::{Footprint, SpatialWorld};
use survivor_core::components::{AvoidanceMemory, Hostile};
use survivor_core::types::Position;
use survivor_hostile_ai::ladder::{self, MoveContext};

/// Move every live hostile one step toward the player.
///
/// Hostiles move one after another. Each plan sees the positions already
/// committed this tick, so two hostiles never claim the same spot.
pub fn run<R: Rng>(world: &mut World, spatial: &SpatialWorld, player: Position, rng: &mut R) {
    let movers: Vec<(Entity, Position, f64, f64, AvoidanceMemory)> = world
        .query::<(&Position, &Hostile, &AvoidanceMemory)>()
        .iter()
        .filter(|(_, (_, h, _))| h.health > 0.0)
        .map(|(e, (pos, h, mem))| (e, *pos, h.size, h.speed, *mem))
        .collect();

    let mut actors: Vec<Footprint> = movers
        .iter()
        .map(|(_, pos, size, _, _)| Footprint::new(*pos, *size))
        .collect();

    for (index, (entity, position, size, speed, memory)) in movers.into_iter().enumerate() {
        let update = ladder::plan(
            &MoveContext {
                position,
                size,
                speed,
                memory,
                player,
                world: spatial,
                actors: &actors,
                index,
            },
            rng,
        );
        actors[index] = Footprint::new(update.position, size);

        if let Ok((pos, hostile, mem)) =
            world.query_one_mut::<(&mut Position, &mut Hostile, &mut AvoidanceMemory)>(entity)
        {
            *pos = update.position;
            hostile.facing = update.facing;
            *mem = update.memory;
        }
    }
}
