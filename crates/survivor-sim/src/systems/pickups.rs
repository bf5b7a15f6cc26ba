//! Pickup collection. Collected pickups are flagged here and removed by
//! cleanup.

use hecs::World;

use survivor_core::components::{Pickup, PickupKind};
use survivor_core::events::GameEvent;
use survivor_core::types::Position;

use crate::player::PlayerState;

/// Collect every power-up the player is standing on.
pub fn collect_power_ups(
    world: &mut World,
    player: &mut PlayerState,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    for (_, (pos, pickup)) in world.query_mut::<(&Position, &mut Pickup)>() {
        let PickupKind::PowerUp { kind, duration_ms } = pickup.kind else {
            continue;
        };
        if pickup.collected || player.position.distance_to(pos) >= pickup.radius {
            continue;
        }
        pickup.collected = true;
        player.activate_power_up(kind, duration_ms, now_ms);
        events.push(GameEvent::PowerUpCollected { kind });
    }
}

/// Collect every weapon pickup within reach.
pub fn collect_weapons(world: &mut World, player: &mut PlayerState, events: &mut Vec<GameEvent>) {
    for (_, (pos, pickup)) in world.query_mut::<(&Position, &mut Pickup)>() {
        let PickupKind::Weapon(weapon) = pickup.kind else {
            continue;
        };
        if pickup.collected || player.position.distance_to(pos) >= pickup.radius {
            continue;
        }
        pickup.collected = true;
        player.acquire_weapon(weapon);
        events.push(GameEvent::WeaponAcquired { weapon });
    }
}
