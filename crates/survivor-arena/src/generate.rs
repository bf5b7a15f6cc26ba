//! Seeded arena generation.
//!
//! Obstacles are scattered uniformly with integer corners and sides. Any
//! obstacle that would cover the player start or the exit is re-rolled.

use rand::Rng;
use survivor_core::constants::*;
use survivor_core::types::{Position, Rect};

use crate::spatial::{default_exit, SpatialWorld};

/// Re-rolls allowed per obstacle before it is dropped.
const OBSTACLE_PLACEMENT_ATTEMPTS: usize = 20;

/// Side of the square kept clear around the player start.
const START_CLEARANCE: f64 = PLAYER_SIZE * 3.0;

/// Parameters for building an arena.
#[derive(Debug, Clone)]
pub struct ArenaLayout {
    pub obstacle_count: usize,
    pub player_start: Position,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            obstacle_count: OBSTACLE_COUNT,
            player_start: Position::new(PLAYER_START_X, PLAYER_START_Y),
        }
    }
}

impl SpatialWorld {
    /// Build a fresh arena from `rng`. The same RNG state always yields the
    /// same arena.
    pub fn generate<R: Rng>(rng: &mut R, layout: &ArenaLayout) -> Self {
        let exit = default_exit();
        let start_zone = Rect::centered(layout.player_start, START_CLEARANCE);
        let mut obstacles = Vec::with_capacity(layout.obstacle_count);

        let lo = OBSTACLE_MARGIN as i64;
        let hi = (MAP_SIZE - OBSTACLE_MARGIN) as i64;
        let side_lo = OBSTACLE_MIN_SIDE as i64;
        let side_hi = OBSTACLE_MAX_SIDE as i64;

        for index in 0..layout.obstacle_count {
            let placed = (0..OBSTACLE_PLACEMENT_ATTEMPTS).find_map(|_| {
                let candidate = Rect::new(
                    rng.gen_range(lo..=hi) as f64,
                    rng.gen_range(lo..=hi) as f64,
                    rng.gen_range(side_lo..=side_hi) as f64,
                    rng.gen_range(side_lo..=side_hi) as f64,
                );
                let blocks = candidate.intersects(&start_zone) || candidate.intersects(&exit);
                (!blocks).then_some(candidate)
            });

            match placed {
                Some(rect) => obstacles.push(rect),
                None => log::debug!("obstacle {index} dropped after {OBSTACLE_PLACEMENT_ATTEMPTS} attempts"),
            }
        }

        Self::new(obstacles, exit, MAP_SIZE)
    }
}
