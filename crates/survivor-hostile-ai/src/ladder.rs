//! Pursuit movement ladder.
//!
//! Pure functions that move one hostile a single tick toward the player.
//! Each strategy proposes a position that is confirmed against the arena
//! and the other hostiles before it is committed. Strategies are tried in
//! `LADDER` order and the first confirmed proposal wins.
//! No ECS dependency. Operates on plain data.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use rand::Rng;
use survivor_arena::{Footprint, SpatialWorld};
use survivor_core::components::AvoidanceMemory;
use survivor_core::constants::*;
use survivor_core::types::Position;

/// One rung of the movement ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full speed along the desired heading.
    Direct,
    /// The x component of the heading alone, then the y component alone.
    AxisAligned,
    /// Fanned headings around the desired one at reduced speed.
    WallSlide,
    /// Random headings at half speed.
    Jitter,
}

/// Escalation order.
pub const LADDER: [Strategy; 4] = [
    Strategy::Direct,
    Strategy::AxisAligned,
    Strategy::WallSlide,
    Strategy::Jitter,
];

impl Strategy {
    /// Propose a confirmed position for this step, or None if every candidate
    /// is blocked.
    pub fn attempt<R: Rng>(&self, probe: &Probe, heading: f64, rng: &mut R) -> Option<Position> {
        let origin = probe.position.as_vec();
        match self {
            Strategy::Direct => probe.confirm(origin + DVec2::from_angle(heading) * probe.speed),
            Strategy::AxisAligned => {
                let delta = DVec2::from_angle(heading) * probe.speed;
                // A zero component would "succeed" by standing still.
                [DVec2::new(delta.x, 0.0), DVec2::new(0.0, delta.y)]
                    .into_iter()
                    .filter(|step| step.length() > f64::EPSILON)
                    .find_map(|step| probe.confirm(origin + step))
            }
            Strategy::WallSlide => {
                let speed = probe.speed * WALL_SLIDE_SPEED_FACTOR;
                WALL_SLIDE_OFFSETS.iter().find_map(|offset| {
                    probe.confirm(origin + DVec2::from_angle(heading + offset) * speed)
                })
            }
            Strategy::Jitter => {
                let speed = probe.speed * JITTER_SPEED_FACTOR;
                (0..JITTER_ATTEMPTS).find_map(|_| {
                    let angle = rng.gen_range(0.0..TAU);
                    probe.confirm(origin + DVec2::from_angle(angle) * speed)
                })
            }
        }
    }

    /// Whether a success on this rung counts as genuine progress.
    fn counts_as_progress(&self) -> bool {
        !matches!(self, Strategy::Jitter)
    }
}

/// Collision probe for one hostile's candidate positions.
pub struct Probe<'a> {
    pub position: Position,
    pub size: f64,
    pub speed: f64,
    pub world: &'a SpatialWorld,
    pub actors: &'a [Footprint],
    /// Index of the moving hostile in `actors`, if present.
    pub exclude: Option<usize>,
}

impl Probe<'_> {
    /// Whether a hostile of this size may stand at `at`.
    pub fn is_clear(&self, at: Position) -> bool {
        let candidate = Footprint::new(at, self.size);
        let bounds = candidate.bounds();
        self.world.contains(&bounds)
            && !self.world.intersects_obstacle(&bounds)
            && !SpatialWorld::intersects_actors(&candidate, self.exclude, self.actors)
    }

    fn confirm(&self, at: DVec2) -> Option<Position> {
        let at = Position::from_vec(at);
        self.is_clear(at).then_some(at)
    }
}

/// Input to the ladder for a single hostile.
pub struct MoveContext<'a> {
    pub position: Position,
    pub size: f64,
    pub speed: f64,
    pub memory: AvoidanceMemory,
    pub player: Position,
    pub world: &'a SpatialWorld,
    /// Footprints of every live hostile, including this one.
    pub actors: &'a [Footprint],
    /// Index of this hostile in `actors`.
    pub index: usize,
}

/// Output from the ladder.
#[derive(Debug, Clone, Copy)]
pub struct MoveUpdate {
    pub position: Position,
    pub memory: AvoidanceMemory,
    /// Bearing to the player this tick.
    pub facing: f64,
    /// Rung that produced the move, None if the hostile stayed put.
    pub strategy: Option<Strategy>,
    /// Whether the heading came from avoidance mode.
    pub avoiding: bool,
    /// Whether avoidance mode was armed this tick.
    pub armed: bool,
}

/// Run one tick of the ladder for one hostile.
pub fn plan<R: Rng>(ctx: &MoveContext, rng: &mut R) -> MoveUpdate {
    let bearing = ctx.position.angle_to(&ctx.player);
    let mut memory = ctx.memory;

    let mut armed = false;
    if memory.avoidance_timer == 0 && memory.stuck_counter > STUCK_THRESHOLD {
        memory.avoidance_angle = bearing + rng.gen_range(-FRAC_PI_2..FRAC_PI_2);
        memory.avoidance_timer = AVOIDANCE_DURATION;
        memory.stuck_counter /= 2;
        armed = true;
        log::debug!(
            "hostile at ({:.1}, {:.1}) armed avoidance heading {:.2}",
            ctx.position.x,
            ctx.position.y,
            memory.avoidance_angle
        );
    }

    let avoiding = memory.avoidance_timer > 0;
    let heading = if avoiding {
        memory.avoidance_timer -= 1;
        memory.avoidance_angle
    } else {
        bearing
    };

    let probe = Probe {
        position: ctx.position,
        size: ctx.size,
        speed: ctx.speed,
        world: ctx.world,
        actors: ctx.actors,
        exclude: Some(ctx.index),
    };

    let outcome = LADDER
        .iter()
        .find_map(|step| step.attempt(&probe, heading, rng).map(|at| (*step, at)));

    let (position, strategy) = match outcome {
        Some((step, at)) => (at, Some(step)),
        None => (ctx.position, None),
    };

    let progressed = strategy.is_some_and(|s| s.counts_as_progress())
        && position.distance_to(&ctx.position) > STUCK_EPSILON;
    memory.stuck_counter = if progressed {
        memory.stuck_counter.saturating_sub(1)
    } else {
        (memory.stuck_counter + 1).min(STUCK_THRESHOLD * 2)
    };
    memory.last_position = position;

    MoveUpdate {
        position,
        memory,
        facing: bearing,
        strategy,
        avoiding,
        armed,
    }
}
