//! Wave spawning system: composes hostile waves on a fixed interval until the
//! cap is reached or the boss is defeated.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use survivor_arena::SpatialWorld;
use survivor_core::constants::{BOSS_WAVE, EARLY_FAST_CHANCE, MID_FAST_CHANCE};
use survivor_core::enums::HostileKind;
use survivor_core::events::GameEvent;
use survivor_core::state::WaveView;
use survivor_core::types::Position;

use crate::config::SimConfig;
use crate::world_setup::{find_spawn_point, spawn_hostile};

/// Spawn director state for one encounter.
#[derive(Debug, Clone)]
pub struct WaveSchedule {
    /// Hostiles counted toward the cap so far.
    pub spawned: u32,
    pub cap: u32,
    pub wave_size: u32,
    pub interval_ms: u64,
    /// Index of the next wave to compose.
    pub wave_index: u32,
    /// When the last wave was composed. None until the first one.
    pub last_wave_ms: Option<u64>,
    pub boss_spawned: bool,
    /// Set by the combat system. Halts all further spawning.
    pub boss_defeated: bool,
}

impl WaveSchedule {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            spawned: 0,
            cap: config.max_hostiles,
            wave_size: config.wave_size,
            interval_ms: config.wave_interval_ms,
            wave_index: 0,
            last_wave_ms: None,
            boss_spawned: false,
            boss_defeated: false,
        }
    }

    /// Whether a wave should be composed at `now_ms`.
    pub fn is_due(&self, now_ms: u64) -> bool {
        if self.boss_defeated || self.spawned >= self.cap {
            return false;
        }
        match self.last_wave_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    /// Roll the composition of the next wave. Marks the boss as spawned when
    /// the boss wave is composed.
    pub fn compose<R: Rng>(&mut self, rng: &mut R) -> Vec<HostileKind> {
        let size = self.wave_size as usize;
        if self.wave_index < 2 {
            roll_mix(rng, size, EARLY_FAST_CHANCE)
        } else if self.wave_index < BOSS_WAVE {
            roll_mix(rng, size, MID_FAST_CHANCE)
        } else if !self.boss_spawned {
            self.boss_spawned = true;
            std::iter::once(HostileKind::Boss)
                .chain(std::iter::repeat(HostileKind::Fast).take(size.saturating_sub(1)))
                .collect()
        } else {
            vec![HostileKind::Fast; size]
        }
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            wave_index: self.wave_index,
            spawned: self.spawned,
            cap: self.cap,
            boss_spawned: self.boss_spawned,
            boss_defeated: self.boss_defeated,
        }
    }
}

fn roll_mix<R: Rng>(rng: &mut R, size: usize, fast_chance: f64) -> Vec<HostileKind> {
    (0..size)
        .map(|_| {
            if rng.gen::<f64>() < fast_chance {
                HostileKind::Fast
            } else {
                HostileKind::Standard
            }
        })
        .collect()
}

/// Compose and place a wave if one is due. Returns true if a wave was composed.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    schedule: &mut WaveSchedule,
    spatial: &SpatialWorld,
    player: Position,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !schedule.is_due(now_ms) {
        return false;
    }

    let wave = schedule.wave_index;
    let mut placed = 0;
    for kind in schedule.compose(rng) {
        if schedule.spawned >= schedule.cap {
            break;
        }
        schedule.spawned += 1;

        let Some(position) = find_spawn_point(rng, spatial, player, kind) else {
            log::debug!("no spawn point for {kind:?} in wave {wave}");
            continue;
        };
        spawn_hostile(world, kind, position);
        placed += 1;
        if kind == HostileKind::Boss {
            events.push(GameEvent::BossSpawned { position });
            log::info!("boss entered at ({:.0}, {:.0})", position.x, position.y);
        }
    }

    schedule.wave_index += 1;
    schedule.last_wave_ms = Some(now_ms);
    events.push(GameEvent::WaveSpawned { wave, placed });
    log::info!(
        "wave {wave} spawned: {placed} placed, {}/{} counted",
        schedule.spawned,
        schedule.cap
    );
    true
}
