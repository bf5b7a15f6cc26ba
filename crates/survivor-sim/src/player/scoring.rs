//! Kill accounting, ability charge, and streak bonuses.

use serde::{Deserialize, Serialize};

use survivor_core::constants::*;
use survivor_core::enums::HostileKind;
use survivor_hostile_ai::profiles::get_profile;

use super::PlayerState;

/// Kills by hostile variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillCounters {
    pub standard: u32,
    pub fast: u32,
    pub boss: u32,
    pub total: u32,
}

impl KillCounters {
    fn record(&mut self, kind: HostileKind) {
        match kind {
            HostileKind::Standard => self.standard += 1,
            HostileKind::Fast => self.fast += 1,
            HostileKind::Boss => self.boss += 1,
        }
        self.total += 1;
    }
}

impl PlayerState {
    /// Credit one kill. Returns the streak bonus if this kill reached a new
    /// milestone.
    pub fn record_kill(&mut self, kind: HostileKind) -> Option<u64> {
        self.kills.record(kind);
        self.score += get_profile(kind).kill_score;
        self.streak += 1;
        self.ability_charge = (self.ability_charge + ABILITY_CHARGE_PER_KILL).min(ABILITY_CHARGE_MAX);

        let milestone = self.streak / STREAK_MILESTONE * STREAK_MILESTONE;
        if milestone == 0 || milestone <= self.last_milestone {
            return None;
        }
        self.last_milestone = milestone;
        let bonus = STREAK_BONUS_PER_KILL * u64::from(milestone);
        self.score += bonus;
        Some(bonus)
    }
}
