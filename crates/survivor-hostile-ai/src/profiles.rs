//! Variant-specific behaviour profiles.
//!
//! Consolidates per-variant parameters for hostile movement and damage intake.

use survivor_core::enums::HostileKind;

/// Behaviour profile for a hostile variant.
#[derive(Debug, Clone, Copy)]
pub struct HostileProfile {
    /// Pursuit speed (units per tick).
    pub speed: f64,
    /// Collision size.
    pub size: f64,
    /// Starting health.
    pub health: f64,
    /// Score awarded for the kill.
    pub kill_score: u64,
    /// Divisor applied to insta-kill damage, None if the variant has no resistance.
    pub insta_kill_divisor: Option<f64>,
}

impl HostileProfile {
    /// Damage actually applied for an incoming hit of `damage`.
    pub fn effective_damage(&self, damage: f64) -> f64 {
        use survivor_core::constants::INSTA_KILL_DAMAGE;

        match self.insta_kill_divisor {
            Some(divisor) if damage >= INSTA_KILL_DAMAGE => damage / divisor,
            _ => damage,
        }
    }
}

/// Get the behaviour profile for a given variant.
pub fn get_profile(kind: HostileKind) -> HostileProfile {
    use survivor_core::constants::*;

    match kind {
        HostileKind::Standard => HostileProfile {
            speed: STANDARD_SPEED,
            size: STANDARD_SIZE,
            health: STANDARD_HEALTH,
            kill_score: STANDARD_KILL_SCORE,
            insta_kill_divisor: None,
        },
        HostileKind::Fast => HostileProfile {
            speed: FAST_SPEED,
            size: FAST_SIZE,
            health: FAST_HEALTH,
            kill_score: FAST_KILL_SCORE,
            insta_kill_divisor: None,
        },
        HostileKind::Boss => HostileProfile {
            speed: BOSS_SPEED,
            size: BOSS_SIZE,
            health: BOSS_HEALTH,
            kill_score: BOSS_KILL_SCORE,
            insta_kill_divisor: Some(BOSS_INSTA_KILL_DIVISOR),
        },
    }
}
