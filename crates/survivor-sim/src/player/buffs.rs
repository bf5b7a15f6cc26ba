//! Hero abilities and pickup power-ups.

use survivor_core::constants::{ABILITY_CHARGE_MAX, BARRAGE_DURATION_MS};
use survivor_core::enums::{AbilityKind, HeroKind, PowerUpKind};

use super::arsenal::{get_weapon_profile, ReloadState};
use super::PlayerState;

/// An effect that lasts until `ends_at_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEffect<K> {
    pub kind: K,
    pub ends_at_ms: u64,
}

impl<K> TimedEffect<K> {
    pub fn is_active(&self, now_ms: u64) -> bool {
        now_ms < self.ends_at_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.ends_at_ms.saturating_sub(now_ms)
    }
}

/// Ability granted by each hero.
pub fn hero_ability(hero: HeroKind) -> AbilityKind {
    match hero {
        HeroKind::Gunner => AbilityKind::Barrage,
        HeroKind::Medic => AbilityKind::Restore,
    }
}

impl PlayerState {
    /// Whether the ability can be triggered right now.
    pub fn ability_ready(&self) -> bool {
        self.ability_charge >= ABILITY_CHARGE_MAX && self.ability.is_none()
    }

    /// Trigger the hero ability. Needs a full charge and no open window.
    pub fn activate_ability(&mut self, now_ms: u64) -> Option<AbilityKind> {
        if !self.ability_ready() {
            return None;
        }
        self.ability_charge = 0.0;

        let ability = hero_ability(self.hero);
        match ability {
            AbilityKind::Barrage => {
                self.ability = Some(TimedEffect {
                    kind: ability,
                    ends_at_ms: now_ms + BARRAGE_DURATION_MS,
                });
            }
            AbilityKind::Restore => {
                self.health = self.max_health;
            }
        }
        Some(ability)
    }

    /// Open (or extend) a power-up window.
    pub fn activate_power_up(&mut self, kind: PowerUpKind, duration_ms: u64, now_ms: u64) {
        self.power_up = Some(TimedEffect {
            kind,
            ends_at_ms: now_ms + duration_ms,
        });
    }

    /// Close any windows whose time has passed.
    pub fn update_windows(&mut self, now_ms: u64) {
        if let Some(ability) = self.ability {
            if !ability.is_active(now_ms) {
                self.ability = None;
                if ability.kind == AbilityKind::Barrage {
                    self.restore_ammo();
                }
            }
        }

        if let Some(power_up) = self.power_up {
            if !power_up.is_active(now_ms) {
                self.power_up = None;
            }
        }
    }

    /// Infinite ammunition and homing fire.
    pub fn barrage_active(&self, now_ms: u64) -> bool {
        self.ability
            .is_some_and(|a| a.kind == AbilityKind::Barrage && a.is_active(now_ms))
    }

    /// Outgoing shots carry the insta-kill sentinel.
    pub fn insta_kill_active(&self, now_ms: u64) -> bool {
        self.power_up
            .is_some_and(|p| p.kind == PowerUpKind::InstaKill && p.is_active(now_ms))
    }

    /// Refill every held ammo weapon and drop any reload.
    fn restore_ammo(&mut self) {
        for weapon in self.slots.iter().flatten() {
            if let Some(max_ammo) = get_weapon_profile(*weapon).max_ammo {
                self.ammo.insert(*weapon, max_ammo);
            }
        }
        self.reload = ReloadState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_core::constants::*;
    use survivor_core::enums::WeaponKind;
    use survivor_core::types::Position;

    use crate::player::Shot;

    #[test]
    fn test_ability_needs_full_charge() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.ability_charge = 95.0;
        assert_eq!(player.activate_ability(0), None);

        player.ability_charge = ABILITY_CHARGE_MAX;
        assert_eq!(player.activate_ability(0), Some(AbilityKind::Barrage));
        assert_eq!(player.ability_charge, 0.0);

        // Window already open
        player.ability_charge = ABILITY_CHARGE_MAX;
        assert_eq!(player.activate_ability(100), None);
    }

    #[test]
    fn test_barrage_window() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.ability_charge = ABILITY_CHARGE_MAX;
        player.activate_ability(1000);

        let target = Position::new(400.0, 100.0);
        let shots = player.shoot(target, 1000);
        assert!(matches!(shots.as_slice(), [Shot::Bullet { homing: true, .. }]));
        // Infinite ammunition
        assert_eq!(player.ammo_of(WeaponKind::Pistol), PISTOL_MAX_AMMO);

        player.ammo.insert(WeaponKind::Pistol, 2);
        player.update_windows(1000 + BARRAGE_DURATION_MS - 1);
        assert!(player.barrage_active(1000 + BARRAGE_DURATION_MS - 1));

        player.update_windows(1000 + BARRAGE_DURATION_MS);
        assert!(player.ability.is_none());
        assert_eq!(player.ammo_of(WeaponKind::Pistol), PISTOL_MAX_AMMO);

        let shots = player.shoot(target, 20_000);
        assert!(matches!(shots.as_slice(), [Shot::Bullet { homing: false, .. }]));
    }

    #[test]
    fn test_restore_heals_instantly() {
        let mut player = PlayerState::new(HeroKind::Medic);
        player.health = 1;
        player.ability_charge = ABILITY_CHARGE_MAX;
        assert_eq!(player.activate_ability(0), Some(AbilityKind::Restore));
        assert_eq!(player.health, player.max_health);
        assert!(player.ability.is_none());
    }

    #[test]
    fn test_insta_kill_window() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.activate_power_up(PowerUpKind::InstaKill, INSTA_KILL_DURATION_MS, 500);

        let shots = player.shoot(Position::new(400.0, 100.0), 600);
        match shots.as_slice() {
            [Shot::Bullet { damage, .. }] => {
                assert!((*damage - INSTA_KILL_DAMAGE).abs() < 1e-10)
            }
            other => panic!("unexpected shots {other:?}"),
        }

        player.update_windows(500 + INSTA_KILL_DURATION_MS);
        assert!(player.power_up.is_none());
        let shots = player.shoot(Position::new(400.0, 100.0), 20_000);
        match shots.as_slice() {
            [Shot::Bullet { damage, .. }] => {
                assert!((*damage - PISTOL_DAMAGE).abs() < 1e-10)
            }
            other => panic!("unexpected shots {other:?}"),
        }
    }
}
