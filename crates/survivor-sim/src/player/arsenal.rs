//! Weapon profiles, reloading, firing, switching, and acquisition.

use survivor_core::constants::*;
use survivor_core::enums::WeaponKind;
use survivor_core::types::Position;

use super::PlayerState;

/// Firing parameters for a weapon class.
#[derive(Debug, Clone, Copy)]
pub struct WeaponProfile {
    pub damage: f64,
    pub cooldown_ms: u64,
    /// Projectile speed (units per tick).
    pub projectile_speed: f64,
    /// Magazine size, None for the throwable.
    pub max_ammo: Option<u32>,
    /// Full reload time, or per-shell time for the shotgun.
    pub reload_ms: u64,
    /// Splash radius, throwable only.
    pub explosion_radius: Option<f64>,
}

/// Get the profile for a given weapon.
pub fn get_weapon_profile(weapon: WeaponKind) -> WeaponProfile {
    match weapon {
        WeaponKind::Pistol => WeaponProfile {
            damage: PISTOL_DAMAGE,
            cooldown_ms: PISTOL_COOLDOWN_MS,
            projectile_speed: PISTOL_SPEED,
            max_ammo: Some(PISTOL_MAX_AMMO),
            reload_ms: PISTOL_RELOAD_MS,
            explosion_radius: None,
        },
        WeaponKind::Shotgun => WeaponProfile {
            damage: SHOTGUN_DAMAGE,
            cooldown_ms: SHOTGUN_COOLDOWN_MS,
            projectile_speed: SHOTGUN_SPEED,
            max_ammo: Some(SHOTGUN_MAX_AMMO),
            reload_ms: SHOTGUN_RELOAD_MS,
            explosion_radius: None,
        },
        WeaponKind::MachineGun => WeaponProfile {
            damage: MACHINE_GUN_DAMAGE,
            cooldown_ms: MACHINE_GUN_COOLDOWN_MS,
            projectile_speed: MACHINE_GUN_SPEED,
            max_ammo: Some(MACHINE_GUN_MAX_AMMO),
            reload_ms: MACHINE_GUN_RELOAD_MS,
            explosion_radius: None,
        },
        WeaponKind::Minigun => WeaponProfile {
            damage: MINIGUN_DAMAGE,
            cooldown_ms: MINIGUN_COOLDOWN_MS,
            projectile_speed: MINIGUN_SPEED,
            max_ammo: Some(MINIGUN_MAX_AMMO),
            reload_ms: MINIGUN_RELOAD_MS,
            explosion_radius: None,
        },
        WeaponKind::Grenade => WeaponProfile {
            damage: GRENADE_DAMAGE,
            cooldown_ms: GRENADE_COOLDOWN_MS,
            projectile_speed: GRENADE_SPEED,
            max_ammo: None,
            reload_ms: 0,
            explosion_radius: Some(GRENADE_EXPLOSION_RADIUS),
        },
    }
}

/// Reload state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadState {
    #[default]
    Idle,
    Reloading {
        weapon: WeaponKind,
        started_ms: u64,
        /// Shells loaded since the reload started (shotgun only).
        shells_loaded: u32,
    },
}

/// Something the player just fired. The engine turns each into an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shot {
    Bullet {
        origin: Position,
        angle: f64,
        speed: f64,
        damage: f64,
        homing: bool,
    },
    Grenade {
        origin: Position,
        angle: f64,
        speed: f64,
        damage: f64,
        radius: f64,
    },
}

impl PlayerState {
    pub fn is_reloading(&self) -> bool {
        matches!(self.reload, ReloadState::Reloading { .. })
    }

    /// Begin reloading the current weapon. Declines (returns false) with no
    /// weapon, the throwable, a reload already running, or a full magazine.
    pub fn start_reload(&mut self, now_ms: u64) -> bool {
        let Some(weapon) = self.current_weapon() else {
            return false;
        };
        let Some(max_ammo) = get_weapon_profile(weapon).max_ammo else {
            return false;
        };
        if self.is_reloading() || self.ammo_of(weapon) >= max_ammo {
            return false;
        }

        self.reload = ReloadState::Reloading {
            weapon,
            started_ms: now_ms,
            shells_loaded: 0,
        };
        true
    }

    /// Advance an in-progress reload. Returns the weapon if the reload
    /// finished this call.
    pub fn update_reload(&mut self, now_ms: u64) -> Option<WeaponKind> {
        let ReloadState::Reloading {
            weapon,
            started_ms,
            shells_loaded,
        } = self.reload
        else {
            return None;
        };

        let profile = get_weapon_profile(weapon);
        let max_ammo = profile.max_ammo?;
        let elapsed = now_ms.saturating_sub(started_ms);

        if weapon == WeaponKind::Shotgun {
            let shells_due = (elapsed / profile.reload_ms) as u32;
            let mut loaded = shells_loaded;
            let ammo = self.ammo.entry(weapon).or_insert(0);
            while loaded < shells_due && *ammo < max_ammo {
                *ammo += 1;
                loaded += 1;
            }
            if *ammo >= max_ammo {
                self.reload = ReloadState::Idle;
                return Some(weapon);
            }
            self.reload = ReloadState::Reloading {
                weapon,
                started_ms,
                shells_loaded: loaded,
            };
            None
        } else if elapsed >= profile.reload_ms {
            self.ammo.insert(weapon, max_ammo);
            self.reload = ReloadState::Idle;
            Some(weapon)
        } else {
            None
        }
    }

    /// Fire the current weapon toward `target`. Returns nothing if the shot
    /// is declined.
    pub fn shoot(&mut self, target: Position, now_ms: u64) -> Vec<Shot> {
        let Some(weapon) = self.current_weapon() else {
            return Vec::new();
        };

        // A partly loaded shotgun can cut its reload short, but only once the
        // shot is actually committed.
        let interrupts_reload = self.is_reloading();
        if interrupts_reload && !(weapon == WeaponKind::Shotgun && self.ammo_of(weapon) >= 1) {
            return Vec::new();
        }

        if self.ammo_of(weapon) == 0 {
            return Vec::new();
        }

        let profile = get_weapon_profile(weapon);
        if let Some(last) = self.last_shot_ms {
            if now_ms.saturating_sub(last) <= profile.cooldown_ms {
                return Vec::new();
            }
        }

        if interrupts_reload {
            self.reload = ReloadState::Idle;
        }
        self.last_shot_ms = Some(now_ms);
        self.aim_at(target);
        let angle = self.aim_angle;
        let origin = self.position;
        let damage = if self.insta_kill_active(now_ms) {
            INSTA_KILL_DAMAGE
        } else {
            profile.damage
        };
        let barrage = self.barrage_active(now_ms);

        if weapon == WeaponKind::Grenade {
            self.grenades -= 1;
            return vec![Shot::Grenade {
                origin,
                angle,
                speed: profile.projectile_speed,
                damage,
                radius: profile.explosion_radius.unwrap_or(GRENADE_EXPLOSION_RADIUS),
            }];
        }

        let shots = if weapon == WeaponKind::Shotgun {
            let half = (SHOTGUN_PELLETS / 2) as i32;
            (-half..=half)
                .map(|i| Shot::Bullet {
                    origin,
                    angle: angle + f64::from(i) * SHOTGUN_PELLET_STEP,
                    speed: profile.projectile_speed,
                    damage,
                    homing: false,
                })
                .collect()
        } else {
            vec![Shot::Bullet {
                origin,
                angle,
                speed: profile.projectile_speed,
                damage,
                homing: barrage,
            }]
        };

        if !barrage {
            if let Some(ammo) = self.ammo.get_mut(&weapon) {
                *ammo = ammo.saturating_sub(1);
            }
        }
        if self.ammo_of(weapon) == 0 {
            self.start_reload(now_ms);
        }

        shots
    }

    /// Select `slot`. Declines for an out-of-range or empty slot. Any
    /// accepted switch cancels the reload.
    pub fn switch_to_slot(&mut self, slot: usize) -> bool {
        if !matches!(self.slots.get(slot), Some(Some(_))) {
            return false;
        }
        self.current_slot = slot;
        self.reload = ReloadState::Idle;
        true
    }

    /// Step to the next (positive) or previous (negative) occupied slot.
    pub fn switch_relative(&mut self, direction: i8) -> bool {
        if direction == 0 {
            return false;
        }
        let count = self.slots.len();
        let step = if direction > 0 { 1 } else { count - 1 };
        let target = (1..count)
            .map(|n| (self.current_slot + n * step) % count)
            .find(|&i| self.slots[i].is_some());

        match target {
            Some(slot) => self.switch_to_slot(slot),
            None => false,
        }
    }

    /// Take a weapon from a pickup.
    pub fn acquire_weapon(&mut self, weapon: WeaponKind) {
        if weapon == WeaponKind::Grenade {
            self.grenades += 1;
            if !self.holds(weapon) {
                self.place_in_slot(weapon);
            }
            return;
        }

        let max_ammo = get_weapon_profile(weapon).max_ammo.unwrap_or(0);
        if self.holds(weapon) {
            self.ammo.insert(weapon, max_ammo);
            if matches!(self.reload, ReloadState::Reloading { weapon: w, .. } if w == weapon) {
                self.reload = ReloadState::Idle;
            }
            return;
        }

        self.ammo.insert(weapon, max_ammo);
        self.place_in_slot(weapon);
    }

    /// First empty slot, else overwrite the current one.
    fn place_in_slot(&mut self, weapon: WeaponKind) {
        match self.slots.iter().position(Option::is_none) {
            Some(empty) => self.slots[empty] = Some(weapon),
            None => {
                self.slots[self.current_slot] = Some(weapon);
                self.reload = ReloadState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_core::enums::HeroKind;

    fn with_shotgun(shells: u32) -> PlayerState {
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.acquire_weapon(WeaponKind::Shotgun);
        assert!(player.switch_to_slot(1));
        player.ammo.insert(WeaponKind::Shotgun, shells);
        player
    }

    #[test]
    fn test_shotgun_spread() {
        let mut player = with_shotgun(5);
        let target = Position::new(400.0, 100.0);
        let shots = player.shoot(target, 1000);
        assert_eq!(shots.len(), SHOTGUN_PELLETS);

        let angles: Vec<f64> = shots
            .iter()
            .map(|s| match s {
                Shot::Bullet { angle, homing, .. } => {
                    assert!(!homing);
                    *angle
                }
                Shot::Grenade { .. } => panic!("shotgun fired a grenade"),
            })
            .collect();

        let center = player.position.angle_to(&target);
        assert!((angles[2] - center).abs() < 1e-12);
        for i in 0..2 {
            let left = center - angles[i];
            let right = angles[4 - i] - center;
            assert!((left - right).abs() < 1e-12, "pellets not symmetric");
        }
        assert!((angles[4] - angles[0] - 4.0 * SHOTGUN_PELLET_STEP).abs() < 1e-12);
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), 4);
    }

    #[test]
    fn test_shotgun_reload_per_shell() {
        let mut player = with_shotgun(0);
        assert!(player.start_reload(0));

        for shell in 1..SHOTGUN_MAX_AMMO {
            let t = u64::from(shell) * SHOTGUN_RELOAD_MS;
            assert_eq!(player.update_reload(t - 1), None);
            assert_eq!(player.ammo_of(WeaponKind::Shotgun), shell - 1);
            assert_eq!(player.update_reload(t), None);
            assert_eq!(player.ammo_of(WeaponKind::Shotgun), shell);
        }

        let done = u64::from(SHOTGUN_MAX_AMMO) * SHOTGUN_RELOAD_MS;
        assert_eq!(player.update_reload(done), Some(WeaponKind::Shotgun));
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), SHOTGUN_MAX_AMMO);
        assert!(!player.is_reloading());
    }

    #[test]
    fn test_shotgun_reload_catches_up() {
        let mut player = with_shotgun(1);
        assert!(player.start_reload(0));
        // A long gap loads several shells at once but never overfills
        assert_eq!(player.update_reload(2500), None);
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), 3);
        assert_eq!(player.update_reload(60_000), Some(WeaponKind::Shotgun));
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), SHOTGUN_MAX_AMMO);
    }

    /// Firing one loaded shell interrupts the reload, empties the gun, and
    /// starts a fresh reload.
    #[test]
    fn test_shotgun_interrupt_with_one_shell() {
        let mut player = with_shotgun(0);
        assert!(player.start_reload(0));
        player.update_reload(SHOTGUN_RELOAD_MS);
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), 1);
        assert!(player.is_reloading());

        let now = SHOTGUN_RELOAD_MS + 200;
        let shots = player.shoot(Position::new(500.0, 100.0), now);
        assert_eq!(shots.len(), SHOTGUN_PELLETS);
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), 0);
        assert_eq!(
            player.reload,
            ReloadState::Reloading {
                weapon: WeaponKind::Shotgun,
                started_ms: now,
                shells_loaded: 0,
            }
        );
    }

    /// A shot declined by the cooldown leaves a running reload alone.
    #[test]
    fn test_declined_shot_keeps_shotgun_reload() {
        let mut player = with_shotgun(2);
        let target = Position::new(500.0, 100.0);
        assert_eq!(player.shoot(target, 0).len(), SHOTGUN_PELLETS);
        assert!(player.start_reload(100));

        assert!(player.shoot(target, 200).is_empty());
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), 1);
        assert_eq!(
            player.reload,
            ReloadState::Reloading {
                weapon: WeaponKind::Shotgun,
                started_ms: 100,
                shells_loaded: 0,
            }
        );

        // Once the cooldown has passed, firing does cut the reload short
        let now = SHOTGUN_COOLDOWN_MS + 1;
        assert_eq!(player.shoot(target, now).len(), SHOTGUN_PELLETS);
        assert_eq!(player.ammo_of(WeaponKind::Shotgun), 0);
        assert!(matches!(player.reload, ReloadState::Reloading { started_ms, .. } if started_ms == now));
    }

    #[test]
    fn test_reload_blocks_other_weapons() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.ammo.insert(WeaponKind::Pistol, 4);
        assert!(player.start_reload(0));
        assert!(player.shoot(Position::new(300.0, 100.0), 500).is_empty());

        assert_eq!(player.update_reload(PISTOL_RELOAD_MS - 1), None);
        assert_eq!(player.ammo_of(WeaponKind::Pistol), 4);
        assert_eq!(player.update_reload(PISTOL_RELOAD_MS), Some(WeaponKind::Pistol));
        assert_eq!(player.ammo_of(WeaponKind::Pistol), PISTOL_MAX_AMMO);
    }

    #[test]
    fn test_start_reload_declines() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        // Full magazine
        assert!(!player.start_reload(0));

        player.ammo.insert(WeaponKind::Pistol, 3);
        assert!(player.start_reload(0));
        // Already reloading
        assert!(!player.start_reload(10));

        // Throwable has no reload
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.acquire_weapon(WeaponKind::Grenade);
        player.switch_to_slot(1);
        assert!(!player.start_reload(0));
    }

    #[test]
    fn test_cooldown() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        let target = Position::new(300.0, 100.0);
        assert_eq!(player.shoot(target, 1000).len(), 1);
        assert!(player.shoot(target, 1000 + PISTOL_COOLDOWN_MS).is_empty());
        assert_eq!(player.shoot(target, 1001 + PISTOL_COOLDOWN_MS).len(), 1);
        assert_eq!(player.ammo_of(WeaponKind::Pistol), PISTOL_MAX_AMMO - 2);
    }

    #[test]
    fn test_empty_magazine_auto_reloads() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.ammo.insert(WeaponKind::Pistol, 1);
        assert_eq!(player.shoot(Position::new(300.0, 100.0), 0).len(), 1);
        assert_eq!(player.ammo_of(WeaponKind::Pistol), 0);
        assert!(player.is_reloading());
        assert!(player.shoot(Position::new(300.0, 100.0), 5000).is_empty());
    }

    #[test]
    fn test_grenade_consumes_throwable() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        player.acquire_weapon(WeaponKind::Grenade);
        assert_eq!(player.slots[1], Some(WeaponKind::Grenade));
        assert!(player.switch_to_slot(1));

        let shots = player.shoot(Position::new(300.0, 100.0), 0);
        assert!(matches!(
            shots.as_slice(),
            [Shot::Grenade { radius, .. }] if (*radius - GRENADE_EXPLOSION_RADIUS).abs() < 1e-10
        ));
        assert_eq!(player.grenades, 0);
        assert!(!player.is_reloading());
        assert!(player.shoot(Position::new(300.0, 100.0), 5000).is_empty());
    }

    #[test]
    fn test_switching() {
        let mut player = PlayerState::new(HeroKind::Gunner);
        assert!(!player.switch_to_slot(1), "empty slot");
        assert!(!player.switch_to_slot(7), "out of range");
        assert!(!player.switch_relative(1), "nothing else to switch to");

        player.acquire_weapon(WeaponKind::MachineGun);
        player.ammo.insert(WeaponKind::Pistol, 2);
        player.start_reload(0);
        assert!(player.switch_relative(1));
        assert_eq!(player.current_weapon(), Some(WeaponKind::MachineGun));
        assert!(!player.is_reloading());

        assert!(player.switch_relative(-1));
        assert_eq!(player.current_slot, 0);
    }

    #[test]
    fn test_acquire_weapon() {
        let mut player = PlayerState::new(HeroKind::Gunner);

        // First empty slot
        player.acquire_weapon(WeaponKind::MachineGun);
        assert_eq!(player.slots, [Some(WeaponKind::Pistol), Some(WeaponKind::MachineGun)]);
        assert_eq!(player.ammo_of(WeaponKind::MachineGun), MACHINE_GUN_MAX_AMMO);

        // Already held: refill only
        player.ammo.insert(WeaponKind::MachineGun, 3);
        player.acquire_weapon(WeaponKind::MachineGun);
        assert_eq!(player.ammo_of(WeaponKind::MachineGun), MACHINE_GUN_MAX_AMMO);
        assert_eq!(player.current_slot, 0);

        // Slots full: overwrite current and cancel its reload
        player.ammo.insert(WeaponKind::Pistol, 1);
        player.start_reload(0);
        player.acquire_weapon(WeaponKind::Minigun);
        assert_eq!(player.slots[0], Some(WeaponKind::Minigun));
        assert_eq!(player.ammo_of(WeaponKind::Minigun), MINIGUN_MAX_AMMO);
        assert!(!player.is_reloading());

        // Throwables stack without a second slot
        player.acquire_weapon(WeaponKind::Grenade);
        player.acquire_weapon(WeaponKind::Grenade);
        assert_eq!(player.grenades, 2);
        assert_eq!(
            player.slots.iter().filter(|s| **s == Some(WeaponKind::Grenade)).count(),
            1
        );
    }
}
