//! Player state: position, health, weapons, buffs, and score.
//!
//! Held by `SimulationEngine` directly, NOT as an ECS entity. All
//! time-dependent operations take the current simulation time in
//! milliseconds.

pub mod arsenal;
pub mod buffs;
pub mod scoring;

use std::collections::BTreeMap;

use survivor_arena::SpatialWorld;
use survivor_core::constants::*;
use survivor_core::enums::{AbilityKind, HeroKind, PowerUpKind, WeaponKind};
use survivor_core::types::{Position, Rect};

pub use arsenal::{get_weapon_profile, ReloadState, Shot, WeaponProfile};
pub use buffs::TimedEffect;
pub use scoring::KillCounters;

/// The player actor.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub hero: HeroKind,
    pub position: Position,
    pub size: f64,
    /// Units per tick.
    pub speed: f64,
    pub health: u32,
    pub max_health: u32,
    /// Last valid aim angle (radians).
    pub aim_angle: f64,

    // --- Weapons ---
    pub slots: [Option<WeaponKind>; WEAPON_SLOTS],
    pub current_slot: usize,
    /// Ammunition per ammo-using weapon ever acquired.
    pub ammo: BTreeMap<WeaponKind, u32>,
    /// Throwables carried. Independent of slot occupancy.
    pub grenades: u32,
    pub reload: ReloadState,
    pub last_shot_ms: Option<u64>,

    // --- Buffs ---
    pub ability: Option<TimedEffect<AbilityKind>>,
    pub power_up: Option<TimedEffect<PowerUpKind>>,
    /// Percent, 0 to 100.
    pub ability_charge: f64,

    // --- Score ---
    pub score: u64,
    pub kills: KillCounters,
    /// Kills since the last hit taken.
    pub streak: u32,
    /// Highest streak milestone already rewarded.
    pub last_milestone: u32,
}

impl PlayerState {
    /// Fresh player at the arena start, holding a loaded pistol.
    pub fn new(hero: HeroKind) -> Self {
        let mut ammo = BTreeMap::new();
        ammo.insert(WeaponKind::Pistol, PISTOL_MAX_AMMO);

        Self {
            hero,
            position: Position::new(PLAYER_START_X, PLAYER_START_Y),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            aim_angle: 0.0,
            slots: [Some(WeaponKind::Pistol), None],
            current_slot: 0,
            ammo,
            grenades: 0,
            reload: ReloadState::Idle,
            last_shot_ms: None,
            ability: None,
            power_up: None,
            ability_charge: 0.0,
            score: 0,
            kills: KillCounters::default(),
            streak: 0,
            last_milestone: 0,
        }
    }

    /// Bounding region used for obstacle and exit tests.
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    /// Move along the input axes. The step is dropped if it would overlap an
    /// obstacle; the result is always clamped inside the map.
    pub fn move_by(&mut self, axis_x: i8, axis_y: i8, world: &SpatialWorld) {
        let dx = f64::from(axis_x.signum()) * self.speed;
        let dy = f64::from(axis_y.signum()) * self.speed;
        let next = Position::new(self.position.x + dx, self.position.y + dy);

        if !world.intersects_obstacle(&Rect::centered(next, self.size)) {
            self.position = next;
        }

        let extent = world.extent();
        self.position.x = self.position.x.clamp(self.size, extent - self.size);
        self.position.y = self.position.y.clamp(self.size, extent - self.size);
    }

    /// Point the weapon at `target`. A target on top of the player keeps the
    /// previous angle.
    pub fn aim_at(&mut self, target: Position) {
        if self.position.distance_to(&target) > f64::EPSILON {
            self.aim_angle = self.position.angle_to(&target);
        }
    }

    /// Apply one hit. Returns true if the player died.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.streak = 0;
        self.last_milestone = 0;
        !self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Weapon in the current slot.
    pub fn current_weapon(&self) -> Option<WeaponKind> {
        self.slots.get(self.current_slot).copied().flatten()
    }

    /// Current ammunition for `weapon` (throwable count for grenades).
    pub fn ammo_of(&self, weapon: WeaponKind) -> u32 {
        match weapon {
            WeaponKind::Grenade => self.grenades,
            _ => self.ammo.get(&weapon).copied().unwrap_or(0),
        }
    }

    fn holds(&self, weapon: WeaponKind) -> bool {
        self.slots.iter().any(|s| *s == Some(weapon))
    }
}
