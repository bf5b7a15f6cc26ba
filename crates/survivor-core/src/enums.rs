//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hostile actor variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HostileKind {
    /// Baseline walker.
    #[default]
    Standard,
    /// Faster, smaller and frailer than Standard.
    Fast,
    /// Final-wave heavy. Large, slow, resists the insta-kill sentinel.
    Boss,
}

/// Weapon class held in a player slot or lying on the ground as a pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    /// Multi-pellet weapon with per-shell, interruptible reload.
    Shotgun,
    MachineGun,
    /// Dropped by the boss.
    Minigun,
    /// Throwable. Uses the consumable counter instead of ammunition.
    Grenade,
}

/// Playable hero. Determines the charge-meter ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroKind {
    /// Barrage ability: timed infinite ammo with homing fire.
    #[default]
    Gunner,
    /// Restore ability: instant full heal.
    Medic,
}

/// Charge-meter ability class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Timed: infinite ammunition and homing projectiles. Restores ammunition on expiry.
    Barrage,
    /// Instantaneous full heal, no timed window.
    Restore,
}

/// Pickup-triggered timed buff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Outgoing shot damage becomes the insta-kill sentinel.
    InstaKill,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for hero selection / start.
    #[default]
    Menu,
    Active,
    Paused,
    /// Terminal: player reached the exit.
    Won,
    /// Terminal: player health reached zero.
    Lost,
}

impl GamePhase {
    /// Terminal phases freeze the simulation until a restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}
