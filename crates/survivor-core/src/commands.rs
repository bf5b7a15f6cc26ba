//! Player commands and per-tick input sent from the frontend to the simulation.
//!
//! Lifecycle commands are queued and processed at the next tick boundary.
//! Control input arrives as one `InputFrame` per tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Discrete lifecycle actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Choose the hero for the next encounter (menu only).
    SelectHero { hero: HeroKind },
    /// Start an encounter from the menu.
    StartEncounter,
    /// Reset the whole simulation and start a fresh encounter.
    Restart,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}

/// Control snapshot for a single tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Horizontal movement axis in {-1, 0, 1}.
    pub move_x: i8,
    /// Vertical movement axis in {-1, 0, 1}.
    pub move_y: i8,
    /// Aim point in world space.
    pub aim: Position,
    /// Fire button held this tick.
    pub fire_held: bool,
    /// Reload pressed this tick.
    pub reload_pressed: bool,
    /// Switch to a specific slot.
    pub switch_to_slot: Option<usize>,
    /// Cycle weapons: positive = next, negative = previous.
    pub switch_relative: Option<i8>,
    /// Activate the hero ability.
    pub ability_pressed: bool,
}

impl InputFrame {
    /// A frame with no movement and no actions, aiming at `aim`.
    pub fn idle(aim: Position) -> Self {
        Self {
            aim,
            ..Default::default()
        }
    }
}
