//! Hostile AI for SURVIVOR.
//!
//! Implements the pursuit movement ladder and per-variant
//! behaviour profiles.

pub mod ladder;
pub mod profiles;

pub use survivor_core as core;
