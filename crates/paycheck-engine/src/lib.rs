//! # paycheck-engine — Reward resolution for periodic experience paychecks.
//!
//! Pure computation, no I/O. Given one player and a configuration snapshot
//! the engine decides how much experience the player earns this tick:
//! - **Tier selection**: permission-gated tiers, optionally only the most valuable one.
//! - **Gates**: death, safe zones, and a minimum-movement requirement.
//! - **Experience caps**: the highest threshold strictly below the player's
//!   experience sets a payout modifier; a zero modifier withholds the paycheck.
//! - **Zones**: point or node anchored spheres multiply the payout, either
//!   composed or closest-wins.

pub mod cap;
pub mod engine;
pub mod movement;
pub mod outcome;
pub mod selector;
pub mod zone;

pub use cap::cap_modifier;
pub use engine::PaycheckEngine;
pub use movement::MovementGate;
pub use outcome::PaycheckOutcome;
pub use selector::select_paychecks;
pub use zone::zone_multiplier;
