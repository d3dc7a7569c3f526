//! Experience cap resolution.
//!
//! Cap tiers are exclusive lower bounds: a tier applies once the player's
//! experience is strictly greater than its `minimum_xp`. Among applicable
//! tiers the one with the highest threshold wins, regardless of the order the
//! table is written in.

use paycheck_core::types::XpCapTier;

/// Modifier returned when no cap tier applies.
pub const NO_CAP: f32 = 1.0;

/// Payout modifier for a player holding `current_xp` experience.
///
/// Returns [`NO_CAP`] when the table is empty or every threshold is at or
/// above `current_xp`. A result of exactly `0.0` means the player is fully
/// capped.
pub fn cap_modifier(current_xp: u32, caps: &[XpCapTier]) -> f32 {
    active_cap(current_xp, caps).map_or(NO_CAP, |cap| cap.modifier)
}

/// The cap tier in force for `current_xp`, if any.
///
/// Equivalent to a stable ascending sort by threshold followed by taking the
/// last entry below `current_xp`, so among equal thresholds the later entry wins.
pub fn active_cap(current_xp: u32, caps: &[XpCapTier]) -> Option<&XpCapTier> {
    caps.iter()
        .filter(|cap| cap.minimum_xp < current_xp)
        .fold(None, |best: Option<&XpCapTier>, cap| match best {
            Some(b) if b.minimum_xp > cap.minimum_xp => Some(b),
            _ => Some(cap),
        })
}
