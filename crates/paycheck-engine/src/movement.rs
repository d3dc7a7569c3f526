//! Minimum-movement gate between payouts.

use std::collections::HashMap;

use paycheck_core::types::{PlayerId, Vec3};

/// Remembers where each player was last paid.
///
/// Entries are created lazily and never purged; identities are stable, so a
/// returning player simply resumes from their old record.
#[derive(Debug, Clone, Default)]
pub struct MovementGate {
    last_positions: HashMap<PlayerId, Vec3>,
}

impl MovementGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `player` at `position` has moved far enough since the last payout.
    ///
    /// - `minimum_distance <= 0` disables the gate: always passes, records nothing.
    /// - No record yet: passes and records `position`.
    /// - Within `minimum_distance` of the record: fails and leaves the record
    ///   untouched, so the player must leave the original spot.
    /// - Otherwise: passes and moves the record to `position`.
    pub fn check(&mut self, player: PlayerId, position: Vec3, minimum_distance: f32) -> bool {
        if minimum_distance <= 0.0 {
            return true;
        }

        if let Some(last) = self.last_positions.get(&player) {
            if last.distance_squared(&position) <= minimum_distance * minimum_distance {
                return false;
            }
        }

        self.last_positions.insert(player, position);
        true
    }

    /// Position recorded at the player's last gated payout.
    pub fn last_position(&self, player: PlayerId) -> Option<Vec3> {
        self.last_positions.get(&player).copied()
    }

    /// Number of players with a recorded position.
    pub fn tracked(&self) -> usize {
        self.last_positions.len()
    }
}
