//! Trait interfaces between the paycheck engine and its host.
//!
//! - [`Player`] — read access to one connected player plus a permission check
//! - [`NodeRegistry`] — read-only lookup of named world locations
//! - [`GameHost`] — player listing, experience mutation, and notices

use crate::types::{LocationNode, PlayerId, Vec3};

/// Colour tag attached to a player notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeColor {
    /// Experience was granted.
    Green,
    /// A paycheck was withheld.
    Yellow,
}

/// One connected player as seen by the engine.
///
/// Implementations are expected to be cheap handles; every method is
/// called at most a handful of times per evaluation.
pub trait Player {
    /// Identity that survives reconnects.
    fn id(&self) -> PlayerId;

    fn position(&self) -> Vec3;

    /// Current (unspent) experience.
    fn experience(&self) -> u32;

    fn is_dead(&self) -> bool;

    /// Whether the player stands in a host-designated safe zone.
    fn in_safe_zone(&self) -> bool;

    /// Capability check for a permission key such as `paycheck.sgt`.
    fn has_permission(&self, key: &str) -> bool;
}

/// Read-only registry of named location nodes.
///
/// Queried afresh on every evaluation since nodes may move.
pub trait NodeRegistry: Send + Sync {
    /// All nodes whose name contains `needle`, compared case-insensitively,
    /// in registry order.
    fn find_nodes_by_name(&self, needle: &str) -> Vec<LocationNode>;

    /// Whether any node matches `needle`.
    ///
    /// Default implementation delegates to [`find_nodes_by_name`](Self::find_nodes_by_name).
    fn node_exists(&self, needle: &str) -> bool {
        !self.find_nodes_by_name(needle).is_empty()
    }
}

/// The game server hosting the paycheck engine.
pub trait GameHost: Send + Sync {
    type Player: Player;

    /// Whether the world is loaded and players can be paid.
    ///
    /// Sweeps are skipped while this returns `false`. Defaults to `true`.
    fn is_ready(&self) -> bool {
        true
    }

    /// Snapshot of the currently connected players.
    fn connected_players(&self) -> Vec<Self::Player>;

    /// Location nodes used to resolve node-anchored zones.
    fn nodes(&self) -> &dyn NodeRegistry;

    /// Add `delta` experience (possibly negative) and return the amount
    /// actually applied after host clamping.
    fn apply_experience_delta(&self, player: &Self::Player, delta: i32) -> i32;

    /// Fire-and-forget notice to a player.
    fn notify(&self, player: &Self::Player, message: &str, color: NoticeColor);
}
