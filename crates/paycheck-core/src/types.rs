//! Data model for paychecks, zones, experience caps, and engine configuration.
//!
//! Configuration types derive serde so the host can persist them in any
//! format. Zones are serialized with optional `point` / `node` fields and
//! converted into a [`ZoneCenter`] on load; a zone that sets both or neither
//! is rejected with a [`ConfigError`] instead of being guessed at.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_INTERVAL_SECS, DEFAULT_MINIMUM_MOVEMENT, DEFAULT_PAYCHECKS, DEFAULT_XP_CAPS,
    DEFAULT_ZONE_MULTIPLIER, DEFAULT_ZONE_NODE, DEFAULT_ZONE_RADIUS, PERMISSION_PREFIX,
};
use crate::error::ConfigError;
use crate::traits::NodeRegistry;

// ---------------------------------------------------------------------------
// Geometry and identity
// ---------------------------------------------------------------------------

/// World-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(&self, other: &Vec3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Stable identity of a player, unique across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named location node in the host world.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationNode {
    pub name: String,
    pub position: Vec3,
}

impl LocationNode {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// In-memory [`NodeRegistry`] over a fixed list of nodes.
///
/// Lookups preserve insertion order, so "first match" is deterministic.
#[derive(Debug, Clone, Default)]
pub struct StaticNodeRegistry {
    nodes: Vec<LocationNode>,
}

impl StaticNodeRegistry {
    pub fn new(nodes: Vec<LocationNode>) -> Self {
        Self { nodes }
    }

    pub fn push(&mut self, node: LocationNode) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[LocationNode] {
        &self.nodes
    }
}

impl NodeRegistry for StaticNodeRegistry {
    fn find_nodes_by_name(&self, needle: &str) -> Vec<LocationNode> {
        let needle = needle.to_lowercase();
        self.nodes
            .iter()
            .filter(|node| node.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// Where a zone is anchored.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneCenter {
    /// A fixed world coordinate.
    Point(Vec3),
    /// A name fragment matched against location nodes on every evaluation.
    Node(String),
}

impl fmt::Display for ZoneCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(p) => write!(f, "{p}"),
            Self::Node(name) => write!(f, "node \"{name}\""),
        }
    }
}

/// A spherical region that scales paycheck experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawZone", into = "RawZone")]
pub struct Zone {
    pub center: ZoneCenter,
    pub radius: f32,
    pub multiplier: f32,
}

impl Zone {
    pub fn point(point: Vec3, radius: f32, multiplier: f32) -> Self {
        Self {
            center: ZoneCenter::Point(point),
            radius,
            multiplier,
        }
    }

    pub fn node(node: impl Into<String>, radius: f32, multiplier: f32) -> Self {
        Self {
            center: ZoneCenter::Node(node.into()),
            radius,
            multiplier,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !self.multiplier.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "zone multiplier",
                value: self.multiplier,
            });
        }
        if let ZoneCenter::Point(p) = &self.center {
            for value in [p.x, p.y, p.z] {
                if !value.is_finite() {
                    return Err(ConfigError::NonFinite {
                        field: "zone point",
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} radius {} multiplier {}",
            self.center, self.radius, self.multiplier
        )
    }
}

/// Persisted shape of a [`Zone`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    point: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node: Option<String>,
    radius: f32,
    multiplier: f32,
}

impl TryFrom<RawZone> for Zone {
    type Error = ConfigError;

    fn try_from(raw: RawZone) -> Result<Self, Self::Error> {
        let center = match (raw.point, raw.node) {
            (Some(_), Some(node)) => return Err(ConfigError::AmbiguousZoneCenter { node }),
            (Some(point), None) => ZoneCenter::Point(point),
            (None, Some(node)) => ZoneCenter::Node(node),
            (None, None) => return Err(ConfigError::MissingZoneCenter),
        };
        Ok(Zone {
            center,
            radius: raw.radius,
            multiplier: raw.multiplier,
        })
    }
}

impl From<Zone> for RawZone {
    fn from(zone: Zone) -> Self {
        let (point, node) = match zone.center {
            ZoneCenter::Point(p) => (Some(p), None),
            ZoneCenter::Node(n) => (None, Some(n)),
        };
        RawZone {
            point,
            node,
            radius: zone.radius,
            multiplier: zone.multiplier,
        }
    }
}

// ---------------------------------------------------------------------------
// Paychecks and caps
// ---------------------------------------------------------------------------

/// A permission-gated experience grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaycheckTier {
    pub name: String,
    pub experience: u32,
    /// Zones that only apply to holders of this tier.
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl PaycheckTier {
    pub fn new(name: impl Into<String>, experience: u32) -> Self {
        Self {
            name: name.into(),
            experience,
            zones: Vec::new(),
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    /// Permission key granting this tier: `paycheck.<name>` lowercased.
    pub fn permission(&self) -> String {
        format!("{PERMISSION_PREFIX}{}", self.name.to_lowercase())
    }
}

/// Payout modifier applied once a player's experience exceeds `minimum_xp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpCapTier {
    pub minimum_xp: u32,
    pub modifier: f32,
}

impl XpCapTier {
    pub const fn new(minimum_xp: u32, modifier: f32) -> Self {
        Self {
            minimum_xp,
            modifier,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Everything the engine reads during one evaluation.
///
/// Treated as an immutable snapshot: the host swaps whole values between
/// ticks rather than mutating one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between paycheck sweeps.
    pub interval_secs: f32,
    /// Whether outcome notices are sent to players.
    pub display_notification: bool,
    /// Compose every in-range zone multiplier instead of using the closest zone.
    pub allow_multiple_multipliers: bool,
    pub allow_paychecks_when_dead: bool,
    pub allow_paychecks_in_safezone: bool,
    /// Pay every eligible tier instead of only the most valuable one.
    pub allow_multiple_paychecks: bool,
    /// Distance a player must move between payouts; zero or less disables the check.
    pub minimum_movement_between_paychecks: f32,
    pub paychecks: Vec<PaycheckTier>,
    /// Zones applied regardless of tier.
    pub zones: Vec<Zone>,
    pub xp_caps: Vec<XpCapTier>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            display_notification: true,
            allow_multiple_multipliers: true,
            allow_paychecks_when_dead: true,
            allow_paychecks_in_safezone: false,
            allow_multiple_paychecks: false,
            minimum_movement_between_paychecks: DEFAULT_MINIMUM_MOVEMENT,
            paychecks: DEFAULT_PAYCHECKS
                .iter()
                .map(|(name, xp)| PaycheckTier::new(*name, *xp))
                .collect(),
            zones: vec![Zone::node(
                DEFAULT_ZONE_NODE,
                DEFAULT_ZONE_RADIUS,
                DEFAULT_ZONE_MULTIPLIER,
            )],
            xp_caps: DEFAULT_XP_CAPS
                .iter()
                .map(|(min, modifier)| XpCapTier::new(*min, *modifier))
                .collect(),
        }
    }
}

impl EngineConfig {
    /// A configuration with no tiers, zones, or caps and every gate relaxed.
    pub fn empty() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            display_notification: true,
            allow_multiple_multipliers: true,
            allow_paychecks_when_dead: true,
            allow_paychecks_in_safezone: true,
            allow_multiple_paychecks: false,
            minimum_movement_between_paychecks: 0.0,
            paychecks: Vec::new(),
            zones: Vec::new(),
            xp_caps: Vec::new(),
        }
    }

    /// Sweep interval as a [`Duration`]. Saturates for out-of-range values.
    pub fn interval(&self) -> Duration {
        match Duration::try_from_secs_f32(self.interval_secs) {
            Ok(interval) => interval,
            Err(_) if self.interval_secs > 0.0 => Duration::MAX,
            Err(_) => Duration::ZERO,
        }
    }

    /// Case-insensitive lookup of a tier by name.
    pub fn paycheck(&self, name: &str) -> Option<&PaycheckTier> {
        self.paychecks
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn paycheck_mut(&mut self, name: &str) -> Option<&mut PaycheckTier> {
        self.paychecks
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return Err(ConfigError::InvalidInterval(self.interval_secs));
        }
        if !self.minimum_movement_between_paychecks.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "minimum movement",
                value: self.minimum_movement_between_paychecks,
            });
        }

        for zone in &self.zones {
            zone.validate()?;
        }

        let mut names = HashSet::new();
        for paycheck in &self.paychecks {
            if paycheck.name.trim().is_empty() {
                return Err(ConfigError::EmptyPaycheckName);
            }
            if !names.insert(paycheck.name.to_lowercase()) {
                return Err(ConfigError::DuplicatePaycheck(paycheck.name.clone()));
            }
            for zone in &paycheck.zones {
                zone.validate()?;
            }
        }

        let mut thresholds = HashSet::new();
        for cap in &self.xp_caps {
            if !cap.modifier.is_finite() {
                return Err(ConfigError::NonFinite {
                    field: "xp cap modifier",
                    value: cap.modifier,
                });
            }
            if !thresholds.insert(cap.minimum_xp) {
                return Err(ConfigError::DuplicateCapThreshold(cap.minimum_xp));
            }
        }

        Ok(())
    }
}
