//! Zone multiplier resolution.
//!
//! Zones are considered in iteration order: global zones first, then each
//! selected tier's zones. A zone is in range when the squared distance from
//! the player to its center is at most `radius²`.
//!
//! - With multiple multipliers allowed, every in-range multiplier is composed.
//! - Otherwise only the closest in-range zone counts; a later zone replaces an
//!   earlier one only when strictly closer.

use paycheck_core::traits::NodeRegistry;
use paycheck_core::types::{Vec3, Zone, ZoneCenter};

/// Multiplier returned when no zone is in range.
pub const NEUTRAL_MULTIPLIER: f32 = 1.0;

/// Squared distance from `position` to `zone`, if the zone is in range.
///
/// Node zones look up the registry afresh and walk every node whose name
/// contains the zone's needle, in registry order; the first node within
/// `radius` is the one that counts. Returns `None` when no matching node is
/// in range.
pub fn distance_in_range(position: &Vec3, zone: &Zone, nodes: &dyn NodeRegistry) -> Option<f32> {
    let radius_squared = zone.radius * zone.radius;
    match &zone.center {
        ZoneCenter::Point(point) => {
            let distance = position.distance_squared(point);
            (distance <= radius_squared).then_some(distance)
        }
        ZoneCenter::Node(needle) => nodes
            .find_nodes_by_name(needle)
            .iter()
            .map(|node| position.distance_squared(&node.position))
            .find(|distance| *distance <= radius_squared),
    }
}

/// Experience multiplier for a player standing at `position`.
///
/// May legitimately return `0.0` (a no-experience zone) or a negative value.
pub fn zone_multiplier<'a, I>(
    position: Vec3,
    zones: I,
    allow_multiple: bool,
    nodes: &dyn NodeRegistry,
) -> f32
where
    I: IntoIterator<Item = &'a Zone>,
{
    let mut multiplier = NEUTRAL_MULTIPLIER;
    let mut closest = f32::INFINITY;

    for zone in zones {
        let Some(distance) = distance_in_range(&position, zone, nodes) else {
            continue;
        };

        if allow_multiple {
            multiplier *= zone.multiplier;
        } else if distance < closest {
            closest = distance;
            multiplier = zone.multiplier;
        }
    }

    multiplier
}
