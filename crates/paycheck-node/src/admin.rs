//! Administrative edits to paycheck tiers and zones.
//!
//! Every mutation goes through [`ConfigStore::edit`], so it is validated as a
//! whole and marks the store dirty. Zone indices are 1-based, matching what
//! an operator sees in a listing.

use std::fmt;

use paycheck_core::traits::NodeRegistry;
use paycheck_core::types::{EngineConfig, PaycheckTier, Zone, ZoneCenter};
use tracing::info;

use crate::error::AdminError;
use crate::store::ConfigStore;

/// Which zone list an operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneScope {
    /// Zones that apply to every tier.
    Global,
    /// Zones attached to the named tier.
    Paycheck(String),
}

impl fmt::Display for ZoneScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Paycheck(name) => write!(f, "paycheck \"{name}\""),
        }
    }
}

fn zones_of<'a>(cfg: &'a EngineConfig, scope: &ZoneScope) -> Result<&'a Vec<Zone>, AdminError> {
    match scope {
        ZoneScope::Global => Ok(&cfg.zones),
        ZoneScope::Paycheck(name) => cfg
            .paycheck(name)
            .map(|p| &p.zones)
            .ok_or_else(|| AdminError::PaycheckNotFound(name.clone())),
    }
}

fn zones_of_mut<'a>(
    cfg: &'a mut EngineConfig,
    scope: &ZoneScope,
) -> Result<&'a mut Vec<Zone>, AdminError> {
    match scope {
        ZoneScope::Global => Ok(&mut cfg.zones),
        ZoneScope::Paycheck(name) => cfg
            .paycheck_mut(name)
            .map(|p| &mut p.zones)
            .ok_or_else(|| AdminError::PaycheckNotFound(name.clone())),
    }
}

impl ConfigStore {
    /// All configured tiers, in config order.
    pub fn list_paychecks(&self) -> Vec<PaycheckTier> {
        self.snapshot().paychecks.clone()
    }

    /// Add a tier with no zones. Names are unique ignoring ASCII case.
    pub fn create_paycheck(&self, name: &str, experience: u32) -> Result<(), AdminError> {
        self.edit(|cfg| {
            if cfg.paycheck(name).is_some() {
                return Err(AdminError::DuplicatePaycheck(name.to_string()));
            }
            cfg.paychecks.push(PaycheckTier::new(name, experience));
            Ok(())
        })?;
        info!(paycheck = name, experience, "created paycheck");
        Ok(())
    }

    /// Remove a tier and its zones. Returns the removed tier.
    pub fn delete_paycheck(&self, name: &str) -> Result<PaycheckTier, AdminError> {
        let removed = self.edit(|cfg| {
            let pos = cfg
                .paychecks
                .iter()
                .position(|p| p.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| AdminError::PaycheckNotFound(name.to_string()))?;
            Ok(cfg.paychecks.remove(pos))
        })?;
        info!(paycheck = %removed.name, "deleted paycheck");
        Ok(removed)
    }

    /// Zones in `scope`. An empty list is reported as [`AdminError::NoZones`].
    pub fn zones(&self, scope: &ZoneScope) -> Result<Vec<Zone>, AdminError> {
        let snapshot = self.snapshot();
        let zones = zones_of(&snapshot, scope)?;
        if zones.is_empty() {
            return Err(AdminError::NoZones);
        }
        Ok(zones.clone())
    }

    /// Append `zone` to `scope`. Node-anchored zones must name a node that
    /// currently exists in `nodes`.
    pub fn add_zone(
        &self,
        scope: &ZoneScope,
        zone: Zone,
        nodes: &dyn NodeRegistry,
    ) -> Result<(), AdminError> {
        if let ZoneCenter::Node(name) = &zone.center {
            if !nodes.node_exists(name) {
                return Err(AdminError::NodeNotFound(name.clone()));
            }
        }
        let shown = zone.to_string();
        self.edit(|cfg| {
            zones_of_mut(cfg, scope)?.push(zone);
            Ok(())
        })?;
        info!(%scope, zone = %shown, "added zone");
        Ok(())
    }

    /// Remove the zone at 1-based `index` in `scope`. Returns the removed zone.
    pub fn remove_zone(&self, scope: &ZoneScope, index: usize) -> Result<Zone, AdminError> {
        let removed = self.edit(|cfg| {
            let zones = zones_of_mut(cfg, scope)?;
            if zones.is_empty() {
                return Err(AdminError::NoZones);
            }
            if index < 1 || index > zones.len() {
                return Err(AdminError::IndexOutOfBounds {
                    index,
                    min: 1,
                    max: zones.len(),
                });
            }
            Ok(zones.remove(index - 1))
        })?;
        info!(%scope, zone = %removed, "removed zone");
        Ok(removed)
    }
}
