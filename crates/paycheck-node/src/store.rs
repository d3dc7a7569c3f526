//! Hot-swappable engine configuration.
//!
//! Readers take an `Arc<EngineConfig>` snapshot and keep it for a whole
//! sweep; writers build a new value and swap the `Arc`, so a sweep never sees
//! a half-applied edit. In-game edits set a dirty flag that the host clears
//! by flushing to disk, typically on shutdown.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use paycheck_core::types::EngineConfig;
use tracing::{info, warn};

use crate::config::{load_engine_config, load_or_init_engine_config, save_engine_config};
use crate::error::{AdminError, StoreError};

/// Owner of the current [`EngineConfig`] snapshot.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<EngineConfig>>,
    dirty: AtomicBool,
    path: Option<PathBuf>,
}

impl ConfigStore {
    /// A store with no backing file.
    pub fn in_memory(cfg: EngineConfig) -> Result<Self, StoreError> {
        cfg.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(cfg)),
            dirty: AtomicBool::new(false),
            path: None,
        })
    }

    /// Open the config file at `path`, creating it from defaults if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let cfg = load_or_init_engine_config(&path)?;
        info!(
            "loaded {} paychecks, {} global zones, {} xp caps from {}",
            cfg.paychecks.len(),
            cfg.zones.len(),
            cfg.xp_caps.len(),
            path.display()
        );
        Ok(Self {
            current: RwLock::new(Arc::new(cfg)),
            dirty: AtomicBool::new(false),
            path: Some(path),
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The current configuration. Cheap; hold it for the duration of a sweep.
    pub fn snapshot(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.current.read())
    }

    /// Whether in-game edits have not been saved yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Swap in a new configuration wholesale. Does not mark the store dirty.
    pub fn replace(&self, cfg: EngineConfig) -> Result<(), StoreError> {
        cfg.validate()?;
        *self.current.write() = Arc::new(cfg);
        Ok(())
    }

    /// Apply an in-game edit.
    ///
    /// `edit` runs against a copy of the current config; the copy is
    /// validated and swapped in only if both succeed, and the store is then
    /// marked dirty. The write lock is held throughout so concurrent edits
    /// serialize.
    pub fn edit<T, F>(&self, edit: F) -> Result<T, AdminError>
    where
        F: FnOnce(&mut EngineConfig) -> Result<T, AdminError>,
    {
        let mut guard = self.current.write();
        let mut next = EngineConfig::clone(&guard);
        let value = edit(&mut next)?;
        next.validate()?;
        *guard = Arc::new(next);
        self.dirty.store(true, Ordering::Release);
        Ok(value)
    }

    /// Re-read the backing file, discarding unsaved edits.
    pub fn reload(&self) -> Result<(), StoreError> {
        let path = self.path.as_deref().ok_or(StoreError::NoBackingFile)?;
        let cfg = load_engine_config(path)?;
        if self.is_dirty() {
            warn!("reloading {} discards unsaved edits", path.display());
        }
        *self.current.write() = Arc::new(cfg);
        self.dirty.store(false, Ordering::Release);
        info!("reloaded config from {}", path.display());
        Ok(())
    }

    /// Write the current snapshot to the backing file and clear the dirty flag.
    pub fn save(&self) -> Result<(), StoreError> {
        let path = self.path.as_deref().ok_or(StoreError::NoBackingFile)?;
        let snapshot = self.snapshot();
        save_engine_config(path, &snapshot)?;
        self.dirty.store(false, Ordering::Release);
        Ok(())
    }

    /// Save only if there are unsaved edits. Returns whether anything was written.
    pub fn flush_if_dirty(&self) -> Result<bool, StoreError> {
        if !self.is_dirty() {
            return Ok(false);
        }
        info!("configuration has been changed in-game, saving");
        self.save()?;
        Ok(true)
    }
}
