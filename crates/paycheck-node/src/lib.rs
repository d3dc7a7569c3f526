//! # paycheck-node — Runtime around the paycheck engine.
//!
//! Wires the pure engine to a live game host:
//! - [`store::ConfigStore`] — hot-swappable config snapshots with a dirty flag
//! - [`admin`] — tier and zone edits applied through the store
//! - [`translations::Translations`] — notice templates
//! - [`service::PayrollService`] — one sweep over all connected players
//! - [`scheduler::PaycheckScheduler`] — cancellable periodic sweeps
//! - [`config::RuntimeConfig`] — file locations and logging

pub mod admin;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod translations;

pub use admin::ZoneScope;
pub use config::RuntimeConfig;
pub use error::{AdminError, StoreError};
pub use scheduler::PaycheckScheduler;
pub use service::{PayrollService, SweepReport};
pub use store::ConfigStore;
pub use translations::Translations;
