//! Error types for the paycheck runtime.
use std::path::PathBuf;

use paycheck_core::error::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid config: {0}")] Invalid(#[from] ConfigError),
    #[error("loading {}: {source}", path.display())] Load { path: PathBuf, source: ::config::ConfigError },
    #[error("io: {0}")] Io(#[from] std::io::Error),
    #[error("serialization: {0}")] Serialization(#[from] serde_json::Error),
    #[error("store has no backing file")] NoBackingFile,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdminError {
    #[error("paycheck \"{0}\" could not be found")] PaycheckNotFound(String),
    #[error("paycheck \"{0}\" already exists")] DuplicatePaycheck(String),
    #[error("node \"{0}\" could not be found")] NodeNotFound(String),
    #[error("no zones are set up")] NoZones,
    #[error("index {index} is out of bounds {min} to {max}")] IndexOutOfBounds { index: usize, min: usize, max: usize },
    #[error(transparent)] Invalid(#[from] ConfigError),
}
