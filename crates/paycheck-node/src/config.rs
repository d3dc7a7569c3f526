//! Runtime configuration and engine config persistence.
//!
//! [`RuntimeConfig`] says where things live on disk. The engine config itself
//! is a JSON file loaded through the `config` crate, so any field can be
//! overridden from the environment:
//!
//! ```text
//! PAYCHECK_INTERVAL_SECS=60
//! PAYCHECK_ALLOW_PAYCHECKS_IN_SAFEZONE=true
//! ```
//!
//! Saving writes pretty JSON to a sibling temp file and renames it over the
//! existing file.

use std::fs;
use std::path::{Path, PathBuf};

use paycheck_core::types::EngineConfig;
use tracing::info;

use crate::error::StoreError;

/// Prefix for environment overrides of engine config fields.
pub const ENV_PREFIX: &str = "PAYCHECK";

/// File name of the engine config inside the data directory.
pub const CONFIG_FILE_NAME: &str = "paycheck.json";

/// File name of the translation overrides inside the data directory.
pub const TRANSLATIONS_FILE_NAME: &str = "translations.json";

/// Where the runtime keeps its files and how it logs.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Root directory for persisted config.
    pub data_dir: PathBuf,
    /// Log level filter string (e.g. "info", "paycheck_engine=debug").
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let data_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paycheck");

        Self {
            data_dir,
            log_level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Path to the engine config file.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    /// Path to the optional translation overrides.
    pub fn translations_path(&self) -> PathBuf {
        self.data_dir.join(TRANSLATIONS_FILE_NAME)
    }
}

/// Load and validate an engine config from `path`, applying environment overrides.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig, StoreError> {
    let load_err = |source| StoreError::Load {
        path: path.to_path_buf(),
        source,
    };

    let settings = ::config::Config::builder()
        .add_source(
            ::config::File::from(path)
                .format(::config::FileFormat::Json)
                .required(true),
        )
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(load_err)?;

    let cfg: EngineConfig = settings.try_deserialize().map_err(load_err)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the engine config at `path`, writing defaults there first if it is missing.
pub fn load_or_init_engine_config(path: &Path) -> Result<EngineConfig, StoreError> {
    if !path.exists() {
        info!("no config at {}, writing defaults", path.display());
        save_engine_config(path, &EngineConfig::default())?;
    }
    load_engine_config(path)
}

/// Persist `cfg` to `path` as pretty JSON.
pub fn save_engine_config(path: &Path, cfg: &EngineConfig) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(cfg)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
