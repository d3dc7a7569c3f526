//! Error types for paycheck configuration.
use thiserror::Error;

/// Reasons a configuration is rejected at load or edit time.
///
/// The engine itself never fails: every denial is a business outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("zone sets both a point and a node ({node:?}); pick one")] AmbiguousZoneCenter { node: String },
    #[error("zone sets neither a point nor a node")] MissingZoneCenter,
    #[error("interval must be a positive number of seconds, got {0}")] InvalidInterval(f32),
    #[error("zone radius must be finite and non-negative, got {0}")] InvalidRadius(f32),
    #[error("{field} must be finite, got {value}")] NonFinite { field: &'static str, value: f32 },
    #[error("duplicate paycheck name: {0}")] DuplicatePaycheck(String),
    #[error("paycheck name must not be empty")] EmptyPaycheckName,
    #[error("duplicate xp cap threshold: {0}")] DuplicateCapThreshold(u32),
}
