//! # paycheck-core
//! Foundation types and host traits for periodic experience paychecks.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use error::ConfigError;
pub use traits::{GameHost, NodeRegistry, NoticeColor, Player};
pub use types::{
    EngineConfig, LocationNode, PaycheckTier, PlayerId, StaticNodeRegistry, Vec3, XpCapTier, Zone,
    ZoneCenter,
};
