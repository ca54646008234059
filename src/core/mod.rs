//! Core module
//!
//! Configuration and frame timing

mod config;
mod time;

pub use config::{ConfigError, PursuitConfig, RankingConfig, SightConfig, ToolkitConfig};
pub use time::Time;
