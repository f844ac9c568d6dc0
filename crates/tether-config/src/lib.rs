//! Tether Config — data directory setup and `config.toml` loading.

pub mod config;
pub mod dirs;

pub use config::{AgentConfig, ConfigError};
