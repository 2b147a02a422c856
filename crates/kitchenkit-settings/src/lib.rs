//! KitchenKit Settings Crate
//!
//! Handles the planner configuration file: canvas tunables, the default
//! quality tier and where layouts are stored.

pub mod config;
pub mod error;

pub use config::{Config, LayoutSettings, PricingSettings, StorageSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
