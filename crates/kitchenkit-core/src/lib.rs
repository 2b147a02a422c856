//! # KitchenKit Core
//!
//! Core types and utilities shared by the KitchenKit crates.
//! Provides the error taxonomy, unit conversions between wall meters and
//! the centimeter grid, the read-only catalog model with quality tiers, and
//! the key-value storage abstraction used for per-wall persistence.

pub mod constants;
pub mod data;
pub mod error;
pub mod storage;
pub mod units;

pub use data::{
    catalog::{Catalog, CatalogEntry, Prices, SizeVariant},
    quality::QualityTier,
};

pub use error::{CatalogError, Error, LayoutError, Result, StorageError};

pub use storage::{JsonDirStore, KeyValueStore, MemoryStore};

pub use units::{meters_to_units, units_to_meters, WallBounds};
