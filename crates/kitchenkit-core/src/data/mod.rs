//! Data models shared across the workspace
//!
//! This module provides:
//! - The module catalog (types, size variants, per-tier prices)
//! - Quality tiers selecting the price column
//! - Lenient numeric deserializers for externally produced JSON

pub mod catalog;
pub mod lenient;
pub mod quality;
