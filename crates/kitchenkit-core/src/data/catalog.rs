//! Module catalog
//!
//! This module provides:
//! - Catalog entries (module types with bare size, size variants and prices)
//! - Size variants carrying their price delta percentage
//! - A read-only, type-indexed catalog snapshot
//!
//! The catalog is produced upstream (built-in defaults merged with admin
//! overrides) and handed to the layout and pricing code as a snapshot; nothing
//! in the engine mutates it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::lenient;
use super::quality::QualityTier;
use crate::constants::DEFAULT_MODULE_TITLE;
use crate::error::{CatalogError, Error, Result};

/// One selectable size of a module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeVariant {
    #[serde(deserialize_with = "lenient::units")]
    pub width: i32,
    #[serde(deserialize_with = "lenient::units")]
    pub height: i32,
    #[serde(default)]
    pub is_standard: bool,
    #[serde(
        default,
        deserialize_with = "lenient::percent_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub delta_pct: Option<f64>,
}

impl SizeVariant {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            is_standard: false,
            delta_pct: None,
        }
    }

    pub fn with_delta_pct(mut self, delta_pct: f64) -> Self {
        self.delta_pct = Some(delta_pct);
        self
    }

    pub fn standard(mut self) -> Self {
        self.is_standard = true;
        self
    }

    /// Price adjustment of this size; 0 when the catalog gives none.
    pub fn delta_pct_or_zero(&self) -> f64 {
        self.delta_pct.unwrap_or(0.0)
    }

    pub fn matches(&self, width: i32, height: i32) -> bool {
        self.width == width && self.height == height
    }
}

/// Base prices per quality tier. Any column may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub started: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub premium: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub deluxe: Option<Decimal>,
}

impl Prices {
    /// Base price for the given tier, if configured.
    pub fn get(&self, tier: QualityTier) -> Option<Decimal> {
        match tier {
            QualityTier::Started => self.started,
            QualityTier::Premium => self.premium,
            QualityTier::Deluxe => self.deluxe,
        }
    }

    pub fn set(&mut self, tier: QualityTier, price: Option<Decimal>) {
        match tier {
            QualityTier::Started => self.started = price,
            QualityTier::Premium => self.premium = price,
            QualityTier::Deluxe => self.deluxe = price,
        }
    }
}

fn default_visible() -> bool {
    true
}

/// Metadata of one module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    /// Bare width, used when the entry has no size variants.
    #[serde(
        default,
        deserialize_with = "lenient::units_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<i32>,
    #[serde(
        default,
        deserialize_with = "lenient::units_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    pub sizes: Vec<SizeVariant>,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub is_linear: bool,
    #[serde(default, deserialize_with = "lenient::units_vec")]
    pub allowed_heights: Vec<i32>,
    #[serde(
        default,
        deserialize_with = "lenient::units_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_linear_width: Option<i32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl CatalogEntry {
    /// Creates an entry with a bare size and no prices.
    pub fn new(module_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            module_type: module_type.into(),
            title: title.into(),
            name: None,
            subtitle: None,
            section: None,
            section_label: None,
            width: None,
            height: None,
            src: None,
            sizes: Vec::new(),
            prices: Prices::default(),
            is_linear: false,
            allowed_heights: Vec::new(),
            default_linear_width: None,
            visible: true,
        }
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_variant(mut self, variant: SizeVariant) -> Self {
        self.sizes.push(variant);
        self
    }

    pub fn with_price(mut self, tier: QualityTier, price: Decimal) -> Self {
        self.prices.set(tier, Some(price));
        self
    }

    pub fn linear(mut self, allowed_heights: Vec<i32>) -> Self {
        self.is_linear = true;
        self.allowed_heights = allowed_heights;
        self
    }

    /// Title used in summaries: `title`, then `name`, then the type.
    pub fn display_title(&self) -> &str {
        if !self.title.trim().is_empty() {
            return self.title.trim();
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim();
        }
        if !self.module_type.is_empty() {
            return &self.module_type;
        }
        DEFAULT_MODULE_TITLE
    }

    /// Size variant with exactly these dimensions.
    pub fn find_size(&self, width: i32, height: i32) -> Option<&SizeVariant> {
        self.sizes.iter().find(|s| s.matches(width, height))
    }

    /// Base price for the tier, if configured.
    pub fn price(&self, tier: QualityTier) -> Option<Decimal> {
        self.prices.get(tier)
    }
}

/// Read-only snapshot of the catalog, indexed by module type.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_type: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot. Hidden entries are dropped; a repeated type is an error.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> std::result::Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in entries.into_iter().filter(|e| e.visible) {
            if catalog.by_type.contains_key(&entry.module_type) {
                return Err(CatalogError::DuplicateType {
                    module_type: entry.module_type,
                });
            }
            catalog
                .by_type
                .insert(entry.module_type.clone(), catalog.entries.len());
            catalog.entries.push(entry);
        }
        Ok(catalog)
    }

    /// Parses a catalog feed: a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| CatalogError::InvalidFeed {
                reason: e.to_string(),
            })?;
        let catalog = Self::from_entries(entries)?;
        tracing::debug!("Loaded catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Loads a catalog feed from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::other(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn get(&self, module_type: &str) -> Option<&CatalogEntry> {
        self.by_type.get(module_type).map(|&i| &self.entries[i])
    }

    /// Like [`Catalog::get`] but reports a missing type as an error.
    pub fn require(&self, module_type: &str) -> std::result::Result<&CatalogEntry, CatalogError> {
        self.get(module_type)
            .ok_or_else(|| CatalogError::UnknownType {
                module_type: module_type.to_string(),
            })
    }

    /// Entries in feed order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
