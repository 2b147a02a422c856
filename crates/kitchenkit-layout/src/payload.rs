//! Drag payloads: the catalog data carried by a palette drag or click.

use kitchenkit_core::constants::{
    DEFAULT_LINEAR_HEIGHTS, DEFAULT_LINEAR_LENGTH, DEFAULT_MODULE_HEIGHT, DEFAULT_MODULE_TITLE,
    DEFAULT_MODULE_WIDTH, MIN_MODULE_DIMENSION,
};
use kitchenkit_core::data::lenient;
use kitchenkit_core::{CatalogEntry, SizeVariant};
use serde::{Deserialize, Serialize};

/// Section code of plinths and countertop edges.
const LINEAR_SECTION: &str = "ZO";

/// Type or title fragments that mark a linear module.
const LINEAR_KEYWORDS: [&str; 3] = ["banquina", "zocalo", "zócalo"];

/// Module data attached to a palette drag or click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    pub sizes: Vec<SizeVariant>,
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
    #[serde(default)]
    pub is_linear: bool,
    #[serde(default, deserialize_with = "lenient::units_vec")]
    pub allowed_heights: Vec<i32>,
    #[serde(default, deserialize_with = "lenient::units_vec")]
    pub heights: Vec<i32>,
    #[serde(
        default,
        deserialize_with = "lenient::units_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_linear_width: Option<i32>,
}

/// How the size of a new instance is decided.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeResolution {
    /// Size known without asking: bare size or the only variant.
    Direct {
        width: i32,
        height: i32,
        delta_pct: f64,
    },
    /// Several variants; the user picks one.
    Choose(Vec<SizeVariant>),
    /// Free length with a fixed set of heights.
    Linear { length: i32, heights: Vec<i32> },
}

impl DragPayload {
    pub fn new(module_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            module_type: module_type.into(),
            title: Some(title.into()),
            name: None,
            section: None,
            src: None,
            color: None,
            sizes: Vec::new(),
            width: None,
            height: None,
            is_linear: false,
            allowed_heights: Vec::new(),
            heights: Vec::new(),
            default_linear_width: None,
        }
    }

    /// Sets the bare size used when the payload has no variants.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_variant(mut self, variant: SizeVariant) -> Self {
        self.sizes.push(variant);
        self
    }

    pub fn linear(mut self, allowed_heights: Vec<i32>) -> Self {
        self.is_linear = true;
        self.allowed_heights = allowed_heights;
        self
    }

    /// Parses a raw drag payload. Malformed input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(payload) if !payload.module_type.trim().is_empty() => Some(payload),
            Ok(_) => {
                tracing::debug!("Ignoring drag payload without a module type");
                None
            }
            Err(e) => {
                tracing::debug!("Ignoring malformed drag payload: {}", e);
                None
            }
        }
    }

    /// Linear modules (plinths, countertop edges) take a free length.
    pub fn is_linear(&self) -> bool {
        if self.is_linear || self.section.as_deref() == Some(LINEAR_SECTION) {
            return true;
        }
        let source = if self.module_type.is_empty() {
            self.title.as_deref().unwrap_or_default()
        } else {
            self.module_type.as_str()
        };
        let text = source.to_lowercase();
        LINEAR_KEYWORDS.iter().any(|k| text.contains(k))
    }

    /// Heights offered for a linear module.
    ///
    /// Falls back from `allowedHeights` to `heights`, then to the distinct
    /// heights of the size variants, then to 10/12/15.
    pub fn linear_heights(&self) -> Vec<i32> {
        if !self.allowed_heights.is_empty() {
            return self.allowed_heights.clone();
        }
        if !self.heights.is_empty() {
            return self.heights.clone();
        }
        let mut distinct = Vec::new();
        for h in self.sizes.iter().map(|s| s.height).filter(|&h| h != 0) {
            if !distinct.contains(&h) {
                distinct.push(h);
            }
        }
        if distinct.is_empty() {
            DEFAULT_LINEAR_HEIGHTS.to_vec()
        } else {
            distinct
        }
    }

    /// Initial length of a linear module.
    pub fn default_linear_length(&self) -> i32 {
        self.default_linear_width
            .or(self.width)
            .unwrap_or(DEFAULT_LINEAR_LENGTH)
            .max(MIN_MODULE_DIMENSION)
    }

    /// Initial height of a linear module: the first offered height.
    pub fn default_linear_height(&self) -> i32 {
        self.linear_heights()
            .first()
            .copied()
            .unwrap_or(MIN_MODULE_DIMENSION)
            .max(MIN_MODULE_DIMENSION)
    }

    /// Size used when the payload lists no variants.
    pub fn bare_size(&self) -> (i32, i32) {
        (
            self.width
                .unwrap_or(DEFAULT_MODULE_WIDTH)
                .max(MIN_MODULE_DIMENSION),
            self.height
                .unwrap_or(DEFAULT_MODULE_HEIGHT)
                .max(MIN_MODULE_DIMENSION),
        )
    }

    /// Size a click-to-place searches a slot for before any prompt opens.
    pub fn initial_size(&self) -> (i32, i32) {
        match self.size_resolution() {
            SizeResolution::Direct { width, height, .. } => (width, height),
            SizeResolution::Choose(sizes) => {
                let (w, h) = self.bare_size();
                sizes
                    .first()
                    .map(|s| (nonzero_or(s.width, w), nonzero_or(s.height, h)))
                    .unwrap_or((w, h))
            }
            SizeResolution::Linear { .. } => {
                (self.default_linear_length(), self.default_linear_height())
            }
        }
    }

    /// Title given to instances: `title`, then `name`, then the type.
    pub fn resolved_title(&self) -> String {
        [self.title.as_deref(), self.name.as_deref(), Some(self.module_type.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|t| !t.is_empty())
            .unwrap_or(DEFAULT_MODULE_TITLE)
            .to_string()
    }

    /// Decides whether the size is known or must be asked for.
    pub fn size_resolution(&self) -> SizeResolution {
        if self.is_linear() {
            return SizeResolution::Linear {
                length: self.default_linear_length(),
                heights: self.linear_heights(),
            };
        }
        match self.sizes.as_slice() {
            [] => {
                let (width, height) = self.bare_size();
                SizeResolution::Direct {
                    width,
                    height,
                    delta_pct: 0.0,
                }
            }
            [only] => SizeResolution::Direct {
                width: only.width,
                height: only.height,
                delta_pct: only.delta_pct_or_zero(),
            },
            many => SizeResolution::Choose(many.to_vec()),
        }
    }

    /// Price delta of the variant with exactly this size, 0 if none matches.
    pub fn delta_pct_for(&self, width: i32, height: i32) -> f64 {
        self.sizes
            .iter()
            .find(|s| s.matches(width, height))
            .map(SizeVariant::delta_pct_or_zero)
            .unwrap_or(0.0)
    }
}

fn nonzero_or(value: i32, fallback: i32) -> i32 {
    let value = if value == 0 { fallback } else { value };
    value.max(MIN_MODULE_DIMENSION)
}

impl From<&CatalogEntry> for DragPayload {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            module_type: entry.module_type.clone(),
            title: Some(entry.title.clone()).filter(|t| !t.trim().is_empty()),
            name: entry.name.clone(),
            section: entry.section.clone(),
            src: entry.src.clone(),
            color: None,
            sizes: entry.sizes.clone(),
            width: entry.width,
            height: entry.height,
            is_linear: entry.is_linear,
            allowed_heights: entry.allowed_heights.clone(),
            heights: Vec::new(),
            default_linear_width: entry.default_linear_width,
        }
    }
}
