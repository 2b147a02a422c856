//! Placed module instances and the unit-grid rectangles they occupy.
//!
//! All coordinates are grid units (1 unit = 1 cm) with the origin at the
//! bottom-left of the wall: `y` grows upward from the floor.

use kitchenkit_core::data::lenient;
use kitchenkit_core::WallBounds;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a placed module instance.
pub type InstanceId = Uuid;

/// Axis-aligned rectangle on the unit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge (exclusive), measured from the floor.
    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// True if the rectangle lies entirely inside the wall.
    pub fn is_within(&self, bounds: WallBounds) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= bounds.width && self.top() <= bounds.height
    }
}

/// A rectangle as proposed by a pointer, a payload or a numeric field,
/// before sanitizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ProposedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<Rect> for ProposedRect {
    fn from(r: Rect) -> Self {
        Self::new(
            f64::from(r.x),
            f64::from(r.y),
            f64::from(r.width),
            f64::from(r.height),
        )
    }
}

/// A placed occurrence of a catalog type on one wall.
///
/// Width and height are fixed when the instance is created; only the
/// position changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInstance {
    pub id: InstanceId,
    #[serde(rename = "type")]
    pub module_type: String,
    pub title: String,
    #[serde(deserialize_with = "lenient::units")]
    pub x: i32,
    #[serde(deserialize_with = "lenient::units")]
    pub y: i32,
    #[serde(deserialize_with = "lenient::units")]
    pub width: i32,
    #[serde(deserialize_with = "lenient::units")]
    pub height: i32,
    /// Price adjustment of the size variant chosen at placement.
    #[serde(
        default,
        alias = "adjPct",
        deserialize_with = "lenient::percent_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_delta_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ModuleInstance {
    /// Creates an instance with a fresh id.
    pub fn new(module_type: impl Into<String>, title: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            module_type: module_type.into(),
            title: title.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            price_delta_pct: None,
            src: None,
            color: None,
        }
    }

    pub fn with_delta_pct(mut self, delta_pct: f64) -> Self {
        self.price_delta_pct = Some(delta_pct);
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Copies the geometry of `rect` onto the instance.
    pub(crate) fn apply_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

/// Requested change to an existing instance.
///
/// `width` and `height` are accepted so that callers can forward raw edits,
/// but the store ignores them: size is decided at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstancePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<String>,
}

impl InstancePatch {
    /// Patch that moves the instance to `(x, y)`.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn touches_size(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}
