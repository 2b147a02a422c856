//! Walls and the kitchen shapes that preset them.

use kitchenkit_core::constants::{MIN_WALL_HEIGHT_METERS, MIN_WALL_WIDTH_METERS};
use kitchenkit_core::{LayoutError, WallBounds};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One independent placement surface, dimensioned in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: String,
    pub name: String,
    #[serde(alias = "width")]
    pub width_meters: f64,
    #[serde(alias = "height")]
    pub height_meters: f64,
}

impl Wall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        width_meters: f64,
        height_meters: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width_meters,
            height_meters,
        }
    }

    /// Size of the wall on the unit grid.
    pub fn bounds(&self) -> WallBounds {
        WallBounds::from_meters(self.width_meters, self.height_meters)
    }

    /// Applies a dimension edit, clamped to at least 1 m wide and 2 m high.
    /// Non-finite values leave that side unchanged.
    pub fn set_dimensions(&mut self, width_meters: f64, height_meters: f64) {
        if width_meters.is_finite() {
            self.width_meters = width_meters.max(MIN_WALL_WIDTH_METERS);
        }
        if height_meters.is_finite() {
            self.height_meters = height_meters.max(MIN_WALL_HEIGHT_METERS);
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {:.2} x {:.2} m",
            self.name, self.id, self.width_meters, self.height_meters
        )
    }
}

/// Floor plan of the kitchen, which fixes the set of walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KitchenType {
    /// Single straight run
    #[default]
    Recta,
    /// Two walls meeting at a corner
    L,
    /// Three walls, U-shaped
    C,
}

impl KitchenType {
    pub fn all() -> &'static [KitchenType] {
        &[KitchenType::Recta, KitchenType::L, KitchenType::C]
    }

    /// Default walls for this kitchen shape, in display order.
    pub fn preset_walls(&self) -> Vec<Wall> {
        match self {
            Self::Recta => vec![Wall::new("front", "Front wall", 4.0, 3.0)],
            Self::L => vec![
                Wall::new("left", "Left wall", 4.0, 3.0),
                Wall::new("right", "Right wall", 4.0, 3.0),
            ],
            Self::C => vec![
                Wall::new("left", "Left wall", 3.5, 3.0),
                Wall::new("front", "Front wall", 4.0, 3.0),
                Wall::new("right", "Right wall", 3.5, 3.0),
            ],
        }
    }
}

impl fmt::Display for KitchenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recta => write!(f, "Recta"),
            Self::L => write!(f, "L"),
            Self::C => write!(f, "C"),
        }
    }
}

impl FromStr for KitchenType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recta" | "straight" => Ok(Self::Recta),
            "l" => Ok(Self::L),
            "c" | "u" => Ok(Self::C),
            _ => Err(LayoutError::UnknownKitchenType {
                name: s.to_string(),
            }),
        }
    }
}
