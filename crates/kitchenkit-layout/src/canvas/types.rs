//! Canvas type definitions: LayoutOptions, EditField.

use std::fmt;
use std::str::FromStr;

use kitchenkit_core::constants::{
    AXIS_MARGIN, BOTTOM_MARGIN, GRID_STEP, LABEL_STEP, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};

/// Tunables of a wall canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Grid and free-slot search step, in units.
    pub grid_step: i32,
    /// Ruler label step, in units.
    pub label_step: i32,
    pub axis_margin: f64,
    pub bottom_margin: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            grid_step: GRID_STEP,
            label_step: LABEL_STEP,
            axis_margin: AXIS_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Field of the selected-module editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    X,
    Y,
    Color,
    /// Read-only: size is fixed at creation.
    Width,
    /// Read-only: size is fixed at creation.
    Height,
}

impl EditField {
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Width | Self::Height)
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Color => "color",
            Self::Width => "width",
            Self::Height => "height",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "color" => Ok(Self::Color),
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}
