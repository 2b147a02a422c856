//! Unit conversion utilities
//!
//! Walls are dimensioned in meters; the layout engine works on an integer
//! grid where one unit is one centimeter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::UNITS_PER_METER;

/// Convert a length in meters to whole grid units (centimeters).
pub fn meters_to_units(meters: f64) -> i32 {
    (meters * UNITS_PER_METER).round() as i32
}

/// Convert grid units back to meters.
pub fn units_to_meters(units: i32) -> f64 {
    f64::from(units) / UNITS_PER_METER
}

/// Usable area of one wall on the unit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallBounds {
    pub width: i32,
    pub height: i32,
}

impl WallBounds {
    /// Creates bounds directly in grid units.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Creates bounds from a wall's physical size.
    pub fn from_meters(width_meters: f64, height_meters: f64) -> Self {
        Self {
            width: meters_to_units(width_meters),
            height: meters_to_units(height_meters),
        }
    }

    /// Area in square grid units.
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

impl fmt::Display for WallBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} cm", self.width, self.height)
    }
}

/// Format a grid length for display, e.g. `"120 cm"`.
pub fn format_units(units: i32) -> String {
    format!("{} cm", units)
}

/// Format a wall length in meters for display, e.g. `"3.50 m"`.
pub fn format_meters(meters: f64) -> String {
    format!("{:.2} m", meters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_units_rounds() {
        assert_eq!(meters_to_units(4.0), 400);
        assert_eq!(meters_to_units(3.5), 350);
        // 2.345 m is 234.5 cm before rounding
        assert_eq!(meters_to_units(2.346), 235);
        assert_eq!(meters_to_units(0.1 + 0.2), 30);
    }

    #[test]
    fn test_units_to_meters() {
        assert!((units_to_meters(350) - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wall_bounds_from_meters() {
        let bounds = WallBounds::from_meters(4.0, 3.0);
        assert_eq!(bounds, WallBounds::new(400, 300));
        assert_eq!(bounds.area(), 120_000);
        assert_eq!(bounds.to_string(), "400 x 300 cm");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_units(91), "91 cm");
        assert_eq!(format_meters(3.5), "3.50 m");
    }
}
