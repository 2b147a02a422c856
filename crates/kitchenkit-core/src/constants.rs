//! Shared constants for the wall layout engine.

/// Grid units per meter (1 unit = 1 cm).
pub const UNITS_PER_METER: f64 = 100.0;

/// Minimum width or height of a placed module, in grid units.
pub const MIN_MODULE_DIMENSION: i32 = 10;

/// Step of the grid and of the free-slot search, in grid units.
pub const GRID_STEP: i32 = 25;

/// Step between ruler labels, in grid units.
pub const LABEL_STEP: i32 = 50;

/// Left gutter reserved for the vertical ruler, in pixels. Not scaled by zoom.
pub const AXIS_MARGIN: f64 = 50.0;

/// Bottom gutter reserved for the horizontal ruler, in pixels. Not scaled by zoom.
pub const BOTTOM_MARGIN: f64 = 50.0;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Above this zoom the canvas scrolls; at or below it the view is pinned to the origin.
pub const SCROLL_ZOOM_THRESHOLD: f64 = 1.001;

/// Size used for a payload that carries neither sizes nor bare dimensions.
pub const DEFAULT_MODULE_WIDTH: i32 = 60;
pub const DEFAULT_MODULE_HEIGHT: i32 = 60;

/// Default length of a linear module (plinth, countertop edge) when the entry has none.
pub const DEFAULT_LINEAR_LENGTH: i32 = 80;

/// Heights offered for a linear module when the entry lists none.
pub const DEFAULT_LINEAR_HEIGHTS: [i32; 3] = [10, 12, 15];

/// Smallest wall width accepted from the dimension fields, in meters.
pub const MIN_WALL_WIDTH_METERS: f64 = 1.0;

/// Smallest wall height accepted from the dimension fields, in meters.
pub const MIN_WALL_HEIGHT_METERS: f64 = 2.0;

/// Fallback title for instances without one.
pub const DEFAULT_MODULE_TITLE: &str = "Module";
