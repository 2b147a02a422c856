//! Viewport and coordinate transformation for one wall canvas.
//!
//! Handles conversion between pointer coordinates (screen space, relative to
//! the canvas element) and the unit grid (wall space). Zoom scales only the
//! drawable layer; the left ruler gutter and the bottom label gutter keep a
//! fixed pixel size.

use std::fmt;

use kitchenkit_core::constants::{
    AXIS_MARGIN, BOTTOM_MARGIN, LABEL_STEP, MAX_ZOOM, MIN_ZOOM, SCROLL_ZOOM_THRESHOLD, ZOOM_STEP,
};
use kitchenkit_core::WallBounds;

use crate::canvas::LayoutOptions;
use crate::model::Rect;
use crate::placement::DropPoint;
use crate::sanitize::round_half_up;

/// A pointer position in pixels, relative to the canvas element's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One labelled ruler mark: the value in grid units and its pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerTick {
    pub value: i32,
    pub position: f64,
}

/// Zoom and margin state of a wall canvas.
#[derive(Debug, Clone)]
pub struct WallViewport {
    zoom: f64,
    bounds: WallBounds,
    axis_margin: f64,
    bottom_margin: f64,
    label_step: i32,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
}

impl WallViewport {
    /// Creates a viewport at 100% zoom with the default margins.
    pub fn new(bounds: WallBounds) -> Self {
        Self {
            zoom: 1.0,
            bounds,
            axis_margin: AXIS_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
            label_step: LABEL_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }

    /// Creates a viewport using configured margins and zoom limits.
    pub fn with_options(bounds: WallBounds, options: &LayoutOptions) -> Self {
        Self {
            zoom: 1.0,
            bounds,
            axis_margin: options.axis_margin,
            bottom_margin: options.bottom_margin,
            label_step: options.label_step,
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
            zoom_step: options.zoom_step,
        }
    }

    pub fn bounds(&self) -> WallBounds {
        self.bounds
    }

    /// Updates the wall size (typically after a dimension edit).
    pub fn set_bounds(&mut self, bounds: WallBounds) {
        self.bounds = bounds;
    }

    pub fn axis_margin(&self) -> f64 {
        self.axis_margin
    }

    pub fn bottom_margin(&self) -> f64 {
        self.bottom_margin
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom, rounded to two decimals and clamped to the limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let rounded = (zoom * 100.0).round() / 100.0;
        self.zoom = rounded.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.zoom_step);
    }

    /// Resets zoom to 1.0 (100%).
    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// True when the zoomed wall needs scrolling; at or below 100% the view
    /// stays pinned to the origin.
    pub fn is_scrollable(&self) -> bool {
        self.zoom > SCROLL_ZOOM_THRESHOLD
    }

    /// Converts a pointer position to a drop point on the unit grid.
    ///
    /// ```text
    /// x     = round((pointer_x - axis_margin) / zoom)
    /// top_y = round(pointer_y / zoom)            // from the top edge
    /// ```
    pub fn pointer_to_drop(&self, point: ScreenPoint) -> DropPoint {
        DropPoint {
            x: round_half_up((point.x - self.axis_margin) / self.zoom),
            top_y: round_half_up(point.y / self.zoom),
        }
    }

    /// Stored y (from the floor) of a module of `height` whose top edge sits
    /// `top_y` units below the wall's top.
    pub fn stored_y(&self, top_y: i32, height: i32) -> i32 {
        self.bounds.height.saturating_sub(top_y).saturating_sub(height)
    }

    /// Pixel position of a rectangle's top-left corner.
    ///
    /// ```text
    /// left = axis_margin + x * zoom
    /// top  = (wall_height - y - height) * zoom
    /// ```
    pub fn unit_to_screen(&self, rect: &Rect) -> ScreenPoint {
        ScreenPoint {
            x: self.axis_margin + f64::from(rect.x) * self.zoom,
            y: f64::from(self.bounds.height.saturating_sub(rect.y).saturating_sub(rect.height))
                * self.zoom,
        }
    }

    /// Converts a pointer delta in pixels into a unit-grid delta, flipping y.
    pub fn delta_to_units(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.zoom, -dy / self.zoom)
    }

    /// Total pixel size of the canvas including both gutters.
    pub fn canvas_size(&self) -> (f64, f64) {
        (
            self.axis_margin + f64::from(self.bounds.width) * self.zoom,
            f64::from(self.bounds.height) * self.zoom + self.bottom_margin,
        )
    }

    /// Labels of the horizontal ruler, left to right.
    pub fn x_ruler(&self) -> Vec<RulerTick> {
        label_values(self.bounds.width, self.label_step)
            .map(|value| RulerTick {
                value,
                position: self.axis_margin + f64::from(value) * self.zoom,
            })
            .collect()
    }

    /// Labels of the vertical ruler, measured from the floor.
    pub fn y_ruler(&self) -> Vec<RulerTick> {
        label_values(self.bounds.height, self.label_step)
            .map(|value| RulerTick {
                value,
                position: f64::from(self.bounds.height - value) * self.zoom,
            })
            .collect()
    }
}

fn label_values(max: i32, step: i32) -> impl Iterator<Item = i32> {
    let step = step.max(1) as usize;
    (0..=max.max(0)).step_by(step)
}

impl Default for WallViewport {
    fn default() -> Self {
        Self::new(WallBounds::new(0, 0))
    }
}

impl fmt::Display for WallViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Viewport(zoom: {:.0}%, wall: {})", self.zoom * 100.0, self.bounds)
    }
}
