//! Clamping of proposed rectangles into a wall.

use kitchenkit_core::constants::MIN_MODULE_DIMENSION;
use kitchenkit_core::WallBounds;

use crate::model::{ProposedRect, Rect};

/// Rounds half-up to the nearest integer; non-finite input reads as 0.
pub(crate) fn round_half_up(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i32
}

/// Clamps `rect` into `bounds` and enforces the minimum module dimension.
///
/// Total: every input produces a rectangle. When the rectangle is larger than
/// the wall the origin is pinned to 0 and the rectangle overhangs.
pub fn sanitize(rect: ProposedRect, bounds: WallBounds) -> Rect {
    let width = round_half_up(rect.width).max(MIN_MODULE_DIMENSION);
    let height = round_half_up(rect.height).max(MIN_MODULE_DIMENSION);
    let x = round_half_up(rect.x).min(bounds.width - width).max(0);
    let y = round_half_up(rect.y).min(bounds.height - height).max(0);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> WallBounds {
        WallBounds::new(400, 300)
    }

    #[test]
    fn test_inside_is_unchanged() {
        let r = sanitize(ProposedRect::new(50.0, 50.0, 120.0, 90.0), wall());
        assert_eq!(r, Rect::new(50, 50, 120, 90));
    }

    #[test]
    fn test_rounds_half_up() {
        let r = sanitize(ProposedRect::new(10.5, 9.49, 59.5, 60.4), wall());
        assert_eq!(r, Rect::new(11, 9, 60, 60));
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
    }

    #[test]
    fn test_min_dimension() {
        let r = sanitize(ProposedRect::new(0.0, 0.0, 3.0, -20.0), wall());
        assert_eq!(r.width, 10);
        assert_eq!(r.height, 10);
    }

    #[test]
    fn test_clamps_to_edges() {
        let r = sanitize(ProposedRect::new(390.0, -40.0, 60.0, 60.0), wall());
        assert_eq!(r, Rect::new(340, 0, 60, 60));
        let r = sanitize(ProposedRect::new(-5.0, 299.0, 60.0, 60.0), wall());
        assert_eq!(r, Rect::new(0, 240, 60, 60));
    }

    #[test]
    fn test_oversized_pins_to_origin() {
        let r = sanitize(ProposedRect::new(100.0, 100.0, 500.0, 400.0), wall());
        assert_eq!(r, Rect::new(0, 0, 500, 400));
    }

    #[test]
    fn test_nan_input() {
        let r = sanitize(ProposedRect::new(f64::NAN, 20.0, f64::NAN, 30.0), wall());
        assert_eq!(r, Rect::new(0, 20, 10, 30));
    }
}
