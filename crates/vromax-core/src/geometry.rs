//! Screen geometry for the floating control.
//!
//! Coordinates are CSS pixels in viewport space, matching
//! `getBoundingClientRect()` and pointer `clientX`/`clientY`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn origin(&self) -> Point {
        Point {
            x: self.left,
            y: self.top,
        }
    }
}

/// Persisted placement of the floating control, in fixed-position
/// viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPosition {
    pub top: f64,
    pub left: f64,
}

impl ControlPosition {
    /// Whether a persisted position is still usable in the given viewport.
    ///
    /// The control's size is unknown before it renders, so this only demands
    /// that the anchor point sits inside the viewport with `margin` to
    /// spare; [`clamp_into_viewport`] tightens the placement once the real
    /// bounding box exists.
    #[must_use]
    pub fn fits(&self, viewport: Size, margin: f64) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.left + margin <= viewport.width
            && self.top + margin <= viewport.height
    }
}

/// Correction that moves `rect` fully inside `viewport`, keeping `margin`
/// from every edge. Returns `None` when the rect already fits.
#[must_use]
pub fn clamp_into_viewport(rect: Rect, viewport: Size, margin: f64) -> Option<ControlPosition> {
    let max_left = (viewport.width - rect.width - margin).max(margin);
    let max_top = (viewport.height - rect.height - margin).max(margin);
    let left = rect.left.clamp(margin, max_left);
    let top = rect.top.clamp(margin, max_top);
    if left == rect.left && top == rect.top {
        None
    } else {
        Some(ControlPosition { top, left })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 720.0,
    };

    fn control_at(left: f64, top: f64) -> Rect {
        Rect {
            left,
            top,
            width: 160.0,
            height: 40.0,
        }
    }

    #[test]
    fn rect_inside_the_viewport_needs_no_correction() {
        assert_eq!(clamp_into_viewport(control_at(100.0, 100.0), VIEWPORT, 12.0), None);
    }

    #[test]
    fn overflow_past_the_right_and_bottom_edges_is_clamped() {
        let corrected =
            clamp_into_viewport(control_at(1250.0, 710.0), VIEWPORT, 12.0).expect("correction");
        assert_eq!(corrected.left, 1280.0 - 160.0 - 12.0);
        assert_eq!(corrected.top, 720.0 - 40.0 - 12.0);
    }

    #[test]
    fn negative_coordinates_are_pulled_to_the_margin() {
        let corrected =
            clamp_into_viewport(control_at(-30.0, -5.0), VIEWPORT, 12.0).expect("correction");
        assert_eq!(corrected, ControlPosition { top: 12.0, left: 12.0 });
    }

    #[test]
    fn control_wider_than_the_viewport_pins_to_the_margin() {
        let rect = Rect {
            left: 0.0,
            top: 0.0,
            width: 2000.0,
            height: 40.0,
        };
        let corrected = clamp_into_viewport(rect, VIEWPORT, 12.0).expect("correction");
        assert_eq!(corrected.left, 12.0);
    }

    #[test]
    fn fits_rejects_positions_outside_the_viewport() {
        let pos = ControlPosition { top: 700.0, left: 1200.0 };
        assert!(pos.fits(VIEWPORT, 12.0));
        assert!(!ControlPosition { top: 715.0, left: 10.0 }.fits(VIEWPORT, 12.0));
        assert!(!ControlPosition { top: -1.0, left: 10.0 }.fits(VIEWPORT, 12.0));
        assert!(!ControlPosition { top: 10.0, left: 1275.0 }.fits(VIEWPORT, 12.0));
    }

    #[test]
    fn control_position_round_trips_through_json() {
        let pos = ControlPosition { top: 42.5, left: 617.0 };
        let json = serde_json::to_string(&pos).expect("serialize");
        let back: ControlPosition = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, pos);
    }

    #[test]
    fn malformed_position_json_is_rejected() {
        assert!(serde_json::from_str::<ControlPosition>("{\"top\":\"x\"}").is_err());
        assert!(serde_json::from_str::<ControlPosition>("garbage").is_err());
    }
}
