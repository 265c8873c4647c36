//! Drag-vs-click classification for the floating control.
//!
//! The control is both a button and a draggable widget, on the same pointer.
//! The controller arms on pointer-down, begins a drag on the first move, and
//! applies pointer deltas to the control's fixed-position coordinates. A
//! gesture that moved suppresses the click event the browser fires after
//! pointer-up; the flag resets at the next pointer-down.
//!
//! The document-level move/up listeners in `vromax-web` stay installed for
//! the lifetime of the control and are gated by this state machine, so a
//! move without a preceding down is ignored rather than mis-dispatched.

use crate::geometry::{ControlPosition, Point};

/// Pointer button that starts a drag (`0` = primary).
pub const ACTIVATION_BUTTON: i16 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    /// Down received; no movement yet.
    Armed { pointer: Point, origin: Point },
    /// At least one move applied.
    Dragging {
        pointer: Point,
        position: ControlPosition,
    },
}

/// One applied movement frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// First frame of the gesture; the adapter switches the control from
    /// bottom/right anchoring to fixed top/left at this point.
    pub began: bool,
    /// Where the control's top-left corner belongs now.
    pub position: ControlPosition,
}

/// Outcome of pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    /// A gesture (armed or dragging) was actually in progress.
    pub was_active: bool,
    /// Final position to persist; `None` when the pointer never moved.
    pub position: Option<ControlPosition>,
}

#[derive(Debug, Clone)]
pub struct DragController {
    phase: Phase,
    dragged: bool,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            dragged: false,
        }
    }

    /// Pointer-down on the control. `origin` is the control's current
    /// on-screen top-left corner. Returns whether the gesture armed; a
    /// non-primary button or a nested down is ignored.
    pub fn pointer_down(&mut self, button: i16, pointer: Point, origin: Point) -> bool {
        if button != ACTIVATION_BUTTON || self.phase != Phase::Idle {
            return false;
        }
        self.dragged = false;
        self.phase = Phase::Armed { pointer, origin };
        true
    }

    /// Pointer movement anywhere in the document. Returns the frame to
    /// apply, or `None` while no gesture is active.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<DragFrame> {
        match self.phase {
            Phase::Idle => None,
            Phase::Armed {
                pointer: start,
                origin,
            } => {
                self.dragged = true;
                let position = ControlPosition {
                    top: origin.y + (pointer.y - start.y),
                    left: origin.x + (pointer.x - start.x),
                };
                self.phase = Phase::Dragging { pointer, position };
                Some(DragFrame {
                    began: true,
                    position,
                })
            }
            Phase::Dragging {
                pointer: last,
                position,
            } => {
                let position = ControlPosition {
                    top: position.top + (pointer.y - last.y),
                    left: position.left + (pointer.x - last.x),
                };
                self.phase = Phase::Dragging { pointer, position };
                Some(DragFrame {
                    began: false,
                    position,
                })
            }
        }
    }

    /// Pointer-up anywhere in the document.
    pub fn pointer_up(&mut self) -> DragEnd {
        let end = match self.phase {
            Phase::Idle => DragEnd {
                was_active: false,
                position: None,
            },
            Phase::Armed { .. } => DragEnd {
                was_active: true,
                position: None,
            },
            Phase::Dragging { position, .. } => DragEnd {
                was_active: true,
                position: Some(position),
            },
        };
        self.phase = Phase::Idle;
        end
    }

    /// Whether the click that follows pointer-up may toggle the layout.
    /// Stays `false` until the next pointer-down once a drag happened.
    #[must_use]
    pub fn click_allowed(&self) -> bool {
        !self.dragged
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn point(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    const ORIGIN: Point = Point { x: 1200.0, y: 680.0 };

    #[test]
    fn down_up_without_movement_allows_the_click() {
        let mut drag = DragController::new();
        assert!(drag.pointer_down(0, point(10.0, 10.0), ORIGIN));
        let end = drag.pointer_up();
        assert_eq!(end.was_active, true);
        assert_eq!(end.position, None);
        assert!(drag.click_allowed());
    }

    #[test]
    fn movement_suppresses_the_click_until_the_next_down() {
        let mut drag = DragController::new();
        drag.pointer_down(0, point(10.0, 10.0), ORIGIN);
        drag.pointer_move(point(14.0, 12.0));
        drag.pointer_up();
        assert!(!drag.click_allowed());

        drag.pointer_down(0, point(50.0, 50.0), ORIGIN);
        assert!(drag.click_allowed());
    }

    #[test]
    fn first_move_begins_at_origin_plus_delta() {
        let mut drag = DragController::new();
        drag.pointer_down(0, point(100.0, 200.0), ORIGIN);
        let frame = drag.pointer_move(point(107.0, 195.0)).expect("frame");
        assert!(frame.began);
        assert_eq!(
            frame.position,
            ControlPosition {
                top: ORIGIN.y - 5.0,
                left: ORIGIN.x + 7.0
            }
        );
    }

    #[test]
    fn later_moves_accumulate_deltas() {
        let mut drag = DragController::new();
        drag.pointer_down(0, point(0.0, 0.0), point(100.0, 100.0));
        drag.pointer_move(point(10.0, 0.0));
        let frame = drag.pointer_move(point(10.0, -20.0)).expect("frame");
        assert!(!frame.began);
        assert_eq!(frame.position, ControlPosition { top: 80.0, left: 110.0 });
    }

    #[test]
    fn up_after_a_drag_yields_the_final_position() {
        let mut drag = DragController::new();
        drag.pointer_down(0, point(0.0, 0.0), point(100.0, 100.0));
        drag.pointer_move(point(25.0, 5.0));
        let end = drag.pointer_up();
        assert_eq!(end.position, Some(ControlPosition { top: 105.0, left: 125.0 }));
    }

    #[test]
    fn non_primary_button_is_ignored() {
        let mut drag = DragController::new();
        assert!(!drag.pointer_down(2, point(0.0, 0.0), ORIGIN));
        assert_eq!(drag.pointer_move(point(5.0, 5.0)), None);
        assert_eq!(drag.pointer_up().was_active, false);
    }

    #[test]
    fn move_without_a_down_is_ignored() {
        let mut drag = DragController::new();
        assert_eq!(drag.pointer_move(point(5.0, 5.0)), None);
        assert!(drag.click_allowed());
    }

    #[test]
    fn nested_down_does_not_restart_the_gesture() {
        let mut drag = DragController::new();
        drag.pointer_down(0, point(0.0, 0.0), point(100.0, 100.0));
        drag.pointer_move(point(3.0, 3.0));
        assert!(!drag.pointer_down(0, point(50.0, 50.0), point(0.0, 0.0)));
        // The original gesture is still live and still classified as a drag.
        assert!(!drag.click_allowed());
    }
}
