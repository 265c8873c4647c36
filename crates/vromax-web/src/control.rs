//! The floating toggle control.
//!
//! One singleton button lives in a fixed bottom/right anchor container so
//! host overlays cannot swallow it. The button doubles as a drag handle: the
//! pure `DragController` classifies the pointer gesture, this module applies
//! its frames to the DOM and persists the end position. Document-level
//! move/up listeners are installed once per control and gated by the
//! controller state rather than attached per gesture.
//!
//! Dropping a [`Control`] removes the button and every listener it
//! registered; the anchor container stays for the next installation.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use vromax_core::{ControlPosition, DragController, Point, Settings, geometry};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement, PointerEvent};

use crate::{dom, storage};

/// Button element id; also the singleton guard.
pub const CONTROL_ID: &str = "vromax-toggle";
/// Fixed-position container the button is parked in.
pub const ANCHOR_ID: &str = "vromax-anchor";
/// Injected style element id.
pub const STYLE_ID: &str = "vromax-style";
/// Class applied to panels so width changes animate.
pub const TRANSITION_CLASS: &str = "vromax-transition";

const TRANSITION_RULE: &str =
    ".vromax-transition { transition: all 0.3s ease-in-out !important; }";

const MAXIMIZE_MARKUP: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M15 3h6v6M9 21H3v-6M21 3l-7 7M3 21l7-7"/></svg><span>Maximize Editor</span>"#;
const RESTORE_MARKUP: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M4 14h6v6M20 10h-6V4M14 10l7-7M10 14l-7 7"/></svg><span>Restore Editor</span>"#;

/// Swap the button between its two affordances.
pub fn render_label(button: &HtmlElement, expanded: bool) {
    button.set_inner_html(if expanded {
        RESTORE_MARKUP
    } else {
        MAXIMIZE_MARKUP
    });
}

/// An event listener bound for the lifetime of the control.
struct EventBinding {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventBinding {
    fn new(
        target: &EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

pub struct Control {
    button: HtmlElement,
    drag: Rc<RefCell<DragController>>,
    bindings: Vec<EventBinding>,
}

impl Control {
    /// Build the singleton control, restore its persisted position, and wire
    /// the drag protocol. Replaces any previously installed button.
    pub fn install(settings: &Settings) -> Result<Self, JsValue> {
        let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(existing) = document.get_element_by_id(CONTROL_ID) {
            existing.remove();
        }

        let anchor = match document.get_element_by_id(ANCHOR_ID) {
            Some(anchor) => anchor,
            None => {
                let anchor = document.create_element("div")?;
                anchor.set_id(ANCHOR_ID);
                dom::set_style(&anchor, "position", "fixed");
                dom::set_style(&anchor, "bottom", "0");
                dom::set_style(&anchor, "right", "0");
                dom::set_style(&anchor, "z-index", "999999");
                let body = document
                    .body()
                    .ok_or_else(|| JsValue::from_str("no body"))?;
                body.append_child(&anchor)?;
                anchor
            }
        };

        let button: HtmlElement = document
            .create_element("button")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("button is not an html element"))?;
        button.set_id(CONTROL_ID);
        render_label(&button, false);
        let button_el: &Element = &button;
        dom::set_style(button_el, "display", "flex");
        dom::set_style(button_el, "align-items", "center");
        dom::set_style(button_el, "gap", "6px");
        dom::set_style(button_el, "margin", "8px");
        dom::set_style(button_el, "padding", "6px 10px");
        dom::set_style(button_el, "cursor", "pointer");
        anchor.append_child(&button)?;

        dom::ensure_style_rule(&document, STYLE_ID, TRANSITION_RULE);

        let mut control = Self {
            button,
            drag: Rc::new(RefCell::new(DragController::new())),
            bindings: Vec::new(),
        };
        control.restore_position(settings);
        control.wire_drag(settings)?;
        Ok(control)
    }

    #[must_use]
    pub fn button(&self) -> &HtmlElement {
        &self.button
    }

    /// Route click events into `on_toggle`, unless the preceding gesture was
    /// a drag.
    pub fn on_click(&mut self, on_toggle: impl Fn() + 'static) -> Result<(), JsValue> {
        let drag = Rc::clone(&self.drag);
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if drag.borrow().click_allowed() {
                on_toggle();
            }
        });
        self.bindings
            .push(EventBinding::new(self.button.as_ref(), "click", callback)?);
        Ok(())
    }

    fn restore_position(&self, settings: &Settings) {
        let Some(window) = dom::window() else {
            return;
        };
        let Some(position) = storage::load_position(&settings.position_key) else {
            return;
        };
        if position.fits(dom::viewport(&window), settings.viewport_margin_px) {
            apply_fixed_position(&self.button, position);
        } else {
            debug!("persisted position no longer fits the viewport, using default anchor");
        }
    }

    fn wire_drag(&mut self, settings: &Settings) -> Result<(), JsValue> {
        let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
        let window = dom::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let position_key = settings.position_key.clone();
        let margin = settings.viewport_margin_px;

        let down = {
            let drag = Rc::clone(&self.drag);
            let button = self.button.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                event.prevent_default();
                let origin = dom::element_rect(button.as_ref()).origin();
                drag.borrow_mut().pointer_down(
                    pointer.button(),
                    Point {
                        x: f64::from(pointer.client_x()),
                        y: f64::from(pointer.client_y()),
                    },
                    origin,
                );
            })
        };
        self.bindings
            .push(EventBinding::new(self.button.as_ref(), "pointerdown", down)?);

        let moved = {
            let drag = Rc::clone(&self.drag);
            let button = self.button.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let frame = drag.borrow_mut().pointer_move(Point {
                    x: f64::from(pointer.client_x()),
                    y: f64::from(pointer.client_y()),
                });
                if let Some(frame) = frame {
                    if frame.began {
                        begin_drag_styles(&button);
                    }
                    apply_fixed_position(&button, frame.position);
                }
            })
        };
        self.bindings
            .push(EventBinding::new(document.as_ref(), "pointermove", moved)?);

        let up = {
            let drag = Rc::clone(&self.drag);
            let button = self.button.clone();
            let position_key = position_key.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let end = drag.borrow_mut().pointer_up();
                if end.was_active {
                    end_drag_styles(&button);
                }
                if let Some(position) = end.position {
                    storage::store_position(&position_key, &position);
                }
            })
        };
        self.bindings
            .push(EventBinding::new(document.as_ref(), "pointerup", up)?);

        let resize = {
            let button = self.button.clone();
            let window = window.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let rect = dom::element_rect(button.as_ref());
                let viewport = dom::viewport(&window);
                if let Some(corrected) = geometry::clamp_into_viewport(rect, viewport, margin) {
                    apply_fixed_position(&button, corrected);
                    storage::store_position(&position_key, &corrected);
                }
            })
        };
        self.bindings
            .push(EventBinding::new(window.as_ref(), "resize", resize)?);

        Ok(())
    }
}

impl Drop for Control {
    fn drop(&mut self) {
        self.button.remove();
    }
}

/// Pin the button at `position`, breaking the anchor's bottom/right default.
fn apply_fixed_position(button: &HtmlElement, position: ControlPosition) {
    let element: &Element = button;
    dom::set_style(element, "position", "fixed");
    dom::set_style(element, "left", &format!("{}px", position.left));
    dom::set_style(element, "top", &format!("{}px", position.top));
    dom::set_style(element, "bottom", "auto");
    dom::set_style(element, "right", "auto");
}

fn begin_drag_styles(button: &HtmlElement) {
    let element: &Element = button;
    dom::set_style(element, "transition", "none");
    dom::set_style(element, "opacity", "0.9");
}

fn end_drag_styles(button: &HtmlElement) {
    let element: &Element = button;
    dom::set_style(element, "transition", "background-color 0.3s, opacity 0.3s");
    dom::set_style(element, "opacity", "");
}
