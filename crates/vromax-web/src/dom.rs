//! Thin DOM helpers.
//!
//! Every lookup returns `Option`: a missing element means "feature
//! unavailable this cycle", never an error. Style reads distinguish inline
//! declarations from computed values because restoration needs both (see
//! `vromax_core::snapshot::CaptureMode`).

use vromax_core::{Rect, Size};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window()?.document()
}

#[must_use]
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// First selector in `selectors` that matches, in order.
#[must_use]
pub fn query_any(document: &Document, selectors: &[&str]) -> Option<Element> {
    selectors
        .iter()
        .find_map(|selector| query(document, selector))
}

#[must_use]
pub fn as_html(element: &Element) -> Option<HtmlElement> {
    element.dyn_ref::<HtmlElement>().cloned()
}

/// Inline style declaration for `prop`, `None` when not set inline.
#[must_use]
pub fn inline_style(element: &Element, prop: &str) -> Option<String> {
    let value = as_html(element)?.style().get_property_value(prop).ok()?;
    (!value.is_empty()).then_some(value)
}

/// Computed style for `prop`, `None` when it resolves empty.
#[must_use]
pub fn computed_style(element: &Element, prop: &str) -> Option<String> {
    let declaration = window()?.get_computed_style(element).ok()??;
    let value = declaration.get_property_value(prop).ok()?;
    (!value.is_empty()).then_some(value)
}

/// Set an inline style property. The empty string removes the declaration,
/// handing the property back to the host's stylesheet.
pub fn set_style(element: &Element, prop: &str, value: &str) {
    if let Some(html) = as_html(element) {
        let _ = html.style().set_property(prop, value);
    }
}

#[must_use]
pub fn viewport(window: &Window) -> Size {
    let axis = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size {
        width: axis(window.inner_width()),
        height: axis(window.inner_height()),
    }
}

#[must_use]
pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Insert a `<style>` with `id` into `<head>` once; later calls are no-ops.
pub fn ensure_style_rule(document: &Document, id: &str, css: &str) {
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let (Ok(style), Some(head)) = (document.create_element("style"), document.head()) else {
        return;
    };
    style.set_id(id);
    style.set_text_content(Some(css));
    let _ = head.append_child(&style);
}
