//! Expand/restore transitions.
//!
//! The engine owns everything one installation mutates: the snapshot store,
//! the expanded flag, and the task slots that sequence delayed steps. A
//! replacement installation gets a fresh engine, so stale snapshots can
//! never be applied to replaced elements.
//!
//! Expansion order matters: snapshot before mutate, shrink before hide,
//! resize before asking the host editor to re-layout. Restoration reverses
//! it: display before width (so the width transition animates on a visible
//! panel), then heights, then re-layout. Both directions end by nudging the
//! host: Monaco's global editor registry if it is reachable, and a window
//! `resize` event regardless.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};
use vromax_core::snapshot::{
    CHROME_PROPS, CaptureMode, EDITOR_PROPS, FIRST_PANEL_PROPS, GUTTER_PROPS, SECOND_PANEL_PROPS,
    SnapshotStore, StyleProp, StyleRecord,
};
use vromax_core::variant::{
    ACTION_VIEW_MARKER_CLASS, COLLAPSED_FIRST_PANEL_WIDTH, EDITOR_BOX_SELECTOR,
    EXPANDED_SECOND_PANEL_WIDTH, LayoutVariant, MONACO_EDITOR_SELECTOR, ViewKind,
};
use vromax_core::Settings;
use wasm_bindgen::JsValue;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::control::{TRANSITION_CLASS, render_label};
use crate::locator::{PanelSet, resolve_panels};
use crate::schedule::TaskSlot;
use crate::dom;

pub struct ToggleEngine {
    variant: LayoutVariant,
    settings: Settings,
    store: SnapshotStore<Element>,
    expanded: Rc<Cell<bool>>,
    button: HtmlElement,
    hide_task: TaskSlot,
    width_task: TaskSlot,
    relayout_task: TaskSlot,
}

impl ToggleEngine {
    #[must_use]
    pub fn new(variant: LayoutVariant, settings: Settings, button: HtmlElement) -> Self {
        Self {
            variant,
            settings,
            store: SnapshotStore::new(),
            expanded: Rc::new(Cell::new(false)),
            button,
            hide_task: TaskSlot::new(),
            width_task: TaskSlot::new(),
            relayout_task: TaskSlot::new(),
        }
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn toggle(&mut self) {
        if self.expanded.get() {
            self.restore();
        } else {
            self.expand();
        }
    }

    pub fn expand(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        self.expanded.set(true);
        // A restore may still owe the sidebar its width; that step is now
        // obsolete.
        self.width_task.cancel();

        let panels = resolve_panels(&document, self.variant);
        let view = classify_view(&panels);
        debug!("expanding {:?} {:?}", self.variant, view);

        if let Some(first) = &panels.first_panel {
            self.store
                .capture(first.clone(), capture_record(first, FIRST_PANEL_PROPS));
            let _ = first.class_list().add_1(TRANSITION_CLASS);
        }
        if let Some(second) = &panels.second_panel {
            self.store
                .capture(second.clone(), capture_record(second, SECOND_PANEL_PROPS));
            let _ = second.class_list().add_1(TRANSITION_CLASS);
        }

        match view {
            ViewKind::Workflow => {
                if let Some(first) = &panels.first_panel {
                    dom::set_style(first, "width", COLLAPSED_FIRST_PANEL_WIDTH);
                    let panel = first.clone();
                    let expanded = Rc::clone(&self.expanded);
                    self.hide_task
                        .schedule(self.settings.shrink_hide_delay_ms, move || {
                            if expanded.get() {
                                dom::set_style(&panel, "display", "none");
                            }
                        });
                }
                if let Some(second) = &panels.second_panel {
                    dom::set_style(second, "width", EXPANDED_SECOND_PANEL_WIDTH);
                }
            }
            ViewKind::Action => {
                // The editor already owns the first panel; flex absorbs the
                // freed space once the second panel and gutter are gone.
                if let Some(second) = &panels.second_panel {
                    dom::set_style(second, "display", "none");
                }
            }
        }

        if let Some(gutter) = &panels.gutter {
            self.store
                .capture(gutter.clone(), capture_record(gutter, GUTTER_PROPS));
            dom::set_style(gutter, "display", "none");
        }
        for element in &panels.chrome {
            self.store
                .capture(element.clone(), capture_record(element, CHROME_PROPS));
            dom::set_style(element, "display", "none");
        }

        if let Some(container) = dom::query(&document, EDITOR_BOX_SELECTOR) {
            self.store
                .capture(container.clone(), capture_record(&container, EDITOR_PROPS));
            let height = format!("calc(100vh - {}px)", self.variant.container_offset_px());
            dom::set_style(&container, "height", &height);
        }
        if let Some(editor) = dom::query(&document, MONACO_EDITOR_SELECTOR) {
            self.store
                .capture(editor.clone(), capture_record(&editor, EDITOR_PROPS));
            let height = format!("calc(100vh - {}px)", self.variant.editor_offset_px());
            dom::set_style(&editor, "height", &height);
        }

        self.schedule_relayout();
        render_label(&self.button, true);
    }

    pub fn restore(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        self.expanded.set(false);
        // An expand may still owe the sidebar its hide step; cancelling it
        // here is what keeps a rapid expand-then-restore from ending on a
        // hidden panel.
        self.hide_task.cancel();

        let panels = resolve_panels(&document, self.variant);
        let view = classify_view(&panels);
        debug!("restoring {:?} {:?}", self.variant, view);

        let mut handled: Vec<Element> = Vec::new();

        if let Some(first) = &panels.first_panel {
            if let Some(record) = self.store.get(first) {
                dom::set_style(first, "display", record.get(StyleProp::Display).unwrap_or(""));
                match view {
                    ViewKind::Workflow => {
                        let width = record.get(StyleProp::Width).unwrap_or("").to_owned();
                        let panel = first.clone();
                        self.width_task
                            .schedule(self.settings.width_restore_delay_ms, move || {
                                dom::set_style(&panel, "width", &width);
                            });
                    }
                    ViewKind::Action => {
                        dom::set_style(first, "height", record.get(StyleProp::Height).unwrap_or(""));
                        dom::set_style(first, "flex", record.get(StyleProp::Flex).unwrap_or(""));
                    }
                }
                handled.push(first.clone());
            }
        }
        if let Some(second) = &panels.second_panel {
            if let Some(record) = self.store.get(second) {
                apply_record(second, record);
                handled.push(second.clone());
            }
        }
        if let Some(gutter) = &panels.gutter {
            if let Some(record) = self.store.get(gutter) {
                apply_record(gutter, record);
                handled.push(gutter.clone());
            }
        }
        for element in &panels.chrome {
            if let Some(record) = self.store.get(element) {
                apply_record(element, record);
                handled.push(element.clone());
            }
        }
        for selector in [EDITOR_BOX_SELECTOR, MONACO_EDITOR_SELECTOR] {
            if let Some(element) = dom::query(&document, selector) {
                if let Some(record) = self.store.get(&element) {
                    apply_record(&element, record);
                    handled.push(element);
                }
            }
        }

        // Anything still holding a snapshot stopped matching its selector
        // mid-cycle; reapply its record anyway so no mutation survives.
        for (element, record) in self.store.entries() {
            if !handled.contains(element) {
                apply_record(element, record);
            }
        }
        self.store.clear();

        self.schedule_relayout();
        render_label(&self.button, false);
    }

    fn schedule_relayout(&mut self) {
        self.relayout_task
            .schedule(self.settings.relayout_delay_ms, || {
                relayout_host_editors();
                dispatch_resize();
            });
    }
}

fn classify_view(panels: &PanelSet) -> ViewKind {
    ViewKind::classify(
        panels
            .first_panel
            .as_ref()
            .is_some_and(|panel| panel.class_list().contains(ACTION_VIEW_MARKER_CLASS)),
    )
}

/// Read the properties `props` of `element` into a fresh record.
fn capture_record(element: &Element, props: &[(StyleProp, CaptureMode)]) -> StyleRecord {
    let mut record = StyleRecord::default();
    for (prop, mode) in props {
        let name = prop.css_name();
        let value = match mode {
            CaptureMode::InlineOnly => dom::inline_style(element, name),
            CaptureMode::InlineOrComputed => {
                dom::inline_style(element, name).or_else(|| dom::computed_style(element, name))
            }
        };
        record.set(*prop, value.unwrap_or_default());
    }
    record
}

/// Reapply a record, display first.
fn apply_record(element: &Element, record: &StyleRecord) {
    for (prop, value) in record.props() {
        dom::set_style(element, prop.css_name(), value);
    }
}

/// Ask Monaco to re-measure, if the host exposes its editor registry.
fn relayout_host_editors() {
    let global = js_sys::global();
    let Ok(monaco) = js_sys::Reflect::get(&global, &JsValue::from_str("monaco")) else {
        return;
    };
    if monaco.is_undefined() || monaco.is_null() {
        trace!("no monaco global; relying on the resize event");
        return;
    }
    let Ok(editor_ns) = js_sys::Reflect::get(&monaco, &JsValue::from_str("editor")) else {
        return;
    };
    let Ok(get_editors) = js_sys::Reflect::get(&editor_ns, &JsValue::from_str("getEditors"))
    else {
        return;
    };
    let Ok(get_editors) = get_editors.dyn_into::<js_sys::Function>() else {
        return;
    };
    let Ok(editors) = get_editors.call0(&editor_ns) else {
        return;
    };
    let Ok(editors) = editors.dyn_into::<js_sys::Array>() else {
        return;
    };
    for editor in editors.iter() {
        if let Ok(layout) = js_sys::Reflect::get(&editor, &JsValue::from_str("layout")) {
            if let Ok(layout) = layout.dyn_into::<js_sys::Function>() {
                let _ = layout.call0(&editor);
            }
        }
    }
}

/// Generic fallback: host listeners recompute on window resize.
fn dispatch_resize() {
    let Some(window) = dom::window() else {
        return;
    };
    if let Ok(event) = web_sys::Event::new("resize") {
        let _ = window.dispatch_event(&event);
    }
}
