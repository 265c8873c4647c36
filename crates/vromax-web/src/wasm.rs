//! `wasm-bindgen` exports.
//!
//! The loader (the extension's JS content script) instantiates the module
//! and calls [`boot`], or [`boot_with_config`] with a settings JSON object.
//! Booting replaces any previous watcher, which tears the old control down
//! first; [`shutdown`] does only the teardown.

use std::cell::RefCell;

use tracing::debug;
use vromax_core::Settings;
use wasm_bindgen::prelude::*;

use crate::watcher::AttachmentWatcher;

thread_local! {
    static ACTIVE: RefCell<Option<AttachmentWatcher>> = const { RefCell::new(None) };
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let global = js_sys::global();
            if let Ok(console) = js_sys::Reflect::get(&global, &"console".into()) {
                if let Ok(error) = js_sys::Reflect::get(&console, &"error".into()) {
                    if let Ok(f) = error.dyn_into::<js_sys::Function>() {
                        let _ = f.call1(&console, &JsValue::from_str(&format!("{info}")));
                    }
                }
            }
        }));
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    install_panic_hook();
}

/// Start watching with default settings.
#[wasm_bindgen]
pub fn boot() -> Result<(), JsValue> {
    boot_with(Settings::default())
}

/// Start watching with JSON settings overrides, e.g.
/// `{"watch":"once","relayout_delay_ms":500}`.
#[wasm_bindgen(js_name = bootWithConfig)]
pub fn boot_with_config(json: &str) -> Result<(), JsValue> {
    let settings = Settings::from_json(json)
        .map_err(|err| JsValue::from_str(&format!("invalid settings: {err}")))?;
    boot_with(settings)
}

/// Remove the control and stop observing.
#[wasm_bindgen]
pub fn shutdown() {
    ACTIVE.with(|active| active.borrow_mut().take());
    debug!("shut down");
}

/// Whether a control is currently installed.
#[wasm_bindgen]
pub fn attached() -> bool {
    ACTIVE.with(|active| {
        active
            .borrow()
            .as_ref()
            .is_some_and(AttachmentWatcher::is_attached)
    })
}

fn boot_with(settings: Settings) -> Result<(), JsValue> {
    let watcher = AttachmentWatcher::start(settings)?;
    ACTIVE.with(|active| {
        *active.borrow_mut() = Some(watcher);
    });
    Ok(())
}
