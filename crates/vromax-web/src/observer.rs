//! Mutation observation.
//!
//! [`SubtreeObserver`] owns both the `MutationObserver` and the boxed
//! callback handed to it; dropping the wrapper disconnects the observer and
//! releases the closure, so a discarded watcher can never fire into freed
//! state. The callback receives the observer itself, letting a watch-once
//! configuration disconnect from inside its own notification.

use js_sys::Array;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MutationObserver, MutationObserverInit, Node};

pub struct SubtreeObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl SubtreeObserver {
    /// Wrap `on_batch`, invoked once per delivered mutation batch.
    pub fn new(mut on_batch: impl FnMut(&MutationObserver) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |_records: Array, observer: MutationObserver| on_batch(&observer),
        );
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Observe child-list and subtree changes under `target`, plus attribute
    /// changes when `attributes` is set.
    pub fn observe(&self, target: &Node, attributes: bool) -> Result<(), JsValue> {
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if attributes {
            init.set_attributes(true);
        }
        self.observer.observe_with_options(target, &init)
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for SubtreeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
