//! Cancellable one-shot timeouts.
//!
//! The toggle engine sequences CSS transitions with short delays
//! (hide-after-shrink, width-after-display, relayout-after-resize). Each
//! delayed step lives in a named [`TaskSlot`]: rescheduling a slot cancels
//! its predecessor, and the opposing transition cancels slots outright, so a
//! rapid expand/restore sequence can never apply a stale mutation. Clicking
//! restore while an expand's hide step is pending must leave the panel
//! visible.

use tracing::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

use crate::dom;

/// A pending `setTimeout` callback. Dropping it clears the timeout.
pub struct ScheduledTask {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl ScheduledTask {
    pub fn once(delay_ms: u32, task: impl FnOnce() + 'static) -> Result<Self, JsValue> {
        let window = dom::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::once(task);
        let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms as i32,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        // A no-op for timeouts that already fired.
        if let Some(window) = dom::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}

/// Holder for at most one pending task.
#[derive(Default)]
pub struct TaskSlot {
    task: Option<ScheduledTask>,
}

impl TaskSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` after `delay_ms`, cancelling any pending predecessor.
    pub fn schedule(&mut self, delay_ms: u32, task: impl FnOnce() + 'static) {
        self.cancel();
        match ScheduledTask::once(delay_ms, task) {
            Ok(scheduled) => self.task = Some(scheduled),
            Err(err) => warn!("failed to schedule delayed step: {err:?}"),
        }
    }

    pub fn cancel(&mut self) {
        self.task = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }
}
