//! Attachment watcher.
//!
//! Runs a scan at startup and on every mutation batch, feeding the result
//! into the core attach machine. The machine's verdict drives installation:
//! a new editor gets a fresh [`Installation`] (control + toggle engine); a
//! replaced or vanished editor tears the previous one down: listeners
//! unbound, pending delayed steps cancelled, snapshots discarded.
//!
//! In `WatchMode::Continuous` (default) the observer never disconnects, so
//! SPA navigation between workflows keeps working. `WatchMode::Once`
//! reproduces the one-shot behavior: stop observing after the first attach.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use vromax_core::{AttachAction, AttachMachine, Settings};
use wasm_bindgen::JsValue;
use web_sys::{Element, Node};

use crate::control::Control;
use crate::locator::{EditorHandle, find_editor};
use crate::observer::SubtreeObserver;
use crate::toggle::ToggleEngine;
use crate::dom;

/// Control plus engine bound to one detected editor.
struct Installation {
    _control: Control,
    engine: Rc<RefCell<ToggleEngine>>,
}

impl Installation {
    fn create(handle: &EditorHandle, settings: &Settings) -> Result<Self, JsValue> {
        let mut control = Control::install(settings)?;
        let engine = Rc::new(RefCell::new(ToggleEngine::new(
            handle.variant,
            settings.clone(),
            control.button().clone(),
        )));
        let click_engine = Rc::clone(&engine);
        control.on_click(move || {
            if let Ok(mut engine) = click_engine.try_borrow_mut() {
                engine.toggle();
            }
        })?;
        Ok(Self {
            _control: control,
            engine,
        })
    }
}

struct WatcherInner {
    settings: Settings,
    machine: AttachMachine<EditorHandle>,
    installation: Option<Installation>,
}

impl WatcherInner {
    fn scan(&mut self) {
        match self.machine.on_scan(find_editor()) {
            AttachAction::Install { handle } => {
                info!("editor found ({:?}); installing control", handle.variant);
                self.install(&handle);
            }
            AttachAction::Replace { next, .. } => {
                info!("editor replaced by navigation; reinstalling control");
                self.installation = None;
                self.install(&next);
            }
            AttachAction::Remove { .. } => {
                debug!("editor gone; removing control");
                self.installation = None;
            }
            AttachAction::Retain => {}
        }
    }

    fn install(&mut self, handle: &EditorHandle) {
        match Installation::create(handle, &self.settings) {
            Ok(installation) => self.installation = Some(installation),
            Err(err) => {
                warn!("control installation failed: {err:?}");
                self.machine.reset();
            }
        }
    }
}

pub struct AttachmentWatcher {
    inner: Rc<RefCell<WatcherInner>>,
    _observer: Option<SubtreeObserver>,
}

impl AttachmentWatcher {
    /// Scan immediately, then keep scanning on DOM mutations (subject to the
    /// configured watch mode).
    pub fn start(settings: Settings) -> Result<Self, JsValue> {
        let inner = Rc::new(RefCell::new(WatcherInner {
            machine: AttachMachine::new(settings.watch),
            settings,
            installation: None,
        }));
        inner.borrow_mut().scan();

        if inner.borrow().machine.observation_done() {
            return Ok(Self {
                inner,
                _observer: None,
            });
        }

        let scan_inner = Rc::clone(&inner);
        let observer = SubtreeObserver::new(move |observer| {
            let mut inner = scan_inner.borrow_mut();
            inner.scan();
            if inner.machine.observation_done() {
                observer.disconnect();
            }
        })?;
        let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
        let target: Node = match document.body() {
            Some(body) => body.into(),
            None => document.into(),
        };
        let attributes = inner.borrow().settings.observe_attributes;
        observer.observe(&target, attributes)?;

        Ok(Self {
            inner,
            _observer: Some(observer),
        })
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().machine.is_attached()
    }

    /// Editor element the current installation is bound to.
    #[must_use]
    pub fn attached_editor(&self) -> Option<Element> {
        self.inner
            .borrow()
            .machine
            .attached()
            .map(|handle| handle.element.clone())
    }

    /// Whether the current installation is in the expanded state.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.inner
            .borrow()
            .installation
            .as_ref()
            .is_some_and(|installation| installation.engine.borrow().is_expanded())
    }
}
