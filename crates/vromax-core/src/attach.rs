//! Attachment state machine.
//!
//! The host application is a single-page app: internal navigation can replace
//! the editor element without a page load, or remove it entirely. The watcher
//! in `vromax-web` re-scans the document on every mutation batch and feeds
//! the result into [`AttachMachine`], which decides whether the floating
//! control must be installed, reinstalled against a new editor, removed, or
//! left alone.
//!
//! The machine is generic over the handle type so it can be exercised with
//! plain values on the host target; the web adapter instantiates it with an
//! `EditorHandle` compared by DOM element identity.

use serde::{Deserialize, Serialize};

/// Whether observation stops after the first successful attach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchMode {
    /// Disconnect the observer once a control is installed. The original
    /// behavior; misses SPA navigation.
    Once,
    /// Keep observing so navigation re-attaches the control.
    #[default]
    Continuous,
}

/// What the watcher should do after a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachAction<H> {
    /// No editor before, one found now.
    Install { handle: H },
    /// A different editor replaced the attached one. Tear down, then
    /// install; exactly one control must exist afterwards.
    Replace { previous: H, next: H },
    /// The attached editor disappeared.
    Remove { previous: H },
    /// Nothing changed.
    Retain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State<H> {
    Detached,
    Attached(H),
}

/// Two-state attach machine driven by scan results.
#[derive(Debug, Clone)]
pub struct AttachMachine<H> {
    state: State<H>,
    mode: WatchMode,
}

impl<H: PartialEq + Clone> AttachMachine<H> {
    #[must_use]
    pub fn new(mode: WatchMode) -> Self {
        Self {
            state: State::Detached,
            mode,
        }
    }

    /// Feed one scan result and get the action the watcher must perform.
    pub fn on_scan(&mut self, found: Option<H>) -> AttachAction<H> {
        match (&self.state, found) {
            (State::Detached, None) => AttachAction::Retain,
            (State::Detached, Some(handle)) => {
                self.state = State::Attached(handle.clone());
                AttachAction::Install { handle }
            }
            (State::Attached(current), Some(handle)) => {
                if *current == handle {
                    AttachAction::Retain
                } else {
                    let previous = current.clone();
                    self.state = State::Attached(handle.clone());
                    AttachAction::Replace {
                        previous,
                        next: handle,
                    }
                }
            }
            (State::Attached(current), None) => {
                let previous = current.clone();
                self.state = State::Detached;
                AttachAction::Remove { previous }
            }
        }
    }

    /// An installation failed after the machine recorded it; fall back to
    /// detached so the next scan retries.
    pub fn reset(&mut self) {
        self.state = State::Detached;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        matches!(self.state, State::Attached(_))
    }

    #[must_use]
    pub fn attached(&self) -> Option<&H> {
        match &self.state {
            State::Attached(handle) => Some(handle),
            State::Detached => None,
        }
    }

    /// True once the watcher should disconnect its observer: only in
    /// [`WatchMode::Once`], and only after a successful attach.
    #[must_use]
    pub fn observation_done(&self) -> bool {
        self.mode == WatchMode::Once && self.is_attached()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn machine(mode: WatchMode) -> AttachMachine<u32> {
        AttachMachine::new(mode)
    }

    #[test]
    fn detached_scans_with_nothing_found_retain() {
        let mut m = machine(WatchMode::Continuous);
        assert_eq!(m.on_scan(None), AttachAction::Retain);
        assert_eq!(m.on_scan(None), AttachAction::Retain);
        assert!(!m.is_attached());
    }

    #[test]
    fn first_find_installs() {
        let mut m = machine(WatchMode::Continuous);
        assert_eq!(m.on_scan(Some(1)), AttachAction::Install { handle: 1 });
        assert_eq!(m.attached(), Some(&1));
    }

    #[test]
    fn same_handle_is_retained() {
        let mut m = machine(WatchMode::Continuous);
        m.on_scan(Some(1));
        assert_eq!(m.on_scan(Some(1)), AttachAction::Retain);
    }

    #[test]
    fn navigation_replaces_exactly_once() {
        let mut m = machine(WatchMode::Continuous);
        m.on_scan(Some(1));
        assert_eq!(
            m.on_scan(Some(2)),
            AttachAction::Replace {
                previous: 1,
                next: 2
            }
        );
        // The follow-up scan of the same page does nothing.
        assert_eq!(m.on_scan(Some(2)), AttachAction::Retain);
    }

    #[test]
    fn losing_the_editor_removes_then_reinstalls() {
        let mut m = machine(WatchMode::Continuous);
        m.on_scan(Some(7));
        assert_eq!(m.on_scan(None), AttachAction::Remove { previous: 7 });
        assert_eq!(m.on_scan(Some(8)), AttachAction::Install { handle: 8 });
    }

    #[test]
    fn reset_after_failed_install_retries() {
        let mut m = machine(WatchMode::Continuous);
        m.on_scan(Some(3));
        m.reset();
        assert_eq!(m.on_scan(Some(3)), AttachAction::Install { handle: 3 });
    }

    #[test]
    fn once_mode_signals_disconnect_only_after_attach() {
        let mut m = machine(WatchMode::Once);
        assert!(!m.observation_done());
        m.on_scan(Some(1));
        assert!(m.observation_done());
    }

    #[test]
    fn continuous_mode_never_signals_disconnect() {
        let mut m = machine(WatchMode::Continuous);
        m.on_scan(Some(1));
        assert!(!m.observation_done());
    }
}
