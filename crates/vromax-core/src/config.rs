//! Runtime settings.
//!
//! Everything has a default; the loader may override fields by passing a
//! JSON object through `bootWithConfig`. Unknown fields are ignored so an
//! older loader config keeps working against a newer module.

use serde::{Deserialize, Serialize};

use crate::attach::WatchMode;

/// Tuning knobs for the watcher, the control, and the toggle engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keep observing across SPA navigation, or stop after the first attach.
    pub watch: WatchMode,

    /// Also re-scan on attribute mutations. Noisy on this host; child-list +
    /// subtree is enough to catch editor creation.
    pub observe_attributes: bool,

    /// Delay before a width-shrunk sidebar panel is fully hidden, paired
    /// with the 0.3 s width transition.
    pub shrink_hide_delay_ms: u32,

    /// Delay between restoring a panel's display and reapplying its width,
    /// so the width change lands on a visible element and animates.
    pub width_restore_delay_ms: u32,

    /// Delay before asking the host editor to re-layout after a toggle.
    pub relayout_delay_ms: u32,

    /// Margin kept between the control and the viewport edges when a resize
    /// pushes it off screen.
    pub viewport_margin_px: f64,

    /// localStorage key for the persisted control position.
    pub position_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            watch: WatchMode::Continuous,
            observe_attributes: false,
            shrink_hide_delay_ms: 300,
            width_restore_delay_ms: 10,
            relayout_delay_ms: 350,
            viewport_margin_px: 12.0,
            position_key: "vromax.control-position".to_owned(),
        }
    }
}

impl Settings {
    /// Parse overrides from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
