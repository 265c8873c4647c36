//! Persisted control position.
//!
//! One localStorage key holds the control's `{top, left}` as JSON. Malformed
//! data (a previous version, a user edit) is discarded and the key removed
//! so it cannot poison later installs.

use tracing::{debug, warn};
use vromax_core::ControlPosition;
use web_sys::Storage;

use crate::dom;

fn local_storage() -> Option<Storage> {
    dom::window()?.local_storage().ok().flatten()
}

#[must_use]
pub fn load_position(key: &str) -> Option<ControlPosition> {
    let storage = local_storage()?;
    let raw = storage.get_item(key).ok()??;
    match serde_json::from_str(&raw) {
        Ok(position) => Some(position),
        Err(err) => {
            warn!("discarding malformed persisted position: {err}");
            let _ = storage.remove_item(key);
            None
        }
    }
}

pub fn store_position(key: &str, position: &ControlPosition) {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Ok(json) = serde_json::to_string(position) {
        if let Err(err) = storage.set_item(key, &json) {
            debug!("failed to persist control position: {err:?}");
        }
    }
}
