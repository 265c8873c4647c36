#![forbid(unsafe_code)]

//! `vromax-core` holds the deterministic parts of the vRO editor maximizer.
//!
//! Design goals:
//! - **No DOM types**: everything here operates on plain values (probe
//!   results, pointer coordinates, style strings) so the whole crate tests
//!   on the host target.
//! - **Host-driven**: the web adapter observes the page and feeds events in;
//!   this crate decides what should happen and hands back actions.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The browser half lives in `vromax-web`, which wires these machines to
//! `web-sys` queries, a `MutationObserver`, pointer events, and timeouts.

pub mod attach;
pub mod config;
pub mod drag;
pub mod geometry;
pub mod snapshot;
pub mod variant;

pub use attach::{AttachAction, AttachMachine, WatchMode};
pub use config::Settings;
pub use drag::{DragController, DragEnd, DragFrame};
pub use geometry::{ControlPosition, Point, Rect, Size};
pub use snapshot::{CaptureMode, SnapshotStore, StyleProp, StyleRecord};
pub use variant::{LayoutVariant, VariantProbes, ViewKind};
