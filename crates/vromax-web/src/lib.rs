#![forbid(unsafe_code)]

//! `vromax-web` is the browser half of the vRO editor maximizer: a content
//! script compiled to `wasm32-unknown-unknown` that injects a draggable
//! floating toggle into VCF Operations Orchestrator editor pages, hides the
//! surrounding panels and chrome so the Monaco editor fills the viewport,
//! and restores the original layout on the next click.
//!
//! Division of labor:
//! - decisions (attach lifecycle, drag classification, snapshot bookkeeping,
//!   geometry) live in `vromax-core` and are pure;
//! - this crate binds those machines to the page (DOM queries, a
//!   `MutationObserver`, pointer events, `localStorage`, timeouts) and
//!   exposes `boot` / `bootWithConfig` / `shutdown` over `wasm-bindgen`.
//!
//! Everything that touches the browser is gated on `wasm32`; on other
//! targets this crate compiles to nothing.

#[cfg(target_arch = "wasm32")]
pub mod control;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod locator;
#[cfg(target_arch = "wasm32")]
pub mod observer;
#[cfg(target_arch = "wasm32")]
pub mod schedule;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod toggle;
#[cfg(target_arch = "wasm32")]
pub mod watcher;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{attached, boot, boot_with_config, shutdown};
