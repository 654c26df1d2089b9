// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe_web --heading-base-level=0

//! Browser bindings for `understory_swipe`.
//!
//! This crate connects the recognizer to a real DOM when targeting `wasm32`:
//!
//! - `WebInput` implements `InputEvent` for any `web_sys::Event`, reading
//!   touch lists, pointer/mouse client coordinates and the nearest `<a>`
//!   ancestor of the target.
//! - `probe` detects pointer event and touch support on a `Window`.
//! - `DomSurface` implements `Surface` with `addEventListener` /
//!   `removeEventListener`, honouring capture and non-passive options.
//! - `WebSwipe` wires all of it to one element and keeps the JS closure
//!   alive for as long as the listeners are bound.
//!
//! # Usage
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn attach(
//!     element: web_sys::Element,
//! ) -> Result<understory_swipe_web::WebSwipe, wasm_bindgen::JsValue> {
//!     use understory_swipe::{Handlers, SwipeConfig};
//!
//!     let handlers = Handlers::new()
//!         .on_move_x(|e| log::info!("dx = {}", e.gesture.shift.x))
//!         .on_end_x(|e| log::info!("swiped in {} ms", e.duration));
//!     let config = SwipeConfig::default().with_no_slide_click(true);
//!     understory_swipe_web::WebSwipe::attach(element, config, handlers)
//! }
//! ```
//!
//! On other targets the crate is empty so it can stay in the workspace.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod attach;
#[cfg(target_arch = "wasm32")]
mod input;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
pub use attach::{DomSwipe, WebSwipe};
#[cfg(target_arch = "wasm32")]
pub use input::{WebInput, probe};
#[cfg(target_arch = "wasm32")]
pub use surface::{DomListener, DomSurface};
