// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe --heading-base-level=0

//! Understory Swipe: directional swipe recognition for pointer, touch, and mouse input.
//!
//! This crate turns the press/move/release stream of any of the three browser
//! input families into one gesture abstraction. It tells taps from horizontal
//! and vertical slides, reports them to consumer callbacks, and keeps the
//! click that platforms synthesize after a slide from activating whatever is
//! underneath.
//!
//! It computes *whether*, *in which direction* and *how far* a gesture is
//! moving. Rendering, animation and layout are left to the consumer.
//!
//! ## Pieces
//!
//! - [`source`]: pick the event family once for an environment and read
//!   coordinates out of raw events.
//! - [`binding`]: attach listeners to an element or the document, one live
//!   binding per logical listener, with document listeners scoped to a press.
//! - [`gesture`]: the press state machine. Decides the axis lock once per
//!   gesture and whether it is a slide.
//! - [`click`]: swallow or defuse the click that follows a slide.
//! - [`hover`]: enter/leave, including a synthesized leave after touch ends.
//! - [`handlers`]: the consumer callbacks and their dispatch order.
//! - [`Swipe`]: everything above composed for one element.
//!
//! ## Axis lock
//!
//! A gesture stays unlocked until, on some move sample, one axis has moved at
//! least [`SwipeConfig::slide_threshold`] *and strictly more* than the other.
//! The lock is then permanent. An exact tie locks nothing and waits for the
//! next sample. A locked axis is a *slide* only if a move callback for that
//! axis (or the generic one) is registered; otherwise no move or axis-end
//! callbacks fire, which lets native scrolling proceed.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_swipe::binding::{BindTarget, ListenOptions, Surface};
//! use understory_swipe::source::{Capabilities, EventSource, InputEvent, InputFamily, Signal};
//! use understory_swipe::{Handlers, Swipe, SwipeConfig};
//!
//! // A surface that ignores listener bookkeeping.
//! struct NoSurface;
//! impl Surface for NoSurface {
//!     type Target = ();
//!     type Handle = ();
//!     fn listen(&mut self, _: &BindTarget<()>, _: &'static str, _: ListenOptions) {}
//!     fn unlisten(&mut self, _: ()) {}
//! }
//!
//! struct Mouse(Point);
//! impl InputEvent for Mouse {
//!     fn family(&self) -> InputFamily { InputFamily::Mouse }
//!     fn client_position(&self) -> Option<Point> { Some(self.0) }
//!     fn prevent_default(&mut self) {}
//!     fn stop_propagation(&mut self) {}
//! }
//!
//! let shifts = Rc::new(RefCell::new(Vec::new()));
//! let sink = shifts.clone();
//! let handlers = Handlers::new().on_move_x(move |e| sink.borrow_mut().push(e.gesture.shift.x));
//!
//! let source = EventSource::probe(Capabilities::default());
//! let mut swipe = Swipe::new(NoSurface, source, SwipeConfig::default(), handlers);
//! swipe.mount(());
//!
//! swipe.handle(Signal::Start, &mut Mouse(Point::new(0.0, 0.0)), 0);
//! swipe.handle(Signal::Move, &mut Mouse(Point::new(3.0, 0.0)), 8);
//! swipe.handle(Signal::Move, &mut Mouse(Point::new(10.0, 1.0)), 16);
//! swipe.handle(Signal::End, &mut Mouse(Point::new(10.0, 1.0)), 24);
//!
//! assert_eq!(*shifts.borrow(), [10.0]);
//! assert!(swipe.did_slide());
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod binding;
pub mod click;
pub mod config;
pub mod gesture;
pub mod handlers;
pub mod hover;
pub mod source;
mod swipe;

pub use config::{ConfigError, DEFAULT_SLIDE_THRESHOLD, SwipeConfig};
pub use handlers::{Handlers, SwipeEvent};
pub use swipe::{CLICK, Swipe};
