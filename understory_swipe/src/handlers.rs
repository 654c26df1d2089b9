// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumer callbacks and the order they run in.
//!
//! Every callback is optional; an absent callback is skipped. For a single
//! input event, callbacks always run generic first, then the X variant, then
//! the Y variant.
//!
//! [`Handlers::interest`] summarises what is registered as an [`Interest`]
//! set. The gesture state machine uses it to decide whether a locked axis
//! counts as a slide.
//!
//! ```
//! use understory_swipe::handlers::{Handlers, Interest};
//!
//! # struct Ev;
//! let handlers: Handlers<Ev> = Handlers::new()
//!     .on_move_x(|e| { let _ = e.gesture.shift.x; })
//!     .on_end(|_| {});
//! assert_eq!(handlers.interest(), Interest::MOVE_X | Interest::END);
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::gesture::{Axis, Gesture};

bitflags::bitflags! {
    /// Which consumer callbacks are registered.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Interest: u16 {
        /// `on_start`.
        const START   = 1 << 0;
        /// `on_start_x`.
        const START_X = 1 << 1;
        /// `on_start_y`.
        const START_Y = 1 << 2;
        /// `on_move`.
        const MOVE    = 1 << 3;
        /// `on_move_x`.
        const MOVE_X  = 1 << 4;
        /// `on_move_y`.
        const MOVE_Y  = 1 << 5;
        /// `on_end`.
        const END     = 1 << 6;
        /// `on_end_x`.
        const END_X   = 1 << 7;
        /// `on_end_y`.
        const END_Y   = 1 << 8;
        /// `on_enter`.
        const ENTER   = 1 << 9;
        /// `on_leave`.
        const LEAVE   = 1 << 10;
        /// `on_click`.
        const CLICK   = 1 << 11;
    }
}

impl Interest {
    /// Whether a gesture locked on `axis` counts as a slide.
    ///
    /// Only move callbacks matter: the generic one or the one for `axis`.
    pub const fn slides(self, axis: Axis) -> bool {
        let wanted = match axis {
            Axis::X => Self::MOVE.union(Self::MOVE_X),
            Axis::Y => Self::MOVE.union(Self::MOVE_Y),
        };
        self.intersects(wanted)
    }

    /// Whether any hover callback is registered.
    pub const fn hovers(self) -> bool {
        self.intersects(Self::ENTER.union(Self::LEAVE))
    }
}

/// Payload of every gesture callback.
#[derive(Debug)]
pub struct SwipeEvent<'a, E> {
    /// The gesture at the time of dispatch.
    pub gesture: &'a Gesture,
    /// Milliseconds since the press, computed at dispatch.
    pub duration: u64,
    /// The raw input event that caused the dispatch.
    pub event: &'a E,
}

type GestureCallback<E> = Box<dyn FnMut(&SwipeEvent<'_, E>)>;
type EventCallback<E> = Box<dyn FnMut(&E)>;

/// The consumer-facing callback table.
pub struct Handlers<E> {
    on_enter: Option<EventCallback<E>>,
    on_leave: Option<EventCallback<E>>,
    on_click: Option<EventCallback<E>>,
    on_start: Option<GestureCallback<E>>,
    on_start_x: Option<GestureCallback<E>>,
    on_start_y: Option<GestureCallback<E>>,
    on_move: Option<GestureCallback<E>>,
    on_move_x: Option<GestureCallback<E>>,
    on_move_y: Option<GestureCallback<E>>,
    on_end: Option<GestureCallback<E>>,
    on_end_x: Option<GestureCallback<E>>,
    on_end_y: Option<GestureCallback<E>>,
}

impl<E> fmt::Debug for Handlers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("interest", &self.interest())
            .finish_non_exhaustive()
    }
}

impl<E> Default for Handlers<E> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! setters {
    ($($(#[$doc:meta])* $name:ident: $kind:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, f: impl FnMut(&$kind<'_, E>) + 'static) -> Self {
                self.$name = Some(Box::new(f));
                self
            }
        )*
    };
}

impl<E> Handlers<E> {
    /// An empty table: nothing is dispatched.
    pub const fn new() -> Self {
        Self {
            on_enter: None,
            on_leave: None,
            on_click: None,
            on_start: None,
            on_start_x: None,
            on_start_y: None,
            on_move: None,
            on_move_x: None,
            on_move_y: None,
            on_end: None,
            on_end_x: None,
            on_end_y: None,
        }
    }

    /// Hover enter.
    #[must_use]
    pub fn on_enter(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    /// Hover leave, native or synthesized after a touch end.
    #[must_use]
    pub fn on_leave(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.on_leave = Some(Box::new(f));
        self
    }

    /// Clicks the click gate lets through.
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    setters! {
        /// Press start.
        on_start: SwipeEvent;
        /// Press start; fires alongside `on_start` since no axis is known yet.
        on_start_x: SwipeEvent;
        /// Press start; fires alongside `on_start` since no axis is known yet.
        on_start_y: SwipeEvent;
        /// Slide movement on either axis.
        on_move: SwipeEvent;
        /// Slide movement on a horizontally locked gesture.
        on_move_x: SwipeEvent;
        /// Slide movement on a vertically locked gesture.
        on_move_y: SwipeEvent;
        /// Every gesture end.
        on_end: SwipeEvent;
        /// End of a horizontal slide.
        on_end_x: SwipeEvent;
        /// End of a vertical slide.
        on_end_y: SwipeEvent;
    }

    /// The set of registered callbacks.
    pub fn interest(&self) -> Interest {
        let mut interest = Interest::empty();
        for (set, flag) in [
            (self.on_start.is_some(), Interest::START),
            (self.on_start_x.is_some(), Interest::START_X),
            (self.on_start_y.is_some(), Interest::START_Y),
            (self.on_move.is_some(), Interest::MOVE),
            (self.on_move_x.is_some(), Interest::MOVE_X),
            (self.on_move_y.is_some(), Interest::MOVE_Y),
            (self.on_end.is_some(), Interest::END),
            (self.on_end_x.is_some(), Interest::END_X),
            (self.on_end_y.is_some(), Interest::END_Y),
            (self.on_enter.is_some(), Interest::ENTER),
            (self.on_leave.is_some(), Interest::LEAVE),
            (self.on_click.is_some(), Interest::CLICK),
        ] {
            interest.set(flag, set);
        }
        interest
    }

    pub(crate) fn start(&mut self, ev: &SwipeEvent<'_, E>) {
        call(&mut self.on_start, ev);
        call(&mut self.on_start_x, ev);
        call(&mut self.on_start_y, ev);
    }

    pub(crate) fn moved(&mut self, ev: &SwipeEvent<'_, E>) {
        let g = ev.gesture;
        if g.is_slide {
            call(&mut self.on_move, ev);
        }
        if g.is_slide_x {
            call(&mut self.on_move_x, ev);
        }
        if g.is_slide_y {
            call(&mut self.on_move_y, ev);
        }
    }

    pub(crate) fn end(&mut self, ev: &SwipeEvent<'_, E>) {
        let g = ev.gesture;
        call(&mut self.on_end, ev);
        if g.is_slide_x {
            call(&mut self.on_end_x, ev);
        }
        if g.is_slide_y {
            call(&mut self.on_end_y, ev);
        }
    }

    pub(crate) fn enter(&mut self, event: &E) {
        call(&mut self.on_enter, event);
    }

    pub(crate) fn leave(&mut self, event: &E) {
        call(&mut self.on_leave, event);
    }

    pub(crate) fn click(&mut self, event: &E) {
        call(&mut self.on_click, event);
    }
}

fn call<T: ?Sized, A: ?Sized>(slot: &mut Option<Box<T>>, arg: &A)
where
    T: FnMut(&A),
{
    if let Some(f) = slot.as_mut() {
        f(arg);
    }
}
