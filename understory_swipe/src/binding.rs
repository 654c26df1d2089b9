// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener binding: attach event listeners to an element or the document,
//! with at most one live binding per logical listener.
//!
//! The platform side is abstracted as a [`Surface`]: something that can add
//! and remove a listener for an event name on a [`BindTarget`]. On top of it:
//!
//! - [`ListenerSlot`] holds one binding. Adding the same binding again is a
//!   no-op, adding a different one replaces it, adding `None` detaches.
//! - [`Bindings`] keeps one slot per [`Listener`] for the mounted element.
//! - [`PressScope`] binds move/end/cancel on the document for the duration of
//!   one press and is released when the press ends.
//!
//! ## Minimal example
//!
//! ```
//! use understory_swipe::binding::{BindTarget, ListenOptions, ListenerSlot, Surface};
//!
//! #[derive(Default)]
//! struct Counter { live: i32 }
//!
//! impl Surface for Counter {
//!     type Target = u32;
//!     type Handle = ();
//!     fn listen(&mut self, _: &BindTarget<u32>, _: &'static str, _: ListenOptions) {
//!         self.live += 1;
//!     }
//!     fn unlisten(&mut self, _: ()) {
//!         self.live -= 1;
//!     }
//! }
//!
//! let mut surface = Counter::default();
//! let mut slot = ListenerSlot::new();
//! let opts = ListenOptions::default();
//!
//! slot.add(&mut surface, Some(BindTarget::Element(7)), "click", opts);
//! slot.add(&mut surface, Some(BindTarget::Element(7)), "click", opts);
//! assert_eq!(surface.live, 1);
//!
//! slot.add(&mut surface, Some(BindTarget::Document), "click", opts);
//! assert_eq!(surface.live, 1);
//!
//! slot.add(&mut surface, None, "click", opts);
//! assert_eq!(surface.live, 0);
//! ```

use crate::source::EventNames;

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindTarget<T> {
    /// A specific element.
    Element(T),
    /// The whole document, for input that escapes the element.
    Document,
}

/// Listener registration options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ListenOptions {
    /// Listen in the capture phase.
    pub capture: bool,
    /// Promise never to prevent the default action.
    pub passive: bool,
}

impl ListenOptions {
    /// Options for press lifecycle listeners: non-passive, capture as given.
    pub const fn press(capture: bool) -> Self {
        Self {
            capture,
            passive: false,
        }
    }
}

/// A platform that can add and remove event listeners.
pub trait Surface {
    /// Element handle type.
    type Target: Clone + PartialEq;
    /// Token identifying one added listener.
    type Handle;

    /// Add a listener for `name` on `target`.
    fn listen(
        &mut self,
        target: &BindTarget<Self::Target>,
        name: &'static str,
        options: ListenOptions,
    ) -> Self::Handle;

    /// Remove a listener previously added by [`listen`](Surface::listen).
    fn unlisten(&mut self, handle: Self::Handle);
}

#[derive(Debug)]
struct Bound<T, H> {
    target: BindTarget<T>,
    name: &'static str,
    options: ListenOptions,
    handle: H,
}

/// One logical listener with at most one live binding.
#[derive(Debug)]
pub struct ListenerSlot<T, H> {
    bound: Option<Bound<T, H>>,
}

impl<T, H> Default for ListenerSlot<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H> ListenerSlot<T, H> {
    /// An unbound slot.
    pub const fn new() -> Self {
        Self { bound: None }
    }

    /// Whether a listener is live.
    pub const fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// The current target, if bound.
    pub fn target(&self) -> Option<&BindTarget<T>> {
        self.bound.as_ref().map(|b| &b.target)
    }

    /// Bind to `target`, replacing any previous binding; `None` detaches.
    ///
    /// Re-adding an identical binding keeps the live listener. Returns
    /// whether the surface was touched.
    pub fn add<S>(
        &mut self,
        surface: &mut S,
        target: Option<BindTarget<T>>,
        name: &'static str,
        options: ListenOptions,
    ) -> bool
    where
        S: Surface<Target = T, Handle = H> + ?Sized,
        T: Clone + PartialEq,
    {
        if let (Some(bound), Some(target)) = (&self.bound, &target) {
            if bound.target == *target && bound.name == name && bound.options == options {
                return false;
            }
        }
        let had = self.remove(surface);
        match target {
            Some(target) => {
                let handle = surface.listen(&target, name, options);
                self.bound = Some(Bound {
                    target,
                    name,
                    options,
                    handle,
                });
                true
            }
            None => had,
        }
    }

    /// Detach the live listener, if any. Returns whether one was removed.
    pub fn remove<S>(&mut self, surface: &mut S) -> bool
    where
        S: Surface<Target = T, Handle = H> + ?Sized,
    {
        match self.bound.take() {
            Some(bound) => {
                surface.unlisten(bound.handle);
                true
            }
            None => false,
        }
    }
}

/// The logical listeners of a mounted element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Press start.
    Start,
    /// Movement.
    Move,
    /// Press release.
    End,
    /// Platform cancellation.
    Cancel,
    /// Click.
    Click,
    /// Hover enter.
    Enter,
    /// Hover leave.
    Leave,
}

impl Listener {
    const COUNT: usize = 7;

    const fn index(self) -> usize {
        self as usize
    }
}

/// One [`ListenerSlot`] per [`Listener`].
#[derive(Debug)]
pub struct Bindings<T, H> {
    slots: [ListenerSlot<T, H>; Listener::COUNT],
}

impl<T, H> Default for Bindings<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H> Bindings<T, H> {
    /// No listeners bound.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| ListenerSlot::new()),
        }
    }

    /// The slot for `listener`.
    pub fn slot(&self, listener: Listener) -> &ListenerSlot<T, H> {
        &self.slots[listener.index()]
    }

    /// Bind `listener`; see [`ListenerSlot::add`].
    pub fn add<S>(
        &mut self,
        surface: &mut S,
        listener: Listener,
        target: Option<BindTarget<T>>,
        name: &'static str,
        options: ListenOptions,
    ) -> bool
    where
        S: Surface<Target = T, Handle = H> + ?Sized,
        T: Clone + PartialEq,
    {
        self.slots[listener.index()].add(surface, target, name, options)
    }

    /// Detach every listener.
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: Surface<Target = T, Handle = H> + ?Sized,
    {
        for slot in &mut self.slots {
            slot.remove(surface);
        }
    }

    /// Number of live listeners.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_bound()).count()
    }
}

/// Document-level move/end/cancel listeners held for one press.
///
/// Acquire with [`PressScope::acquire`] when a press starts and give back
/// with [`PressScope::release`] when it ends, so global input is only
/// captured while a gesture is in flight.
#[derive(Debug)]
#[must_use = "dropping a press scope without releasing it leaks document listeners"]
pub struct PressScope<T, H> {
    moved: ListenerSlot<T, H>,
    end: ListenerSlot<T, H>,
    cancel: ListenerSlot<T, H>,
}

impl<T: Clone + PartialEq, H> PressScope<T, H> {
    /// Bind move/end (and cancel, if the family has one) on the document.
    pub fn acquire<S>(surface: &mut S, names: EventNames, options: ListenOptions) -> Self
    where
        S: Surface<Target = T, Handle = H> + ?Sized,
    {
        let mut scope = Self {
            moved: ListenerSlot::new(),
            end: ListenerSlot::new(),
            cancel: ListenerSlot::new(),
        };
        scope
            .moved
            .add(surface, Some(BindTarget::Document), names.moved, options);
        scope
            .end
            .add(surface, Some(BindTarget::Document), names.end, options);
        if let Some(cancel) = names.cancel {
            scope
                .cancel
                .add(surface, Some(BindTarget::Document), cancel, options);
        }
        scope
    }

    /// Remove every listener the scope holds.
    pub fn release<S>(mut self, surface: &mut S)
    where
        S: Surface<Target = T, Handle = H> + ?Sized,
    {
        self.moved.remove(surface);
        self.end.remove(surface);
        self.cancel.remove(surface);
    }

    /// Number of live listeners held.
    pub fn live(&self) -> usize {
        [&self.moved, &self.end, &self.cancel]
            .iter()
            .filter(|s| s.is_bound())
            .count()
    }
}
