// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event source adapter: one lifecycle over pointer, touch, and mouse input.
//!
//! Browsers deliver the same physical interaction through up to three event
//! families. This module hides that behind two pieces:
//!
//! - [`EventSource`]: a strategy value probed once from [`Capabilities`]. It
//!   names the start/move/end/cancel events to listen for and records whether
//!   the environment is touch capable.
//! - [`InputEvent`]: the per-event view the recognizer needs (coordinates,
//!   active touch count, propagation control). Implement it for your
//!   platform's event type.
//!
//! ## Minimal example
//!
//! ```
//! use understory_swipe::source::{Capabilities, EventSource, InputFamily, Signal};
//!
//! let source = EventSource::probe(Capabilities { pointer_events: false, touch: true });
//! assert_eq!(source.family(), InputFamily::Touch);
//! assert_eq!(source.names().start, "touchstart");
//! assert_eq!(source.signal_for("touchcancel"), Some(Signal::Cancel));
//!
//! // Mouse environments have no cancel event.
//! let source = EventSource::probe(Capabilities::default());
//! assert_eq!(source.names().name(Signal::Cancel), None);
//! ```

use kurbo::Point;

/// The event family an input event belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputFamily {
    /// Pointer events (`pointerdown`, `pointermove`, ...).
    Pointer,
    /// Touch events (`touchstart`, `touchmove`, ...).
    Touch,
    /// Mouse events (`mousedown`, `mousemove`, ...).
    Mouse,
}

impl InputFamily {
    /// Lifecycle event names for this family.
    pub const fn event_names(self) -> EventNames {
        match self {
            Self::Pointer => EventNames::POINTER,
            Self::Touch => EventNames::TOUCH,
            Self::Mouse => EventNames::MOUSE,
        }
    }
}

/// A press lifecycle signal, independent of the family that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Press started.
    Start,
    /// Pointer moved while (possibly) pressed.
    Move,
    /// Press released.
    End,
    /// Press cancelled by the platform.
    Cancel,
}

/// Start/move/end/cancel event names for one input family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventNames {
    /// Press start.
    pub start: &'static str,
    /// Movement.
    pub moved: &'static str,
    /// Press release.
    pub end: &'static str,
    /// Platform cancellation, if the family has one.
    pub cancel: Option<&'static str>,
}

impl EventNames {
    /// Pointer event names.
    pub const POINTER: Self = Self {
        start: "pointerdown",
        moved: "pointermove",
        end: "pointerup",
        cancel: Some("pointercancel"),
    };

    /// Touch event names.
    pub const TOUCH: Self = Self {
        start: "touchstart",
        moved: "touchmove",
        end: "touchend",
        cancel: Some("touchcancel"),
    };

    /// Mouse event names. Mice have no cancel event.
    pub const MOUSE: Self = Self {
        start: "mousedown",
        moved: "mousemove",
        end: "mouseup",
        cancel: None,
    };

    /// The event name carrying `signal`, if any.
    pub const fn name(&self, signal: Signal) -> Option<&'static str> {
        match signal {
            Signal::Start => Some(self.start),
            Signal::Move => Some(self.moved),
            Signal::End => Some(self.end),
            Signal::Cancel => self.cancel,
        }
    }

    /// Map an event name back to its signal.
    pub fn signal_for(&self, name: &str) -> Option<Signal> {
        if name == self.start {
            Some(Signal::Start)
        } else if name == self.moved {
            Some(Signal::Move)
        } else if name == self.end {
            Some(Signal::End)
        } else if self.cancel == Some(name) {
            Some(Signal::Cancel)
        } else {
            None
        }
    }
}

/// What the host environment supports, as probed by the embedder.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Pointer events are available.
    pub pointer_events: bool,
    /// The environment is touch capable.
    pub touch: bool,
}

/// The input strategy chosen once for an environment.
///
/// Pointer events win when available. Otherwise touch-capable environments
/// use touch events and everything else falls back to mouse events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventSource {
    family: InputFamily,
    touch: bool,
}

impl EventSource {
    /// Pick the event family for the given capabilities.
    pub const fn probe(capabilities: Capabilities) -> Self {
        let family = if capabilities.pointer_events {
            InputFamily::Pointer
        } else if capabilities.touch {
            InputFamily::Touch
        } else {
            InputFamily::Mouse
        };
        Self {
            family,
            touch: capabilities.touch,
        }
    }

    /// The family whose lifecycle events are bound.
    pub const fn family(&self) -> InputFamily {
        self.family
    }

    /// Whether the environment is touch capable.
    ///
    /// Touch-capable environments bind the whole press lifecycle to the
    /// element at mount time; others bind move/end to the document only
    /// while a press is active.
    pub const fn is_touch_capable(&self) -> bool {
        self.touch
    }

    /// Lifecycle event names for the chosen family.
    pub const fn names(&self) -> EventNames {
        self.family.event_names()
    }

    /// Map an event name of the chosen family to its signal.
    pub fn signal_for(&self, name: &str) -> Option<Signal> {
        self.names().signal_for(name)
    }
}

/// The view of a raw input event the recognizer works with.
///
/// Only [`family`](InputEvent::family), [`client_position`](InputEvent::client_position)
/// and the propagation controls are required. Touch accessors default to
/// "no touches", which is right for pointer and mouse events.
pub trait InputEvent {
    /// The family this event belongs to.
    fn family(&self) -> InputFamily;

    /// Number of touch points currently on the surface.
    fn touch_count(&self) -> usize {
        0
    }

    /// Position of the first active touch point.
    fn primary_touch(&self) -> Option<Point> {
        None
    }

    /// Position of the first changed touch point.
    ///
    /// On `touchend` the lifted finger is no longer active, so this is the
    /// only place its position survives.
    fn changed_touch(&self) -> Option<Point> {
        None
    }

    /// Client coordinates of pointer and mouse events.
    fn client_position(&self) -> Option<Point>;

    /// Identifier of the pointer behind a pointer event.
    ///
    /// Pointer events report every finger separately, so this is how a
    /// second finger is told apart from the one that started the press.
    /// `None` for events that carry no id.
    fn pointer_id(&self) -> Option<i32> {
        None
    }

    /// Whether the event target is nested inside a link-like element.
    fn targets_link(&self) -> bool {
        false
    }

    /// Prevent the platform's default action for this event.
    fn prevent_default(&mut self);

    /// Stop this event from propagating further.
    fn stop_propagation(&mut self);
}

/// Extract the position of an event.
///
/// Sources are tried in order: primary touch, changed touch, client
/// coordinates. Returns `None` only for events that carry none of them.
pub fn locate<E: InputEvent + ?Sized>(event: &E) -> Option<Point> {
    event
        .primary_touch()
        .or_else(|| event.changed_touch())
        .or_else(|| event.client_position())
}
