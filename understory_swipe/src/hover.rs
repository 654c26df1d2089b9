// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover shim: enter/leave that behaves the same for every input family.
//!
//! Enter/leave are bound to pointer events or mouse events. Pointer events
//! also fire over disabled form controls, mouse events do not. Touch has no
//! leave at all, so a press ended by `touchend`/`touchcancel` yields a
//! synthesized leave. A multi-touch abort defers that leave to the
//! `touchend`/`touchcancel` that follows it.

use crate::gesture::EndReason;
use crate::source::InputFamily;

/// The event family hover is bound to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverFamily {
    /// `pointerenter` / `pointerleave`.
    Pointer,
    /// `mouseenter` / `mouseleave`.
    #[default]
    Mouse,
}

impl HoverFamily {
    /// Pick the family from the `use_pointer_hover` option.
    pub const fn select(use_pointer_hover: bool) -> Self {
        if use_pointer_hover {
            Self::Pointer
        } else {
            Self::Mouse
        }
    }

    /// Name of the enter event.
    pub const fn enter_name(self) -> &'static str {
        match self {
            Self::Pointer => "pointerenter",
            Self::Mouse => "mouseenter",
        }
    }

    /// Name of the leave event.
    pub const fn leave_name(self) -> &'static str {
        match self {
            Self::Pointer => "pointerleave",
            Self::Mouse => "mouseleave",
        }
    }
}

/// A hover signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverSignal {
    /// The pointer entered.
    Enter,
    /// The pointer left.
    Leave,
}

/// Hover bookkeeping for one element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HoverShim {
    family: HoverFamily,
    leave_pending: bool,
}

impl HoverShim {
    /// A shim bound to `family`.
    pub const fn new(family: HoverFamily) -> Self {
        Self {
            family,
            leave_pending: false,
        }
    }

    /// The bound family.
    pub const fn family(&self) -> HoverFamily {
        self.family
    }

    /// Map an event name to a hover signal.
    pub fn signal_for(&self, name: &str) -> Option<HoverSignal> {
        if name == self.family.enter_name() {
            Some(HoverSignal::Enter)
        } else if name == self.family.leave_name() {
            Some(HoverSignal::Leave)
        } else {
            None
        }
    }

    /// Whether a gesture ending this way should synthesize a leave.
    ///
    /// Only a touch release or touch cancel qualifies; a multi-touch abort
    /// happens on a touch move and leaves hover alone.
    pub const fn leaves_on_end(&self, family: InputFamily, reason: EndReason) -> bool {
        matches!(family, InputFamily::Touch)
            && matches!(reason, EndReason::Released | EndReason::Cancelled)
    }

    /// Whether a leave is owed from an earlier multi-touch abort.
    pub const fn is_leave_pending(&self) -> bool {
        self.leave_pending
    }

    /// Record how a gesture ended; returns whether to synthesize a leave now.
    ///
    /// A touch multi-touch abort returns `false` but owes a leave to the next
    /// touch release or cancel.
    pub fn gesture_ended(&mut self, family: InputFamily, reason: EndReason) -> bool {
        if matches!(family, InputFamily::Touch) && reason == EndReason::MultiTouch {
            self.leave_pending = true;
            return false;
        }
        self.leave_pending = false;
        self.leaves_on_end(family, reason)
    }

    /// An end or cancel arrived with no gesture in flight; returns whether it
    /// settles an owed leave.
    pub fn idle_end(&mut self, family: InputFamily, reason: EndReason) -> bool {
        let due = self.leave_pending && self.leaves_on_end(family, reason);
        if due {
            self.leave_pending = false;
        }
        due
    }

    /// A new press supersedes any owed leave.
    pub fn pressed(&mut self) {
        self.leave_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_follows_option() {
        assert_eq!(HoverFamily::select(true), HoverFamily::Pointer);
        assert_eq!(HoverFamily::select(false), HoverFamily::Mouse);
        assert_eq!(HoverFamily::default(), HoverFamily::Mouse);
    }

    #[test]
    fn names_match_family() {
        let shim = HoverShim::new(HoverFamily::Pointer);
        assert_eq!(shim.signal_for("pointerenter"), Some(HoverSignal::Enter));
        assert_eq!(shim.signal_for("pointerleave"), Some(HoverSignal::Leave));
        assert_eq!(shim.signal_for("mouseenter"), None);

        let shim = HoverShim::new(HoverFamily::Mouse);
        assert_eq!(shim.signal_for("mouseleave"), Some(HoverSignal::Leave));
        assert_eq!(shim.signal_for("pointerleave"), None);
    }

    #[test]
    fn only_touch_release_synthesizes_leave() {
        let shim = HoverShim::default();
        assert!(shim.leaves_on_end(InputFamily::Touch, EndReason::Released));
        assert!(shim.leaves_on_end(InputFamily::Touch, EndReason::Cancelled));
        assert!(!shim.leaves_on_end(InputFamily::Touch, EndReason::MultiTouch));
        assert!(!shim.leaves_on_end(InputFamily::Pointer, EndReason::Released));
        assert!(!shim.leaves_on_end(InputFamily::Mouse, EndReason::Released));
    }

    #[test]
    fn touch_abort_owes_one_leave() {
        let mut shim = HoverShim::default();
        assert!(!shim.gesture_ended(InputFamily::Touch, EndReason::MultiTouch));
        assert!(shim.is_leave_pending());
        assert!(!shim.idle_end(InputFamily::Mouse, EndReason::Released));
        assert!(shim.idle_end(InputFamily::Touch, EndReason::Released));
        assert!(!shim.idle_end(InputFamily::Touch, EndReason::Released));
        assert!(!shim.is_leave_pending());
    }

    #[test]
    fn pointer_abort_owes_nothing() {
        let mut shim = HoverShim::default();
        assert!(!shim.gesture_ended(InputFamily::Pointer, EndReason::MultiTouch));
        assert!(!shim.is_leave_pending());
        assert!(!shim.idle_end(InputFamily::Pointer, EndReason::Released));
    }

    #[test]
    fn new_press_drops_owed_leave() {
        let mut shim = HoverShim::default();
        shim.gesture_ended(InputFamily::Touch, EndReason::MultiTouch);
        shim.pressed();
        assert!(!shim.idle_end(InputFamily::Touch, EndReason::Cancelled));
        assert!(shim.gesture_ended(InputFamily::Touch, EndReason::Released));
    }
}
