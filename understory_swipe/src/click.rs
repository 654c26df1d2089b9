// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click suppression after slides.
//!
//! Platforms synthesize a click after most presses, including ones the user
//! meant as a swipe. [`ClickGate`] remembers whether the last gesture was a
//! slide and decides what the next click may do:
//!
//! - No slide: the click is forwarded untouched.
//! - Slide: default navigation is prevented if the click lands inside a link.
//!   With `no_slide_click` the click is also stopped and swallowed; without
//!   it the click is forwarded after the link default is prevented.
//!
//! Either way the flag is consumed by that click.

use crate::source::InputEvent;

/// What to do with a click after the gate ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClickVerdict {
    /// Hand the click to the consumer.
    Forward,
    /// Drop the click.
    Swallow,
}

/// Single-slot memory of whether the last gesture was a slide.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClickGate {
    did_slide: bool,
}

impl ClickGate {
    /// A gate with the flag cleared.
    pub const fn new() -> Self {
        Self { did_slide: false }
    }

    /// Whether the next click follows a slide.
    pub const fn did_slide(&self) -> bool {
        self.did_slide
    }

    /// Record the outcome of a finished gesture.
    pub fn record(&mut self, is_slide: bool) {
        self.did_slide = is_slide;
    }

    /// Run the gate over a click and consume the flag.
    pub fn filter<E: InputEvent + ?Sized>(
        &mut self,
        event: &mut E,
        no_slide_click: bool,
    ) -> ClickVerdict {
        if !core::mem::take(&mut self.did_slide) {
            return ClickVerdict::Forward;
        }
        if event.targets_link() {
            event.prevent_default();
        }
        if no_slide_click {
            log::debug!("swipe: click after slide swallowed");
            event.stop_propagation();
            ClickVerdict::Swallow
        } else {
            ClickVerdict::Forward
        }
    }
}
