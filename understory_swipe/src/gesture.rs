// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture state machine: press tracking, axis lock, and slide detection.
//!
//! ## Usage
//!
//! 1) Begin a gesture with [`SwipeState::press`] at the press position.
//! 2) Feed each move sample to [`SwipeState::sample`]; once one axis moves at
//!    least the threshold and strictly more than the other, the gesture locks
//!    to it for good.
//! 3) Finish with [`SwipeState::release`], or [`SwipeState::abort`] when a
//!    second touch point shows up.
//!
//! Every transition consumes the state and returns a [`Step`]: the next state
//! plus what, if anything, should be dispatched to consumers.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_swipe::gesture::{Axis, Emit, EndReason, Phase, SwipeState};
//! use understory_swipe::handlers::Interest;
//!
//! let interest = Interest::MOVE_X;
//! let state = SwipeState::Idle.press(Point::new(0.0, 0.0), 1000).state;
//!
//! // (3, 1) is below the threshold: nothing locks.
//! let step = state.sample(Point::new(3.0, 1.0), interest, 5.0);
//! assert_eq!(step.state.phase(), Phase::Unlocked);
//! assert_eq!(step.emit, Emit::None);
//!
//! // (10, 1) locks X, and X has a consumer, so this is a slide.
//! let step = step.state.sample(Point::new(10.0, 1.0), interest, 5.0);
//! assert_eq!(step.state.phase(), Phase::LockedX);
//! assert!(matches!(step.emit, Emit::Move(g) if g.is_slide_x && g.axis() == Some(Axis::X)));
//!
//! let step = step.state.release(EndReason::Released);
//! assert_eq!(step.state, SwipeState::Idle);
//! assert!(matches!(step.emit, Emit::End(g, EndReason::Released) if g.is_slide));
//! ```

use kurbo::{Point, Vec2};

use crate::handlers::Interest;

/// One of the two gesture axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// Snapshot of an in-flight gesture.
///
/// Axis flags are decided once per gesture and never flip afterwards;
/// `is_x` and `is_y` are never both set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gesture {
    /// Press position.
    pub start: Point,
    /// Press timestamp in milliseconds.
    pub start_time: u64,
    /// True from press until release or cancel.
    pub is_pressed: bool,
    /// Locked to the horizontal axis.
    pub is_x: bool,
    /// Locked to the vertical axis.
    pub is_y: bool,
    /// Locked horizontally and some consumer wants horizontal moves.
    pub is_slide_x: bool,
    /// Locked vertically and some consumer wants vertical moves.
    pub is_slide_y: bool,
    /// `is_slide_x || is_slide_y`.
    pub is_slide: bool,
    /// Signed displacement from `start`.
    pub shift: Vec2,
    /// Absolute value of `shift`, per component.
    pub shift_abs: Vec2,
}

impl Gesture {
    /// The cleared gesture record.
    pub const EMPTY: Self = Self {
        start: Point::ZERO,
        start_time: 0,
        is_pressed: false,
        is_x: false,
        is_y: false,
        is_slide_x: false,
        is_slide_y: false,
        is_slide: false,
        shift: Vec2::ZERO,
        shift_abs: Vec2::ZERO,
    };

    /// A freshly pressed, unlocked gesture.
    pub const fn pressed(start: Point, start_time: u64) -> Self {
        Self {
            start,
            start_time,
            is_pressed: true,
            ..Self::EMPTY
        }
    }

    /// The locked axis, if any.
    pub const fn axis(&self) -> Option<Axis> {
        if self.is_x {
            Some(Axis::X)
        } else if self.is_y {
            Some(Axis::Y)
        } else {
            None
        }
    }

    /// Milliseconds elapsed since the press, saturating at zero.
    pub const fn duration(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_time)
    }

    fn track(&mut self, at: Point) {
        self.shift = at - self.start;
        self.shift_abs = Vec2::new(self.shift.x.abs(), self.shift.y.abs());
    }

    /// Decide the axis lock from the current shift, at most once.
    fn try_lock(&mut self, interest: Interest, threshold: f64) {
        if self.axis().is_some() {
            return;
        }
        let Vec2 { x, y } = self.shift_abs;
        if x >= threshold && x > y {
            self.is_x = true;
            self.is_slide_x = interest.slides(Axis::X);
        } else if y >= threshold && y > x {
            self.is_y = true;
            self.is_slide_y = interest.slides(Axis::Y);
        } else {
            if x >= threshold && x == y {
                log::trace!("swipe: tied shift {x} on both axes, lock deferred");
            }
            return;
        }
        self.is_slide = self.is_slide_x || self.is_slide_y;
        log::trace!(
            "swipe: locked {:?} at shift ({}, {}), slide: {}",
            self.axis(),
            self.shift.x,
            self.shift.y,
            self.is_slide
        );
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Coarse phase of the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No press in flight.
    Idle,
    /// Pressed, no axis decided yet.
    Unlocked,
    /// Pressed and locked horizontally.
    LockedX,
    /// Pressed and locked vertically.
    LockedY,
}

/// Why a gesture ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The press was released.
    Released,
    /// The platform cancelled the press.
    Cancelled,
    /// A second touch point appeared mid-gesture.
    MultiTouch,
}

/// What a transition asks the caller to dispatch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Emit {
    /// Nothing observable happened.
    None,
    /// A press began.
    Start(Gesture),
    /// A slide moved.
    Move(Gesture),
    /// A gesture ended; carries its final snapshot.
    End(Gesture, EndReason),
}

/// Result of a transition.
#[derive(Copy, Clone, Debug, PartialEq)]
#[must_use = "a step carries the next state"]
pub struct Step {
    /// The state to keep.
    pub state: SwipeState,
    /// The dispatch the transition produced.
    pub emit: Emit,
}

impl Step {
    const fn quiet(state: SwipeState) -> Self {
        Self {
            state,
            emit: Emit::None,
        }
    }
}

/// The press state machine.
///
/// Transitions take the state by value and hand back the next one, so a
/// gesture record is never shared between handlers.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum SwipeState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A press is in flight.
    Pressed(Gesture),
}

impl SwipeState {
    /// Coarse phase, for introspection.
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Pressed(g) => match g.axis() {
                None => Phase::Unlocked,
                Some(Axis::X) => Phase::LockedX,
                Some(Axis::Y) => Phase::LockedY,
            },
        }
    }

    /// The in-flight gesture, if pressed.
    pub const fn gesture(&self) -> Option<&Gesture> {
        match self {
            Self::Idle => None,
            Self::Pressed(g) => Some(g),
        }
    }

    /// Whether a press is in flight.
    pub const fn is_pressed(&self) -> bool {
        matches!(self, Self::Pressed(_))
    }

    /// Start a gesture at `at`.
    ///
    /// A press while already pressed discards the old gesture without
    /// ending it.
    pub fn press(self, at: Point, now: u64) -> Step {
        if self.is_pressed() {
            log::trace!("swipe: press while pressed, previous gesture discarded");
        }
        let gesture = Gesture::pressed(at, now);
        log::trace!("swipe: press at ({}, {})", at.x, at.y);
        Step {
            state: Self::Pressed(gesture),
            emit: Emit::Start(gesture),
        }
    }

    /// Feed a move sample.
    ///
    /// Outside a press this is a no-op. While unlocked, the sample may lock
    /// an axis; a move is emitted only for slides, starting with the sample
    /// that locked.
    pub fn sample(self, at: Point, interest: Interest, threshold: f64) -> Step {
        let Self::Pressed(mut gesture) = self else {
            return Step::quiet(self);
        };
        gesture.track(at);
        gesture.try_lock(interest, threshold);
        let emit = if gesture.is_slide {
            Emit::Move(gesture)
        } else {
            Emit::None
        };
        Step {
            state: Self::Pressed(gesture),
            emit,
        }
    }

    /// End the gesture. Outside a press this is a no-op.
    pub fn release(self, reason: EndReason) -> Step {
        match self {
            Self::Idle => Step::quiet(self),
            Self::Pressed(gesture) => {
                log::trace!("swipe: end ({reason:?}), slide: {}", gesture.is_slide);
                Step {
                    state: Self::Idle,
                    emit: Emit::End(gesture, reason),
                }
            }
        }
    }

    /// End the gesture because a second touch point appeared.
    ///
    /// The ending snapshot is the one from before the offending sample.
    pub fn abort(self) -> Step {
        if self.is_pressed() {
            log::debug!("swipe: multi-touch detected, aborting gesture");
        }
        self.release(EndReason::MultiTouch)
    }
}
