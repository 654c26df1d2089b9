// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composed recognizer: one element, one set of callbacks.
//!
//! [`Swipe`] owns the listener surface, the gesture state machine, the click
//! gate and the hover shim, and routes raw input through them:
//!
//! - [`Swipe::mount`] binds listeners on an element.
//! - [`Swipe::handle`] (or [`Swipe::route`] by event name) feeds the press
//!   lifecycle.
//! - [`Swipe::handle_click`], [`Swipe::handle_enter`] and
//!   [`Swipe::handle_leave`] cover the rest.
//!
//! All handling is synchronous; callbacks for one input event run in a fixed
//! order before the call returns.

use crate::binding::{BindTarget, Bindings, ListenOptions, Listener, PressScope, Surface};
use crate::click::{ClickGate, ClickVerdict};
use crate::config::SwipeConfig;
use crate::gesture::{Emit, EndReason, Gesture, Phase, Step, SwipeState};
use crate::handlers::{Handlers, SwipeEvent};
use crate::hover::{HoverFamily, HoverShim, HoverSignal};
use crate::source::{EventSource, InputEvent, Signal, locate};

/// Event name of clicks.
pub const CLICK: &str = "click";

/// Swipe recognizer for one element.
pub struct Swipe<S: Surface, E> {
    surface: S,
    source: EventSource,
    config: SwipeConfig,
    handlers: Handlers<E>,
    state: SwipeState,
    gate: ClickGate,
    hover: HoverShim,
    element: Option<S::Target>,
    bindings: Bindings<S::Target, S::Handle>,
    press: Option<PressScope<S::Target, S::Handle>>,
    pointer: Option<i32>,
}

impl<S, E> core::fmt::Debug for Swipe<S, E>
where
    S: Surface + core::fmt::Debug,
    S::Target: core::fmt::Debug,
    S::Handle: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Swipe")
            .field("surface", &self.surface)
            .field("source", &self.source)
            .field("config", &self.config)
            .field("handlers", &self.handlers)
            .field("state", &self.state)
            .field("gate", &self.gate)
            .field("hover", &self.hover)
            .field("element", &self.element)
            .field("bindings", &self.bindings)
            .field("press", &self.press)
            .field("pointer", &self.pointer)
            .finish()
    }
}

impl<S: Surface, E: InputEvent> Swipe<S, E> {
    /// Create an unmounted recognizer.
    ///
    /// `source` is the strategy probed for the environment; it is not
    /// re-probed per event.
    pub fn new(surface: S, source: EventSource, config: SwipeConfig, handlers: Handlers<E>) -> Self {
        Self {
            surface,
            source,
            config,
            handlers,
            state: SwipeState::Idle,
            gate: ClickGate::new(),
            hover: HoverShim::new(HoverFamily::select(config.use_pointer_hover)),
            element: None,
            bindings: Bindings::new(),
            press: None,
            pointer: None,
        }
    }

    /// The listener surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The listener surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The probed input strategy.
    pub fn source(&self) -> EventSource {
        self.source
    }

    /// The options in effect.
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// The hover shim.
    pub fn hover(&self) -> HoverShim {
        self.hover
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The in-flight gesture, if pressed.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.state.gesture()
    }

    /// Whether the next click follows a slide.
    pub fn did_slide(&self) -> bool {
        self.gate.did_slide()
    }

    /// The element-level bindings.
    pub fn bindings(&self) -> &Bindings<S::Target, S::Handle> {
        &self.bindings
    }

    /// Whether document-level listeners are held for an active press.
    pub fn holds_press_scope(&self) -> bool {
        self.press.is_some()
    }

    /// Bind listeners on `element`.
    ///
    /// Start and click are always bound. Touch-capable environments also
    /// bind move/end/cancel on the element; elsewhere those go to the
    /// document only while pressed. Hover listeners are bound only if an
    /// enter or leave callback exists. Mounting again rebinds in place.
    pub fn mount(&mut self, element: S::Target) {
        let names = self.source.names();
        let press = ListenOptions::press(self.config.use_capture);
        let el = Some(BindTarget::Element(element.clone()));
        let b = &mut self.bindings;
        let s = &mut self.surface;

        b.add(s, Listener::Start, el.clone(), names.start, press);
        if self.source.is_touch_capable() {
            b.add(s, Listener::Move, el.clone(), names.moved, press);
            b.add(s, Listener::End, el.clone(), names.end, press);
            let cancel = names.cancel.and(el.clone());
            b.add(s, Listener::Cancel, cancel, names.cancel.unwrap_or_default(), press);
        } else {
            b.add(s, Listener::Move, None, names.moved, press);
            b.add(s, Listener::End, None, names.end, press);
            b.add(s, Listener::Cancel, None, "", press);
        }

        b.add(s, Listener::Click, el.clone(), CLICK, ListenOptions::default());

        let hover = self.handlers.interest().hovers().then_some(el).flatten();
        let family = self.hover.family();
        b.add(
            s,
            Listener::Enter,
            hover.clone(),
            family.enter_name(),
            ListenOptions::default(),
        );
        b.add(
            s,
            Listener::Leave,
            hover,
            family.leave_name(),
            ListenOptions::default(),
        );

        log::trace!("swipe: mounted, {} listeners", self.bindings.live());
        self.element = Some(element);
    }

    /// Detach every listener and discard any in-flight gesture.
    pub fn unmount(&mut self) {
        self.bindings.clear(&mut self.surface);
        if let Some(scope) = self.press.take() {
            scope.release(&mut self.surface);
        }
        self.state = SwipeState::Idle;
        self.pointer = None;
        self.hover.pressed();
        self.element = None;
    }

    /// The mounted element, if any.
    pub fn element(&self) -> Option<&S::Target> {
        self.element.as_ref()
    }

    /// Feed a press lifecycle signal.
    pub fn handle(&mut self, signal: Signal, event: &mut E, now: u64) {
        match signal {
            Signal::Start => self.handle_start(event, now),
            Signal::Move => self.handle_move(event, now),
            Signal::End => self.handle_end(event, now, EndReason::Released),
            Signal::Cancel => self.handle_end(event, now, EndReason::Cancelled),
        }
    }

    /// Feed an event by name. Returns `false` for names this recognizer
    /// does not listen to.
    pub fn route(&mut self, name: &str, event: &mut E, now: u64) -> bool {
        if let Some(signal) = self.source.signal_for(name) {
            self.handle(signal, event, now);
        } else if name == CLICK {
            self.handle_click(event);
        } else if let Some(signal) = self.hover.signal_for(name) {
            match signal {
                HoverSignal::Enter => self.handle_enter(event),
                HoverSignal::Leave => self.handle_leave(event),
            }
        } else {
            return false;
        }
        true
    }

    /// Press start.
    ///
    /// A start from a second pointer while pressed is a multi-touch and
    /// aborts the gesture.
    pub fn handle_start(&mut self, event: &mut E, now: u64) {
        self.guard(event);
        if self.state.is_pressed() && self.is_foreign(event) {
            let step = self.state.abort();
            self.apply(step, event, now);
            return;
        }
        let Some(at) = locate(event) else {
            log::trace!("swipe: start without coordinates ignored");
            return;
        };
        let step = self.state.press(at, now);
        self.pointer = event.pointer_id();
        self.hover.pressed();
        if !self.source.is_touch_capable() && self.press.is_none() {
            let press = ListenOptions::press(self.config.use_capture);
            self.press = Some(PressScope::acquire(
                &mut self.surface,
                self.source.names(),
                press,
            ));
        }
        self.apply(step, event, now);
    }

    /// Movement. A no-op outside a press or from another pointer.
    pub fn handle_move(&mut self, event: &mut E, now: u64) {
        if !self.state.is_pressed() || self.is_foreign(event) {
            return;
        }
        self.guard(event);
        let step = if event.touch_count() > 1 {
            self.state.abort()
        } else if let Some(at) = locate(event) {
            let interest = self.handlers.interest();
            self.state.sample(at, interest, self.config.slide_threshold())
        } else {
            log::trace!("swipe: move without coordinates ignored");
            return;
        };
        self.apply(step, event, now);
    }

    /// Release or cancel. Ignored from another pointer.
    ///
    /// Outside a press the only effect is a leave still owed by a
    /// multi-touch abort.
    pub fn handle_end(&mut self, event: &mut E, now: u64, reason: EndReason) {
        if !self.state.is_pressed() {
            if self.hover.idle_end(event.family(), reason) {
                self.guard(event);
                self.handlers.leave(event);
            }
            return;
        }
        if self.is_foreign(event) {
            return;
        }
        self.guard(event);
        let step = self.state.release(reason);
        self.apply(step, event, now);
    }

    /// Click; runs the click gate and forwards if allowed.
    pub fn handle_click(&mut self, event: &mut E) -> ClickVerdict {
        let verdict = self.gate.filter(event, self.config.no_slide_click);
        if verdict == ClickVerdict::Forward {
            self.handlers.click(event);
        }
        verdict
    }

    /// Native hover enter.
    pub fn handle_enter(&mut self, event: &mut E) {
        self.guard(event);
        self.handlers.enter(event);
    }

    /// Native hover leave.
    pub fn handle_leave(&mut self, event: &mut E) {
        self.guard(event);
        self.handlers.leave(event);
    }

    /// Whether `event` comes from a pointer other than the pressed one.
    fn is_foreign(&self, event: &E) -> bool {
        matches!((self.pointer, event.pointer_id()), (Some(held), Some(id)) if held != id)
    }

    fn guard(&self, event: &mut E) {
        if self.config.stop_propagation {
            event.stop_propagation();
        }
    }

    fn apply(&mut self, step: Step, event: &E, now: u64) {
        self.state = step.state;
        match step.emit {
            Emit::None => {}
            Emit::Start(g) => self.handlers.start(&SwipeEvent {
                gesture: &g,
                duration: g.duration(now),
                event,
            }),
            Emit::Move(g) => self.handlers.moved(&SwipeEvent {
                gesture: &g,
                duration: g.duration(now),
                event,
            }),
            Emit::End(g, reason) => {
                self.handlers.end(&SwipeEvent {
                    gesture: &g,
                    duration: g.duration(now),
                    event,
                });
                self.gate.record(g.is_slide);
                self.pointer = None;
                if let Some(scope) = self.press.take() {
                    scope.release(&mut self.surface);
                }
                if self.hover.gesture_ended(event.family(), reason) {
                    self.handlers.leave(event);
                }
            }
        }
    }
}
