// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for the `understory_swipe` crate.
//!
//! These drive a mounted [`Swipe`] with scripted input and check which
//! callbacks fire, in which order, and what happens to the click afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use understory_swipe::binding::{BindTarget, ListenOptions, Surface};
use understory_swipe::click::ClickVerdict;
use understory_swipe::gesture::Phase;
use understory_swipe::source::{Capabilities, EventSource, InputEvent, InputFamily, Signal};
use understory_swipe::{Handlers, Swipe, SwipeConfig, SwipeEvent};

#[derive(Default)]
struct Dom {
    live: Vec<(BindTarget<&'static str>, &'static str)>,
}

impl Surface for Dom {
    type Target = &'static str;
    type Handle = (BindTarget<&'static str>, &'static str);

    fn listen(
        &mut self,
        target: &BindTarget<&'static str>,
        name: &'static str,
        _: ListenOptions,
    ) -> Self::Handle {
        self.live.push((*target, name));
        (*target, name)
    }

    fn unlisten(&mut self, handle: Self::Handle) {
        self.live.retain(|l| *l != handle);
    }
}

#[derive(Clone, Debug)]
struct Input {
    family: InputFamily,
    touches: Vec<Point>,
    changed: Option<Point>,
    client: Option<Point>,
    pointer: Option<i32>,
    in_link: bool,
    prevented: bool,
    stopped: bool,
}

impl Input {
    fn pointer(x: f64, y: f64) -> Self {
        Self {
            family: InputFamily::Pointer,
            touches: Vec::new(),
            changed: None,
            client: Some(Point::new(x, y)),
            pointer: None,
            in_link: false,
            prevented: false,
            stopped: false,
        }
    }

    fn touch(points: &[(f64, f64)]) -> Self {
        Self {
            family: InputFamily::Touch,
            touches: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            changed: points.first().map(|&(x, y)| Point::new(x, y)),
            client: None,
            pointer: None,
            in_link: false,
            prevented: false,
            stopped: false,
        }
    }

    fn touch_end(x: f64, y: f64) -> Self {
        Self {
            touches: Vec::new(),
            changed: Some(Point::new(x, y)),
            ..Self::touch(&[])
        }
    }

    fn finger(id: i32, x: f64, y: f64) -> Self {
        Self {
            pointer: Some(id),
            ..Self::pointer(x, y)
        }
    }

    fn link_click() -> Self {
        Self {
            in_link: true,
            ..Self::pointer(0.0, 0.0)
        }
    }
}

impl InputEvent for Input {
    fn family(&self) -> InputFamily {
        self.family
    }
    fn touch_count(&self) -> usize {
        self.touches.len()
    }
    fn primary_touch(&self) -> Option<Point> {
        self.touches.first().copied()
    }
    fn changed_touch(&self) -> Option<Point> {
        self.changed
    }
    fn client_position(&self) -> Option<Point> {
        self.client
    }
    fn pointer_id(&self) -> Option<i32> {
        self.pointer
    }
    fn targets_link(&self) -> bool {
        self.in_link
    }
    fn prevent_default(&mut self) {
        self.prevented = true;
    }
    fn stop_propagation(&mut self) {
        self.stopped = true;
    }
}

type Log = Rc<RefCell<Vec<String>>>;

fn note(log: &Log, name: &'static str) -> impl FnMut(&SwipeEvent<'_, Input>) + 'static {
    let log = log.clone();
    move |e| {
        let g = e.gesture;
        log.borrow_mut()
            .push(format!("{name} ({}, {})", g.shift.x, g.shift.y));
    }
}

fn pointer_env() -> EventSource {
    EventSource::probe(Capabilities {
        pointer_events: true,
        touch: false,
    })
}

fn touch_env() -> EventSource {
    EventSource::probe(Capabilities {
        pointer_events: false,
        touch: true,
    })
}

fn mounted(source: EventSource, config: SwipeConfig, handlers: Handlers<Input>) -> Swipe<Dom, Input> {
    let mut swipe = Swipe::new(Dom::default(), source, config, handlers);
    swipe.mount("slider");
    swipe
}

fn drive(swipe: &mut Swipe<Dom, Input>, script: &[(Signal, (f64, f64))]) {
    for (i, &(signal, (x, y))) in script.iter().enumerate() {
        swipe.handle(signal, &mut Input::pointer(x, y), i as u64 * 10);
    }
}

#[test]
fn no_move_callbacks_before_threshold() {
    let log = Log::default();
    let handlers = Handlers::new()
        .on_move(note(&log, "move"))
        .on_move_x(note(&log, "move_x"))
        .on_move_y(note(&log, "move_y"));
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[
            (Signal::Start, (100.0, 100.0)),
            (Signal::Move, (101.0, 100.0)),
            (Signal::Move, (103.0, 98.0)),
            (Signal::Move, (96.0, 104.0)),
        ],
    );
    assert_eq!(swipe.phase(), Phase::Unlocked);
    assert!(log.borrow().is_empty());
}

#[test]
fn horizontal_slide_scenario() {
    let log = Log::default();
    let handlers = Handlers::new()
        .on_move_x(note(&log, "move_x"))
        .on_move_y(note(&log, "move_y"));
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[(Signal::Start, (0.0, 0.0)), (Signal::Move, (10.0, 1.0))],
    );
    let g = swipe.gesture().unwrap();
    assert!(g.is_x && !g.is_y);
    assert!(g.is_slide_x);
    assert_eq!(*log.borrow(), ["move_x (10, 1)"]);
}

#[test]
fn horizontal_lock_without_x_interest_is_silent() {
    let log = Log::default();
    let handlers = Handlers::new().on_move_y(note(&log, "move_y"));
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[(Signal::Start, (0.0, 0.0)), (Signal::Move, (10.0, 1.0))],
    );
    let g = swipe.gesture().unwrap();
    assert!(g.is_x && !g.is_slide_x && !g.is_slide);
    assert!(log.borrow().is_empty());
}

#[test]
fn vertical_lock_after_small_first_sample() {
    let log = Log::default();
    let handlers = Handlers::new().on_move(note(&log, "move"));
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[
            (Signal::Start, (0.0, 0.0)),
            (Signal::Move, (2.0, 2.0)),
        ],
    );
    assert_eq!(swipe.phase(), Phase::Unlocked);
    drive_one(&mut swipe, Signal::Move, (1.0, 8.0), 20);
    assert_eq!(swipe.phase(), Phase::LockedY);
    assert_eq!(*log.borrow(), ["move (1, 8)"]);
}

#[test]
fn tie_defers_lock_until_broken() {
    let mut swipe = mounted(
        pointer_env(),
        SwipeConfig::default(),
        Handlers::new().on_move(|_| {}),
    );
    drive(
        &mut swipe,
        &[(Signal::Start, (0.0, 0.0)), (Signal::Move, (5.0, 5.0))],
    );
    let g = swipe.gesture().unwrap();
    assert!(!g.is_x && !g.is_y);
    drive_one(&mut swipe, Signal::Move, (5.0, 9.0), 20);
    let g = swipe.gesture().unwrap();
    assert!(g.is_y && !g.is_x);
}

#[test]
fn lock_never_flips_within_a_gesture() {
    let mut swipe = mounted(
        pointer_env(),
        SwipeConfig::default(),
        Handlers::new().on_move(|_| {}),
    );
    drive(
        &mut swipe,
        &[
            (Signal::Start, (0.0, 0.0)),
            (Signal::Move, (-8.0, 0.0)),
            (Signal::Move, (-8.0, 40.0)),
            (Signal::Move, (0.0, -70.0)),
        ],
    );
    let g = swipe.gesture().unwrap();
    assert!(g.is_x && !g.is_y);
    assert!(g.is_slide_x && !g.is_slide_y);
}

#[test]
fn callbacks_run_generic_then_axis() {
    let log = Log::default();
    let handlers = Handlers::new()
        .on_start(note(&log, "start"))
        .on_start_x(note(&log, "start_x"))
        .on_start_y(note(&log, "start_y"))
        .on_move(note(&log, "move"))
        .on_move_x(note(&log, "move_x"))
        .on_move_y(note(&log, "move_y"))
        .on_end(note(&log, "end"))
        .on_end_x(note(&log, "end_x"))
        .on_end_y(note(&log, "end_y"));
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[
            (Signal::Start, (0.0, 0.0)),
            (Signal::Move, (0.0, -6.0)),
            (Signal::End, (0.0, -6.0)),
        ],
    );
    assert_eq!(
        *log.borrow(),
        [
            "start (0, 0)",
            "start_x (0, 0)",
            "start_y (0, 0)",
            "move (0, -6)",
            "move_y (0, -6)",
            "end (0, -6)",
            "end_y (0, -6)",
        ]
    );
    assert_eq!(swipe.phase(), Phase::Idle);
    assert!(swipe.gesture().is_none());
}

#[test]
fn tap_fires_generic_end_only() {
    let log = Log::default();
    let handlers = Handlers::new()
        .on_move_x(note(&log, "move_x"))
        .on_end(note(&log, "end"))
        .on_end_x(note(&log, "end_x"));
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[(Signal::Start, (0.0, 0.0)), (Signal::End, (1.0, 0.0))],
    );
    assert_eq!(*log.borrow(), ["end (0, 0)"]);
    assert!(!swipe.did_slide());
}

#[test]
fn signals_outside_a_press_do_nothing() {
    let log = Log::default();
    let handlers = Handlers::new()
        .on_move(note(&log, "move"))
        .on_end(note(&log, "end"));
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[
            (Signal::Move, (50.0, 0.0)),
            (Signal::End, (50.0, 0.0)),
            (Signal::Cancel, (50.0, 0.0)),
        ],
    );
    assert!(log.borrow().is_empty());
    assert_eq!(swipe.phase(), Phase::Idle);
}

#[test]
fn slide_click_is_swallowed_once() {
    let clicks = Rc::new(RefCell::new(0));
    let counter = clicks.clone();
    let handlers = Handlers::new()
        .on_move_x(|_| {})
        .on_click(move |_| *counter.borrow_mut() += 1);
    let config = SwipeConfig::default().with_no_slide_click(true);
    let mut swipe = mounted(pointer_env(), config, handlers);
    drive(
        &mut swipe,
        &[
            (Signal::Start, (0.0, 0.0)),
            (Signal::Move, (30.0, 0.0)),
            (Signal::End, (30.0, 0.0)),
        ],
    );
    assert!(swipe.did_slide());

    let mut click = Input::link_click();
    assert_eq!(swipe.handle_click(&mut click), ClickVerdict::Swallow);
    assert!(click.prevented);
    assert!(click.stopped);
    assert_eq!(*clicks.borrow(), 0);
    assert!(!swipe.did_slide());

    let mut next = Input::link_click();
    assert_eq!(swipe.handle_click(&mut next), ClickVerdict::Forward);
    assert!(!next.prevented);
    assert_eq!(*clicks.borrow(), 1);
}

#[test]
fn slide_click_is_forwarded_without_no_slide_click() {
    let clicks = Rc::new(RefCell::new(0));
    let counter = clicks.clone();
    let handlers = Handlers::new()
        .on_move(|_| {})
        .on_click(move |_| *counter.borrow_mut() += 1);
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[
            (Signal::Start, (0.0, 0.0)),
            (Signal::Move, (0.0, 30.0)),
            (Signal::End, (0.0, 30.0)),
        ],
    );
    let mut click = Input::link_click();
    assert_eq!(swipe.handle_click(&mut click), ClickVerdict::Forward);
    assert!(click.prevented);
    assert!(!click.stopped);
    assert_eq!(*clicks.borrow(), 1);
}

#[test]
fn touch_end_after_slide_synthesizes_leave() {
    let log = Log::default();
    let leaves = Rc::new(RefCell::new(0));
    let counter = leaves.clone();
    let handlers = Handlers::new()
        .on_move_x(note(&log, "move_x"))
        .on_end_x(note(&log, "end_x"))
        .on_leave(move |_| *counter.borrow_mut() += 1);
    let mut swipe = mounted(touch_env(), SwipeConfig::default(), handlers);

    swipe.handle(Signal::Start, &mut Input::touch(&[(10.0, 10.0)]), 0);
    swipe.handle(Signal::Move, &mut Input::touch(&[(30.0, 12.0)]), 16);
    assert_eq!(swipe.phase(), Phase::LockedX);
    swipe.handle(Signal::End, &mut Input::touch_end(30.0, 12.0), 32);

    assert_eq!(*log.borrow(), ["move_x (20, 2)", "end_x (20, 2)"]);
    assert_eq!(*leaves.borrow(), 1);
}

#[test]
fn pointer_end_does_not_synthesize_leave() {
    let leaves = Rc::new(RefCell::new(0));
    let counter = leaves.clone();
    let handlers = Handlers::new().on_leave(move |_| *counter.borrow_mut() += 1);
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), handlers);
    drive(
        &mut swipe,
        &[(Signal::Start, (0.0, 0.0)), (Signal::End, (0.0, 0.0))],
    );
    assert_eq!(*leaves.borrow(), 0);
}

#[test]
fn second_touch_aborts_with_previous_snapshot() {
    let log = Log::default();
    let leaves = Rc::new(RefCell::new(0));
    let counter = leaves.clone();
    let handlers = Handlers::new()
        .on_move_y(note(&log, "move_y"))
        .on_end(note(&log, "end"))
        .on_end_y(note(&log, "end_y"))
        .on_leave(move |_| *counter.borrow_mut() += 1);
    let mut swipe = mounted(touch_env(), SwipeConfig::default(), handlers);

    swipe.handle(Signal::Start, &mut Input::touch(&[(0.0, 0.0)]), 0);
    swipe.handle(Signal::Move, &mut Input::touch(&[(1.0, 9.0)]), 10);
    swipe.handle(
        Signal::Move,
        &mut Input::touch(&[(3.0, 40.0), (200.0, 200.0)]),
        20,
    );

    assert_eq!(swipe.phase(), Phase::Idle);
    assert_eq!(
        *log.borrow(),
        ["move_y (1, 9)", "end (1, 9)", "end_y (1, 9)"]
    );
    assert_eq!(*leaves.borrow(), 0);
    assert!(swipe.did_slide());

    // Lifting the fingers finds no press but settles the owed leave, once.
    swipe.handle(Signal::End, &mut Input::touch_end(200.0, 200.0), 30);
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(*leaves.borrow(), 1);
    swipe.handle(Signal::End, &mut Input::touch_end(3.0, 40.0), 40);
    assert_eq!(*leaves.borrow(), 1);
    assert_eq!(swipe.phase(), Phase::Idle);
}

#[test]
fn touch_cancel_after_slide_synthesizes_leave() {
    let leaves = Rc::new(RefCell::new(0));
    let counter = leaves.clone();
    let handlers = Handlers::new()
        .on_move(|_| {})
        .on_leave(move |_| *counter.borrow_mut() += 1);
    let mut swipe = mounted(touch_env(), SwipeConfig::default(), handlers);

    swipe.handle(Signal::Start, &mut Input::touch(&[(0.0, 0.0)]), 0);
    swipe.handle(Signal::Move, &mut Input::touch(&[(0.0, 20.0)]), 10);
    swipe.handle(Signal::Cancel, &mut Input::touch_end(0.0, 20.0), 20);

    assert_eq!(*leaves.borrow(), 1);
    assert!(swipe.did_slide());
}

fn pointer_touch_env() -> EventSource {
    EventSource::probe(Capabilities {
        pointer_events: true,
        touch: true,
    })
}

#[test]
fn second_pointer_down_aborts_gesture() {
    let log = Log::default();
    let handlers = Handlers::new()
        .on_start(note(&log, "start"))
        .on_move(note(&log, "move"))
        .on_end(note(&log, "end"));
    let mut swipe = mounted(pointer_touch_env(), SwipeConfig::default(), handlers);

    swipe.handle(Signal::Start, &mut Input::finger(1, 0.0, 0.0), 0);
    swipe.handle(Signal::Start, &mut Input::finger(2, 100.0, 100.0), 10);
    assert_eq!(swipe.phase(), Phase::Idle);

    // The first finger keeps moving, but the gesture is over.
    swipe.handle(Signal::Move, &mut Input::finger(1, 10.0, 0.0), 20);
    swipe.handle(Signal::End, &mut Input::finger(1, 10.0, 0.0), 30);
    swipe.handle(Signal::End, &mut Input::finger(2, 100.0, 100.0), 40);

    assert_eq!(*log.borrow(), ["start (0, 0)", "end (0, 0)"]);
    assert!(!swipe.did_slide());
}

#[test]
fn other_pointers_cannot_move_or_end_the_press() {
    let log = Log::default();
    let handlers = Handlers::new()
        .on_move(note(&log, "move"))
        .on_end(note(&log, "end"));
    let mut swipe = mounted(pointer_touch_env(), SwipeConfig::default(), handlers);

    swipe.handle(Signal::Start, &mut Input::finger(1, 0.0, 0.0), 0);
    swipe.handle(Signal::Move, &mut Input::finger(7, 50.0, 50.0), 10);
    swipe.handle(Signal::End, &mut Input::finger(7, 50.0, 50.0), 20);
    assert_eq!(swipe.phase(), Phase::Unlocked);
    assert!(log.borrow().is_empty());

    swipe.handle(Signal::Move, &mut Input::finger(1, 10.0, 0.0), 30);
    assert_eq!(swipe.phase(), Phase::LockedX);
    swipe.handle(Signal::End, &mut Input::finger(1, 10.0, 0.0), 40);
    assert_eq!(*log.borrow(), ["move (10, 0)", "end (10, 0)"]);

    // A fresh press may come from any pointer.
    swipe.handle(Signal::Start, &mut Input::finger(7, 0.0, 0.0), 50);
    assert_eq!(swipe.phase(), Phase::Unlocked);
}

#[test]
fn pointer_hover_binds_pointer_enter_and_leave() {
    let entered = Rc::new(RefCell::new(0));
    let counter = entered.clone();
    let handlers = Handlers::new().on_enter(move |_| *counter.borrow_mut() += 1);
    let config = SwipeConfig::default().with_pointer_hover(true);
    let mut swipe = mounted(pointer_env(), config, handlers);

    let names: Vec<_> = swipe.surface().live.iter().map(|&(_, n)| n).collect();
    assert!(names.contains(&"pointerenter"), "{names:?}");
    assert!(names.contains(&"pointerleave"), "{names:?}");
    assert!(!names.contains(&"mouseenter"), "{names:?}");

    assert!(swipe.route("pointerenter", &mut Input::pointer(0.0, 0.0), 0));
    assert!(!swipe.route("mouseenter", &mut Input::pointer(0.0, 0.0), 0));
    assert_eq!(*entered.borrow(), 1);
}

#[test]
fn stop_propagation_covers_hover_and_cancel() {
    let handlers = Handlers::new().on_enter(|_| {}).on_leave(|_| {});
    let config = SwipeConfig::default().with_stop_propagation(true);
    let mut swipe = mounted(touch_env(), config, handlers);

    let mut enter = Input::pointer(0.0, 0.0);
    swipe.handle_enter(&mut enter);
    assert!(enter.stopped);

    let mut leave = Input::pointer(0.0, 0.0);
    swipe.handle_leave(&mut leave);
    assert!(leave.stopped);

    swipe.handle(Signal::Start, &mut Input::touch(&[(0.0, 0.0)]), 0);
    let mut cancel = Input::touch_end(0.0, 0.0);
    swipe.handle(Signal::Cancel, &mut cancel, 10);
    assert!(cancel.stopped);
    assert_eq!(swipe.phase(), Phase::Idle);
}

#[test]
fn touch_cancel_ends_gesture() {
    let log = Log::default();
    let handlers = Handlers::new().on_end(note(&log, "end"));
    let mut swipe = mounted(touch_env(), SwipeConfig::default(), handlers);
    swipe.handle(Signal::Start, &mut Input::touch(&[(0.0, 0.0)]), 0);
    swipe.handle(Signal::Cancel, &mut Input::touch_end(2.0, 0.0), 5);
    assert_eq!(*log.borrow(), ["end (0, 0)"]);
    assert_eq!(swipe.phase(), Phase::Idle);
}

#[test]
fn touch_environment_never_binds_the_document() {
    let mut swipe = mounted(touch_env(), SwipeConfig::default(), Handlers::new());
    swipe.handle(Signal::Start, &mut Input::touch(&[(0.0, 0.0)]), 0);
    assert!(!swipe.holds_press_scope());
    assert!(
        !swipe
            .surface()
            .live
            .iter()
            .any(|(t, _)| *t == BindTarget::Document)
    );
}

#[test]
fn pointer_environment_scopes_document_listeners_to_the_press() {
    let mut swipe = mounted(pointer_env(), SwipeConfig::default(), Handlers::new());
    let before = swipe.surface().live.len();
    swipe.handle(Signal::Start, &mut Input::pointer(0.0, 0.0), 0);
    let during: Vec<_> = swipe
        .surface()
        .live
        .iter()
        .filter(|(t, _)| *t == BindTarget::Document)
        .map(|&(_, n)| n)
        .collect();
    assert_eq!(during, ["pointermove", "pointerup", "pointercancel"]);
    swipe.handle(Signal::Cancel, &mut Input::pointer(0.0, 0.0), 1);
    assert_eq!(swipe.surface().live.len(), before);
}

fn drive_one(swipe: &mut Swipe<Dom, Input>, signal: Signal, (x, y): (f64, f64), now: u64) {
    swipe.handle(signal, &mut Input::pointer(x, y), now);
}
