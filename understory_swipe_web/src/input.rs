// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use understory_swipe::source::{Capabilities, InputEvent, InputFamily};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, MouseEvent, PointerEvent, Touch, TouchEvent, Window};

/// Detect pointer event and touch support on `window`.
pub fn probe(window: &Window) -> Capabilities {
    let has = |name: &str| js_sys::Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false);
    Capabilities {
        pointer_events: has("PointerEvent"),
        touch: has("ontouchstart"),
    }
}

/// A DOM event seen as an [`InputEvent`].
#[derive(Clone, Debug)]
pub struct WebInput {
    event: Event,
}

impl WebInput {
    /// Wrap a DOM event.
    pub fn new(event: Event) -> Self {
        Self { event }
    }

    /// The wrapped event.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Event timestamp in whole milliseconds.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "DOM timestamps are small non-negative millisecond counts"
    )]
    pub fn timestamp(&self) -> u64 {
        self.event.time_stamp().max(0.0) as u64
    }

    fn touch(&self) -> Option<&TouchEvent> {
        self.event.dyn_ref::<TouchEvent>()
    }
}

fn touch_point(touch: Touch) -> Point {
    Point::new(f64::from(touch.client_x()), f64::from(touch.client_y()))
}

impl InputEvent for WebInput {
    fn family(&self) -> InputFamily {
        if self.event.is_instance_of::<TouchEvent>() {
            InputFamily::Touch
        } else if self.event.is_instance_of::<PointerEvent>() {
            InputFamily::Pointer
        } else {
            InputFamily::Mouse
        }
    }

    fn touch_count(&self) -> usize {
        self.touch().map_or(0, |t| t.touches().length() as usize)
    }

    fn primary_touch(&self) -> Option<Point> {
        self.touch()?.touches().get(0).map(touch_point)
    }

    fn changed_touch(&self) -> Option<Point> {
        self.touch()?.changed_touches().get(0).map(touch_point)
    }

    fn client_position(&self) -> Option<Point> {
        let mouse = self.event.dyn_ref::<MouseEvent>()?;
        Some(Point::new(
            f64::from(mouse.client_x()),
            f64::from(mouse.client_y()),
        ))
    }

    fn pointer_id(&self) -> Option<i32> {
        self.event
            .dyn_ref::<PointerEvent>()
            .map(PointerEvent::pointer_id)
    }

    fn targets_link(&self) -> bool {
        self.event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("a").ok().flatten())
            .is_some()
    }

    fn prevent_default(&mut self) {
        self.event.prevent_default();
    }

    fn stop_propagation(&mut self) {
        self.event.stop_propagation();
    }
}
