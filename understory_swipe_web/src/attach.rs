// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use js_sys::Function;
use understory_swipe::gesture::Phase;
use understory_swipe::source::EventSource;
use understory_swipe::{Handlers, Swipe, SwipeConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event};

use crate::input::{WebInput, probe};
use crate::surface::DomSurface;

/// A recognizer bound to the DOM.
pub type DomSwipe = Swipe<DomSurface, WebInput>;

/// A [`DomSwipe`] attached to one element.
///
/// Dropping it unbinds every listener.
pub struct WebSwipe {
    swipe: Rc<RefCell<DomSwipe>>,
    _router: Closure<dyn FnMut(Event)>,
}

impl fmt::Debug for WebSwipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSwipe")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl WebSwipe {
    /// Probe the current window, build a recognizer and mount it on `element`.
    pub fn attach(
        element: Element,
        config: SwipeConfig,
        handlers: Handlers<WebInput>,
    ) -> Result<Self, JsValue> {
        config
            .validate()
            .map_err(|err| JsValue::from_str(&alloc::format!("{err}")))?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let source = EventSource::probe(probe(&window));
        log::debug!("swipe: probed {:?}", source.family());

        let mut router = None;
        let swipe = Rc::new_cyclic(|weak: &Weak<RefCell<DomSwipe>>| {
            let weak = weak.clone();
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let Some(cell) = weak.upgrade() else {
                    return;
                };
                let Ok(mut swipe) = cell.try_borrow_mut() else {
                    log::debug!("swipe: re-entrant {} ignored", event.type_());
                    return;
                };
                let name = event.type_();
                let mut input = WebInput::new(event);
                let now = input.timestamp();
                swipe.route(&name, &mut input, now);
            }) as Box<dyn FnMut(Event)>);
            let function = closure.as_ref().unchecked_ref::<Function>().clone();
            router = Some(closure);
            RefCell::new(Swipe::new(
                DomSurface::new(document, function),
                source,
                config,
                handlers,
            ))
        });
        let router = router.ok_or_else(|| JsValue::from_str("router closure missing"))?;
        swipe.borrow_mut().mount(element);
        Ok(Self {
            swipe,
            _router: router,
        })
    }

    /// Current phase, or `None` while a callback is running.
    pub fn phase(&self) -> Option<Phase> {
        self.swipe.try_borrow().ok().map(|s| s.phase())
    }

    /// Whether the next click follows a slide, or `None` while a callback is running.
    pub fn did_slide(&self) -> Option<bool> {
        self.swipe.try_borrow().ok().map(|s| s.did_slide())
    }
}

impl Drop for WebSwipe {
    fn drop(&mut self) {
        match self.swipe.try_borrow_mut() {
            Ok(mut swipe) => swipe.unmount(),
            Err(_) => log::warn!("swipe: dropped from inside a callback, listeners left bound"),
        }
    }
}
