// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use js_sys::Function;
use understory_swipe::binding::{BindTarget, ListenOptions, Surface};
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget};

/// A [`Surface`] that registers one JS function on DOM targets.
///
/// Every listener shares `router`; it receives the raw event and decides
/// what to do from the event type.
pub struct DomSurface {
    document: Document,
    router: Function,
}

impl fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DomSurface { .. }")
    }
}

impl DomSurface {
    /// A surface that binds `router` on elements of `document`.
    pub fn new(document: Document, router: Function) -> Self {
        Self { document, router }
    }
}

/// One registered DOM listener.
#[derive(Debug)]
pub struct DomListener {
    target: EventTarget,
    name: &'static str,
    capture: bool,
}

impl Surface for DomSurface {
    type Target = Element;
    type Handle = DomListener;

    fn listen(
        &mut self,
        target: &BindTarget<Element>,
        name: &'static str,
        options: ListenOptions,
    ) -> DomListener {
        let target: EventTarget = match target {
            BindTarget::Element(el) => el.clone().into(),
            BindTarget::Document => self.document.clone().into(),
        };
        let opts = AddEventListenerOptions::new();
        opts.set_capture(options.capture);
        opts.set_passive(options.passive);
        if let Err(err) = target
            .add_event_listener_with_callback_and_add_event_listener_options(
                name,
                &self.router,
                &opts,
            )
        {
            log::warn!("swipe: adding {name} listener failed: {err:?}");
        }
        DomListener {
            target,
            name,
            capture: options.capture,
        }
    }

    fn unlisten(&mut self, handle: DomListener) {
        if let Err(err) = handle.target.remove_event_listener_with_callback_and_bool(
            handle.name,
            &self.router,
            handle.capture,
        ) {
            log::warn!("swipe: removing {} listener failed: {err:?}", handle.name);
        }
    }
}
