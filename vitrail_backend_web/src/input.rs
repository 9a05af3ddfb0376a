// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM input sources.
//!
//! [`InputCollector`] subscribes to pointer, resize, and scroll events and
//! maintains a [`FrameInputs`] snapshot the frame loop reads once per tick.
//! Clicks are edge-triggered: the `clicked` flag is set by the event handler
//! and cleared when the snapshot is taken, so a click is observed by exactly
//! one frame.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Point, Size};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent, Window};

use vitrail_core::scroll::ScrollCommand;
use vitrail_core::timing::FrameInputs;

/// Converts client pixel coordinates to normalized device coordinates
/// (`[-1, 1]` per axis, +y up).
#[must_use]
pub fn pointer_ndc(client_x: f64, client_y: f64, width: f64, height: f64) -> Point {
    if width <= 0.0 || height <= 0.0 {
        return Point::ORIGIN;
    }
    Point::new(
        (client_x / width) * 2.0 - 1.0,
        -((client_y / height) * 2.0 - 1.0),
    )
}

/// Converts host scroll metrics to a progress fraction in `[0, 1]`.
#[must_use]
pub fn scroll_fraction(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let extent = scroll_height - client_height;
    if extent <= 0.0 {
        return 0.0;
    }
    (scroll_top / extent).clamp(0.0, 1.0)
}

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;
type PlainClosure = Closure<dyn FnMut()>;

/// Maintains the per-frame [`FrameInputs`] snapshot from DOM events.
///
/// Dropping the collector removes its event listeners.
pub struct InputCollector {
    state: Rc<RefCell<FrameInputs>>,
    window: Window,
    scroll_element: Option<HtmlElement>,
    on_pointer_move: MouseClosure,
    on_pointer_down: MouseClosure,
    on_pointer_leave: MouseClosure,
    on_resize: PlainClosure,
    on_scroll: Option<PlainClosure>,
}

impl core::fmt::Debug for InputCollector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputCollector")
            .field("inputs", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl InputCollector {
    /// Attaches listeners to `window` and, when given, a scroll surface.
    ///
    /// # Errors
    ///
    /// Propagates listener-registration failures from the DOM.
    pub fn attach(window: &Window, scroll_element: Option<HtmlElement>) -> Result<Self, JsValue> {
        let state = Rc::new(RefCell::new(FrameInputs {
            viewport_px: window_size(window),
            ..FrameInputs::default()
        }));

        let on_pointer_move = {
            let state = Rc::clone(&state);
            let window = window.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let size = window_size(&window);
                state.borrow_mut().pointer_ndc = Some(pointer_ndc(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    size.width,
                    size.height,
                ));
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        window.add_event_listener_with_callback(
            "pointermove",
            on_pointer_move.as_ref().unchecked_ref(),
        )?;

        let on_pointer_down = {
            let state = Rc::clone(&state);
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                state.borrow_mut().clicked = true;
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        window.add_event_listener_with_callback(
            "pointerdown",
            on_pointer_down.as_ref().unchecked_ref(),
        )?;

        let on_pointer_leave = {
            let state = Rc::clone(&state);
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                state.borrow_mut().pointer_ndc = None;
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        window.add_event_listener_with_callback(
            "pointerleave",
            on_pointer_leave.as_ref().unchecked_ref(),
        )?;

        // Each resize event reclassifies immediately; no debouncing.
        let on_resize = {
            let state = Rc::clone(&state);
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                state.borrow_mut().viewport_px = window_size(&window);
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let on_scroll = match &scroll_element {
            Some(element) => {
                let state = Rc::clone(&state);
                let element = element.clone();
                let closure = Closure::wrap(Box::new(move || {
                    state.borrow_mut().scroll_fraction = scroll_fraction(
                        element.scroll_top().into(),
                        element.scroll_height().into(),
                        element.client_height().into(),
                    );
                }) as Box<dyn FnMut()>);
                element
                    .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
                Some(closure)
            }
            None => None,
        };

        Ok(Self {
            state,
            window: window.clone(),
            scroll_element,
            on_pointer_move,
            on_pointer_down,
            on_pointer_leave,
            on_resize,
            on_scroll,
        })
    }

    /// Takes the snapshot for this frame, clearing the click edge.
    pub fn snapshot(&self) -> FrameInputs {
        let mut state = self.state.borrow_mut();
        let inputs = *state;
        state.clicked = false;
        inputs
    }

    /// Applies a scroll command to the attached scroll surface, if any.
    ///
    /// The motion on screen stays smooth because the scene's timeline damps
    /// toward the new fraction; the surface itself jumps directly.
    pub fn apply_scroll_command(&self, command: ScrollCommand) {
        if let Some(element) = &self.scroll_element {
            let extent = f64::from(element.scroll_height()) - f64::from(element.client_height());
            #[expect(
                clippy::cast_possible_truncation,
                reason = "scroll offsets are small positive pixel counts"
            )]
            element.set_scroll_top((command.fraction * extent) as i32);
        }
    }
}

impl Drop for InputCollector {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "pointermove",
            self.on_pointer_move.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "pointerdown",
            self.on_pointer_down.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "pointerleave",
            self.on_pointer_leave.as_ref().unchecked_ref(),
        );
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        if let (Some(element), Some(closure)) = (&self.scroll_element, &self.on_scroll) {
            let _ = element
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
    }
}

/// Current window inner size in CSS pixels.
fn window_size(window: &Window) -> Size {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Size::new(width, height)
}
