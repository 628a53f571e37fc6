//! Draggable, resizable container bound to real pointer events.
//!
//! Pointer-down is listened for on the container and on a generated resize
//! handle; pointer-move and pointer-up on the whole document, so a gesture
//! keeps going when the pointer leaves the container. All geometry lives in
//! [`PointerTracker`]; this module only translates DOM events into tracker
//! calls and writes the resulting transform back.

use std::cell::RefCell;
use std::rc::Rc;

use examboard_core::{
    Point, PointerTarget, PointerTracker, ResultExt, Size, TransformState, WidgetConfig,
};
use gloo_events::{EventListener, EventListenerOptions};
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, Node, PointerEvent};

use crate::dom;
use crate::error::{Result, UiError};

/// A container wired for pointer drag and handle resize.
///
/// Dropping it removes every listener it registered and the resize handle.
#[derive(Debug)]
pub struct DraggableContainer {
    container: HtmlElement,
    handle: HtmlElement,
    tracker: Rc<RefCell<PointerTracker>>,
    listeners: Vec<EventListener>,
}

impl DraggableContainer {
    /// Appends a resize handle to `container` and starts listening.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be created or appended.
    pub fn attach(document: &Document, container: HtmlElement, config: &WidgetConfig) -> Result<Self> {
        let handle = dom::create_div(document, &config.handle_class)?;
        container
            .append_child(&handle)
            .map_err(|e| UiError::dom("appendChild", &e))?;

        let mut draggable = Self {
            container,
            handle,
            tracker: Rc::new(RefCell::new(
                PointerTracker::new().with_min_scale(config.min_scale),
            )),
            listeners: Vec::new(),
        };
        draggable.listen(document);

        info!(handle_class = %config.handle_class, "draggable container attached");
        Ok(draggable)
    }

    fn listen(&mut self, document: &Document) {
        let on_container_down = {
            let tracker = Rc::clone(&self.tracker);
            let container = self.container.clone();
            let handle = self.handle.clone();
            move |event: &Event| {
                let Some(pointer) = primary_pointer(event) else {
                    return;
                };
                let target = classify_target(event, &container, &handle);
                tracker.borrow_mut().begin_drag(target, pointer);
            }
        };

        let on_handle_down = {
            let tracker = Rc::clone(&self.tracker);
            let container = self.container.clone();
            move |event: &Event| {
                event.stop_propagation();
                let Some(pointer) = primary_pointer(event) else {
                    return;
                };
                tracker
                    .borrow_mut()
                    .begin_resize(pointer, layout_size(&container))
                    .into_option_logged();
            }
        };

        let on_move = {
            let tracker = Rc::clone(&self.tracker);
            let container = self.container.clone();
            move |event: &Event| {
                let Some(pointer) = primary_pointer(event) else {
                    return;
                };
                let updated = tracker.borrow_mut().pointer_move(pointer);
                if let Some(transform) = updated {
                    event.prevent_default();
                    apply_transform(&container, &transform).into_option_logged();
                }
            }
        };

        let on_up = {
            let tracker = Rc::clone(&self.tracker);
            move |_event: &Event| {
                if tracker.borrow_mut().pointer_up() {
                    debug!("pointer session closed");
                }
            }
        };

        let on_cancel = {
            let tracker = Rc::clone(&self.tracker);
            move |_event: &Event| {
                tracker.borrow_mut().pointer_up();
            }
        };

        self.listeners = vec![
            EventListener::new(&self.container, "pointerdown", on_container_down),
            EventListener::new(&self.handle, "pointerdown", on_handle_down),
            EventListener::new_with_options(
                document,
                "pointermove",
                EventListenerOptions::enable_prevent_default(),
                on_move,
            ),
            EventListener::new(document, "pointerup", on_up),
            EventListener::new(document, "pointercancel", on_cancel),
            EventListener::new_with_options(
                &self.container,
                "dragstart",
                EventListenerOptions::enable_prevent_default(),
                |event: &Event| event.prevent_default(),
            ),
        ];
    }

    /// Current placement of the container.
    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.tracker.borrow().transform()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.borrow().is_dragging()
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.tracker.borrow().is_resizing()
    }

    #[must_use]
    pub const fn container(&self) -> &HtmlElement {
        &self.container
    }

    #[must_use]
    pub const fn handle(&self) -> &HtmlElement {
        &self.handle
    }
}

impl Drop for DraggableContainer {
    fn drop(&mut self) {
        self.listeners.clear();
        self.handle.remove();
        debug!("draggable container detached");
    }
}

/// Client coordinates of a primary pointer event. Secondary touch points and
/// non-pointer events yield `None`.
fn primary_pointer(event: &Event) -> Option<Point> {
    let pointer = event.dyn_ref::<PointerEvent>()?;
    pointer.is_primary().then(|| {
        Point::new(
            f64::from(pointer.client_x()),
            f64::from(pointer.client_y()),
        )
    })
}

/// Untransformed layout size of the container. The current scale is not
/// part of it, so every resize measures against the same base size.
fn layout_size(container: &HtmlElement) -> Size {
    Size::new(
        f64::from(container.offset_width()),
        f64::from(container.offset_height()),
    )
}

fn classify_target(event: &Event, container: &HtmlElement, handle: &HtmlElement) -> PointerTarget {
    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
    match target {
        Some(node) if handle.is_same_node(Some(&node)) => PointerTarget::ResizeHandle,
        Some(node) if container.is_same_node(Some(&node)) => PointerTarget::Container,
        _ => PointerTarget::Descendant,
    }
}

fn apply_transform(container: &HtmlElement, transform: &TransformState) -> Result<()> {
    container
        .style()
        .set_property("transform", &transform.css())
        .map_err(|e| UiError::dom("style.transform", &e))
}
