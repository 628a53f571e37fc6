//! Pointer-driven drag and resize tracking for one container.
//!
//! The tracker turns raw client coordinates into translation and scale
//! updates on a [`TransformState`]. It never touches the DOM: the host feeds
//! it pointer samples and applies whatever transform it hands back.
//!
//! At most one session is open at a time. Drag and resize are two variants of
//! the same [`Interaction`] enum, so the two can never be active together.

use tracing::debug;

use crate::error::Error;
use crate::geometry::{Point, Size};
use crate::result::Result;
use crate::transform::TransformState;

/// What a pointer-down landed on, as seen from the tracked container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The container element itself.
    Container,
    /// The resize affordance attached to the container.
    ResizeHandle,
    /// Any other element nested inside the container (inputs, buttons, text).
    Descendant,
}

/// Open drag: `pointer - offset` captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    baseline: Point,
}

impl DragSession {
    /// Offset the container should have with the pointer at `pointer`.
    #[must_use]
    pub fn offset_at(&self, pointer: Point) -> Point {
        pointer.minus(self.baseline)
    }
}

/// Open resize: layout size and pointer position at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    start: Point,
    initial: Size,
}

impl ResizeSession {
    /// Scale for the pointer at `pointer`:
    /// `min(newWidth / initialWidth, newHeight / initialHeight)`.
    ///
    /// Not clamped. A pointer far enough up or left yields zero or a
    /// negative scale.
    #[must_use]
    pub fn ratio(&self, pointer: Point) -> f64 {
        let delta = pointer.minus(self.start);
        let new_width = self.initial.width() + delta.x();
        let new_height = self.initial.height() + delta.y();
        let scale_x = new_width / self.initial.width();
        let scale_y = new_height / self.initial.height();
        scale_x.min(scale_y)
    }
}

/// Which session, if any, is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

/// Drag/resize state machine for a single container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerTracker {
    transform: TransformState,
    interaction: Interaction,
    min_scale: Option<f64>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp resize results to `min_scale`. `None` leaves scale unguarded.
    #[must_use]
    pub const fn with_min_scale(mut self, min_scale: Option<f64>) -> Self {
        self.min_scale = min_scale;
        self
    }

    #[must_use]
    pub const fn transform(&self) -> TransformState {
        self.transform
    }

    #[must_use]
    pub const fn interaction(&self) -> Interaction {
        self.interaction
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging(_))
    }

    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        matches!(self.interaction, Interaction::Resizing(_))
    }

    /// Pointer-down on the container. Returns true when a drag session opened.
    ///
    /// Presses on the resize handle or on nested elements are ignored.
    pub fn begin_drag(&mut self, target: PointerTarget, pointer: Point) -> bool {
        if target != PointerTarget::Container {
            debug!(?target, "pointer-down not on container, drag not started");
            return false;
        }

        let session = DragSession {
            baseline: pointer.minus(self.transform.translation()),
        };
        debug!(baseline = ?session.baseline, "drag started");
        self.interaction = Interaction::Dragging(session);
        true
    }

    /// Pointer-move while dragging. Returns the updated transform, or `None`
    /// when no drag is open.
    pub fn continue_drag(&mut self, pointer: Point) -> Option<TransformState> {
        let Interaction::Dragging(session) = self.interaction else {
            return None;
        };

        self.transform.set_translation(session.offset_at(pointer));
        Some(self.transform)
    }

    /// Closes an open drag. Returns false, changing nothing, when not dragging.
    pub fn end_drag(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.interaction = Interaction::Idle;
        debug!(translation = ?self.transform.translation(), "drag ended");
        true
    }

    /// Pointer-down on the resize handle.
    ///
    /// `layout` is the container's untransformed size (`offsetWidth` and
    /// `offsetHeight`). The new scale replaces the current one, so it is
    /// always relative to that size and never to an earlier scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateSize`] when `layout` has a zero, negative
    /// or non-finite dimension. The tracker is left unchanged.
    pub fn begin_resize(&mut self, pointer: Point, layout: Size) -> Result<()> {
        if !layout.is_measurable() {
            return Err(Error::DegenerateSize {
                width: layout.width(),
                height: layout.height(),
            });
        }

        let session = ResizeSession {
            start: pointer,
            initial: layout,
        };
        debug!(initial = ?session.initial, "resize started");
        self.interaction = Interaction::Resizing(session);
        Ok(())
    }

    /// Pointer-move while resizing. Returns the updated transform, or `None`
    /// when no resize is open.
    pub fn continue_resize(&mut self, pointer: Point) -> Option<TransformState> {
        let Interaction::Resizing(session) = self.interaction else {
            return None;
        };

        let scale = session.ratio(pointer);
        let scale = self.min_scale.map_or(scale, |min| scale.max(min));
        self.transform.set_scale(scale);
        Some(self.transform)
    }

    /// Closes an open resize. Returns false, changing nothing, when not resizing.
    pub fn end_resize(&mut self) -> bool {
        if !self.is_resizing() {
            return false;
        }
        self.interaction = Interaction::Idle;
        debug!(scale = self.transform.scale(), "resize ended");
        true
    }

    /// Document-level pointer-move: forwards to whichever session is open.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<TransformState> {
        match self.interaction {
            Interaction::Idle => None,
            Interaction::Dragging(_) => self.continue_drag(pointer),
            Interaction::Resizing(_) => self.continue_resize(pointer),
        }
    }

    /// Document-level pointer-up: closes whichever session is open.
    pub fn pointer_up(&mut self) -> bool {
        let ended_drag = self.end_drag();
        let ended_resize = self.end_resize();
        ended_drag || ended_resize
    }
}
