//! Combined translate + uniform scale placement of one container.
//!
//! Position and size are applied through a single `transform` property so a
//! drag never resets a previous resize and vice versa.

use std::fmt;

use crate::geometry::Point;

/// Current visual placement of a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    translation: Point,
    scale: f64,
}

impl TransformState {
    #[must_use]
    pub const fn new(translation: Point, scale: f64) -> Self {
        Self { translation, scale }
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::new(Point::origin(), 1.0)
    }

    #[must_use]
    pub const fn translation(&self) -> Point {
        self.translation
    }

    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    pub const fn set_translation(&mut self, translation: Point) {
        self.translation = translation;
    }

    pub const fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// CSS value for the `transform` property.
    ///
    /// ```
    /// use examboard_core::geometry::Point;
    /// use examboard_core::transform::TransformState;
    ///
    /// let state = TransformState::new(Point::new(30.0, 20.0), 1.5);
    /// assert_eq!(state.css(), "translate(30px, 20px) scale(1.5)");
    /// ```
    #[must_use]
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for TransformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translation.x(),
            self.translation.y(),
            self.scale
        )
    }
}
