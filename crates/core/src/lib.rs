//! Host-independent logic for examboard.
//!
//! Nothing in this crate touches the DOM. The browser binding in
//! `examboard-ui` feeds it pointer samples, timestamps and input text, and
//! writes back whatever it returns.
//!
//! ## Module Structure
//! - `geometry`: points and sizes in CSS pixels
//! - `transform`: combined translate + scale placement
//! - `pointer`: drag/resize state machine
//! - `clock`: `HH:MM:SS` formatting and the stopwatch
//! - `exam`: exam countdown session
//! - `config`: widget configuration
//! - `error`, `result`: error type and logging combinators

#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod error;
pub mod exam;
pub mod geometry;
pub mod pointer;
pub mod result;
pub mod transform;

pub use config::WidgetConfig;
pub use error::Error;
pub use exam::{ExamInfo, ExamPhase, ExamSession};
pub use geometry::{Point, Size};
pub use pointer::{PointerTarget, PointerTracker};
pub use result::{Result, ResultExt};
pub use transform::TransformState;
