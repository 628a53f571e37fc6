//! WASM browser binding for examboard
//!
//! Wires two independent widgets onto an existing page: the exam clock and the
//! draggable, resizable container that holds it. All state and arithmetic live
//! in `examboard-core`; this crate only talks to the DOM.
//!
//! ## Architecture
//! - WASM compilation target (wasm32-unknown-unknown), built with Trunk
//! - Static page markup; widgets bind to it by id and selector
//! - Listeners (`gloo-events`) and timers (`gloo-timers`) are owned values,
//!   removed when dropped
//!
//! ## Module Structure
//! - `draggable`: pointer drag and handle resize for one container
//! - `exam_clock`: wall clock, countdown and stopwatch
//! - `dom`: typed element lookup
//! - `logging`: `tracing` to the browser console
//! - `error`: error types and handling

#![forbid(unsafe_code)]

pub mod dom;
pub mod draggable;
pub mod error;
pub mod exam_clock;
pub mod logging;

use examboard_core::WidgetConfig;
use tracing::info;
use web_sys::Document;

pub use draggable::DraggableContainer;
pub use error::{Result, UiError};
pub use exam_clock::ExamClock;

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "examboard-config";

/// Both widgets, mounted. Keep it alive for as long as the page should react.
#[derive(Debug)]
pub struct Examboard {
    pub clock: ExamClock,
    pub draggable: DraggableContainer,
}

/// Reads the page's configuration block, or the defaults when there is none.
///
/// # Errors
///
/// Returns [`UiError::Core`] when the block is present but malformed or invalid.
pub fn load_config(document: &Document) -> Result<WidgetConfig> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(element) => {
            let json = element.text_content().unwrap_or_default();
            Ok(WidgetConfig::from_json(&json)?)
        }
        None => Ok(WidgetConfig::default()),
    }
}

/// Loads configuration, installs logging and mounts both widgets.
///
/// # Errors
///
/// Fails fast if the configuration is invalid or any required element is
/// missing; nothing is left wired in that case.
pub fn boot() -> Result<Examboard> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let config = load_config(&document)?;

    logging::init_tracing(config.level())?;

    let clock = ExamClock::mount(&window, &document, &config)?;
    let container = dom::query(&document, &config.container_selector)?;
    let draggable = DraggableContainer::attach(&document, container, &config)?;

    info!(container = %config.container_selector, "examboard ready");
    Ok(Examboard { clock, draggable })
}
