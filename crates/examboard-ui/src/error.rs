//! Error types for the browser binding.

use wasm_bindgen::JsValue;

/// Errors that can occur while wiring widgets to the page
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UiError {
    /// Failed to get window object
    #[error("failed to get window: window is not available")]
    WindowNotAvailable,

    /// Failed to get document object
    #[error("failed to get document: document is not available")]
    DocumentNotAvailable,

    /// A required element is missing from the page
    #[error("required element not found: {selector}")]
    ElementNotFound { selector: String },

    /// An element exists but is not of the expected kind
    #[error("element '{selector}' is not {expected}")]
    WrongElementType {
        selector: String,
        expected: &'static str,
    },

    /// A DOM call threw
    #[error("DOM operation failed: {0}")]
    DomOperation(String),

    /// The tracing subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Core(#[from] examboard_core::Error),
}

impl UiError {
    /// Wraps a thrown JS value with the name of the operation that threw it.
    #[must_use]
    pub fn dom(operation: &str, thrown: &JsValue) -> Self {
        Self::DomOperation(format!("{operation}: {thrown:?}"))
    }
}

/// Result type alias for browser binding operations
pub type Result<T> = std::result::Result<T, UiError>;
