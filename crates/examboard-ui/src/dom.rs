//! Typed element lookup and small DOM helpers.
//!
//! Every lookup of a required node fails with [`UiError::ElementNotFound`]
//! so widget initialization aborts instead of wiring half a page.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::{Result, UiError};

/// Get window object
pub fn window() -> Result<Window> {
    web_sys::window().ok_or(UiError::WindowNotAvailable)
}

/// Get document from window
pub fn document(window: &Window) -> Result<Document> {
    window.document().ok_or(UiError::DocumentNotAvailable)
}

fn cast<T: JsCast>(element: Element, selector: &str, expected: &'static str) -> Result<T> {
    element
        .dyn_into::<T>()
        .map_err(|_| UiError::WrongElementType {
            selector: selector.to_string(),
            expected,
        })
}

/// Required element by id, cast to `T`.
///
/// # Errors
///
/// [`UiError::ElementNotFound`] when no element has this id,
/// [`UiError::WrongElementType`] when it is not a `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T> {
    let selector = format!("#{id}");
    document
        .get_element_by_id(id)
        .ok_or_else(|| UiError::ElementNotFound {
            selector: selector.clone(),
        })
        .and_then(|element| cast(element, &selector, expected))
}

/// Optional element by id. Missing is fine, the wrong type is not.
///
/// # Errors
///
/// [`UiError::WrongElementType`] when the element exists but is not a `T`.
pub fn optional_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<Option<T>> {
    document
        .get_element_by_id(id)
        .map(|element| cast(element, &format!("#{id}"), expected))
        .transpose()
}

/// Required element matching a CSS selector.
///
/// # Errors
///
/// [`UiError::ElementNotFound`] when nothing matches, [`UiError::DomOperation`]
/// for an invalid selector.
pub fn query(document: &Document, selector: &str) -> Result<HtmlElement> {
    document
        .query_selector(selector)
        .map_err(|e| UiError::dom("querySelector", &e))?
        .ok_or_else(|| UiError::ElementNotFound {
            selector: selector.to_string(),
        })
        .and_then(|element| cast(element, selector, "an HTML element"))
}

/// Creates a detached `<div>` with the given class.
///
/// # Errors
///
/// [`UiError::DomOperation`] if the document refuses to create it.
pub fn create_div(document: &Document, class: &str) -> Result<HtmlElement> {
    let element = document
        .create_element("div")
        .map_err(|e| UiError::dom("createElement", &e))?;
    element.set_class_name(class);
    cast(element, "div", "an HTML element")
}

/// Wall-clock milliseconds since the Unix epoch.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}
