//! WASM entry point
//!
//! This is the main entry point that Trunk compiles to WASM. It mounts both
//! widgets and keeps them alive for the lifetime of the page.

use wasm_bindgen::JsValue;

fn main() {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    match examboard_ui::boot() {
        // Widgets live as long as the page
        Ok(board) => std::mem::forget(board),
        Err(e) => web_sys::console::error_1(&JsValue::from_str(&format!(
            "examboard failed to start: {e}"
        ))),
    }
}
