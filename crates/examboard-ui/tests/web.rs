//! Browser tests for page-level wiring.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use examboard_core::WidgetConfig;
use examboard_ui::{CONFIG_ELEMENT_ID, UiError, dom, load_config};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn config_script(json: &str) -> web_sys::Element {
    let document = dom::document(&dom::window().unwrap()).unwrap();
    let script = document.create_element("script").unwrap();
    script.set_id(CONFIG_ELEMENT_ID);
    script.set_attribute("type", "application/json").unwrap();
    script.set_text_content(Some(json));
    document.body().unwrap().append_child(&script).unwrap();
    script
}

#[wasm_bindgen_test]
fn test_defaults_without_config_block() -> Result<(), UiError> {
    let document = dom::document(&dom::window()?)?;
    assert_eq!(load_config(&document)?, WidgetConfig::default());
    Ok(())
}

#[wasm_bindgen_test]
fn test_config_block_overrides() -> Result<(), UiError> {
    let script = config_script(r#"{"min_scale": 0.2, "handle_class": "grip"}"#);
    let document = dom::document(&dom::window()?)?;
    let config = load_config(&document)?;
    script.remove();

    assert_eq!(config.min_scale, Some(0.2));
    assert_eq!(config.handle_class, "grip");
    Ok(())
}

#[wasm_bindgen_test]
fn test_invalid_config_block_fails_fast() -> Result<(), UiError> {
    let script = config_script(r#"{"clock_tick_ms": 0}"#);
    let document = dom::document(&dom::window()?)?;
    let result = load_config(&document);
    script.remove();

    assert!(matches!(result, Err(UiError::Core(_))));
    Ok(())
}

#[wasm_bindgen_test]
fn test_boot_requires_container() {
    // No widget markup on the test page
    assert!(matches!(
        examboard_ui::boot(),
        Err(UiError::ElementNotFound { .. })
    ));
}
