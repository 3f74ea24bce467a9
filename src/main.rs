//! Todo MVC Entry Point
//!
//! Optional settings come from `window.TODO_CONFIG`.

use todo_mvc::{start, AppConfig, ConfigError};
use wasm_bindgen::JsValue;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match page_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    console_log::init_with_level(config.log_level()).ok();
    if let Some(e) = config_error {
        log::warn!("[APP] Using default config: {}", e);
    }

    if let Err(e) = start(&config) {
        log::error!("[APP] Failed to start: {}", e);
    }
}

fn page_config() -> Result<AppConfig, ConfigError> {
    let Some(window) = web_sys::window() else {
        return Ok(AppConfig::default());
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str("TODO_CONFIG"))
        .map_err(|e| ConfigError::Js(format!("{:?}", e)))?;
    AppConfig::from_js(value)
}
