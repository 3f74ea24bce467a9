//! Todo MVC
//!
//! Browser task list split into:
//! - store: task collection, write-through persistence, change hook
//! - view: renders rows and reports user requests
//! - controller: wires the two
//!
//! Rendering and persistence go through the `dom` and `storage` traits, so
//! the same code runs on the page (web-sys) or in memory.

pub mod app;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod hook;
pub mod models;
pub mod storage;
pub mod store;
pub mod view;


use wasm_bindgen::prelude::*;

pub use app::{start, App, BrowserApp};
pub use config::{AppConfig, Labels};
pub use controller::TaskController;
pub use error::{AppError, ConfigError, DomError, StorageError, StoreError};
pub use models::{Task, TaskId};
pub use store::TaskStore;
pub use view::TaskView;

/// JS entry point: `mount({ storageKey: "work" })`, or `mount()` for defaults
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<(), JsValue> {
    let config = AppConfig::from_js(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    start(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
