//! Task List App
//!
//! Explicit bootstrap: builds store, view and controller and hands back the
//! handle that owns them.

use std::rc::Rc;

use crate::config::AppConfig;
use crate::controller::TaskController;
use crate::dom::{Document, WebDocument};
use crate::error::{AppError, DomError};
use crate::storage::{KeyValueStorage, LocalStorage};
use crate::store::TaskStore;
use crate::view::TaskView;

pub struct App<S: KeyValueStorage, D: Document> {
    controller: Rc<TaskController<S, D>>,
}

impl<S: KeyValueStorage + 'static, D: Document + 'static> App<S, D> {
    /// Mount the app into the element matching `config.root_selector`
    pub fn mount(document: D, storage: S, config: &AppConfig) -> Result<Self, AppError> {
        let root = document
            .query_selector(&config.root_selector)
            .ok_or_else(|| DomError::MissingRoot(config.root_selector.clone()))?;

        let store = if config.strict_load {
            TaskStore::try_load(storage, config.storage_key.as_str())?
        } else {
            TaskStore::load(storage, config.storage_key.as_str())
        };
        let view = TaskView::new(document, root, config.labels.clone())?;
        let controller = TaskController::new(Rc::new(store), Rc::new(view));

        log::info!(
            "[APP] Mounted on `{}` with {} tasks",
            config.root_selector,
            controller.store().len()
        );
        Ok(Self { controller })
    }

    pub fn store(&self) -> &Rc<TaskStore<S>> {
        self.controller.store()
    }

    pub fn view(&self) -> &Rc<TaskView<D>> {
        self.controller.view()
    }
}

/// The browser app: page `document` plus `localStorage`
pub type BrowserApp = App<LocalStorage, WebDocument>;

/// Mount on the current page
pub fn start(config: &AppConfig) -> Result<BrowserApp, AppError> {
    let document = WebDocument::from_window()?;
    let storage = LocalStorage::from_window()?;
    App::mount(document, storage, config)
}
