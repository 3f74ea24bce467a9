//! Task Controller
//!
//! Wires view requests to store mutations and store changes back to the
//! view. Holds no logic of its own after construction.

use std::rc::Rc;

use crate::dom::Document;
use crate::models::Task;
use crate::storage::KeyValueStorage;
use crate::store::TaskStore;
use crate::view::TaskView;

pub struct TaskController<S: KeyValueStorage, D: Document> {
    store: Rc<TaskStore<S>>,
    view: Rc<TaskView<D>>,
}

impl<S: KeyValueStorage + 'static, D: Document + 'static> TaskController<S, D> {
    pub fn new(store: Rc<TaskStore<S>>, view: Rc<TaskView<D>>) -> Rc<Self> {
        let controller = Rc::new(Self { store, view });
        controller.refresh(&controller.store.tasks());
        controller.bind_view();
        controller.bind_store();
        controller
    }

    pub fn store(&self) -> &Rc<TaskStore<S>> {
        &self.store
    }

    pub fn view(&self) -> &Rc<TaskView<D>> {
        &self.view
    }

    fn refresh(&self, tasks: &[Task]) {
        render_or_log(&*self.view, tasks);
    }

    fn bind_view(&self) {
        self.view.on_add_requested({
            let store = self.store.clone();
            move |text| {
                store.create(&text);
            }
        });

        self.view.on_edit_requested({
            let store = self.store.clone();
            move |id, text| store.update(id, &text)
        });

        self.view.on_delete_requested({
            let store = self.store.clone();
            move |id| store.delete(id)
        });

        self.view.on_toggle_requested({
            let store = self.store.clone();
            move |id| store.toggle_complete(id)
        });
    }

    fn bind_store(&self) {
        let view = self.view.clone();
        self.store.subscribe_to_changes(move |tasks| render_or_log(&*view, tasks));
    }
}

fn render_or_log<D: Document>(view: &TaskView<D>, tasks: &[Task]) {
    if let Err(e) = view.render(tasks) {
        log::error!("[CONTROLLER] Render failed: {}", e);
    }
}
