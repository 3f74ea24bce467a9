//! Task List View
//!
//! Renders the collection into the element tree and turns raw DOM events
//! into add/edit/delete/toggle requests. Rows are rebuilt from scratch on
//! every render; list events are handled by delegation on the `ul`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Labels;
use crate::dom::{Document, Element, EventKind};
use crate::error::DomError;
use crate::models::{Task, TaskId};

/// Tag of a rendered task row; its `id` attribute carries the task id
pub const ROW_TAG: &str = "li";
pub const LIST_CLASS: &str = "todo-list";
pub const EDITABLE_CLASS: &str = "editable";
pub const DELETE_CLASS: &str = "delete";

pub struct TaskView<D: Document> {
    document: D,
    root: D::Element,
    form: D::Element,
    input: D::Element,
    list: D::Element,
    labels: Labels,
    /// Text of the last edited row, waiting for focus to leave
    pending_edit: Rc<RefCell<Option<String>>>,
}

impl<D: Document> TaskView<D> {
    /// Build the static page skeleton under `root`
    pub fn new(document: D, root: D::Element, labels: Labels) -> Result<Self, DomError> {
        let title = document.create_element("h1")?;
        title.set_text(&labels.title);

        let form = document.create_element("form")?;

        let input = document.create_element("input")?;
        input.set_attribute("type", "text");
        input.set_attribute("placeholder", &labels.input_placeholder);
        input.set_attribute("name", "todo");

        let submit = document.create_element("button")?;
        submit.set_attribute("type", "submit");
        submit.set_text(&labels.submit);

        let list = document.create_element_with_class("ul", LIST_CLASS)?;

        form.append_child(&input);
        form.append_child(&submit);
        root.append_child(&title);
        root.append_child(&form);
        root.append_child(&list);

        let view = Self {
            document,
            root,
            form,
            input,
            list,
            labels,
            pending_edit: Rc::new(RefCell::new(None)),
        };
        view.init_local_listeners();
        Ok(view)
    }

    pub fn root(&self) -> &D::Element {
        &self.root
    }

    pub fn input(&self) -> &D::Element {
        &self.input
    }

    pub fn form(&self) -> &D::Element {
        &self.form
    }

    pub fn list(&self) -> &D::Element {
        &self.list
    }

    pub fn pending_edit(&self) -> Option<String> {
        self.pending_edit.borrow().clone()
    }

    // ========================
    // Rendering
    // ========================

    /// Replace every row with one per task, or the empty message
    pub fn render(&self, tasks: &[Task]) -> Result<(), DomError> {
        self.list.remove_all_children();

        if tasks.is_empty() {
            let message = self.document.create_element("p")?;
            message.set_text(&self.labels.empty);
            self.list.append_child(&message);
        } else {
            for task in tasks {
                let row = self.render_row(task)?;
                self.list.append_child(&row);
            }
        }

        log::debug!("[VIEW] Rendered {} tasks", tasks.len());
        Ok(())
    }

    fn render_row(&self, task: &Task) -> Result<D::Element, DomError> {
        let row = self.document.create_element(ROW_TAG)?;
        row.set_attribute("id", &task.id.to_string());

        let checkbox = self.document.create_element("input")?;
        checkbox.set_attribute("type", "checkbox");
        checkbox.set_checked(task.complete);

        let span = self.document.create_element_with_class("span", EDITABLE_CLASS)?;
        span.set_attribute("contenteditable", "true");
        if task.complete {
            let strike = self.document.create_element("s")?;
            strike.set_text(&task.text);
            span.append_child(&strike);
        } else {
            span.set_text(&task.text);
        }

        let delete = self.document.create_element_with_class("button", DELETE_CLASS)?;
        delete.set_text(&self.labels.delete);

        row.append_child(&checkbox);
        row.append_child(&span);
        row.append_child(&delete);
        Ok(row)
    }

    // ========================
    // Interaction Hooks
    // ========================

    /// Fires with the input text on form submit; empty submits are dropped
    pub fn on_add_requested(&self, handler: impl Fn(String) + 'static) {
        let input = self.input.clone();
        self.form.add_event_listener(
            EventKind::Submit,
            Box::new(move |event| {
                event.prevent_default();
                let text = input.value();
                if text.is_empty() {
                    return;
                }
                handler(text);
                input.set_value("");
            }),
        );
    }

    /// Fires with the row id when a delete button is clicked
    pub fn on_delete_requested(&self, handler: impl Fn(TaskId) + 'static) {
        self.list.add_event_listener(
            EventKind::Click,
            Box::new(move |event| {
                let Some(target) = event.target() else { return };
                if !target.has_class(DELETE_CLASS) {
                    return;
                }
                if let Some(id) = row_id(target) {
                    handler(id);
                }
            }),
        );
    }

    /// Fires with the row id when a row checkbox changes
    pub fn on_toggle_requested(&self, handler: impl Fn(TaskId) + 'static) {
        self.list.add_event_listener(
            EventKind::Change,
            Box::new(move |event| {
                let Some(target) = event.target() else { return };
                if target.attribute("type").as_deref() != Some("checkbox") {
                    return;
                }
                if let Some(id) = row_id(target) {
                    handler(id);
                }
            }),
        );
    }

    /// Fires with the row id and edited text when focus leaves a row that was
    /// edited. Nothing fires if the text was never changed.
    pub fn on_edit_requested(&self, handler: impl Fn(TaskId, String) + 'static) {
        let pending = self.pending_edit.clone();
        self.list.add_event_listener(
            EventKind::FocusOut,
            Box::new(move |event| {
                // Any focus loss consumes the pending text.
                let text = pending.borrow_mut().take();
                let Some(id) = event.target().and_then(row_id) else { return };
                match text {
                    Some(text) if !text.is_empty() => handler(id, text),
                    _ => {}
                }
            }),
        );
    }

    /// Track in-progress edits so `on_edit_requested` can report them
    fn init_local_listeners(&self) {
        let pending = self.pending_edit.clone();
        self.list.add_event_listener(
            EventKind::Input,
            Box::new(move |event| {
                if let Some(target) = event.target() {
                    if target.has_class(EDITABLE_CLASS) {
                        *pending.borrow_mut() = Some(target.text());
                    }
                }
            }),
        );
    }
}

/// Task id of the row containing `element`
fn row_id<E: Element>(element: &E) -> Option<TaskId> {
    element.closest(ROW_TAG)?.attribute("id")?.parse().ok()
}
