//! Browser Tests
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use todo_mvc::dom::{Document, Element, EventKind, WebDocument, WebElement};
use todo_mvc::storage::{KeyValueStorage, LocalStorage};
use todo_mvc::{App, AppConfig, Task};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_root(document: &WebDocument, id: &str) {
    let body = document.query_selector("body").unwrap();
    let root = document.create_element("div").unwrap();
    root.set_attribute("id", id);
    body.append_child(&root);
}

/// Mount on a new root with one stored task, returning the app and its document
fn mount_one(name: &str) -> (App<LocalStorage, WebDocument>, WebDocument) {
    let document = WebDocument::from_window().unwrap();
    fresh_root(&document, name);
    let storage = LocalStorage::from_window().unwrap();
    storage
        .set(name, r#"[{"id":1,"text":"Eat breakfast","complete":false}]"#)
        .unwrap();

    let config = AppConfig {
        storage_key: name.to_string(),
        root_selector: format!("#{}", name),
        ..AppConfig::default()
    };
    let app = App::mount(document.clone(), storage, &config).unwrap();
    (app, document)
}

/// Dispatch a bubbling event the way the browser reports user input
fn fire(element: &WebElement, kind: EventKind) {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    let event = web_sys::Event::new_with_event_init_dict(kind.as_str(), &init).unwrap();
    element.as_element().dispatch_event(&event).unwrap();
}

fn in_first_row(document: &WebDocument, root: &str, selector: &str) -> WebElement {
    document
        .query_selector(&format!(r#"#{} li[id="1"] {}"#, root, selector))
        .unwrap()
}

fn stored(name: &str) -> Option<String> {
    LocalStorage::from_window().unwrap().get(name).unwrap()
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let storage = LocalStorage::from_window().unwrap();
    storage.set("todo-mvc-test", "[]").unwrap();
    assert_eq!(storage.get("todo-mvc-test").unwrap().as_deref(), Some("[]"));
    assert_eq!(storage.get("todo-mvc-missing").unwrap(), None);
}

#[wasm_bindgen_test]
fn web_element_state() {
    let document = WebDocument::from_window().unwrap();
    let input = document.create_element("input").unwrap();
    input.set_attribute("type", "checkbox");
    input.set_checked(true);
    assert!(input.checked());
    assert_eq!(input.tag_name(), "input");

    let span = document.create_element_with_class("span", "editable").unwrap();
    assert!(span.has_class("editable"));
    span.set_text("hello");
    assert_eq!(span.as_element().text_content().as_deref(), Some("hello"));
}

#[wasm_bindgen_test]
fn app_mounts_and_persists() {
    let document = WebDocument::from_window().unwrap();
    fresh_root(&document, "web-test-root");
    let storage = LocalStorage::from_window().unwrap();
    storage.set("web-test-todos", "[]").unwrap();

    let config = AppConfig {
        storage_key: "web-test-todos".to_string(),
        root_selector: "#web-test-root".to_string(),
        ..AppConfig::default()
    };
    let app = App::mount(document.clone(), storage.clone(), &config).unwrap();

    let input = app.view().input().clone();
    input.set_value("Eat breakfast");
    let form = app.view().form().as_element().clone();
    let submit = web_sys::Event::new(EventKind::Submit.as_str()).unwrap();
    form.dispatch_event(&submit).unwrap();

    assert_eq!(app.store().tasks(), vec![Task::new(1, "Eat breakfast")]);
    assert_eq!(
        storage.get("web-test-todos").unwrap().as_deref(),
        Some(r#"[{"id":1,"text":"Eat breakfast","complete":false}]"#)
    );
    assert_eq!(input.value(), "");
}

#[wasm_bindgen_test]
fn delete_click_bubbles_to_list() {
    let (app, document) = mount_one("web-delete-root");
    fire(&in_first_row(&document, "web-delete-root", ".delete"), EventKind::Click);

    assert!(app.store().is_empty());
    assert_eq!(stored("web-delete-root").as_deref(), Some("[]"));
    assert!(document.query_selector(r#"#web-delete-root li[id="1"]"#).is_none());
}

#[wasm_bindgen_test]
fn checkbox_change_bubbles_to_list() {
    let (app, document) = mount_one("web-toggle-root");
    let checkbox = in_first_row(&document, "web-toggle-root", r#"input[type="checkbox"]"#);
    checkbox.set_checked(true);
    fire(&checkbox, EventKind::Change);

    assert_eq!(app.store().tasks(), vec![Task::new(1, "Eat breakfast").toggled()]);
    assert_eq!(
        stored("web-toggle-root").as_deref(),
        Some(r#"[{"id":1,"text":"Eat breakfast","complete":true}]"#)
    );
    assert!(in_first_row(&document, "web-toggle-root", r#"input[type="checkbox"]"#).checked());
}

#[wasm_bindgen_test]
fn edit_input_then_focusout_bubbles_to_list() {
    let (app, document) = mount_one("web-edit-root");
    let span = in_first_row(&document, "web-edit-root", ".editable");
    span.set_text("Eat a big breakfast");
    fire(&span, EventKind::Input);
    assert_eq!(app.view().pending_edit().as_deref(), Some("Eat a big breakfast"));
    fire(&span, EventKind::FocusOut);

    assert_eq!(app.store().tasks(), vec![Task::new(1, "Eat a big breakfast")]);
    assert_eq!(app.view().pending_edit(), None);
    assert_eq!(
        stored("web-edit-root").as_deref(),
        Some(r#"[{"id":1,"text":"Eat a big breakfast","complete":false}]"#)
    );
}
