//! In-Memory Element Tree
//!
//! A small DOM stand-in: elements with classes, attributes, text, form state,
//! children and bubbling listeners. Drives the view in tests and can snapshot
//! itself as HTML.
//!
//! Part of the public API: hosts without a browser DOM (server-side HTML,
//! headless checks) mount the app on a [`VirtualDocument`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Document, DomEvent, Element, EventKind, Listener};
use crate::error::DomError;

type SharedListener = Rc<dyn Fn(&DomEvent<VirtualElement>)>;

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

#[derive(Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    children: Vec<VirtualElement>,
    parent: Weak<RefCell<Node>>,
    listeners: Vec<(EventKind, SharedListener)>,
}

/// Shared handle to an in-memory element
#[derive(Clone)]
pub struct VirtualElement(Rc<RefCell<Node>>);

impl VirtualElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        })))
    }

    pub fn children(&self) -> Vec<VirtualElement> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Does this element match a simple selector
    pub fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.attribute("id").as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.has_class(class)
        } else {
            self.tag_name() == selector.to_ascii_lowercase()
        }
    }

    /// All descendants matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<VirtualElement> {
        let mut found = Vec::new();
        for child in self.children() {
            if child.matches(selector) {
                found.push(child.clone());
            }
            found.extend(child.query_selector_all(selector));
        }
        found
    }

    pub fn query_selector(&self, selector: &str) -> Option<VirtualElement> {
        self.query_selector_all(selector).into_iter().next()
    }

    // ========================
    // Event Dispatch
    // ========================

    /// Fire `kind` at this element and bubble it up to the root.
    /// Returns whether a listener called `prevent_default`.
    pub fn dispatch(&self, kind: EventKind) -> bool {
        let event = DomEvent::new(kind, Some(self.clone()));
        // Propagation path is fixed before any listener runs.
        let mut path = vec![self.clone()];
        while let Some(parent) = path.last().and_then(Element::parent) {
            path.push(parent);
        }
        for el in path {
            // Listeners may rebuild the tree, so never hold a borrow across calls.
            let listeners: Vec<SharedListener> = el
                .0
                .borrow()
                .listeners
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, l)| l.clone())
                .collect();
            for listener in listeners {
                listener(&event);
            }
        }
        event.default_prevented()
    }

    pub fn click(&self) -> bool {
        self.dispatch(EventKind::Click)
    }

    pub fn submit(&self) -> bool {
        self.dispatch(EventKind::Submit)
    }

    /// Replace the value (inputs) or content (everything else), then fire `input`
    pub fn type_text(&self, text: &str) {
        if self.tag_name() == "input" {
            self.set_value(text);
        } else {
            self.set_text(text);
        }
        self.dispatch(EventKind::Input);
    }

    /// Flip `checked` and fire `change`, as a user clicking a checkbox would
    pub fn toggle_checked(&self) {
        self.set_checked(!self.checked());
        self.dispatch(EventKind::Change);
    }

    pub fn blur(&self) {
        self.dispatch(EventKind::FocusOut);
    }

    // ========================
    // Snapshot
    // ========================

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let node = self.0.borrow();
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if !node.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&node.classes.join(" "))));
        }
        if node.checked {
            out.push_str(" checked");
        }
        out.push('>');
        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }
        out.push_str(&escape(&node.text));
        for child in &node.children {
            child.write_html(out);
        }
        out.push_str(&format!("</{}>", node.tag));
    }

    fn detach(&self) {
        self.0.borrow_mut().parent = Weak::new();
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl PartialEq for VirtualElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for VirtualElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("VirtualElement")
            .field("tag", &node.tag)
            .field("attributes", &node.attributes)
            .field("classes", &node.classes)
            .field("children", &node.children.len())
            .finish()
    }
}

impl Element for VirtualElement {
    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn add_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let node = self.0.borrow();
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_text(&self, text: &str) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in &children {
            child.detach();
        }
        self.0.borrow_mut().text = text.to_string();
    }

    fn text(&self) -> String {
        let node = self.0.borrow();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text());
        }
        text
    }

    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    fn checked(&self) -> bool {
        self.0.borrow().checked
    }

    fn set_checked(&self, checked: bool) {
        self.0.borrow_mut().checked = checked;
    }

    fn append_child(&self, child: &Self) {
        if self == child {
            return;
        }
        if let Some(old_parent) = child.parent() {
            old_parent.remove_child(child);
        }
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    fn remove_child(&self, child: &Self) {
        let mut node = self.0.borrow_mut();
        if let Some(pos) = node.children.iter().position(|c| c == child) {
            node.children.remove(pos);
            drop(node);
            child.detach();
        }
    }

    fn first_child(&self) -> Option<Self> {
        self.0.borrow().children.first().cloned()
    }

    fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(VirtualElement)
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener<Self>) {
        let listener: SharedListener = Rc::from(listener);
        self.0.borrow_mut().listeners.push((kind, listener));
    }
}

/// In-memory document rooted at a `body` element
#[derive(Clone, Debug)]
pub struct VirtualDocument {
    body: VirtualElement,
}

impl Default for VirtualDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualDocument {
    pub fn new() -> Self {
        Self {
            body: VirtualElement::new("body"),
        }
    }

    /// Document whose body holds a single `<div id="{id}">` mount point
    pub fn with_root(id: &str) -> Self {
        let document = Self::new();
        let root = VirtualElement::new("div");
        root.set_attribute("id", id);
        document.body.append_child(&root);
        document
    }

    pub fn body(&self) -> &VirtualElement {
        &self.body
    }
}

impl Document for VirtualDocument {
    type Element = VirtualElement;

    fn create_element(&self, tag: &str) -> Result<VirtualElement, DomError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomError::CreateElement {
                tag: tag.to_string(),
                reason: "invalid tag name".to_string(),
            });
        }
        Ok(VirtualElement::new(tag))
    }

    fn query_selector(&self, selector: &str) -> Option<VirtualElement> {
        if self.body.matches(selector) {
            return Some(self.body.clone());
        }
        self.body.query_selector(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_query_selector_forms() {
        let document = VirtualDocument::with_root("root");
        let root = document.query_selector("#root").unwrap();
        let list = document.create_element_with_class("ul", "todo-list").unwrap();
        root.append_child(&list);

        assert_eq!(document.query_selector(".todo-list"), Some(list.clone()));
        assert_eq!(document.query_selector("ul"), Some(list));
        assert_eq!(document.query_selector("body"), Some(document.body().clone()));
        assert!(document.query_selector("#missing").is_none());
    }

    #[test]
    fn test_invalid_tag_rejected() {
        let document = VirtualDocument::new();
        assert!(matches!(
            document.create_element("not a tag"),
            Err(DomError::CreateElement { .. })
        ));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let a = VirtualElement::new("div");
        let b = VirtualElement::new("div");
        let child = VirtualElement::new("span");
        a.append_child(&child);
        b.append_child(&child);
        assert_eq!(a.child_count(), 0);
        assert_eq!(child.parent(), Some(b));
    }

    #[test]
    fn test_remove_all_children() {
        let list = VirtualElement::new("ul");
        for _ in 0..3 {
            list.append_child(&VirtualElement::new("li"));
        }
        let first = list.first_child().unwrap();
        list.remove_all_children();
        assert_eq!(list.child_count(), 0);
        assert!(first.parent().is_none());
    }

    #[test]
    fn test_text_includes_descendants() {
        let span = VirtualElement::new("span");
        let strike = VirtualElement::new("s");
        strike.set_text("done");
        span.append_child(&strike);
        assert_eq!(span.text(), "done");

        span.set_text("plain");
        assert_eq!(span.text(), "plain");
        assert_eq!(span.child_count(), 0);
    }

    #[test]
    fn test_events_bubble_to_ancestors() {
        let list = VirtualElement::new("ul");
        let row = VirtualElement::new("li");
        let button = VirtualElement::new("button");
        list.append_child(&row);
        row.append_child(&button);

        let hits = Rc::new(Cell::new(0));
        list.add_event_listener(EventKind::Click, {
            let hits = hits.clone();
            let button = button.clone();
            Box::new(move |event| {
                assert_eq!(event.target(), Some(&button));
                hits.set(hits.get() + 1);
            })
        });
        list.add_event_listener(EventKind::Change, Box::new(|_| panic!("wrong kind")));

        button.click();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_may_rebuild_tree() {
        let list = VirtualElement::new("ul");
        let row = VirtualElement::new("li");
        list.append_child(&row);
        list.add_event_listener(EventKind::Click, {
            let list = list.clone();
            Box::new(move |_| list.remove_all_children())
        });
        row.click();
        assert_eq!(list.child_count(), 0);
    }

    #[test]
    fn test_submit_reports_prevent_default() {
        let form = VirtualElement::new("form");
        assert!(!form.submit());
        form.add_event_listener(EventKind::Submit, Box::new(|event| event.prevent_default()));
        assert!(form.submit());
    }

    #[test]
    fn test_type_text_and_toggle() {
        let input = VirtualElement::new("input");
        input.type_text("hello");
        assert_eq!(input.value(), "hello");
        input.toggle_checked();
        assert!(input.checked());

        let span = VirtualElement::new("span");
        span.type_text("edited");
        assert_eq!(span.text(), "edited");
    }

    #[test]
    fn test_to_html() {
        let row = VirtualElement::new("li");
        row.set_attribute("id", "1");
        let checkbox = VirtualElement::new("input");
        checkbox.set_attribute("type", "checkbox");
        checkbox.set_checked(true);
        let span = VirtualElement::new("span");
        span.add_class("editable");
        span.set_text("a < b");
        row.append_child(&checkbox);
        row.append_child(&span);

        assert_eq!(
            row.to_html(),
            r#"<li id="1"><input type="checkbox" checked><span class="editable">a &lt; b</span></li>"#
        );
    }
}
