//! Rendering Substrate
//!
//! The view talks to the element tree only through these traits.
//! `web` backs them with the browser DOM, `virtual_dom` with an in-memory
//! tree used for tests and headless rendering.

pub mod virtual_dom;
pub mod web;

use std::cell::Cell;

use crate::error::DomError;

pub use virtual_dom::{VirtualDocument, VirtualElement};
pub use web::{WebDocument, WebElement};

/// Interaction events the view subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    Click,
    Change,
    Input,
    /// Bubbling focus loss (`focusout`)
    FocusOut,
}

impl EventKind {
    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Submit => "submit",
            EventKind::Click => "click",
            EventKind::Change => "change",
            EventKind::Input => "input",
            EventKind::FocusOut => "focusout",
        }
    }
}

/// Event as seen by a listener
pub struct DomEvent<E> {
    kind: EventKind,
    target: Option<E>,
    default_prevented: Cell<bool>,
}

impl<E> DomEvent<E> {
    pub fn new(kind: EventKind, target: Option<E>) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Element the event originated from
    pub fn target(&self) -> Option<&E> {
        self.target.as_ref()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Listener<E> = Box<dyn Fn(&DomEvent<E>)>;

/// Handle to one element. Clones refer to the same element.
pub trait Element: Clone + PartialEq + 'static {
    /// Lowercase tag name
    fn tag_name(&self) -> String;

    fn add_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn set_attribute(&self, name: &str, value: &str);
    fn attribute(&self, name: &str) -> Option<String>;

    /// Replace all content with a single text run
    fn set_text(&self, text: &str);
    /// Rendered text of the element and its descendants
    fn text(&self) -> String;

    /// Form control value (`input.value`)
    fn value(&self) -> String;
    fn set_value(&self, value: &str);

    /// Checkbox state (`input.checked`)
    fn checked(&self) -> bool;
    fn set_checked(&self, checked: bool);

    fn append_child(&self, child: &Self);
    fn remove_child(&self, child: &Self);
    fn first_child(&self) -> Option<Self>;
    fn parent(&self) -> Option<Self>;

    /// Subscribe to `kind` on this element and, through bubbling, its descendants
    fn add_event_listener(&self, kind: EventKind, listener: Listener<Self>);

    fn remove_all_children(&self) {
        while let Some(child) = self.first_child() {
            self.remove_child(&child);
        }
    }

    /// Nearest inclusive ancestor with the given tag
    fn closest(&self, tag: &str) -> Option<Self> {
        let mut current = Some(self.clone());
        while let Some(el) = current {
            if el.tag_name() == tag {
                return Some(el);
            }
            current = el.parent();
        }
        None
    }
}

/// Element factory and lookup
pub trait Document {
    type Element: Element;

    fn create_element(&self, tag: &str) -> Result<Self::Element, DomError>;

    /// First element matching a simple selector (`#id`, `.class` or `tag`)
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    fn create_element_with_class(&self, tag: &str, class: &str) -> Result<Self::Element, DomError> {
        let element = self.create_element(tag)?;
        element.add_class(class);
        Ok(element)
    }
}
