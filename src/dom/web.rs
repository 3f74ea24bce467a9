//! Browser DOM Backend
//!
//! `web_sys` implementation of the rendering substrate.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{Document, DomEvent, Element, EventKind, Listener};
use crate::error::DomError;

/// Browser element handle
#[derive(Clone, Debug, PartialEq)]
pub struct WebElement {
    element: web_sys::Element,
}

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self { element }
    }

    pub fn as_element(&self) -> &web_sys::Element {
        &self.element
    }

    fn as_input(&self) -> Option<&web_sys::HtmlInputElement> {
        self.element.dyn_ref::<web_sys::HtmlInputElement>()
    }
}

impl Element for WebElement {
    fn tag_name(&self) -> String {
        self.element.tag_name().to_ascii_lowercase()
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().add_1(class) {
            log::warn!("[DOM] add class `{}` failed: {:?}", class, e);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.element.set_attribute(name, value) {
            log::warn!("[DOM] set attribute `{}` failed: {:?}", name, e);
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn text(&self) -> String {
        match self.element.dyn_ref::<web_sys::HtmlElement>() {
            Some(html) => html.inner_text(),
            None => self.element.text_content().unwrap_or_default(),
        }
    }

    fn value(&self) -> String {
        self.as_input().map(|input| input.value()).unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.as_input() {
            input.set_value(value);
        }
    }

    fn checked(&self) -> bool {
        self.as_input().map(|input| input.checked()).unwrap_or(false)
    }

    fn set_checked(&self, checked: bool) {
        if let Some(input) = self.as_input() {
            input.set_checked(checked);
        }
    }

    fn append_child(&self, child: &Self) {
        if let Err(e) = self.element.append_child(&child.element) {
            log::warn!("[DOM] append failed: {:?}", e);
        }
    }

    fn remove_child(&self, child: &Self) {
        if let Err(e) = self.element.remove_child(&child.element) {
            log::warn!("[DOM] remove failed: {:?}", e);
        }
    }

    fn first_child(&self) -> Option<Self> {
        self.element.first_element_child().map(WebElement::new)
    }

    fn parent(&self) -> Option<Self> {
        self.element.parent_element().map(WebElement::new)
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener<Self>) {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            let target = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .map(WebElement::new);
            let event = DomEvent::new(kind, target);
            listener(&event);
            if event.default_prevented() {
                ev.prevent_default();
            }
        });
        if let Err(e) = self
            .element
            .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())
        {
            log::warn!("[DOM] listen `{}` failed: {:?}", kind.as_str(), e);
        }
        // Listeners live as long as the page.
        callback.forget();
    }
}

/// The page's `document`
#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self, DomError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| DomError::Unavailable("window.document".to_string()))
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn create_element(&self, tag: &str) -> Result<WebElement, DomError> {
        self.document
            .create_element(tag)
            .map(WebElement::new)
            .map_err(|e| DomError::CreateElement {
                tag: tag.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(WebElement::new)
    }
}
