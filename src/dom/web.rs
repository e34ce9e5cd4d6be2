// Browser document backed by web-sys

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlLinkElement};

use super::{DomError, StyleTarget};

fn script_error(err: JsValue) -> DomError {
    DomError::Script(format!("{err:?}"))
}

/// The page's live document
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Document of the current window
    pub fn from_window() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::Unavailable("window"))?;
        let document = window.document().ok_or(DomError::Unavailable("document"))?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn root(&self) -> Result<HtmlElement, DomError> {
        self.document
            .document_element()
            .ok_or(DomError::Unavailable("document element"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::Unavailable("html document element"))
    }

    fn body(&self) -> Result<HtmlElement, DomError> {
        self.document.body().ok_or(DomError::Unavailable("body"))
    }
}

impl StyleTarget for WebDocument {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), DomError> {
        self.root()?
            .style()
            .set_property(name, value)
            .map_err(script_error)
    }

    fn remove_property(&mut self, name: &str) -> Result<(), DomError> {
        self.root()?
            .style()
            .remove_property(name)
            .map(|_| ())
            .map_err(script_error)
    }

    fn add_body_class(&mut self, class: &str) -> Result<(), DomError> {
        self.body()?.class_list().add_1(class).map_err(script_error)
    }

    fn remove_body_class(&mut self, class: &str) -> Result<(), DomError> {
        self.body()?
            .class_list()
            .remove_1(class)
            .map_err(script_error)
    }

    fn set_body_attribute(&mut self, name: &str, value: &str) -> Result<(), DomError> {
        self.body()?.set_attribute(name, value).map_err(script_error)
    }

    fn upsert_stylesheet_link(&mut self, id: &str, href: &str) -> Result<(), DomError> {
        if let Some(existing) = self.document.get_element_by_id(id) {
            match existing.dyn_into::<HtmlLinkElement>() {
                Ok(link) => {
                    if link.href() != href {
                        link.set_href(href);
                    }
                    return Ok(());
                }
                Err(other) => {
                    log::warn!("Element #{} is not a link, replacing it", id);
                    other.remove();
                }
            }
        }

        let link = self
            .document
            .create_element("link")
            .map_err(script_error)?
            .dyn_into::<HtmlLinkElement>()
            .map_err(|_| DomError::Unavailable("link element"))?;
        link.set_id(id);
        link.set_rel("stylesheet");
        link.set_href(href);

        let head = self.document.head().ok_or(DomError::Unavailable("head"))?;
        head.append_child(&link).map_err(script_error)?;
        Ok(())
    }

    fn force_reflow(&mut self) -> Result<(), DomError> {
        let body = self.body()?;
        let style = body.style();
        style.set_property("display", "none").map_err(script_error)?;
        // Reading layout flushes pending style changes.
        let _ = body.offset_height();
        style
            .remove_property("display")
            .map(|_| ())
            .map_err(script_error)
    }
}
