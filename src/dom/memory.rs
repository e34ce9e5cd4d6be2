use std::collections::{BTreeMap, BTreeSet};

use super::{DomError, StyleTarget};

/// Document kept entirely in memory
///
/// Used for server-side rendering and tests. Counts writes so callers can observe whether an
/// application touched the document at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    pub properties: BTreeMap<String, String>,
    pub body_classes: BTreeSet<String>,
    pub body_attributes: BTreeMap<String, String>,
    /// Stylesheet links by element id
    pub links: BTreeMap<String, String>,
    pub writes: usize,
    pub reflows: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn body_attribute(&self, name: &str) -> Option<&str> {
        self.body_attributes.get(name).map(String::as_str)
    }

    pub fn link(&self, id: &str) -> Option<&str> {
        self.links.get(id).map(String::as_str)
    }

    /// Removes a property as an outside script would
    pub fn clobber(&mut self, name: &str) {
        self.properties.remove(name);
    }
}

impl StyleTarget for MemoryDocument {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), DomError> {
        self.properties.insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_property(&mut self, name: &str) -> Result<(), DomError> {
        if self.properties.remove(name).is_some() {
            self.writes += 1;
        }
        Ok(())
    }

    fn add_body_class(&mut self, class: &str) -> Result<(), DomError> {
        self.body_classes.insert(class.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_body_class(&mut self, class: &str) -> Result<(), DomError> {
        if self.body_classes.remove(class) {
            self.writes += 1;
        }
        Ok(())
    }

    fn set_body_attribute(&mut self, name: &str, value: &str) -> Result<(), DomError> {
        self.body_attributes
            .insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn upsert_stylesheet_link(&mut self, id: &str, href: &str) -> Result<(), DomError> {
        self.links.insert(id.to_string(), href.to_string());
        self.writes += 1;
        Ok(())
    }

    fn force_reflow(&mut self) -> Result<(), DomError> {
        self.reflows += 1;
        Ok(())
    }
}
