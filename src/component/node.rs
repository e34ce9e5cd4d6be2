//! Rendered element tree

use std::collections::BTreeMap;
use std::fmt::Write;

/// Elements that never carry children or a closing tag
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

/// A node in the rendered tree: an element or a text run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        /// Attributes; a `None` value renders as a bare boolean attribute
        attributes: BTreeMap<String, Option<String>>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    /// Create an element node
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Add an attribute; ignored on text nodes
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), Some(value.into()));
        }
        self
    }

    /// Add a valueless attribute such as `disabled`
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        if let Node::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), None);
        }
        self
    }

    /// Append a child; ignored on text nodes
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        if let Node::Element { children, .. } = self {
            children.push(child);
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            Node::Text(_) => None,
        }
    }

    /// Attribute value; `Some("")` for a flag attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .get(name)
                .map(|value| value.as_deref().unwrap_or("")),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text content of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element { children, .. } => children.iter().map(Node::text_content).collect(),
        }
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    match value {
                        Some(value) => {
                            let _ = write!(out, " {}=\"{}\"", name, escape(value));
                        }
                        None => {
                            let _ = write!(out, " {}", name);
                        }
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", tag);
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_serialization() {
        let node = Node::element("button")
            .with_attribute("type", "button")
            .with_attribute("data-label", "Save & \"close\"")
            .with_flag("disabled")
            .with_child(Node::text("<Save>"));

        assert_eq!(
            node.to_html(),
            concat!(
                "<button data-label=\"Save &amp; &quot;close&quot;\" disabled type=\"button\">",
                "&lt;Save&gt;</button>"
            )
        );
        assert_eq!(node.attribute("disabled"), Some(""));
        assert_eq!(node.text_content(), "<Save>");
    }

    #[test]
    fn test_void_elements() {
        let node = Node::element("link").with_attribute("rel", "stylesheet");
        assert_eq!(node.to_html(), "<link rel=\"stylesheet\">");
    }

    #[test]
    fn test_text_nodes_ignore_element_builders() {
        let node = Node::text("plain").with_attribute("id", "x").with_child(Node::text("y"));
        assert_eq!(node, Node::text("plain"));
        assert_eq!(node.tag(), None);
        assert!(node.children().is_empty());
    }
}
