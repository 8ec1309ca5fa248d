//! Markup tree
//!
//! Slides are built as a tree of elements and text nodes rather than as
//! concatenated markup, so text is escaped by construction. Literal markup
//! only enters through [`Node::Raw`].
//!
//! The same tree is serialized to HTML (tests, the CLI) and mirrored into
//! live DOM nodes by the browser bindings.

use std::fmt::Write as _;

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with children
    Element(Element),
    /// Text content, escaped on output
    Text(String),
    /// Literal markup, emitted verbatim
    Raw(String),
}

/// An element with classes, attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (e.g. `section`, `h1`)
    pub tag: String,
    /// Class list, in insertion order, without duplicates
    pub classes: Vec<String>,
    /// Attributes other than `class`, in insertion order
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text node
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a node of any kind
    pub fn with_node(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Add a class unless already present
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Check for a class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// All descendant elements with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.tag == tag {
                found.push(child);
            }
            child.collect(tag, found);
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => text.push_str(t),
                Node::Element(el) => text.push_str(&el.text_content()),
                Node::Raw(_) => {}
            }
        }
        text
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');
        for node in &self.children {
            match node {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Raw(html) => out.push_str(html),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let el = Element::new("section")
            .with_class("slide")
            .with_class("title-slide")
            .with_child(Element::new("h1").with_attr("data-animate", "1").with_text("Hi"));

        assert_eq!(
            el.to_html(),
            r#"<section class="slide title-slide"><h1 data-animate="1">Hi</h1></section>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let el = Element::new("li").with_text("<script>alert('x')</script> & more");
        assert_eq!(
            el.to_html(),
            "<li>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more</li>"
        );
    }

    #[test]
    fn test_raw_is_verbatim() {
        let el = Element::new("li").with_node(Node::Raw("<b>bold</b>".to_string()));
        assert_eq!(el.to_html(), "<li><b>bold</b></li>");
    }

    #[test]
    fn test_attribute_values_escaped() {
        let el = Element::new("div").with_attr("title", "a \"quoted\" value");
        assert_eq!(el.to_html(), r#"<div title="a &quot;quoted&quot; value"></div>"#);
    }

    #[test]
    fn test_add_class_idempotent() {
        let mut el = Element::new("section").with_class("slide");
        el.add_class("is-active");
        el.add_class("is-active");
        assert_eq!(el.classes, vec!["slide", "is-active"]);
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut el = Element::new("div").with_attr("data-animate", "1");
        el.set_attr("data-animate", "3");
        assert_eq!(el.attr("data-animate"), Some("3"));
        assert_eq!(el.attributes.len(), 1);
    }

    #[test]
    fn test_find_all_document_order() {
        let el = Element::new("div")
            .with_child(Element::new("ul").with_child(Element::new("li").with_text("a")))
            .with_child(Element::new("ul").with_child(Element::new("li").with_text("b")));

        let items: Vec<_> = el.find_all("li").iter().map(|li| li.text_content()).collect();
        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(el.find_all("ul").len(), 2);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Element::new("section").with_child(Element::new("h2").with_text("x"));
        let mut copy = original.clone();
        copy.add_class("is-active");
        assert!(!original.has_class("is-active"));
        assert_eq!(copy.children, original.children);
    }
}
