// src/core/html.rs
//! Visual tree produced by the preview and the editor page, and its HTML serialization

use std::fmt::Write;

use crate::core::stylesheet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub class: String,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

const VOID_TAGS: [&str; 4] = ["input", "br", "meta", "hr"];

impl Node {
    pub fn el(tag: &'static str, class: impl Into<String>) -> Element {
        Element {
            tag,
            class: class.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for every element with the given tag.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if element.tag == tag {
                found.push(element);
            }
            for child in &element.children {
                child.collect(tag, found);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.class.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&element.class));
                }
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');

                if VOID_TAGS.contains(&element.tag) {
                    return;
                }

                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

const TAILWIND_CDN: &str = "<script src=\"https://cdn.tailwindcss.com\"></script>\n";

/// Standalone HTML document around `body`, styled with the Tailwind CDN build.
pub fn document(title: &str, body: &Node, script: Option<&str>) -> String {
    wrap_document(title, TAILWIND_CDN, Some("bg-gray-100"), body, script)
}

/// Self-contained document: the utility classes used by `body` are inlined as
/// a stylesheet, so rendering needs neither JavaScript nor network access.
pub fn static_document(title: &str, body: &Node) -> String {
    let style = format!("<style>\n{}</style>\n", stylesheet::stylesheet_for(body));
    wrap_document(title, &style, None, body, None)
}

fn wrap_document(
    title: &str,
    head: &str,
    body_class: Option<&str>,
    body: &Node,
    script: Option<&str>,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    html.push_str(head);
    match body_class {
        Some(class) => {
            let _ = writeln!(html, "</head>\n<body class=\"{}\">", escape(class));
        }
        None => html.push_str("</head>\n<body>\n"),
    }
    html.push_str(&body.to_html());
    if let Some(script) = script {
        let _ = write!(html, "\n<script>{}</script>", script);
    }
    html.push_str("\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_nested_elements() {
        let node: Node = Node::el("ul", "list-disc")
            .child(Node::el("li", "").text("a"))
            .child(Node::el("li", "").text("b"))
            .into();

        assert_eq!(
            node.to_html(),
            "<ul class=\"list-disc\"><li>a</li><li>b</li></ul>"
        );
        assert_eq!(node.find_all("li").len(), 2);
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let node: Node = Node::el("input", "")
            .attr("value", "\"Jest\" & <RTL>")
            .into();
        assert_eq!(
            node.to_html(),
            "<input value=\"&quot;Jest&quot; &amp; &lt;RTL&gt;\">"
        );

        let text = Node::text("<script>alert('x')</script>");
        assert_eq!(
            text.to_html(),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_document_wraps_body() {
        let body: Node = Node::el("div", "").text("hi").into();
        let html = document("Jane <Doe>", &body, Some("console.log(1)"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Jane &lt;Doe&gt;</title>"));
        assert!(html.contains("<div>hi</div>"));
        assert!(html.contains("<script>console.log(1)</script>"));
        assert!(html.contains("cdn.tailwindcss.com"));
    }

    #[test]
    fn test_static_document_inlines_styles() {
        let body: Node = Node::el("div", "text-blue-800 font-bold").text("hi").into();
        let html = static_document("Resume", &body);
        assert!(!html.contains("<script"));
        assert!(html.contains("<style>"));
        assert!(html.contains(".text-blue-800 { color: #1e40af; }"));
        assert!(html.contains(".font-bold { font-weight: 700; }"));
        assert!(html.contains("<body>\n<div class=\"text-blue-800 font-bold\">hi</div>"));
    }
}
