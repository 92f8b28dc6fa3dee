//! HTML rendering of node trees for the server view path.

use crate::component::Node;

/// Render a node tree to an HTML fragment.
///
/// All text and attribute values are escaped; the only markup in the output
/// is the markup the interpreter itself produced.
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape(value));
                    out.push('"');
                }
            }
            out.push('>');
            for child in children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements() {
        let node = Node::Element {
            tag: "section",
            attrs: vec![("class", "lesson-section".to_string())],
            children: vec![Node::Element {
                tag: "p",
                attrs: Vec::new(),
                children: vec![Node::Text("hello".to_string())],
            }],
        };
        assert_eq!(
            render_html(&node),
            r#"<section class="lesson-section"><p>hello</p></section>"#
        );
    }

    #[test]
    fn escapes_model_supplied_text() {
        let node = Node::Element {
            tag: "p",
            attrs: Vec::new(),
            children: vec![Node::Text("<script>alert('x')</script>".to_string())],
        };
        let html = render_html(&node);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn valueless_attributes_render_bare() {
        let node = Node::Element {
            tag: "div",
            attrs: vec![("hidden", String::new())],
            children: Vec::new(),
        };
        assert_eq!(render_html(&node), "<div hidden></div>");
    }
}
