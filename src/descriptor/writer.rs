//! Serializes descriptor trees back to XML.
//!
//! Output is indented two spaces per level. Attribute and text content
//! is escaped so a written tree parses back to the same value.

use super::XmlNode;

/// Serialize a descriptor tree to an XML document string.
pub fn to_xml(root: &XmlNode) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_node(root, 0, &mut out);
    out
}

fn write_node(node: &XmlNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }

    out.push('<');
    out.push_str(&node.name);
    for (name, value) in &node.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    if !node.children.is_empty() {
        out.push_str(">\n");
        for child in &node.children {
            write_node(child, depth + 1, out);
        }
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str("</");
        out.push_str(&node.name);
        out.push_str(">\n");
    } else if let Some(value) = &node.value {
        out.push('>');
        escape_into(value, false, out);
        out.push_str("</");
        out.push_str(&node.name);
        out.push_str(">\n");
    } else {
        out.push_str("/>\n");
    }
}

fn escape_into(value: &str, attribute: bool, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
