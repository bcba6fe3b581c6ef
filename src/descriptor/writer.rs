//! Descriptor serialization.
//!
//! Renders an [`Element`] tree back to XML text: declaration header,
//! two-space indentation, self-closing tags for childless elements, and
//! attribute order exactly as stored so repeated syncs produce stable
//! diffs.

use crate::descriptor::Element;

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serialize a descriptor document, including the XML declaration.
pub fn write_document(root: &Element) -> String {
    let mut out = String::from(HEADER);
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(out, value, true);
        out.push('"');
    }

    if element.children().is_empty() {
        match element.text() {
            Some(text) => {
                out.push('>');
                escape_into(out, text, false);
                out.push_str("</");
                out.push_str(element.name());
                out.push_str(">\n");
            }
            None => out.push_str("/>\n"),
        }
    } else {
        out.push_str(">\n");
        for child in element.children() {
            write_element(out, child, depth + 1);
        }
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str("</");
        out.push_str(element.name());
        out.push_str(">\n");
    }
}

fn escape_into(out: &mut String, value: &str, in_attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
