//! Plain-text extraction from a ticket view tree.
//!
//! Produces the ordered lines of the text fallback document. The walk is
//! depth-first and pure: it reads the tree and returns lines, nothing else.

use crate::config::ExportConfig;
use crate::model::{NodeKind, TicketView, ViewNode};

/// Extract lines from a view using the configured heading marker.
pub fn extract_view_lines(view: &TicketView, config: &ExportConfig) -> Vec<String> {
    extract_lines(&view.root, &config.heading_marker)
}

/// Extract the text lines of a node tree.
///
/// - Text leaves yield their trimmed text, if non-empty.
/// - Heading elements yield `<marker> <text> <marker>` built from their
///   rendered text, in place of their own direct text leaves. Their child
///   elements are still visited.
/// - Nodes with `display: none` or `visibility: hidden` are skipped along
///   with their whole subtree.
pub fn extract_lines(root: &ViewNode, heading_marker: &str) -> Vec<String> {
    let mut lines = Vec::new();
    walk(root, heading_marker, &mut lines);
    lines
}

fn walk(node: &ViewNode, marker: &str, out: &mut Vec<String>) {
    if node.is_suppressed() {
        return;
    }

    match &node.kind {
        NodeKind::Text { text } => push_line(out, text),
        NodeKind::Image { .. } => {}
        NodeKind::Element { .. } if node.is_heading() => {
            let visible = node.visible_text();
            let text = visible.trim();
            if !text.is_empty() {
                out.push(format!("{} {} {}", marker, text, marker));
            }
            for child in &node.children {
                if !matches!(child.kind, NodeKind::Text { .. }) {
                    walk(child, marker, out);
                }
            }
        }
        NodeKind::Element { .. } => {
            for child in &node.children {
                walk(child, marker, out);
            }
        }
    }
}

fn push_line(out: &mut Vec<String>, text: &str) {
    let line = text.trim();
    if !line.is_empty() {
        out.push(line.to_string());
    }
}
