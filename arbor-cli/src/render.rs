//! Plain-text rendering of the visible rows.

use arbor::{NodeId, TreeItems};

/// Render the visible rows, one per line.
///
/// `>` marks the cursor, `▼`/`▶` expanded/collapsed nodes with children, and
/// a trailing `*` selected nodes. Icons are shown in brackets.
pub fn outline(items: &TreeItems<String>, current: Option<NodeId>) -> String {
    let mut out = String::new();
    for row in items.visible() {
        let Some(node) = items.get(row.id) else { continue };
        let cursor = if current == Some(row.id) { ">" } else { " " };
        let marker = match (row.has_children, row.expanded) {
            (true, true) => "▼",
            (true, false) => "▶",
            (false, _) => " ",
        };
        let indent = "  ".repeat(row.depth as usize);
        out.push_str(&format!("{cursor} {indent}{marker} "));
        if let Some(icon) = node.current_icon() {
            out.push_str(&format!("[{}] ", icon.render()));
        }
        out.push_str(node.value());
        if row.selected {
            out.push_str(" *");
        }
        out.push('\n');
    }
    out
}
