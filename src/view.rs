//! Presentation view model
//!
//! Rows are rebuilt from the catalog on every call and never feed back into
//! the connection data. Search highlighting lives only here, as byte ranges
//! into each row's label.

use crate::catalog::{Catalog, Visible};
use crate::connections::{ConnectionNode, Leaf};
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

const HIGHLIGHT_STYLE: &str = "\x1b[1;33m";
const GROUP_STYLE: &str = "\x1b[1m";
const DIM_STYLE: &str = "\x1b[2m";
const RESET_STYLE: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Group,
    Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub depth: usize,
    pub kind: RowKind,
    pub label: String,
    /// Byte ranges of `label` that match the active query.
    pub highlights: Vec<Range<usize>>,
    pub description: Option<String>,
    pub tooltip: Option<String>,
    pub actionable: bool,
}

/// Rows for whatever the catalog currently shows: the whole tree, or the
/// flat list of matches with the query highlighted.
pub fn rows(catalog: &Catalog) -> Vec<Row> {
    let mut rows = Vec::new();
    match catalog.visible() {
        Visible::Tree(roots) => collect_tree_rows(roots, 0, &mut rows),
        Visible::Matches { query, leaves } => {
            let pattern = query_pattern(query);
            rows.extend(leaves.iter().map(|leaf| {
                let mut row = leaf_row(leaf, 0);
                row.highlights = pattern.as_ref().map(|pattern| highlight_spans(pattern, &row.label)).unwrap_or_default();
                row
            }));
        }
    }
    rows
}

fn collect_tree_rows(nodes: &[ConnectionNode], depth: usize, rows: &mut Vec<Row>) {
    for node in nodes {
        match node {
            ConnectionNode::Group(group) => {
                rows.push(Row {
                    depth,
                    kind: RowKind::Group,
                    label: group.name.clone(),
                    highlights: Vec::new(),
                    description: None,
                    tooltip: None,
                    actionable: false,
                });
                collect_tree_rows(&group.children, depth + 1, rows);
            }
            ConnectionNode::Leaf(leaf) => rows.push(leaf_row(leaf, depth)),
        }
    }
}

fn leaf_row(leaf: &Leaf, depth: usize) -> Row {
    Row {
        depth,
        kind: RowKind::Leaf,
        label: leaf.name.clone(),
        highlights: Vec::new(),
        description: leaf.description.clone(),
        tooltip: tooltip(leaf),
        actionable: leaf.is_actionable(),
    }
}

/// `"{protocol} {host}:{port}"`, using the standard port when none is stored.
pub fn tooltip(leaf: &Leaf) -> Option<String> {
    let (Some(protocol), Some(host)) = (leaf.target_protocol(), leaf.target_host()) else {
        return None;
    };
    Some(match leaf.effective_port() {
        Some(port) => format!("{} {}:{}", protocol, host, port),
        None => format!("{} {}", protocol, host),
    })
}

fn query_pattern(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build().ok()
}

fn highlight_spans(pattern: &Regex, label: &str) -> Vec<Range<usize>> {
    pattern.find_iter(label).map(|found| found.range()).collect()
}

/// Render rows as indented text, one per line.
///
/// With `styled`, highlights are bold yellow, groups bold, and descriptions
/// plus non-launchable leaves dimmed.
pub fn render(rows: &[Row], styled: bool) -> String {
    let label_width = rows.iter().map(|row| row.depth * 2 + 2 + row.label.width()).max().unwrap_or(0);
    let mut output = String::new();

    for row in rows {
        let marker = match row.kind {
            RowKind::Group => "▾ ",
            RowKind::Leaf => "  ",
        };
        let indent = "  ".repeat(row.depth);
        let used = row.depth * 2 + 2 + row.label.width();

        output.push_str(&indent);
        output.push_str(marker);
        output.push_str(&styled_label(row, styled));

        let detail = match (&row.description, &row.tooltip) {
            (Some(description), Some(tooltip)) => Some(format!("{}  ({})", description, tooltip)),
            (Some(description), None) => Some(description.clone()),
            (None, Some(tooltip)) => Some(format!("({})", tooltip)),
            (None, None) => None,
        };
        if let Some(detail) = detail {
            output.push_str(&" ".repeat(label_width - used + 2));
            if styled {
                output.push_str(DIM_STYLE);
                output.push_str(&detail);
                output.push_str(RESET_STYLE);
            } else {
                output.push_str(&detail);
            }
        }
        output.push('\n');
    }

    output
}

fn styled_label(row: &Row, styled: bool) -> String {
    if !styled {
        return row.label.clone();
    }

    let base = match (row.kind, row.actionable) {
        (RowKind::Group, _) => GROUP_STYLE,
        (RowKind::Leaf, true) => "",
        (RowKind::Leaf, false) => DIM_STYLE,
    };

    let mut label = String::with_capacity(row.label.len() + 16);
    let mut cursor = 0;
    label.push_str(base);
    for span in &row.highlights {
        label.push_str(&row.label[cursor..span.start]);
        label.push_str(HIGHLIGHT_STYLE);
        label.push_str(&row.label[span.clone()]);
        label.push_str(RESET_STYLE);
        label.push_str(base);
        cursor = span.end;
    }
    label.push_str(&row.label[cursor..]);
    if !base.is_empty() {
        label.push_str(RESET_STYLE);
    }
    label
}

#[cfg(test)]
#[path = "test/view.rs"]
mod tests;
