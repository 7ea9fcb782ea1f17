//! Read-only presentations of a [`Tree`].
//!
//! Every function builds a `String` from a walk of the tree and performs no I/O.

use std::fmt::Write;

use crate::{NodeRef, Order, Tree};

const INDENT: &str = "    ";
const EMPTY: &str = "empty tree";

/// Tallest tree [`diagram`] draws. Width and row count double with every level.
pub const MAX_DIAGRAM_HEIGHT: usize = 6;

/// Sideways listing, right sub tree first, one key per line and four spaces per level.
pub fn text(tree: &Tree) -> String {
    sideways(tree, |out, key, _| {
        let _ = writeln!(out, "{key}");
    })
}

/// Like [`text`], each key followed by its balance factor in brackets.
pub fn hierarchy(tree: &Tree) -> String {
    sideways(tree, |out, key, balance_factor| {
        let _ = writeln!(out, "{key} [{balance_factor}]");
    })
}

fn sideways<F>(tree: &Tree, mut line: F) -> String
where
    F: FnMut(&mut String, i32, i32),
{
    if tree.is_empty() {
        return format!("{EMPTY}\n");
    }
    let mut out = String::new();
    tree.reverse_inorder(|visit| {
        out.push_str(&INDENT.repeat(visit.depth));
        line(&mut out, visit.key, visit.balance_factor);
    });
    out
}

/// Listing with box drawing connectors, right child above left child.
pub fn connectors(tree: &Tree) -> String {
    let root = match tree.root() {
        None => return format!("{EMPTY}\n"),
        Some(root) => root,
    };
    let mut out = String::new();
    connector_lines(&mut out, root, "", true);
    out
}

fn connector_lines(out: &mut String, node: NodeRef<'_>, prefix: &str, is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    let _ = writeln!(
        out,
        "{prefix}{branch}{} [FB={}]",
        node.key(),
        node.balance_factor()
    );

    let child_prefix = format!("{prefix}{}", if is_last { INDENT } else { "│   " });
    if let Some(right) = node.right() {
        connector_lines(out, right, &child_prefix, node.left().is_none());
    }
    if let Some(left) = node.left() {
        connector_lines(out, left, &child_prefix, true);
    }
}

/// Top-down drawing of the tree, one row of keys per level joined by `/` and `\` edges.
///
/// Trees taller than [`MAX_DIAGRAM_HEIGHT`] yield a single notice line instead.
pub fn diagram(tree: &Tree) -> String {
    if tree.is_empty() {
        return format!("{EMPTY}\n");
    }
    let max_level = tree.height();
    if max_level > MAX_DIAGRAM_HEIGHT {
        return format!(
            "tree too tall to draw (height {max_level}, limit {MAX_DIAGRAM_HEIGHT})\n"
        );
    }
    let mut out = String::new();
    let mut level = vec![tree.root()];
    let mut depth = 1;

    while level.iter().any(Option::is_some) {
        let floor = max_level.saturating_sub(depth) as u32;
        let edge_lines = if floor == 0 { 0 } else { 2usize.pow(floor - 1) };
        let first_spaces = 2usize.pow(floor) - 1;
        let between_spaces = 2usize.pow(floor + 1) - 1;

        spaces(&mut out, first_spaces);
        let mut next = Vec::with_capacity(level.len() * 2);
        for node in &level {
            match node {
                Some(node) => {
                    let _ = write!(out, "{}", node.key());
                    next.push(node.left());
                    next.push(node.right());
                }
                None => {
                    out.push(' ');
                    next.push(None);
                    next.push(None);
                }
            }
            spaces(&mut out, between_spaces);
        }
        end_line(&mut out);

        for i in 1..=edge_lines {
            for node in &level {
                spaces(&mut out, first_spaces.saturating_sub(i));
                let node = match node {
                    None => {
                        spaces(&mut out, 2 * edge_lines + i + 1);
                        continue;
                    }
                    Some(node) => node,
                };
                out.push(if node.left().is_some() { '/' } else { ' ' });
                spaces(&mut out, 2 * i - 1);
                out.push(if node.right().is_some() { '\\' } else { ' ' });
                spaces(&mut out, 2 * edge_lines - i);
            }
            end_line(&mut out);
        }

        level = next;
        depth += 1;
    }
    out
}

fn spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}

fn end_line(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

/// Graphviz description with `L`/`R` labelled edges.
///
/// Missing children are drawn as dotted edges to point shaped `NULL` placeholders,
/// they are not part of the tree.
pub fn dot(tree: &Tree) -> String {
    let mut out = String::new();
    out.push_str("digraph AVLTree {\n");
    out.push_str("    node [shape=circle, fontname=\"Arial\", fontsize=12];\n");
    out.push_str("    edge [arrowhead=vee, arrowsize=0.8];\n");

    if tree.is_empty() {
        let _ = writeln!(out, "    empty [label=\"{EMPTY}\", shape=plaintext];");
    }
    tree.preorder(Order::LeftFirst, |visit| {
        let id = visit.key;
        let _ = writeln!(out, "    \"node_{id}\" [label=\"{id}\"];");
        for (side, label, child) in [("left", 'L', visit.left), ("right", 'R', visit.right)] {
            match child {
                Some(child) => {
                    let _ = writeln!(
                        out,
                        "    \"node_{id}\" -> \"node_{child}\" [label=\"{label}\"];"
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "    \"null_{side}_{id}\" [label=\"NULL\", shape=point];"
                    );
                    let _ = writeln!(
                        out,
                        "    \"node_{id}\" -> \"null_{side}_{id}\" [label=\"{label}\", style=dotted];"
                    );
                }
            }
        }
    });

    out.push_str("}\n");
    out
}
