//! Structural cuts through a tree.
//!
//! Cutting at a logical offset recurses into containers (cloning the
//! container around the part that falls on each side) and truncates
//! text-bearing leaves. Emoji atoms are never divided: an atom belongs to
//! the part in which it starts.

use super::{Node, total_len};
use crate::unicode::slice_utf16;

/// Copy of the sub-forest covering logical range `[start, end)`.
///
/// Containers that end up with no children are omitted.
#[must_use]
pub fn slice_forest(nodes: &[Node], start: usize, end: usize) -> Vec<Node> {
    let mut out = Vec::new();
    slice_into(nodes, start, end, 0, &mut out);
    out
}

/// Cut a forest at each of `cuts` (sorted and deduplicated internally,
/// clamped to the forest length).
///
/// Always returns `cuts.len() + 1` contiguous forests (after
/// deduplication), some of which may be empty.
#[must_use]
pub fn split_at(nodes: &[Node], cuts: &[usize]) -> Vec<Vec<Node>> {
    let total = total_len(nodes);
    let mut bounds: Vec<usize> = cuts.iter().map(|&cut| cut.min(total)).collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut parts = Vec::with_capacity(bounds.len() + 1);
    let mut from = 0;
    for &to in &bounds {
        parts.push(slice_forest(nodes, from, to));
        from = to;
    }
    parts.push(slice_forest(nodes, from, total));
    parts
}

fn slice_into(nodes: &[Node], start: usize, end: usize, mut pos: usize, out: &mut Vec<Node>) {
    for node in nodes {
        if pos >= end {
            break;
        }
        let len = node.len();
        let node_end = pos + len;

        if len == 0 {
            if pos >= start {
                out.push(node.clone());
            }
            continue;
        }
        if node_end <= start {
            pos = node_end;
            continue;
        }

        let from = start.saturating_sub(pos);
        let to = (end - pos).min(len);
        match node {
            Node::Text { content } => out.push(Node::text(slice_utf16(content, from, to))),
            Node::Code { content } => out.push(Node::code(slice_utf16(content, from, to))),
            Node::Pre { content, language } => {
                out.push(Node::pre(slice_utf16(content, from, to), language.clone()));
            }
            Node::Emoji { .. } | Node::CustomEmoji { .. } => {
                if start <= pos {
                    out.push(node.clone());
                }
            }
            Node::Link { url, children } => {
                let mut sliced = Vec::new();
                slice_into(children, start, end, pos, &mut sliced);
                if !sliced.is_empty() {
                    out.push(Node::link(url.clone(), sliced));
                }
            }
            Node::Styled { kind, children } => {
                let mut sliced = Vec::new();
                slice_into(children, start, end, pos, &mut sliced);
                if !sliced.is_empty() {
                    out.push(Node::styled(*kind, sliced));
                }
            }
            Node::StringEntity { .. } => {}
        }
        pos = node_end;
    }
}
