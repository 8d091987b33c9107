//! Applying and removing styles on logical ranges.
//!
//! All entry points consume the tree and return the edited one. Ranges are
//! clamped to the tree; an empty range after clamping leaves the tree as
//! it is. The result is always passed through [`normalize`].

use super::split::split_at;
use super::{Node, StyleKind, normalize, total_len};
use crate::event::{LogLevel, emit_log};
use crate::unicode::{split3_utf16, utf16_len};

/// Apply `style` to `[offset, offset + length)`.
///
/// Shallow styles wrap each covered text run (and emoji atom) in its own
/// container; [`normalize`] then joins neighbours. Code and pre leaves are
/// left outside the new containers. Deep styles (`Spoiler`, `TextUrl`) cut
/// the tree at both ends of the range and wrap the whole middle forest,
/// after removing any same-kind nodes inside it.
///
/// A range covering the whole tree is always wrapped in a single
/// container, which then holds any code and pre leaves as well. `Code` is
/// the exception, as its leaves cannot hold other nodes.
///
/// `href` is the link target for `TextUrl` and ignored otherwise. A missing
/// or empty `href` removes links from the range instead.
#[must_use]
pub fn apply_style(
    tree: Vec<Node>,
    offset: usize,
    length: usize,
    style: StyleKind,
    href: Option<&str>,
) -> Vec<Node> {
    if style == StyleKind::TextUrl && href.is_none_or(str::is_empty) {
        return remove_style(tree, offset, length, style);
    }
    let Some((start, end)) = clamp_range(&tree, offset, length) else {
        return tree;
    };
    if start == 0 && end == total_len(&tree) && style != StyleKind::Code {
        return normalize(wrap_forest(&tree, start, end, style, href));
    }
    normalize(apply_range(tree, start, end, style, href))
}

/// Remove `style` from `[offset, offset + length)`.
///
/// Every node of the style's kind that intersects the range is unwrapped
/// and the style is re-applied to the parts of it outside the range. A
/// link keeps its own URL on both remaining fragments.
#[must_use]
pub fn remove_style(tree: Vec<Node>, offset: usize, length: usize, style: StyleKind) -> Vec<Node> {
    let Some((start, end)) = clamp_range(&tree, offset, length) else {
        return tree;
    };
    let mut pos = 0;
    normalize(unwrap_range(tree, start, end, style, &mut pos))
}

/// Remove `style` if any part of the range carries it, apply it otherwise.
///
/// Unlike [`active_styles`](super::active_styles), emoji atoms count here,
/// so a selection holding only a styled emoji can be toggled off. For
/// `TextUrl` the decision follows `href` instead: a missing or empty URL
/// removes links from the range, anything else (re)links it.
#[must_use]
pub fn toggle_style(
    tree: Vec<Node>,
    offset: usize,
    length: usize,
    style: StyleKind,
    href: Option<&str>,
) -> Vec<Node> {
    let remove = match style {
        StyleKind::TextUrl => href.is_none_or(str::is_empty),
        _ => clamp_range(&tree, offset, length)
            .is_some_and(|(start, end)| range_has_style(&tree, start, end, style, &mut 0)),
    };
    if remove {
        remove_style(tree, offset, length, style)
    } else {
        apply_style(tree, offset, length, style, href)
    }
}

fn clamp_range(tree: &[Node], offset: usize, length: usize) -> Option<(usize, usize)> {
    let total = total_len(tree);
    let start = offset.min(total);
    let end = offset.saturating_add(length).min(total);
    if start != offset || end != offset.saturating_add(length) {
        emit_log(
            LogLevel::Debug,
            &format!("clamped range {offset}+{length} to {start}..{end} (tree length {total})"),
        );
    }
    (start < end).then_some((start, end))
}

/// Whether a non-empty node carrying `style` overlaps `[start, end)`.
fn range_has_style(
    nodes: &[Node],
    start: usize,
    end: usize,
    style: StyleKind,
    pos: &mut usize,
) -> bool {
    for node in nodes {
        let node_start = *pos;
        if node_start >= end {
            return false;
        }
        let node_end = node_start + node.len();
        if node_end > start && node_end > node_start && node.has_style(style) {
            return true;
        }
        let mut inner = node_start;
        let nested = node.children().filter(|_| node_end > start);
        if nested.is_some_and(|children| range_has_style(children, start, end, style, &mut inner)) {
            return true;
        }
        *pos = node_end;
    }
    false
}

fn apply_range(
    tree: Vec<Node>,
    start: usize,
    end: usize,
    style: StyleKind,
    href: Option<&str>,
) -> Vec<Node> {
    if style.is_deep() {
        wrap_forest(&tree, start, end, style, href)
    } else {
        let mut pos = 0;
        wrap_leaves(tree, start, end, style, false, &mut pos)
    }
}

/// Container (or code leaf) for a covered text slice.
fn wrap_text(style: StyleKind, inside: &str) -> Node {
    match style.format_kind() {
        Some(kind) => Node::styled(kind, vec![Node::text(inside)]),
        None => Node::code(inside),
    }
}

/// Shallow apply. `covered` is set below an ancestor that already carries
/// the style, where nothing needs wrapping.
fn wrap_leaves(
    nodes: Vec<Node>,
    start: usize,
    end: usize,
    style: StyleKind,
    covered: bool,
    pos: &mut usize,
) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut nodes = nodes.into_iter();
    while let Some(node) = nodes.next() {
        if *pos >= end {
            out.push(node);
            out.extend(nodes);
            break;
        }
        match node {
            Node::Text { content } => {
                let node_start = *pos;
                *pos += utf16_len(&content);
                if covered || *pos <= start {
                    out.push(Node::Text { content });
                    continue;
                }
                let (before, inside, after) =
                    split3_utf16(&content, start.saturating_sub(node_start), end - node_start);
                if !before.is_empty() {
                    out.push(Node::text(before));
                }
                if !inside.is_empty() {
                    out.push(wrap_text(style, inside));
                }
                if !after.is_empty() {
                    out.push(Node::text(after));
                }
            }
            Node::Emoji { .. } | Node::CustomEmoji { .. } => {
                let node_start = *pos;
                *pos += node.len();
                // Code leaves hold plain text only, so atoms stay outside them
                let wrap = !covered && node_start >= start && style != StyleKind::Code;
                match style.format_kind() {
                    Some(kind) if wrap => out.push(Node::styled(kind, vec![node])),
                    _ => out.push(node),
                }
            }
            Node::Link { url, children } => {
                let children = wrap_leaves(children, start, end, style, covered, pos);
                out.push(Node::Link { url, children });
            }
            Node::Styled { kind, children } => {
                let covered = covered || style.format_kind() == Some(kind);
                let children = wrap_leaves(children, start, end, style, covered, pos);
                out.push(Node::Styled { kind, children });
            }
            leaf => {
                *pos += leaf.len();
                out.push(leaf);
            }
        }
    }
    out
}

/// Deep apply: wrap the forest between `start` and `end` in one node.
fn wrap_forest(
    tree: &[Node],
    start: usize,
    end: usize,
    style: StyleKind,
    href: Option<&str>,
) -> Vec<Node> {
    let mut parts = split_at(tree, &[start, end]).into_iter();
    let before = parts.next().unwrap_or_default();
    let middle = strip_style(parts.next().unwrap_or_default(), style);
    let after = parts.next().unwrap_or_default();

    let wrapper = match style.format_kind() {
        Some(kind) => Node::styled(kind, middle),
        None => Node::link(href.unwrap_or_default(), middle),
    };

    let mut out = before;
    out.push(wrapper);
    out.extend(after);
    out
}

/// Unwrap every container carrying `style`, at any depth.
fn strip_style(nodes: Vec<Node>, style: StyleKind) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Link { url, children } => {
                let children = strip_style(children, style);
                if style == StyleKind::TextUrl {
                    out.extend(children);
                } else {
                    out.push(Node::Link { url, children });
                }
            }
            Node::Styled { kind, children } => {
                let children = strip_style(children, style);
                if style.format_kind() == Some(kind) {
                    out.extend(children);
                } else {
                    out.push(Node::Styled { kind, children });
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn unwrap_range(
    nodes: Vec<Node>,
    start: usize,
    end: usize,
    style: StyleKind,
    pos: &mut usize,
) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut nodes = nodes.into_iter();
    while let Some(node) = nodes.next() {
        if *pos >= end {
            out.push(node);
            out.extend(nodes);
            break;
        }
        if node.has_style(style) {
            let node_start = *pos;
            let len = node.len();
            *pos += len;
            if *pos <= start {
                out.push(node);
            } else {
                let local_start = start.saturating_sub(node_start);
                let local_end = (end - node_start).min(len);
                out.extend(unwrap_node(node, local_start, local_end, len, style));
            }
            continue;
        }
        match node {
            Node::Link { url, children } => {
                let children = unwrap_range(children, start, end, style, pos);
                out.push(Node::Link { url, children });
            }
            Node::Styled { kind, children } => {
                let children = unwrap_range(children, start, end, style, pos);
                out.push(Node::Styled { kind, children });
            }
            leaf => {
                *pos += leaf.len();
                out.push(leaf);
            }
        }
    }
    out
}

/// Replace a styled node by its content, re-applying the style to the
/// node-local ranges `[0, local_start)` and `[local_end, len)`. Same-kind
/// nodes nested inside are unwrapped over the range as well.
fn unwrap_node(
    node: Node,
    local_start: usize,
    local_end: usize,
    len: usize,
    style: StyleKind,
) -> Vec<Node> {
    let (mut children, href) = match node {
        Node::Link { url, children } => (children, Some(url)),
        Node::Styled { children, .. } => (children, None),
        Node::Code { content } => (vec![Node::text(content)], None),
        other => return vec![other],
    };
    let mut pos = 0;
    children = unwrap_range(children, local_start, local_end, style, &mut pos);
    if local_start > 0 {
        children = apply_range(children, 0, local_start, style, href.as_deref());
    }
    if local_end < len {
        children = apply_range(children, local_end, len, style, href.as_deref());
    }
    children
}
