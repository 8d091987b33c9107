//! Split plain text into text runs and emoji atoms.

use super::Node;
use crate::unicode::{EmojiMatcher, EmojiPresentation, utf16_len};
use unicode_segmentation::UnicodeSegmentation;

/// Logical width of an emoji atom (one surrogate pair).
pub const EMOJI_LEN: usize = 2;

/// Split `text` into `Text` and `Emoji` nodes using the default matcher.
///
/// Substring boundaries are preserved exactly: concatenating the contents
/// of the returned nodes reproduces `text`.
#[must_use]
pub fn split_into_atoms(text: &str) -> Vec<Node> {
    split_into_atoms_with(text, &EmojiPresentation)
}

/// Split `text` into `Text` and `Emoji` nodes with a custom matcher.
///
/// A grapheme cluster becomes an emoji atom only if the matcher accepts it
/// and it is exactly [`EMOJI_LEN`] UTF-16 units wide; everything else stays
/// in the surrounding text run. Empty runs are omitted.
#[must_use]
pub fn split_into_atoms_with(text: &str, matcher: &dyn EmojiMatcher) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut run_start = 0;

    for (idx, grapheme) in text.grapheme_indices(true) {
        if utf16_len(grapheme) != EMOJI_LEN || !matcher.is_emoji(grapheme) {
            continue;
        }
        if idx > run_start {
            nodes.push(Node::text(&text[run_start..idx]));
        }
        nodes.push(Node::emoji(grapheme));
        run_start = idx + grapheme.len();
    }

    if run_start < text.len() {
        nodes.push(Node::text(&text[run_start..]));
    }
    nodes
}
