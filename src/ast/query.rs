//! Style state of a selection.

use bitflags::bitflags;

use super::{FormatKind, Node, StyleKind, total_len};
use crate::unicode::utf16_len;

bitflags! {
    /// Styles present somewhere in a selection.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u8 {
        const BOLD          = 0x01;
        const ITALIC        = 0x02;
        const UNDERLINE     = 0x04;
        const STRIKETHROUGH = 0x08;
        /// Inline code or preformatted text.
        const MONOSPACE     = 0x10;
        const SPOILER       = 0x20;
        /// Blockquote.
        const QUOTE         = 0x40;
    }
}

impl StyleFlags {
    /// Flag for a style container kind.
    #[must_use]
    pub const fn from_format(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Bold => Self::BOLD,
            FormatKind::Italic => Self::ITALIC,
            FormatKind::Underline => Self::UNDERLINE,
            FormatKind::Strike => Self::STRIKETHROUGH,
            FormatKind::Spoiler => Self::SPOILER,
            FormatKind::Blockquote => Self::QUOTE,
        }
    }

    /// Flag for a toggleable style. Links have no flag; see
    /// [`SelectionFormats::text_link_href`].
    #[must_use]
    pub const fn from_style(style: StyleKind) -> Self {
        match style.format_kind() {
            Some(kind) => Self::from_format(kind),
            None if matches!(style, StyleKind::Code) => Self::MONOSPACE,
            None => Self::empty(),
        }
    }
}

/// Result of [`active_styles`]: the union of styles over a selection and
/// the first link URL found in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionFormats {
    pub flags: StyleFlags,
    pub text_link_href: Option<String>,
}

impl SelectionFormats {
    #[must_use]
    pub const fn bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }

    #[must_use]
    pub const fn italic(&self) -> bool {
        self.flags.contains(StyleFlags::ITALIC)
    }

    #[must_use]
    pub const fn underline(&self) -> bool {
        self.flags.contains(StyleFlags::UNDERLINE)
    }

    #[must_use]
    pub const fn strikethrough(&self) -> bool {
        self.flags.contains(StyleFlags::STRIKETHROUGH)
    }

    #[must_use]
    pub const fn monospace(&self) -> bool {
        self.flags.contains(StyleFlags::MONOSPACE)
    }

    #[must_use]
    pub const fn spoiler(&self) -> bool {
        self.flags.contains(StyleFlags::SPOILER)
    }

    #[must_use]
    pub const fn quote(&self) -> bool {
        self.flags.contains(StyleFlags::QUOTE)
    }

    /// URL of the first link touched by the selection.
    #[must_use]
    pub fn text_link_href(&self) -> Option<&str> {
        self.text_link_href.as_deref()
    }

    /// Check whether `style` is active anywhere in the selection.
    #[must_use]
    pub fn has(&self, style: StyleKind) -> bool {
        match style {
            StyleKind::TextUrl => self.text_link_href.is_some(),
            _ => self.flags.contains(StyleFlags::from_style(style)),
        }
    }
}

/// Styles active over `[offset, offset + length)`.
///
/// Every text-bearing leaf that intersects the range contributes all of its
/// ancestors' styles. A zero-length range reports the leaf the caret is
/// strictly inside, so a caret on a boundary reports nothing. Emoji atoms
/// advance the offset but never contribute styles.
#[must_use]
pub fn active_styles(tree: &[Node], offset: usize, length: usize) -> SelectionFormats {
    let total = total_len(tree);
    let mut walker = StyleWalker {
        start: offset.min(total),
        end: offset.saturating_add(length).min(total),
        pos: 0,
        done: false,
        formats: SelectionFormats::default(),
    };
    walker.visit(tree, StyleFlags::empty(), None);
    walker.formats
}

struct StyleWalker {
    start: usize,
    end: usize,
    pos: usize,
    done: bool,
    formats: SelectionFormats,
}

impl StyleWalker {
    fn visit(&mut self, nodes: &[Node], inherited: StyleFlags, href: Option<&str>) {
        for node in nodes {
            if self.done {
                return;
            }
            match node {
                Node::Text { content } => self.leaf(utf16_len(content), inherited, href),
                Node::Code { content } | Node::Pre { content, .. } => {
                    self.leaf(utf16_len(content), inherited | StyleFlags::MONOSPACE, href);
                }
                Node::Emoji { .. } | Node::CustomEmoji { .. } => self.pos += node.len(),
                Node::Link { url, children } => {
                    self.visit(children, inherited, href.or(Some(url.as_str())));
                }
                Node::Styled { kind, children } => {
                    self.visit(children, inherited | StyleFlags::from_format(*kind), href);
                }
                Node::StringEntity { .. } => {}
            }
        }
    }

    fn leaf(&mut self, len: usize, flags: StyleFlags, href: Option<&str>) {
        let node_start = self.pos;
        if node_start >= self.end {
            self.done = true;
            return;
        }
        self.pos += len;
        if self.pos > self.start {
            self.formats.flags |= flags;
            if self.formats.text_link_href.is_none() {
                self.formats.text_link_href = href.map(str::to_string);
            }
        }
    }
}
