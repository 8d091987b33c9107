//! Nested tree form of formatted text.
//!
//! A tree is an ordered forest of [`Node`]s. Leaves carry text; containers
//! (`Link`, `Styled`) own their children exclusively, so the structure is a
//! strict tree without parent pointers. Every operation in this module works
//! in logical units: see [`Node::len`].
//!
//! # Examples
//!
//! ```
//! use entity_ast::{Entity, EntityKind, StyleKind, ast};
//!
//! let tree = ast::build("Hello world", &[Entity::new(EntityKind::Bold, 0, 5)]);
//! let tree = ast::apply_style(tree, 6, 5, StyleKind::Italic, None);
//! let flat = ast::serialize(&tree);
//! assert_eq!(flat.entities.len(), 2);
//! assert!(ast::active_styles(&tree, 6, 5).italic());
//! ```

mod builder;
mod editor;
mod query;
mod serialize;
mod split;
mod tokenizer;

pub use builder::{TreeBuilder, build};
pub use editor::{apply_style, remove_style, toggle_style};
pub use query::{SelectionFormats, StyleFlags, active_styles};
pub use serialize::serialize;
pub use split::{slice_forest, split_at};
pub use tokenizer::{EMOJI_LEN, split_into_atoms, split_into_atoms_with};

use crate::entity::EntityKind;
use crate::unicode::utf16_len;

/// Kinds of generic style containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Spoiler,
    Blockquote,
}

impl FormatKind {
    /// Flat-form entity type for this container.
    #[must_use]
    pub const fn entity_kind(self) -> EntityKind {
        match self {
            Self::Bold => EntityKind::Bold,
            Self::Italic => EntityKind::Italic,
            Self::Underline => EntityKind::Underline,
            Self::Strike => EntityKind::Strike,
            Self::Spoiler => EntityKind::Spoiler,
            Self::Blockquote => EntityKind::Blockquote,
        }
    }

    /// Container kind for a flat-form entity type, if it is one.
    #[must_use]
    pub const fn from_entity_kind(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Bold => Some(Self::Bold),
            EntityKind::Italic => Some(Self::Italic),
            EntityKind::Underline => Some(Self::Underline),
            EntityKind::Strike => Some(Self::Strike),
            EntityKind::Spoiler => Some(Self::Spoiler),
            EntityKind::Blockquote => Some(Self::Blockquote),
            _ => None,
        }
    }
}

/// Type-only markers for auto-detected entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringEntityKind {
    Hashtag,
    Cashtag,
    Phone,
    BotCommand,
    Email,
    MentionName,
    Mention,
    Unknown,
}

/// Styles a user can toggle on a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Spoiler,
    Blockquote,
    TextUrl,
}

impl StyleKind {
    /// Deep styles wrap whole subtrees by splitting the tree structurally;
    /// shallow styles wrap individual text runs.
    #[must_use]
    pub const fn is_deep(self) -> bool {
        matches!(self, Self::Spoiler | Self::TextUrl)
    }

    /// Container kind this style produces, if it is a generic container.
    #[must_use]
    pub const fn format_kind(self) -> Option<FormatKind> {
        match self {
            Self::Bold => Some(FormatKind::Bold),
            Self::Italic => Some(FormatKind::Italic),
            Self::Underline => Some(FormatKind::Underline),
            Self::Strike => Some(FormatKind::Strike),
            Self::Spoiler => Some(FormatKind::Spoiler),
            Self::Blockquote => Some(FormatKind::Blockquote),
            Self::Code | Self::TextUrl => None,
        }
    }
}

/// One element of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Run of plain characters.
    Text { content: String },
    /// One emoji grapheme, always [`EMOJI_LEN`] units wide.
    Emoji { content: String },
    /// Atomic custom emoji referencing an external asset.
    CustomEmoji {
        document_id: String,
        content: String,
    },
    /// Inline monospace run; content is opaque.
    Code { content: String },
    /// Preformatted block; content is opaque.
    Pre {
        content: String,
        language: Option<String>,
    },
    /// Hyperlink container.
    Link { url: String, children: Vec<Node> },
    /// Generic style container.
    Styled {
        kind: FormatKind,
        children: Vec<Node>,
    },
    /// Zero-width type marker.
    StringEntity { kind: StringEntityKind },
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Create an emoji node.
    #[must_use]
    pub fn emoji(content: impl Into<String>) -> Self {
        Self::Emoji {
            content: content.into(),
        }
    }

    /// Create a custom emoji node.
    #[must_use]
    pub fn custom_emoji(document_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::CustomEmoji {
            document_id: document_id.into(),
            content: content.into(),
        }
    }

    /// Create an inline code node.
    #[must_use]
    pub fn code(content: impl Into<String>) -> Self {
        Self::Code {
            content: content.into(),
        }
    }

    /// Create a preformatted node.
    #[must_use]
    pub fn pre(content: impl Into<String>, language: Option<String>) -> Self {
        Self::Pre {
            content: content.into(),
            language,
        }
    }

    /// Create a link container.
    #[must_use]
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Link {
            url: url.into(),
            children,
        }
    }

    /// Create a style container.
    #[must_use]
    pub fn styled(kind: FormatKind, children: Vec<Node>) -> Self {
        Self::Styled { kind, children }
    }

    /// Logical length of this node.
    ///
    /// Text-bearing leaves count their UTF-16 length, emoji count
    /// [`EMOJI_LEN`], containers the sum of their children.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text { content } | Self::Code { content } | Self::Pre { content, .. } => {
                utf16_len(content)
            }
            Self::Emoji { .. } => EMOJI_LEN,
            Self::CustomEmoji { content, .. } => utf16_len(content),
            Self::Link { children, .. } | Self::Styled { children, .. } => total_len(children),
            Self::StringEntity { .. } => 0,
        }
    }

    /// Check if this node contributes no logical length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child list for container nodes.
    #[must_use]
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Link { children, .. } | Self::Styled { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Check whether this node is the container or leaf a style produces.
    #[must_use]
    pub fn has_style(&self, style: StyleKind) -> bool {
        match (self, style) {
            (Self::Link { .. }, StyleKind::TextUrl) | (Self::Code { .. }, StyleKind::Code) => true,
            (Self::Styled { kind, .. }, _) => style.format_kind() == Some(*kind),
            _ => false,
        }
    }
}

/// Logical length of a forest.
#[must_use]
pub fn total_len(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::len).sum()
}

/// Coalesce adjacent siblings that carry identical formatting.
///
/// Adjacent `Text` runs are concatenated and adjacent `Styled` containers of
/// the same kind are joined, recursively. Links to the same URL, code runs
/// and pre blocks with the same language join the same way, so a structural
/// cut followed by its inverse restores the original shape. Empty leaves
/// and containers without children are dropped. Emoji atoms never merge.
#[must_use]
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            Node::Text { content }
            | Node::Code { content }
            | Node::Pre { content, .. }
            | Node::CustomEmoji { content, .. }
                if content.is_empty() =>
            {
                continue;
            }
            Node::Styled { kind, children } => {
                let children = normalize(children);
                if children.is_empty() {
                    continue;
                }
                Node::Styled { kind, children }
            }
            Node::Link { url, children } => {
                let children = normalize(children);
                if children.is_empty() {
                    continue;
                }
                Node::Link { url, children }
            }
            other => other,
        };

        let node = match (merged.pop(), node) {
            (Some(Node::Text { content: mut prev }), Node::Text { content }) => {
                prev.push_str(&content);
                Node::Text { content: prev }
            }
            (
                Some(Node::Styled {
                    kind: prev_kind,
                    children: mut joined,
                }),
                Node::Styled { kind, children },
            ) if prev_kind == kind => {
                joined.extend(children);
                Node::Styled {
                    kind,
                    children: normalize(joined),
                }
            }
            (
                Some(Node::Link {
                    url: prev_url,
                    children: mut joined,
                }),
                Node::Link { url, children },
            ) if prev_url == url => {
                joined.extend(children);
                Node::Link {
                    url,
                    children: normalize(joined),
                }
            }
            (Some(Node::Code { content: mut prev }), Node::Code { content }) => {
                prev.push_str(&content);
                Node::Code { content: prev }
            }
            (
                Some(Node::Pre {
                    content: mut prev,
                    language: prev_language,
                }),
                Node::Pre { content, language },
            ) if prev_language == language => {
                prev.push_str(&content);
                Node::Pre {
                    content: prev,
                    language,
                }
            }
            (prev, node) => {
                merged.extend(prev);
                node
            }
        };
        merged.push(node);
    }
    merged
}
