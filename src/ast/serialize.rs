//! Tree to flat form.

use super::Node;
use super::tokenizer::EMOJI_LEN;
use crate::entity::{Entity, EntityKind, FormattedText};
use crate::unicode::utf16_len;

/// Flatten a tree into text plus entities.
///
/// Entities are ordered by offset ascending, then length descending, so an
/// enclosing entity always precedes the entities it contains. Entities
/// sharing a span keep document order, outer before inner, which is the
/// order [`build`](super::build) reads back as the same nesting. Nodes that
/// contribute no text emit no entity.
#[must_use]
pub fn serialize(tree: &[Node]) -> FormattedText {
    let mut out = Flattener::default();
    out.walk(tree);
    let mut entities: Vec<Entity> = out.slots.into_iter().flatten().collect();
    entities.sort_by(|a, b| {
        a.offset
            .cmp(&b.offset)
            .then_with(|| b.length.cmp(&a.length))
    });
    FormattedText::new(out.text, entities)
}

#[derive(Default)]
struct Flattener {
    text: String,
    /// Logical length of `text` so far.
    len: usize,
    /// One slot per node in pre-order, empty where nothing was emitted.
    slots: Vec<Option<Entity>>,
}

impl Flattener {
    fn push_str(&mut self, content: &str) {
        self.text.push_str(content);
        self.len += utf16_len(content);
    }

    /// Reserve the next entity slot before the node's content is written.
    fn open(&mut self) -> usize {
        self.slots.push(None);
        self.slots.len() - 1
    }

    fn close(&mut self, slot: usize, start: usize, entity: impl FnOnce(usize, usize) -> Entity) {
        let length = self.len - start;
        if length > 0 {
            self.slots[slot] = Some(entity(start, length));
        }
    }

    fn walk(&mut self, nodes: &[Node]) {
        for node in nodes {
            let start = self.len;
            match node {
                Node::Text { content } => self.push_str(content),
                Node::Emoji { content } => {
                    self.text.push_str(content);
                    self.len += EMOJI_LEN;
                }
                Node::CustomEmoji {
                    document_id,
                    content,
                } => {
                    let slot = self.open();
                    self.push_str(content);
                    self.close(slot, start, |offset, length| {
                        Entity::custom_emoji(offset, length, document_id.clone())
                    });
                }
                Node::Code { content } => {
                    let slot = self.open();
                    self.push_str(content);
                    self.close(slot, start, |offset, length| {
                        Entity::new(EntityKind::Code, offset, length)
                    });
                }
                Node::Pre { content, language } => {
                    let slot = self.open();
                    self.push_str(content);
                    self.close(slot, start, |offset, length| {
                        Entity::pre(offset, length, language.clone())
                    });
                }
                Node::Link { url, children } => {
                    let slot = self.open();
                    self.walk(children);
                    self.close(slot, start, |offset, length| {
                        Entity::text_url(offset, length, url.clone())
                    });
                }
                Node::Styled { kind, children } => {
                    let slot = self.open();
                    self.walk(children);
                    self.close(slot, start, |offset, length| {
                        Entity::new(kind.entity_kind(), offset, length)
                    });
                }
                Node::StringEntity { .. } => {}
            }
        }
    }
}
