//! Flat form to tree.
//!
//! Entity boundaries partition the text into minimal segments. Each segment
//! is covered by some set of entities; consecutive segments with the same
//! covering set are combined, and each combined segment is built by
//! repeatedly peeling off its longest covering entity as the outer node.
//! A final [`normalize`] pass makes equivalent inputs produce identical
//! trees.

use std::collections::BTreeSet;

use super::tokenizer::split_into_atoms_with;
use super::{FormatKind, Node, normalize};
use crate::entity::{Entity, EntityKind};
use crate::event::{LogLevel, emit_log};
use crate::unicode::{EmojiMatcher, EmojiPresentation, slice_utf16, utf16_len};

/// Build a tree from text and entities with the default emoji matcher.
#[must_use]
pub fn build(text: &str, entities: &[Entity]) -> Vec<Node> {
    TreeBuilder::new().build(text, entities)
}

/// Configurable flat-to-tree builder.
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder<M = EmojiPresentation> {
    matcher: M,
}

impl TreeBuilder {
    /// Create a builder using Unicode emoji presentation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EmojiMatcher> TreeBuilder<M> {
    /// Replace the emoji matcher used to tokenize unformatted runs.
    #[must_use]
    pub fn with_matcher<N: EmojiMatcher>(self, matcher: N) -> TreeBuilder<N> {
        TreeBuilder { matcher }
    }

    /// Build a tree from `text` and `entities`.
    ///
    /// Entities that are empty, run past the end of the text, or cross
    /// another atomic entity (custom emoji, code, pre) are skipped. A link
    /// or custom emoji without its `url` or `document_id` gets an empty one,
    /// which [`Entity::is_equivalent`] treats as the same.
    #[must_use]
    pub fn build(&self, text: &str, entities: &[Entity]) -> Vec<Node> {
        let text_len = utf16_len(text);
        let entities = usable_entities(entities, text_len);

        let mut breakpoints = BTreeSet::from([0, text_len]);
        for entity in &entities {
            breakpoints.insert(entity.offset);
            breakpoints.insert(entity.offset + entity.length);
        }
        let points: Vec<usize> = breakpoints.into_iter().collect();

        let ctx = SegmentBuilder {
            text,
            entities: &entities,
            matcher: &self.matcher,
        };

        let mut nodes = Vec::new();
        let mut segments = points
            .windows(2)
            .map(|w| Segment::covered(w[0], w[1], &entities))
            .peekable();
        while let Some(mut segment) = segments.next() {
            let keys = span_keys(&segment.active, &entities);
            while let Some(next) =
                segments.next_if(|next| span_keys(&next.active, &entities) == keys)
            {
                segment.end = next.end;
            }
            nodes.extend(ctx.build(segment.start, segment.end, &segment.active));
        }

        normalize(nodes)
    }
}

/// A half-open logical range and the entities that fully cover it.
#[derive(Debug)]
struct Segment {
    start: usize,
    end: usize,
    /// Indices into the usable entity list, in original order.
    active: Vec<usize>,
}

impl Segment {
    fn covered(start: usize, end: usize, entities: &[&Entity]) -> Self {
        let active = entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.offset <= start && e.offset + e.length >= end)
            .map(|(idx, _)| idx)
            .collect();
        Self { start, end, active }
    }
}

/// Covering sets compare as unordered sets of (type, offset, length).
fn span_keys(active: &[usize], entities: &[&Entity]) -> Vec<(EntityKind, usize, usize)> {
    let mut keys: Vec<_> = active.iter().map(|&idx| entities[idx].span_key()).collect();
    keys.sort_unstable();
    keys
}

const fn is_atomic(kind: EntityKind) -> bool {
    matches!(
        kind,
        EntityKind::CustomEmoji | EntityKind::Code | EntityKind::Pre
    )
}

fn crosses(a: &Entity, b: &Entity) -> bool {
    let (a_end, b_end) = (a.offset + a.length, b.offset + b.length);
    (a.offset < b.offset && b.offset < a_end && a_end < b_end)
        || (b.offset < a.offset && a.offset < b_end && b_end < a_end)
}

fn usable_entities(entities: &[Entity], text_len: usize) -> Vec<&Entity> {
    let mut usable: Vec<&Entity> = Vec::with_capacity(entities.len());
    for (index, entity) in entities.iter().enumerate() {
        if !entity.fits(text_len) {
            emit_log(
                LogLevel::Warn,
                &format!(
                    "skipping entity #{index} {:?} at {}+{}: text length is {text_len}",
                    entity.kind, entity.offset, entity.length
                ),
            );
            continue;
        }
        if is_atomic(entity.kind)
            && usable
                .iter()
                .any(|kept| is_atomic(kept.kind) && crosses(kept, entity))
        {
            emit_log(
                LogLevel::Warn,
                &format!(
                    "skipping entity #{index} {:?} at {}+{}: crosses another atomic entity",
                    entity.kind, entity.offset, entity.length
                ),
            );
            continue;
        }
        usable.push(entity);
    }
    usable
}

struct SegmentBuilder<'a, M> {
    text: &'a str,
    entities: &'a [&'a Entity],
    matcher: &'a M,
}

impl<M: EmojiMatcher> SegmentBuilder<'_, M> {
    fn raw(&self, start: usize, end: usize) -> &str {
        slice_utf16(self.text, start, end)
    }

    fn build(&self, start: usize, end: usize, active: &[usize]) -> Vec<Node> {
        let Some(outer_idx) = self.outer(active) else {
            return split_into_atoms_with(self.raw(start, end), self.matcher);
        };
        let outer = self.entities[outer_idx];
        let inner: Vec<usize> = active
            .iter()
            .copied()
            .filter(|&idx| idx != outer_idx)
            .collect();
        let (span_start, span_end) = (outer.offset, outer.offset + outer.length);

        if is_atomic(outer.kind) {
            // The leaf carries the entity's whole span, so only the first
            // segment it covers emits it.
            if start > span_start {
                return Vec::new();
            }
            let content = self.raw(span_start, span_end).to_string();
            let node = match outer.kind {
                EntityKind::CustomEmoji => Node::CustomEmoji {
                    document_id: outer.document_id.clone().unwrap_or_default(),
                    content,
                },
                EntityKind::Pre => Node::pre(content, outer.language.clone()),
                _ => Node::code(content),
            };
            return vec![node];
        }

        if outer.kind == EntityKind::TextUrl {
            let children = self.build(start, end, &inner);
            if children.is_empty() {
                return children;
            }
            let url = outer.url.clone().unwrap_or_default();
            return vec![Node::link(url, children)];
        }

        match FormatKind::from_entity_kind(outer.kind) {
            Some(kind) => {
                let children = self.build(start, end, &inner);
                if children.is_empty() {
                    return children;
                }
                vec![Node::styled(kind, children)]
            }
            None => {
                emit_log(
                    LogLevel::Debug,
                    &format!(
                        "{:?} at {}+{} has no tree form, keeping plain text",
                        outer.kind, outer.offset, outer.length
                    ),
                );
                if inner.is_empty() {
                    vec![Node::text(self.raw(start, end))]
                } else {
                    self.build(start, end, &inner)
                }
            }
        }
    }

    /// Longest active entity; ties go to the earliest in input order, except
    /// that an atomic entity never encloses a container of the same span.
    fn outer(&self, active: &[usize]) -> Option<usize> {
        active.iter().copied().reduce(|best, idx| {
            let (candidate, current) = (self.entities[idx], self.entities[best]);
            let wins = candidate.length > current.length
                || (candidate.length == current.length
                    && is_atomic(current.kind)
                    && !is_atomic(candidate.kind));
            if wins { idx } else { best }
        })
    }
}
