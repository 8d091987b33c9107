//! Property-based tests for building, serializing and editing trees.
//!
//! Trees are generated directly and flattened, which guarantees entity sets
//! that nest without crossing. Text stays within ASCII plus a few emoji so
//! every character is either one unit wide or a two-unit emoji atom.

use entity_ast::ast::{self, normalize, total_len};
use entity_ast::{Entity, EntityKind, FormatKind, FormattedText, Node, StyleKind};
use proptest::prelude::*;

const HREF: &str = "https://p.example";

const STYLES: [StyleKind; 8] = [
    StyleKind::Bold,
    StyleKind::Italic,
    StyleKind::Underline,
    StyleKind::Strike,
    StyleKind::Code,
    StyleKind::Spoiler,
    StyleKind::Blockquote,
    StyleKind::TextUrl,
];

// ============================================================================
// Strategies
// ============================================================================

fn format_kind() -> impl Strategy<Value = FormatKind> {
    prop::sample::select(vec![
        FormatKind::Bold,
        FormatKind::Italic,
        FormatKind::Underline,
        FormatKind::Strike,
        FormatKind::Spoiler,
        FormatKind::Blockquote,
    ])
}

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        4 => "[a-z ]{1,4}".prop_map(Node::text),
        1 => prop::sample::select(vec!["😀", "🎉", "🔥"]).prop_map(Node::emoji),
        1 => "[a-z]{1,3}".prop_map(Node::code),
        1 => ("[a-z]{1,3}", prop::option::of(Just("rust".to_string())))
            .prop_map(|(content, language)| Node::pre(content, language)),
        1 => Just(Node::custom_emoji("5368324170671202286", "👍")),
    ]
}

fn tree() -> impl Strategy<Value = Vec<Node>> {
    let node = leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (format_kind(), prop::collection::vec(inner.clone(), 1..4))
                .prop_map(|(kind, children)| Node::styled(kind, children)),
            (
                prop::sample::select(vec!["https://a.example", "https://b.example"]),
                prop::collection::vec(inner, 1..4),
            )
                .prop_map(|(url, children)| Node::link(url, children)),
        ]
    });
    prop::collection::vec(node, 0..6)
}

/// Flat form of a generated tree, minus same-kind entities that touch or
/// nest, which the builder would coalesce into one.
fn flat(tree: Vec<Node>) -> FormattedText {
    let mut flat = ast::serialize(&normalize(tree));
    let mut kept: Vec<Entity> = Vec::new();
    for entity in flat.entities {
        let clash = kept.iter().any(|k| {
            k.kind == entity.kind
                && k.offset <= entity.offset + entity.length
                && entity.offset <= k.offset + k.length
        });
        if !clash {
            kept.push(entity);
        }
    }
    flat.entities = kept;
    flat
}

fn nested_input() -> impl Strategy<Value = FormattedText> {
    tree().prop_map(flat)
}

fn messy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", " ", "é", "😀", "🎉"]), 0..10)
        .prop_map(|parts| parts.concat())
}

/// Arbitrary spans, including empty, crossing and out-of-range ones.
fn messy_entity() -> impl Strategy<Value = Entity> {
    let kind = prop::sample::select(vec![
        EntityKind::Bold,
        EntityKind::Italic,
        EntityKind::Spoiler,
        EntityKind::Code,
        EntityKind::Pre,
        EntityKind::TextUrl,
        EntityKind::CustomEmoji,
        EntityKind::Hashtag,
        EntityKind::Unknown,
    ]);
    (kind, 0usize..14, 0usize..8).prop_map(|(kind, offset, length)| match kind {
        EntityKind::TextUrl => Entity::text_url(offset, length, "https://m.example"),
        EntityKind::CustomEmoji => Entity::custom_emoji(offset, length, "1"),
        _ => Entity::new(kind, offset, length),
    })
}

fn entity_kind_of(style: StyleKind) -> EntityKind {
    match style.format_kind() {
        Some(kind) => kind.entity_kind(),
        None if style == StyleKind::Code => EntityKind::Code,
        None => EntityKind::TextUrl,
    }
}

/// Whether an entity of `style` lies within two units of `[start, end)`.
fn style_near(flat: &FormattedText, style: StyleKind, start: usize, end: usize) -> bool {
    let kind = entity_kind_of(style);
    flat.entities
        .iter()
        .any(|e| e.kind == kind && e.offset <= end + 2 && e.offset + e.length + 2 >= start)
}

// ============================================================================
// Flat <-> tree
// ============================================================================

proptest! {
    /// Nested, non-crossing input survives build then serialize.
    #[test]
    fn build_serialize_round_trip(input in nested_input()) {
        let tree = ast::build(&input.text, &input.entities);
        let output = ast::serialize(&tree);
        prop_assert!(
            output.is_equivalent(&input),
            "round trip changed entities: {:?} -> {:?}", input.entities, output.entities
        );
    }

    /// Reloading a saved tree gives back the same tree, including the
    /// nesting of entities that share a span.
    #[test]
    fn rebuild_is_stable(input in nested_input()) {
        let tree = ast::build(&input.text, &input.entities);
        let output = ast::serialize(&tree);
        let rebuilt = ast::build(&output.text, &output.entities);
        prop_assert_eq!(&rebuilt, &tree);
        prop_assert_eq!(ast::serialize(&rebuilt), output);
    }

    /// Whatever the entities, the text and its length are kept and every
    /// serialized entity is valid.
    #[test]
    fn build_keeps_text_for_any_entities(
        text in messy_text(),
        entities in prop::collection::vec(messy_entity(), 0..6),
    ) {
        let tree = ast::build(&text, &entities);
        let output = ast::serialize(&tree);
        prop_assert_eq!(&output.text, &text);
        prop_assert_eq!(total_len(&tree), output.logical_len());
        prop_assert!(output.validate().is_ok(), "invalid output: {:?}", output.entities);
    }
}

// ============================================================================
// Editing
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Applying a style twice is the same as applying it once.
    #[test]
    fn apply_is_idempotent(input in nested_input(), offset in 0usize..32, length in 0usize..32) {
        let tree = ast::build(&input.text, &input.entities);
        for style in STYLES {
            let once = ast::apply_style(tree.clone(), offset, length, style, Some(HREF));
            let twice = ast::apply_style(once.clone(), offset, length, style, Some(HREF));
            prop_assert_eq!(ast::serialize(&twice), ast::serialize(&once), "style {:?}", style);
        }
    }

    /// Removing a freshly applied style restores the original.
    #[test]
    fn remove_undoes_apply(input in nested_input(), offset in 0usize..32, length in 0usize..32) {
        let tree = ast::build(&input.text, &input.entities);
        let before = ast::serialize(&tree);
        let total = total_len(&tree);
        let start = offset.min(total);
        let end = (offset + length).min(total);

        for style in STYLES {
            if style_near(&before, style, start, end) {
                continue;
            }
            let applied = ast::apply_style(tree.clone(), offset, length, style, Some(HREF));
            let restored = ast::remove_style(applied, offset, length, style);
            let after = ast::serialize(&restored);
            prop_assert!(
                after.is_equivalent(&before),
                "style {:?} on {}..{}: {:?} -> {:?}", style, start, end, before.entities, after.entities
            );
        }
    }

    /// Edits never change the text.
    #[test]
    fn edits_keep_text(input in nested_input(), offset in 0usize..32, length in 0usize..32) {
        let tree = ast::build(&input.text, &input.entities);
        let total = total_len(&tree);
        for style in STYLES {
            let applied = ast::apply_style(tree.clone(), offset, length, style, Some(HREF));
            prop_assert_eq!(total_len(&applied), total);
            prop_assert_eq!(&ast::serialize(&applied).text, &input.text);

            let removed = ast::remove_style(tree.clone(), offset, length, style);
            prop_assert_eq!(total_len(&removed), total);
            prop_assert_eq!(&ast::serialize(&removed).text, &input.text);

            let toggled = ast::toggle_style(tree.clone(), offset, length, style, Some(HREF));
            prop_assert_eq!(&ast::serialize(&toggled).text, &input.text);
        }
    }

    /// After removal no text leaf in the range reports the style.
    #[test]
    fn removed_style_is_inactive(input in nested_input(), offset in 0usize..32, length in 1usize..32) {
        let tree = ast::build(&input.text, &input.entities);
        // Pre leaves report monospace too, so Code is left out
        for style in STYLES.into_iter().filter(|&style| style != StyleKind::Code) {
            let removed = ast::remove_style(tree.clone(), offset, length, style);
            prop_assert!(
                !ast::active_styles(&removed, offset, length).has(style),
                "style {:?} still active", style
            );
        }
    }
}
