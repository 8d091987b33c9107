//! Fuzz target for the tree builder and editor.
//!
//! Arbitrary text and entity spans must never panic, and the text must
//! survive build, edit and serialize unchanged.

#![no_main]

use arbitrary::Arbitrary;
use entity_ast::ast;
use entity_ast::{Entity, EntityKind, StyleKind};
use libfuzzer_sys::fuzz_target;

const KINDS: [EntityKind; 9] = [
    EntityKind::Bold,
    EntityKind::Italic,
    EntityKind::Spoiler,
    EntityKind::Blockquote,
    EntityKind::Code,
    EntityKind::Pre,
    EntityKind::TextUrl,
    EntityKind::CustomEmoji,
    EntityKind::Hashtag,
];

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

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    spans: Vec<(u8, u16, u16)>,
    edits: Vec<(u8, u16, u16, bool)>,
}

fuzz_target!(|input: Input<'_>| {
    let entities: Vec<Entity> = input
        .spans
        .iter()
        .map(|&(kind, offset, length)| {
            let mut entity = Entity::new(
                KINDS[usize::from(kind) % KINDS.len()],
                usize::from(offset),
                usize::from(length),
            );
            entity.url = Some("https://fuzz.example".into());
            entity
        })
        .collect();

    let mut tree = ast::build(input.text, &entities);
    assert_eq!(ast::serialize(&tree).text, input.text);

    for &(style, offset, length, remove) in input.edits.iter().take(8) {
        let style = STYLES[usize::from(style) % STYLES.len()];
        let (offset, length) = (usize::from(offset), usize::from(length));
        tree = if remove {
            ast::remove_style(tree, offset, length, style)
        } else {
            ast::apply_style(tree, offset, length, style, Some("https://fuzz.example"))
        };
        let _ = ast::active_styles(&tree, offset, length);
    }

    let output = ast::serialize(&tree);
    assert_eq!(output.text, input.text);
    assert!(output.validate().is_ok());
});
