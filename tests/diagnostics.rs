//! Diagnostics reach the host through the log callback.
//!
//! Kept as a single test: the callback is process-wide.

use std::sync::{Arc, Mutex};

use entity_ast::ast;
use entity_ast::{Entity, EntityKind, LogLevel, StyleKind};

#[test]
fn test_skipped_entities_and_clamps_are_reported() {
    let seen: Arc<Mutex<Vec<(LogLevel, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    entity_ast::set_log_callback(move |level, msg| {
        sink.lock().unwrap().push((level, msg.to_string()));
    });

    let tree = ast::build(
        "abcdef",
        &[
            Entity::new(EntityKind::Bold, 0, 2),
            Entity::new(EntityKind::Italic, 4, 9),
            Entity::new(EntityKind::Code, 0, 4),
            Entity::pre(2, 4, None),
            Entity::new(EntityKind::Hashtag, 4, 2),
        ],
    );
    let _ = ast::apply_style(tree, 2, 100, StyleKind::Underline, None);
    entity_ast::clear_log_callback();

    let log = seen.lock().unwrap();
    let warnings: Vec<&str> = log
        .iter()
        .filter(|(level, _)| *level == LogLevel::Warn)
        .map(|(_, msg)| msg.as_str())
        .collect();
    assert_eq!(warnings.len(), 2, "warnings: {warnings:?}");
    assert!(warnings[0].contains("#1"), "{}", warnings[0]);
    assert!(warnings[0].contains("text length is 6"), "{}", warnings[0]);
    assert!(warnings[1].contains("#3"), "{}", warnings[1]);
    assert!(warnings[1].contains("crosses another atomic entity"), "{}", warnings[1]);

    let debug: Vec<&str> = log
        .iter()
        .filter(|(level, _)| *level == LogLevel::Debug)
        .map(|(_, msg)| msg.as_str())
        .collect();
    assert!(debug.iter().any(|msg| msg.contains("Hashtag")), "{debug:?}");
    assert!(debug.iter().any(|msg| msg.contains("clamped range 2+100")), "{debug:?}");

    // Nothing is delivered once the callback is cleared
    let before = log.len();
    drop(log);
    let _ = ast::build("x", &[Entity::new(EntityKind::Bold, 3, 1)]);
    assert_eq!(seen.lock().unwrap().len(), before);
}
