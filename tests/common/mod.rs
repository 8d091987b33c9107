#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a different subset

use std::sync::Once;

use entity_ast::{FormatKind, LogLevel, Node};

/// Install a tracing subscriber and route engine diagnostics into it.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        entity_ast::set_log_callback(|level, msg| match level {
            LogLevel::Debug => tracing::debug!(target: "entity_ast", "{msg}"),
            LogLevel::Info => tracing::info!(target: "entity_ast", "{msg}"),
            LogLevel::Warn => tracing::warn!(target: "entity_ast", "{msg}"),
            LogLevel::Error => tracing::error!(target: "entity_ast", "{msg}"),
        });
    });
}

pub fn bold(children: Vec<Node>) -> Node {
    Node::styled(FormatKind::Bold, children)
}

pub fn italic(children: Vec<Node>) -> Node {
    Node::styled(FormatKind::Italic, children)
}

pub fn spoiler(children: Vec<Node>) -> Node {
    Node::styled(FormatKind::Spoiler, children)
}
