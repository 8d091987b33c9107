//! `entity_ast` - formatted-text editing engine
//!
//! Converts between the flat form of rich text (a string plus entity spans
//! with offsets in UTF-16 code units) and a nested node tree suited to
//! structural editing, and applies or removes styles on arbitrary ranges of
//! that tree, including ranges that only partly overlap existing nodes.
//!
//! ```
//! use entity_ast::{Entity, EntityKind, FormattedText, StyleKind, ast};
//!
//! let input = FormattedText::new("Hello world", vec![Entity::new(EntityKind::Bold, 0, 5)]);
//! let tree = ast::build(&input.text, &input.entities);
//! let tree = ast::remove_style(tree, 0, 2, StyleKind::Bold);
//!
//! let output = ast::serialize(&tree);
//! assert_eq!(output.text, "Hello world");
//! assert_eq!(output.entities, vec![Entity::new(EntityKind::Bold, 2, 3)]);
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow ast::Node etc
#![allow(clippy::missing_errors_doc)] // Error cases are documented on the enum
#![allow(clippy::missing_panics_doc)] // Nothing panics outside tests
#![allow(clippy::needless_pass_by_value)] // Edit entry points take ownership of the tree
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::must_use_candidate)] // Accessors are marked where it matters
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod ast;
pub mod entity;
pub mod error;
pub mod event;
pub mod unicode;

// Re-export core types at crate root
pub use ast::{
    FormatKind, Node, SelectionFormats, StringEntityKind, StyleFlags, StyleKind, TreeBuilder,
};
pub use entity::{Entity, EntityKind, FormattedText};
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
