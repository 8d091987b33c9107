//! Unicode utilities: logical-length arithmetic and emoji detection.

mod emoji;
mod utf16;

pub use emoji::{EmojiMatcher, EmojiPresentation, is_emoji_presentation};
pub use utf16::{slice_utf16, split3_utf16, utf16_len, utf16_to_byte};
