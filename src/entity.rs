//! Flat form: text plus entity spans.
//!
//! This is the wire and persistence shape consumed by draft storage,
//! history and message senders:
//!
//! ```json
//! {"text": "Hello world", "entities": [{"type": "MessageEntityBold", "offset": 0, "length": 5}]}
//! ```
//!
//! Offsets and lengths are logical units (UTF-16 code units).

use crate::error::{Error, Result};
use crate::unicode::utf16_len;
use serde::{Deserialize, Serialize};

/// Entity type tag.
///
/// Unrecognised tags deserialize as [`EntityKind::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "MessageEntityBold")]
    Bold,
    #[serde(rename = "MessageEntityItalic")]
    Italic,
    #[serde(rename = "MessageEntityUnderline")]
    Underline,
    #[serde(rename = "MessageEntityStrike")]
    Strike,
    #[serde(rename = "MessageEntitySpoiler")]
    Spoiler,
    #[serde(rename = "MessageEntityBlockquote")]
    Blockquote,
    #[serde(rename = "MessageEntityCode")]
    Code,
    #[serde(rename = "MessageEntityPre")]
    Pre,
    #[serde(rename = "MessageEntityTextUrl")]
    TextUrl,
    #[serde(rename = "MessageEntityUrl")]
    Url,
    #[serde(rename = "MessageEntityCustomEmoji")]
    CustomEmoji,
    #[serde(rename = "MessageEntityHashtag")]
    Hashtag,
    #[serde(rename = "MessageEntityCashtag")]
    Cashtag,
    #[serde(rename = "MessageEntityPhone")]
    Phone,
    #[serde(rename = "MessageEntityBotCommand")]
    BotCommand,
    #[serde(rename = "MessageEntityEmail")]
    Email,
    #[serde(rename = "MessageEntityMentionName")]
    MentionName,
    #[serde(rename = "MessageEntityMention")]
    Mention,
    #[serde(rename = "MessageEntityUnknown", other)]
    Unknown,
}

/// One entity span.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

impl Entity {
    /// Create an entity without type-specific fields.
    #[must_use]
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            url: None,
            language: None,
            document_id: None,
        }
    }

    /// Create a `TextUrl` entity.
    #[must_use]
    pub fn text_url(offset: usize, length: usize, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::new(EntityKind::TextUrl, offset, length)
        }
    }

    /// Create a `Pre` entity.
    #[must_use]
    pub fn pre(offset: usize, length: usize, language: Option<String>) -> Self {
        Self {
            language,
            ..Self::new(EntityKind::Pre, offset, length)
        }
    }

    /// Create a `CustomEmoji` entity.
    #[must_use]
    pub fn custom_emoji(offset: usize, length: usize, document_id: impl Into<String>) -> Self {
        Self {
            document_id: Some(document_id.into()),
            ..Self::new(EntityKind::CustomEmoji, offset, length)
        }
    }

    /// End offset, or `None` on overflow.
    #[must_use]
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.length)
    }

    /// Check that the span is non-empty and lies within `text_len`.
    #[must_use]
    pub fn fits(&self, text_len: usize) -> bool {
        self.length > 0 && self.end().is_some_and(|end| end <= text_len)
    }

    /// Structural key used when comparing covering sets: type, offset, length.
    #[must_use]
    pub(crate) fn span_key(&self) -> (EntityKind, usize, usize) {
        (self.kind, self.offset, self.length)
    }

    /// Equality that compares only the type-specific field relevant to the kind.
    ///
    /// A missing `url` or `document_id` equals an empty one, since trees
    /// store both as plain strings.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        if self.span_key() != other.span_key() {
            return false;
        }
        match self.kind {
            EntityKind::TextUrl => {
                self.url.as_deref().unwrap_or("") == other.url.as_deref().unwrap_or("")
            }
            EntityKind::Pre => self.language == other.language,
            EntityKind::CustomEmoji => {
                self.document_id.as_deref().unwrap_or("")
                    == other.document_id.as_deref().unwrap_or("")
            }
            _ => true,
        }
    }
}

/// Text with its entity spans.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl FormattedText {
    /// Create formatted text.
    #[must_use]
    pub fn new(text: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Create unformatted text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// Logical length of the text.
    #[must_use]
    pub fn logical_len(&self) -> usize {
        utf16_len(&self.text)
    }

    /// Compare text and entities, ignoring entity order.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        if self.text != other.text || self.entities.len() != other.entities.len() {
            return false;
        }
        let mut remaining: Vec<&Entity> = other.entities.iter().collect();
        for entity in &self.entities {
            match remaining.iter().position(|e| entity.is_equivalent(e)) {
                Some(idx) => {
                    remaining.swap_remove(idx);
                }
                None => return false,
            }
        }
        true
    }

    /// Strict check: every entity is non-empty and within the text.
    pub fn validate(&self) -> Result<()> {
        let text_len = self.logical_len();
        match self.entities.iter().position(|e| !e.fits(text_len)) {
            Some(index) => {
                let entity = &self.entities[index];
                Err(Error::InvalidEntity {
                    index,
                    offset: entity.offset,
                    length: entity.length,
                    text_len,
                })
            }
            None => Ok(()),
        }
    }

    /// Parse the JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
