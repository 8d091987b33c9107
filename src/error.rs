//! Error types for entity_ast.
//!
//! Tree operations never fail: out-of-range selections are clamped and
//! malformed entities are skipped. Errors only surface from the flat-form
//! helpers on [`FormattedText`](crate::FormattedText) (JSON wire parsing and
//! strict validation).

use std::fmt;

/// Result type alias for entity_ast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for entity_ast operations.
#[derive(Debug)]
pub enum Error {
    /// Malformed JSON wire form.
    Json(serde_json::Error),
    /// Entity span that cannot be reconciled with the text it annotates.
    InvalidEntity {
        index: usize,
        offset: usize,
        length: usize,
        text_len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid formatted text JSON: {e}"),
            Self::InvalidEntity {
                index,
                offset,
                length,
                text_len,
            } => {
                write!(
                    f,
                    "entity #{index} at {offset}+{length} does not fit text of length {text_len}"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::InvalidEntity { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidEntity {
            index: 2,
            offset: 10,
            length: 5,
            text_len: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("#2"));
        assert!(msg.contains("10+5"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
