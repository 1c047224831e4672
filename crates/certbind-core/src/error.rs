use thiserror::Error;

/// Errors produced while parsing resource and Key Vault identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("parsing {kind} ID: input is empty")]
    Empty { kind: &'static str },

    #[error("parsing {kind} ID {input:?}: expected {expected} segments, got {actual}")]
    SegmentCount {
        kind: &'static str,
        input: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "parsing {kind} ID {input:?}: expected segment {expected:?} at position {position}, got {actual:?}"
    )]
    UnexpectedSegment {
        kind: &'static str,
        input: String,
        position: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("parsing {kind} ID {input:?}: segment {segment} must not be empty")]
    EmptySegment {
        kind: &'static str,
        input: String,
        segment: &'static str,
    },

    #[error("parsing Key Vault nested item ID {input:?}: {reason}")]
    InvalidNestedItem { input: String, reason: String },

    #[error("parsing URL {input:?}: {source}")]
    Url {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

impl IdError {
    /// Create a new InvalidNestedItem error
    pub fn invalid_nested_item(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNestedItem {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Name of the identifier kind that failed to parse.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty { kind }
            | Self::SegmentCount { kind, .. }
            | Self::UnexpectedSegment { kind, .. }
            | Self::EmptySegment { kind, .. } => kind,
            Self::InvalidNestedItem { .. } | Self::Url { .. } => "Key Vault nested item",
        }
    }
}

/// Convenience result type for identifier parsing
pub type Result<T> = std::result::Result<T, IdError>;
