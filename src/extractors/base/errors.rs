use thiserror::Error;

/// Recoverable, per-item extraction failures.
///
/// These never abort a file: the extractor records them as diagnostics on the
/// owning `PackageModel` and moves on to the next field or declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// A struct tag that does not follow the `key:"value" key:"value"` layout
    #[error("malformed tag `{tag}`: {reason}")]
    MalformedTag { tag: String, reason: &'static str },

    /// A type expression outside the four resolvable shapes
    #[error("unsupported type shape `{kind}`: {text}")]
    UnsupportedType { kind: String, text: String },
}

impl ExtractError {
    pub(crate) fn malformed_tag(tag: &str, reason: &'static str) -> Self {
        ExtractError::MalformedTag {
            tag: tag.to_string(),
            reason,
        }
    }
}
