//! Errors raised while building a [`MapSource`](crate::MapSource).

use thiserror::Error;

/// Errors that can occur when constructing a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An empty string was given as path separator.
    #[error("path separator must not be empty")]
    InvalidSeparator,

    /// The document root is not a mapping.
    #[error("expected a mapping at the document root, found {found}")]
    NotASection { found: &'static str },

    /// A number cannot be represented by any supported kind.
    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),

    /// A list contains a null element.
    #[error("lists must not contain null elements")]
    NullElement,

    /// A mapping key is not a scalar.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is not valid YAML.
    #[cfg(feature = "yaml")]
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
