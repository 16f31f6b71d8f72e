//! Error types for publog.
//!
//! The catalog index itself only ever produces [`CatalogError::NotFound`] and
//! [`CatalogError::InvalidQuery`]. The remaining variants belong to the layers
//! around it (loader, configuration, CLI output).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The queried key has no match in the relevant table or index.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// The query tokenized to nothing searchable.
    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Stable machine-readable code, used by robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidQuery(_) => "invalid_query",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::Load(_) => "load",
            Self::Io(_) | Self::Serialization(_) => "error",
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
