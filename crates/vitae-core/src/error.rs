use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::DocumentFormat;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported file format: {0}. Please upload PDF or DOCX.")]
    UnsupportedFormat(String),

    #[error("{format} extraction error: {source}")]
    Extraction {
        format: DocumentFormat,
        #[source]
        source: BoxError,
    },

    #[error(
        "Insufficient content: the document appears to be empty or too short \
         ({length} characters, at least {minimum} required). \
         Please ensure it's a text-based PDF/DOCX (not scanned)."
    )]
    InsufficientContent { length: usize, minimum: usize },

    #[error("Entity recognition model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub fn extraction(format: DocumentFormat, source: impl Into<BoxError>) -> Self {
        Self::Extraction {
            format,
            source: source.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Extraction { .. } => ErrorKind::Extraction,
            Self::InsufficientContent { .. } => ErrorKind::InsufficientContent,
            Self::ModelUnavailable(_) => ErrorKind::ModelUnavailable,
            Self::Config(_) | Self::Pattern(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes a caller can branch on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedFormat,
    Extraction,
    InsufficientContent,
    ModelUnavailable,
    Config,
    Io,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "unsupported_format",
            Self::Extraction => "extraction",
            Self::InsufficientContent => "insufficient_content",
            Self::ModelUnavailable => "model_unavailable",
            Self::Config => "config",
            Self::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
