use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::docx::DocxLoader;
use super::pdf::PdfLoader;
use crate::error::{Error, Result};

/// The two document kinds the loader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Page-formatted source.
    Pdf,
    /// Flow-formatted source.
    Docx,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => f.write_str("PDF"),
            Self::Docx => f.write_str("DOCX"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DocumentSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A document as handed to a parse call: where its bytes live plus the
/// declared extension. Nothing is read until the loader needs it.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub source: DocumentSource,
    pub extension: String,
}

impl RawDocument {
    /// The extension is taken from the file name; a path without one
    /// declares an empty extension and is rejected at load time.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            source: DocumentSource::Path(path),
            extension,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            source: DocumentSource::Bytes(bytes),
            extension: extension.into(),
        }
    }

    pub fn format(&self) -> Result<DocumentFormat> {
        DocumentFormat::from_extension(&self.extension).ok_or_else(|| {
            if self.extension.is_empty() {
                Error::UnsupportedFormat("no extension".into())
            } else {
                Error::UnsupportedFormat(format!(".{}", self.extension))
            }
        })
    }

    /// Display label for logs and batch reports.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.source {
            DocumentSource::Path(p) => p.display().to_string(),
            DocumentSource::Bytes(b) => format!("<{} bytes .{}>", b.len(), self.extension),
        }
    }
}

/// Turns the bytes of one document format into plain text.
#[async_trait::async_trait]
pub trait TextLoader: Send + Sync {
    fn supported_formats(&self) -> &[DocumentFormat];

    fn can_load(&self, format: DocumentFormat) -> bool {
        self.supported_formats().contains(&format)
    }

    async fn load_bytes(&self, data: Vec<u8>) -> Result<String>;

    fn name(&self) -> &str;
}

/// Dispatches a [`RawDocument`] to the loader registered for its extension.
pub struct DocumentLoader {
    loaders: Vec<Arc<dyn TextLoader>>,
}

impl DocumentLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn TextLoader>) -> Self {
        self.loaders.push(loader);
        self
    }

    fn find_loader(&self, format: DocumentFormat) -> Option<&dyn TextLoader> {
        self.loaders
            .iter()
            .find(|l| l.can_load(format))
            .map(AsRef::as_ref)
    }

    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.find_loader(format).is_some()
    }

    /// Extension is checked before any I/O happens.
    pub async fn extract_text(&self, document: &RawDocument) -> Result<String> {
        let format = document.format()?;
        let loader = self
            .find_loader(format)
            .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))?;

        let data = match &document.source {
            DocumentSource::Path(path) => tokio::fs::read(path).await?,
            DocumentSource::Bytes(bytes) => bytes.clone(),
        };

        tracing::debug!(
            document = %document.label(),
            loader = loader.name(),
            bytes = data.len(),
            "extracting text"
        );

        loader.load_bytes(data).await
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
            .with_loader(Arc::new(PdfLoader::new()))
            .with_loader(Arc::new(DocxLoader::new()))
    }
}
