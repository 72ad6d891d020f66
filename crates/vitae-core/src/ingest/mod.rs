mod docx;
mod fallback;
#[cfg(test)]
pub(crate) mod fixtures;
mod loader;
mod normalizer;
mod pdf;
mod pipeline;

pub use docx::DocxLoader;
pub use fallback::FallbackChain;
pub use loader::{DocumentFormat, DocumentLoader, DocumentSource, RawDocument, TextLoader};
pub use normalizer::{char_len, char_prefix, normalize, preview};
pub use pdf::PdfLoader;
pub use pipeline::{BatchEntry, BatchParseResult, ResumeParser};
