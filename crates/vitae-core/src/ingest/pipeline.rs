use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{DocumentLoader, RawDocument};
use super::normalizer::{char_len, normalize, preview};
use crate::context::ParserContext;
use crate::error::{Error, Result};
use crate::extract::{
    extract_contact, extract_education_with, extract_experience, extract_name_within,
};
use crate::profile::{ParseResult, ResumeProfile};

/// Runs the whole document-to-profile pipeline. Cheap to clone; clones
/// share the loader and the provisioned context.
#[derive(Clone)]
pub struct ResumeParser {
    loader: Arc<DocumentLoader>,
    context: Arc<ParserContext>,
}

impl ResumeParser {
    #[must_use]
    pub fn new(context: Arc<ParserContext>) -> Self {
        Self {
            loader: Arc::new(DocumentLoader::default()),
            context,
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: DocumentLoader) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    pub fn context(&self) -> &ParserContext {
        &self.context
    }

    /// Never fails: every error becomes a failed [`ParseResult`].
    pub async fn parse(&self, document: &RawDocument) -> ParseResult {
        let result = self.try_parse(document).await;
        match &result {
            Ok(profile) => tracing::debug!(
                document = %document.label(),
                text_length = profile.text_length,
                skills = profile.skills.skill_count(),
                "parsed"
            ),
            Err(e) => tracing::warn!(document = %document.label(), error = %e, "parse failed"),
        }
        result.into()
    }

    pub async fn try_parse(&self, document: &RawDocument) -> Result<ResumeProfile> {
        let raw = self.loader.extract_text(document).await?;
        let text = normalize(&raw);

        let length = char_len(&text);
        let minimum = self.context.config.min_text_length;
        if raw.trim().is_empty() || length < minimum {
            return Err(Error::InsufficientContent { length, minimum });
        }

        Ok(self.profile(&text))
    }

    /// Builds a profile from already-normalized text.
    pub fn profile(&self, text: &str) -> ResumeProfile {
        let ctx = &*self.context;
        let recognizer = ctx.recognizer.as_ref();

        ResumeProfile {
            name: extract_name_within(text, recognizer, ctx.config.name_window_chars),
            contact_info: extract_contact(text),
            skills: ctx.skills.extract_skills(text),
            education: extract_education_with(text, &ctx.education_keywords()),
            experience: extract_experience(text, recognizer),
            text_length: char_len(text),
            raw_text_preview: preview(text, ctx.config.preview_chars),
        }
    }

    pub async fn parse_file(&self, path: impl Into<PathBuf>) -> ParseResult {
        self.parse(&RawDocument::from_path(path)).await
    }

    /// Documents are independent; one failing does not stop the rest.
    pub async fn parse_files(&self, paths: &[PathBuf]) -> BatchParseResult {
        let mut result = BatchParseResult::new();
        for path in paths {
            let document = RawDocument::from_path(path.clone());
            let parsed = self.parse(&document).await;
            result.add(document.label(), parsed);
        }
        result
    }

    /// Every regular file in `dir`, sorted by path. Files with unsupported
    /// extensions show up as failures.
    pub async fn parse_directory(&self, dir: &Path) -> Result<BatchParseResult> {
        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        Ok(self.parse_files(&paths).await)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub file: String,
    #[serde(flatten)]
    pub result: ParseResult,
}

/// Per-document results in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchParseResult {
    pub entries: Vec<BatchEntry>,
}

impl BatchParseResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: String, result: ParseResult) {
        self.entries.push(BatchEntry { file, result });
    }

    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.len() - self.success_count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
