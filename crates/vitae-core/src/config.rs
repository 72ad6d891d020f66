use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_MIN_TEXT_LENGTH: usize = 50;
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Entity-recognition model (JSON lexicon)
    pub model_path: Option<PathBuf>,
    /// Fall back to the model compiled into the binary when the configured
    /// one cannot be loaded
    pub allow_bundled_model: bool,
    /// Stopword corpus, one word per line
    pub stopwords_path: Option<PathBuf>,
    /// Skill taxonomy override
    pub taxonomy_path: Option<PathBuf>,
    /// Documents whose normalized text is shorter than this are rejected
    pub min_text_length: usize,
    pub preview_chars: usize,
    pub name_window_chars: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            model_path: Self::default_model_path(),
            allow_bundled_model: true,
            stopwords_path: None,
            taxonomy_path: None,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            name_window_chars: crate::extract::NAME_WINDOW_CHARS,
        }
    }
}

impl ParserConfig {
    /// `<data_dir>/vitae/gazetteer.json`, when the platform has a data dir.
    pub fn default_model_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("vitae").join("gazetteer.json"))
    }

    /// Defaults overlaid with `VITAE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Reads a JSON config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    #[must_use]
    pub fn with_env(mut self) -> Self {
        if let Some(path) = env_path("VITAE_MODEL_PATH") {
            self.model_path = Some(path);
        }
        if let Some(path) = env_path("VITAE_STOPWORDS_PATH") {
            self.stopwords_path = Some(path);
        }
        if let Some(path) = env_path("VITAE_TAXONOMY_PATH") {
            self.taxonomy_path = Some(path);
        }
        if let Ok(v) = std::env::var("VITAE_ALLOW_BUNDLED_MODEL") {
            self.allow_bundled_model = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(n) = std::env::var("VITAE_MIN_TEXT_LENGTH")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            self.min_text_length = n;
        }
        self
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
