//! Shared, read-only resources a parse needs, acquired once per process.

use std::sync::Arc;

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::extract::{SkillMatcher, SkillTaxonomy, EDUCATION_KEYWORDS};
use crate::ner::{EntityRecognizer, GazetteerModel, GazetteerRecognizer, Stopwords};

/// Immutable after construction; wrap in an `Arc` and hand the same
/// instance to every parser and worker.
pub struct ParserContext {
    pub config: ParserConfig,
    pub skills: SkillMatcher,
    pub education_keywords: Vec<String>,
    pub stopwords: Arc<Stopwords>,
    pub recognizer: Arc<dyn EntityRecognizer>,
}

impl ParserContext {
    /// Loads the taxonomy, stopword corpus and recognition model named by
    /// `config`. Only the model can make this fail.
    pub fn provision(config: &ParserConfig) -> Result<Arc<Self>> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => SkillTaxonomy::load(path)?,
            None => SkillTaxonomy::default(),
        };
        let stopwords = Arc::new(Stopwords::provision(config.stopwords_path.as_deref()));
        let model = load_model(config)?;

        let recognizer = GazetteerRecognizer::new(&model, stopwords.clone());
        tracing::info!(
            categories = taxonomy.categories().len(),
            skills = taxonomy.term_count(),
            stopwords = stopwords.len(),
            recognizer = recognizer.name(),
            "parser context ready"
        );

        Ok(Arc::new(Self {
            config: config.clone(),
            skills: SkillMatcher::new(taxonomy)?,
            education_keywords: default_keywords(),
            stopwords,
            recognizer: Arc::new(recognizer),
        }))
    }

    /// Context around an arbitrary recognizer, with the default taxonomy
    /// and built-in stopwords.
    pub fn with_recognizer(
        config: ParserConfig,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            config,
            skills: SkillMatcher::new(SkillTaxonomy::default())?,
            education_keywords: default_keywords(),
            stopwords: Arc::new(Stopwords::builtin()),
            recognizer,
        }))
    }

    pub fn education_keywords(&self) -> Vec<&str> {
        self.education_keywords.iter().map(String::as_str).collect()
    }
}

fn default_keywords() -> Vec<String> {
    EDUCATION_KEYWORDS.iter().map(|k| (*k).to_string()).collect()
}

/// Configured model first; one more attempt with the bundled model when
/// allowed, otherwise the first error stands.
fn load_model(config: &ParserConfig) -> Result<GazetteerModel> {
    let primary = match &config.model_path {
        Some(path) => GazetteerModel::load(path),
        None => Err(Error::ModelUnavailable("no model path configured".into())),
    };

    match primary {
        Ok(model) => {
            tracing::info!(path = ?config.model_path, "recognition model loaded");
            Ok(model)
        }
        Err(e) if config.allow_bundled_model => {
            if uses_default_model_path(config) {
                tracing::info!(error = %e, "no installed model, using bundled model");
            } else {
                tracing::warn!(error = %e, "model not loaded, using bundled model");
            }
            GazetteerModel::bundled()
        }
        Err(e) => Err(e),
    }
}

/// Nothing was configured explicitly; the data-dir location is only a guess.
fn uses_default_model_path(config: &ParserConfig) -> bool {
    config.model_path.is_none() || config.model_path == ParserConfig::default_model_path()
}
