//! Named-entity recognition behind a narrow trait, so extractors never see
//! which model backs it.

mod gazetteer;
mod stopwords;

pub use gazetteer::{GazetteerModel, GazetteerRecognizer};
pub use stopwords::Stopwords;

use serde::Deserialize;

use crate::entity::{EntityLabel, EntitySpan};
use crate::error::{Error, Result};

/// Implementations must be safe to share across concurrent parse calls:
/// `recognize` takes `&self` and must not mutate shared state.
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Spans in text order.
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

/// Recognizes a fixed list of strings wherever they occur. Meant for tests
/// and fixtures, not for real documents.
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    entities: Vec<(String, EntityLabel)>,
}

#[derive(Deserialize)]
struct FixtureEntity {
    text: String,
    label: String,
}

impl StaticRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entity(mut self, text: impl Into<String>, label: EntityLabel) -> Self {
        self.entities.push((text.into(), label));
        self
    }

    /// Fixture format: `[{"text": "Jane Doe", "label": "PERSON"}, ...]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let fixtures: Vec<FixtureEntity> =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("entity fixture: {e}")))?;
        fixtures.into_iter().try_fold(Self::new(), |acc, f| {
            Ok(acc.with_entity(f.text, f.label.parse()?))
        })
    }
}

impl EntityRecognizer for StaticRecognizer {
    fn name(&self) -> &str {
        "static"
    }

    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans: Vec<EntitySpan> = self
            .entities
            .iter()
            .filter(|(needle, _)| !needle.is_empty())
            .flat_map(|(needle, label)| {
                text.match_indices(needle.as_str())
                    .map(move |(start, m)| EntitySpan::new(m, *label, start, start + m.len()))
            })
            .collect();

        // Earliest first; on a tie the longer span wins and overlaps drop.
        spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        let mut last_end = 0;
        spans.retain(|s| {
            let keep = s.start >= last_end;
            if keep {
                last_end = s.end;
            }
            keep
        });
        spans
    }
}
