use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;

const LOAD_ATTEMPTS: usize = 2;

const BUILTIN: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// English stopword corpus, lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::parse(&data))
    }

    pub fn parse(data: &str) -> Self {
        Self {
            words: data
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_lowercase)
                .collect(),
        }
    }

    /// Loads the corpus from `path`, retrying once, and settles for the
    /// built-in list when there is no path, the file stays unreadable, or
    /// it holds no words. Never fails.
    pub fn provision(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        for attempt in 1..=LOAD_ATTEMPTS {
            match Self::load(path) {
                Ok(words) if !words.is_empty() => {
                    tracing::info!(path = %path.display(), words = words.len(), "stopwords loaded");
                    return words;
                }
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "stopword file is empty");
                    break;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), attempt, error = %e, "stopword load failed");
                }
            }
        }

        tracing::warn!("falling back to built-in stopwords");
        Self::builtin()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::builtin()
    }
}
