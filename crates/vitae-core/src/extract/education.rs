use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_EDUCATION_ENTRIES: usize = 5;

/// Shorter cleaned sentences are dropped.
const MIN_SENTENCE_CHARS: usize = 10;

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "mba",
    "bs",
    "ms",
    "b.tech",
    "m.tech",
    "bsc",
    "msc",
    "ba",
    "ma",
    "university",
    "college",
    "institute",
    "degree",
    "graduated",
    "diploma",
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Sentences (split on `.`) that mention an education keyword, in order of
/// appearance, at most five. Keywords match as substrings of the
/// lower-cased sentence.
pub fn extract_education(text: &str) -> Vec<String> {
    extract_education_with(text, EDUCATION_KEYWORDS)
}

pub fn extract_education_with(text: &str, keywords: &[&str]) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('.')
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
        .map(|sentence| WHITESPACE.replace_all(sentence, " ").trim().to_string())
        .filter(|clean| clean.chars().count() > MIN_SENTENCE_CHARS)
        .take(MAX_EDUCATION_ENTRIES)
        .collect()
}
