use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::entity::EntityLabel;
use crate::ner::EntityRecognizer;
use crate::profile::{ExperienceInfo, NOT_SPECIFIED};

pub const MAX_COMPANIES: usize = 5;

/// Tried in order against the lower-cased text; the first pattern that
/// matches anywhere decides, later ones are never consulted.
static YEARS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(\d+)\s*years?\s*of?\s*experience").unwrap(),
        Regex::new(r"experience.*?(\d+)\s*years?").unwrap(),
        Regex::new(r"worked\s*for\s*(\d+)\s*years?").unwrap(),
        Regex::new(r"(\d+)\+?\s*years?\s*in").unwrap(),
        Regex::new(r"(\d+)\+?\s*years?\s*professional").unwrap(),
    ]
});

pub fn extract_years(text: &str) -> String {
    let lower = text.to_lowercase();
    YEARS_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(&lower))
        .and_then(|caps| caps.get(1))
        .map_or_else(
            || NOT_SPECIFIED.to_string(),
            |n| format!("{} years", n.as_str()),
        )
}

/// ORG entities longer than three characters, de-duplicated in first-seen
/// order and capped.
pub fn extract_companies(text: &str, recognizer: &dyn EntityRecognizer) -> Vec<String> {
    let mut seen = HashSet::new();
    recognizer
        .recognize(text)
        .into_iter()
        .filter(|span| span.is(EntityLabel::Organization) && span.char_len() > 3)
        .filter(|span| seen.insert(span.text.clone()))
        .map(|span| span.text)
        .take(MAX_COMPANIES)
        .collect()
}

pub fn extract_experience(text: &str, recognizer: &dyn EntityRecognizer) -> ExperienceInfo {
    if text.is_empty() {
        return ExperienceInfo::default();
    }
    ExperienceInfo {
        years: extract_years(text),
        companies: extract_companies(text, recognizer),
    }
}
