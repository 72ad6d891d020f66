use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use super::{EntityRecognizer, Stopwords};
use crate::entity::{EntityLabel, EntitySpan};
use crate::error::{Error, Result};

const BUNDLED: &str = include_str!("../../data/gazetteer.json");

/// Lower-case connectors allowed inside a capitalized run when another
/// capitalized word follows ("Bank of America", "Procter and Gamble").
const CONNECTORS: &[&str] = &["of", "and", "&", "for", "de"];

/// Name words allowed in front of an organization suffix.
const MAX_ORG_PREFIX: usize = 4;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// Word lists behind [`GazetteerRecognizer`]. Entries are matched
/// case-insensitively; multi-word entries are compared token by token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerModel {
    #[serde(default)]
    pub given_names: Vec<String>,
    #[serde(default)]
    pub org_suffixes: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    /// Capitalized words that never belong to a name: section headers,
    /// job titles, months.
    #[serde(default)]
    pub non_name_words: Vec<String>,
}

impl GazetteerModel {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::ModelUnavailable(format!("{}: {e}", path.display())))?;
        Self::from_json(&data)
            .map_err(|e| Error::ModelUnavailable(format!("{}: {e}", path.display())))
    }

    /// Model compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED).map_err(|e| Error::ModelUnavailable(format!("bundled model: {e}")))
    }

    fn from_json(data: &str) -> std::result::Result<Self, String> {
        let model: Self = serde_json::from_str(data).map_err(|e| e.to_string())?;
        if model.given_names.is_empty() {
            return Err("model has no given names".to_string());
        }
        Ok(model)
    }
}

fn phrase_set(entries: &[String]) -> (HashSet<String>, usize) {
    let mut longest = 0;
    let set = entries
        .iter()
        .map(|e| {
            let words: Vec<String> = e.split_whitespace().map(str::to_lowercase).collect();
            longest = longest.max(words.len());
            words.join(" ")
        })
        .filter(|e| !e.is_empty())
        .collect();
    (set, longest)
}

fn word_set(entries: &[String]) -> HashSet<String> {
    entries.iter().map(|e| e.trim().to_lowercase()).collect()
}

#[derive(Debug)]
struct Token<'a> {
    text: &'a str,
    lower: String,
    start: usize,
    end: usize,
    /// Trailing sentence punctuation ends any run at this token.
    closes: bool,
}

/// A lone capital followed by a period reads as a middle initial, not a
/// sentence end.
fn marks_initial(core: &str, trailing: &str) -> bool {
    trailing == "." && core.chars().count() == 1 && core.chars().all(char::is_uppercase)
}

impl Token<'_> {
    fn capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
            && !self.text.chars().any(|c| c.is_ascii_digit() || c == '@')
    }

    fn is_connector(&self) -> bool {
        !self.capitalized() && CONNECTORS.contains(&self.lower.as_str())
    }

    fn is_initial(&self) -> bool {
        self.text.chars().count() == 1 && self.capitalized()
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    TOKEN
        .find_iter(text)
        .map(|m| {
            let raw = m.as_str();
            let edge = |c: char| !c.is_alphanumeric();
            let lead = raw.len() - raw.trim_start_matches(edge).len();
            let core = raw.trim_matches(edge);
            let core = if core.is_empty() { raw } else { core };
            let lead = if core.len() == raw.len() { 0 } else { lead };
            let trailing = &raw[lead + core.len()..];
            Token {
                text: core,
                lower: core.to_lowercase(),
                start: m.start() + lead,
                end: m.start() + lead + core.len(),
                closes: !marks_initial(core, trailing)
                    && trailing
                        .chars()
                        .any(|c| matches!(c, '.' | ',' | ';' | ':' | '|' | '!' | '?')),
            }
        })
        .collect()
}

/// Dictionary-driven recognizer: finds runs of capitalized words and labels
/// them from the model's word lists. Holds no mutable state, so one instance
/// serves any number of concurrent parses.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    given_names: HashSet<String>,
    org_suffixes: HashSet<String>,
    non_name_words: HashSet<String>,
    organizations: HashSet<String>,
    longest_organization: usize,
    locations: HashSet<String>,
    longest_location: usize,
    stopwords: Arc<Stopwords>,
}

impl GazetteerRecognizer {
    pub fn new(model: &GazetteerModel, stopwords: Arc<Stopwords>) -> Self {
        let (organizations, longest_organization) = phrase_set(&model.organizations);
        let (locations, longest_location) = phrase_set(&model.locations);
        Self {
            given_names: word_set(&model.given_names),
            org_suffixes: word_set(&model.org_suffixes),
            non_name_words: word_set(&model.non_name_words),
            organizations,
            longest_organization,
            locations,
            longest_location,
            stopwords,
        }
    }

    fn name_word(&self, token: &Token<'_>) -> bool {
        token.capitalized() && !self.stopwords.contains(&token.lower)
    }

    fn runs(&self, tokens: &[Token<'_>]) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut open: Option<usize> = None;

        for (i, token) in tokens.iter().enumerate() {
            let joins = if self.name_word(token) {
                true
            } else {
                token.is_connector()
                    && open.is_some()
                    && !token.closes
                    && tokens.get(i + 1).is_some_and(|next| self.name_word(next))
            };

            if joins {
                let start = *open.get_or_insert(i);
                if token.closes {
                    runs.push(start..i + 1);
                    open = None;
                }
            } else if let Some(start) = open.take() {
                runs.push(start..i);
            }
        }
        if let Some(start) = open {
            runs.push(start..tokens.len());
        }
        runs
    }

    fn phrase_at(
        tokens: &[Token<'_>],
        at: usize,
        limit: usize,
        set: &HashSet<String>,
        longest: usize,
    ) -> Option<usize> {
        let available = limit.saturating_sub(at).min(longest);
        (1..=available).rev().find_map(|len| {
            let phrase = tokens[at..at + len]
                .iter()
                .map(|t| t.lower.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            set.contains(&phrase).then_some(at + len)
        })
    }

    fn known_organization(&self, tokens: &[Token<'_>], at: usize, limit: usize) -> Option<usize> {
        Self::phrase_at(tokens, at, limit, &self.organizations, self.longest_organization)
    }

    fn known_location(&self, tokens: &[Token<'_>], at: usize, limit: usize) -> Option<usize> {
        Self::phrase_at(tokens, at, limit, &self.locations, self.longest_location)
    }

    fn is_suffix(&self, token: &Token<'_>) -> bool {
        self.org_suffixes.contains(&token.lower)
    }

    /// Consecutive suffixes after `at` ("Holdings Inc"), stopping where a
    /// known organization begins.
    fn extend_suffixes(&self, tokens: &[Token<'_>], mut at: usize, limit: usize) -> usize {
        while at < limit
            && self.is_suffix(&tokens[at])
            && self.known_organization(tokens, at, limit).is_none()
        {
            at += 1;
        }
        at
    }

    /// "of <Name>" after an organization suffix, up to the next connector
    /// or non-name word.
    fn of_tail(&self, tokens: &[Token<'_>], at: usize, limit: usize) -> Option<usize> {
        if at >= limit || tokens[at].lower != "of" {
            return None;
        }
        let mut end = at + 1;
        while end < limit && end <= at + MAX_ORG_PREFIX {
            let token = &tokens[end];
            if token.is_connector() || self.non_name_words.contains(&token.lower) {
                break;
            }
            end += 1;
        }
        (end > at + 1).then_some(end)
    }

    /// A known organization plus whatever legal or descriptive suffix
    /// follows it: "Infosys Limited", "Meta Platforms Inc".
    fn known_org_at(&self, tokens: &[Token<'_>], at: usize, limit: usize) -> Option<usize> {
        let end = self.known_organization(tokens, at, limit)?;
        for k in end..limit.min(end + MAX_ORG_PREFIX) {
            let token = &tokens[k];
            if self.is_suffix(token) {
                return Some(self.extend_suffixes(tokens, k + 1, limit));
            }
            if token.is_connector()
                || self.non_name_words.contains(&token.lower)
                || self.given_names.contains(&token.lower)
                || self.known_organization(tokens, k, limit).is_some()
                || self.known_location(tokens, k, limit).is_some()
            {
                break;
            }
        }
        Some(end)
    }

    /// "Acme Corp", "Stanford University", "University of Michigan",
    /// "Massachusetts Institute of Technology", "Procter & Gamble Co".
    fn suffix_org_at(&self, tokens: &[Token<'_>], at: usize, limit: usize) -> Option<usize> {
        let first = &tokens[at];
        if first.is_connector() || self.non_name_words.contains(&first.lower) {
            return None;
        }
        let leads_with_suffix = self.is_suffix(first);
        if !leads_with_suffix && self.given_names.contains(&first.lower) {
            return None;
        }

        let scan_from = if leads_with_suffix { at } else { at + 1 };
        for k in scan_from..limit.min(at + MAX_ORG_PREFIX + 1) {
            let token = &tokens[k];
            if self.is_suffix(token) {
                if let Some(end) = self.of_tail(tokens, k + 1, limit) {
                    return Some(end);
                }
                // A bare suffix is not a name.
                if k == at {
                    return None;
                }
                return Some(self.extend_suffixes(tokens, k + 1, limit));
            }
            if (token.is_connector() && token.text != "&")
                || self.non_name_words.contains(&token.lower)
                || self.given_names.contains(&token.lower)
                || self.known_organization(tokens, k, limit).is_some()
                || self.known_location(tokens, k, limit).is_some()
            {
                return None;
            }
        }
        None
    }

    fn surname_at(&self, tokens: &[Token<'_>], at: usize, limit: usize) -> bool {
        let token = &tokens[at];
        let starts_org = tokens[at + 1..limit]
            .first()
            .is_some_and(|next| self.is_suffix(next) && !self.non_name_words.contains(&next.lower));
        !(token.is_connector()
            || self.non_name_words.contains(&token.lower)
            || self.is_suffix(token)
            || starts_org
            || self.known_organization(tokens, at, limit).is_some()
            || self.known_location(tokens, at, limit).is_some())
    }

    /// Given name, optional middle initial, one surname.
    fn person_at(&self, tokens: &[Token<'_>], at: usize, limit: usize) -> Option<usize> {
        let first = &tokens[at];
        if first.is_connector() || !self.given_names.contains(&first.lower) {
            return None;
        }

        let next = at + 1;
        if next >= limit {
            return Some(next);
        }
        if tokens[next].is_initial() {
            let named = next + 1 < limit && self.surname_at(tokens, next + 1, limit);
            return Some(if named { next + 2 } else { next });
        }
        Some(if self.surname_at(tokens, next, limit) { next + 1 } else { next })
    }

    /// A place, unless it opens an institution name ("New York University").
    fn location_at(
        &self,
        tokens: &[Token<'_>],
        at: usize,
        limit: usize,
    ) -> Option<(EntityLabel, usize)> {
        let end = self.known_location(tokens, at, limit)?;
        if end < limit && self.is_suffix(&tokens[end]) {
            if let Some(org_end) = self.suffix_org_at(tokens, at, limit) {
                return Some((EntityLabel::Organization, org_end));
            }
        }
        Some((EntityLabel::Location, end))
    }

    fn label_run(&self, text: &str, tokens: &[Token<'_>], run: Range<usize>, out: &mut Vec<EntitySpan>) {
        let mut at = run.start;
        while at < run.end {
            let found = self
                .known_org_at(tokens, at, run.end)
                .map(|end| (EntityLabel::Organization, end))
                .or_else(|| self.location_at(tokens, at, run.end))
                .or_else(|| {
                    self.suffix_org_at(tokens, at, run.end)
                        .map(|end| (EntityLabel::Organization, end))
                })
                .or_else(|| {
                    self.person_at(tokens, at, run.end)
                        .map(|end| (EntityLabel::Person, end))
                });

            match found {
                Some((label, end)) => {
                    let (start, stop) = (tokens[at].start, tokens[end - 1].end);
                    out.push(EntitySpan::new(&text[start..stop], label, start, stop));
                    at = end;
                }
                None => at += 1,
            }
        }
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let tokens = tokenize(text);
        let mut spans = Vec::new();
        for run in self.runs(&tokens) {
            self.label_run(text, &tokens, run, &mut spans);
        }
        spans
    }
}
