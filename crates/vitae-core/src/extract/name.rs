use crate::entity::EntityLabel;
use crate::ingest::char_prefix;
use crate::ner::EntityRecognizer;
use crate::profile::NOT_FOUND;

/// Names sit near the top of a resume; recognition only sees this many
/// leading characters.
pub const NAME_WINDOW_CHARS: usize = 1000;

/// First PERSON entity with at least two tokens and more than three
/// characters. Single words and initials are usually section headers or
/// recognizer noise.
pub fn extract_name(text: &str, recognizer: &dyn EntityRecognizer) -> String {
    extract_name_within(text, recognizer, NAME_WINDOW_CHARS)
}

pub fn extract_name_within(
    text: &str,
    recognizer: &dyn EntityRecognizer,
    window_chars: usize,
) -> String {
    if text.is_empty() {
        return NOT_FOUND.to_string();
    }

    recognizer
        .recognize(char_prefix(text, window_chars))
        .into_iter()
        .filter(|span| span.is(EntityLabel::Person))
        .find(|span| span.text.split_whitespace().count() >= 2 && span.char_len() > 3)
        .map_or_else(|| NOT_FOUND.to_string(), |span| span.text)
}
