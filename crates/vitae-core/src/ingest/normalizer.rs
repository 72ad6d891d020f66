use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.@-]").unwrap());

/// Collapses whitespace runs to one space, drops every character that is not
/// a word character, whitespace, `.`, `@` or `-`, then trims.
///
/// Collapsing happens first, so a symbol wedged between two spaces leaves a
/// double space behind (`"C# / .NET"` becomes `"C  .NET"`).
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = WHITESPACE.replace_all(text, " ");
    DISALLOWED.replace_all(&collapsed, "").trim().to_string()
}

/// Counts characters rather than bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First `max_chars` characters, with `...` appended when anything was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Prefix of at most `max_chars` characters, on a char boundary.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(cut, _)| &text[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Jane\t\tDoe \n\n Engineer  "), "Jane Doe Engineer");
    }

    #[test]
    fn test_strips_disallowed_characters() {
        assert_eq!(
            normalize("jane.doe@example.com | (555) 123-4567!"),
            "jane.doe@example.com  555 123-4567"
        );
        assert_eq!(normalize("C++, Node.js & CI/CD"), "C Node.js  CICD");
    }

    #[test]
    fn test_keeps_unicode_word_characters() {
        assert_eq!(normalize("José Müller — Zürich"), "José Müller  Zürich");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_deterministic() {
        let input = "Résumé:\n  Jane   Doe\t(PhD)";
        assert_eq!(normalize(input), normalize(input));
    }

    #[test]
    fn test_preview_truncation() {
        assert_eq!(preview("abcdef", 10), "abcdef");
        assert_eq!(preview("abcdef", 6), "abcdef");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ééééé", 2), "éé...");
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("hi", 10), "hi");
        assert_eq!(char_len("héllo"), 5);
    }
}
