use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::{ContactInfo, NOT_FOUND};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?://)?(www\.)?linkedin\.com/(in|company)/[a-zA-Z0-9-]+").unwrap()
});

fn first_match(pattern: &Regex, text: &str) -> String {
    pattern
        .find(text)
        .map_or_else(|| NOT_FOUND.to_string(), |m| m.as_str().to_string())
}

/// Each field holds the first match in text order, or the sentinel.
pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: first_match(&EMAIL, text),
        phone: first_match(&PHONE, text),
        linkedin: first_match(&LINKEDIN, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_email_exact() {
        let contact = extract_contact("Jane Doe jane.doe@example.com Software Engineer");
        assert_eq!(contact.email, "jane.doe@example.com");
    }

    #[test]
    fn test_first_email_wins() {
        let contact = extract_contact("first@a.io then second@b.org");
        assert_eq!(contact.email, "first@a.io");
    }

    #[test]
    fn test_phone_formats() {
        assert_eq!(extract_contact("call +1 (555) 123-4567").phone, "+1 (555) 123-4567");
        assert_eq!(extract_contact("call 555-123-4567").phone, "555-123-4567");
        assert_eq!(extract_contact("call 555.123.4567 now").phone, "555.123.4567");
    }

    #[test]
    fn test_first_phone_in_text_order() {
        let contact = extract_contact("Home 555-123-4567 Mobile +1 (555) 987-6543");
        assert_eq!(contact.phone, "555-123-4567");
    }

    #[test]
    fn test_phone_survives_normalization() {
        let normalized = crate::ingest::normalize("Phone: +1 (555) 123-4567");
        assert_eq!(extract_contact(&normalized).phone, "1 555 123-4567");
    }

    #[test]
    fn test_linkedin_full_url() {
        let contact = extract_contact("see https://www.linkedin.com/in/jane-doe-42 for more");
        assert_eq!(contact.linkedin, "https://www.linkedin.com/in/jane-doe-42");

        let contact = extract_contact("linkedin.com/company/acme-corp");
        assert_eq!(contact.linkedin, "linkedin.com/company/acme-corp");
    }

    #[test]
    fn test_sentinels_when_absent() {
        let contact = extract_contact("nothing useful here");
        assert_eq!(contact, ContactInfo::default());
        assert_eq!(contact.email, NOT_FOUND);
    }
}
