use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
}

impl EntityLabel {
    /// Conventional NER tag (`PERSON`, `ORG`, `LOC`).
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORG",
            Self::Location => "LOC",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for EntityLabel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => Ok(Self::Person),
            "ORG" | "ORGANIZATION" => Ok(Self::Organization),
            "LOC" | "LOCATION" | "GPE" => Ok(Self::Location),
            _ => Err(crate::Error::Config(format!("unknown entity label: {s}"))),
        }
    }
}

/// A labeled span of recognized text. Offsets are byte offsets into the
/// text handed to the recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    #[must_use]
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }

    /// Length in characters, which is what the extractors' thresholds count.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is(&self, label: EntityLabel) -> bool {
        self.label == label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_tags() {
        assert_eq!("PERSON".parse::<EntityLabel>().unwrap(), EntityLabel::Person);
        assert_eq!("org".parse::<EntityLabel>().unwrap(), EntityLabel::Organization);
        assert_eq!("GPE".parse::<EntityLabel>().unwrap(), EntityLabel::Location);
        assert!("DATE".parse::<EntityLabel>().is_err());
    }

    #[test]
    fn test_span_char_len() {
        let span = EntitySpan::new("José Ruiz", EntityLabel::Person, 0, 10);
        assert_eq!(span.char_len(), 9);
        assert!(span.is(EntityLabel::Person));
    }
}
