//! The structured candidate profile and the per-call parse result.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, ErrorKind};

pub const NOT_FOUND: &str = "Not found";
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub linkedin: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: NOT_FOUND.into(),
            phone: NOT_FOUND.into(),
            linkedin: NOT_FOUND.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Matched skills grouped by taxonomy category, in taxonomy order.
/// A category is only present when it holds at least one skill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    categories: Vec<SkillCategory>,
}

impl SkillSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty skill lists are dropped rather than stored.
    pub fn insert(&mut self, name: impl Into<String>, skills: Vec<String>) {
        if skills.is_empty() {
            return;
        }
        let name = name.into();
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                for skill in skills {
                    if !existing.skills.contains(&skill) {
                        existing.skills.push(skill);
                    }
                }
            }
            None => self.categories.push(SkillCategory { name, skills }),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.skills.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|c| (c.name.as_str(), c.skills.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories with matches.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }
}

impl Serialize for SkillSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.skills)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceInfo {
    pub years: String,
    /// First-seen order, at most five.
    pub companies: Vec<String>,
}

impl Default for ExperienceInfo {
    fn default() -> Self {
        Self {
            years: NOT_SPECIFIED.into(),
            companies: Vec::new(),
        }
    }
}

/// Everything a successful parse produces. Every field is always populated;
/// absence is spelled with the sentinel strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeProfile {
    pub name: String,
    pub contact_info: ContactInfo,
    pub skills: SkillSet,
    pub education: Vec<String>,
    pub experience: ExperienceInfo,
    pub text_length: usize,
    pub raw_text_preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for ParseFailure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Error> for ParseFailure {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

/// Outcome of one parse call.
///
/// Serializes to the flat shape downstream consumers expect: the profile's
/// fields plus `"success": true`, or only `"success": false` and `"error"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    Parsed(ResumeProfile),
    Failed(ParseFailure),
}

impl ParseResult {
    pub fn failed(err: &Error) -> Self {
        Self::Failed(err.into())
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    pub const fn profile(&self) -> Option<&ResumeProfile> {
        match self {
            Self::Parsed(p) => Some(p),
            Self::Failed(_) => None,
        }
    }

    pub const fn failure(&self) -> Option<&ParseFailure> {
        match self {
            Self::Parsed(_) => None,
            Self::Failed(f) => Some(f),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }

    pub fn into_result(self) -> Result<ResumeProfile, ParseFailure> {
        match self {
            Self::Parsed(p) => Ok(p),
            Self::Failed(f) => Err(f),
        }
    }
}

impl From<crate::Result<ResumeProfile>> for ParseResult {
    fn from(result: crate::Result<ResumeProfile>) -> Self {
        match result {
            Ok(profile) => Self::Parsed(profile),
            Err(err) => Self::failed(&err),
        }
    }
}

impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parsed(p) => {
                let mut s = serializer.serialize_struct("ParseResult", 8)?;
                s.serialize_field("name", &p.name)?;
                s.serialize_field("contact_info", &p.contact_info)?;
                s.serialize_field("skills", &p.skills)?;
                s.serialize_field("education", &p.education)?;
                s.serialize_field("experience", &p.experience)?;
                s.serialize_field("text_length", &p.text_length)?;
                s.serialize_field("raw_text_preview", &p.raw_text_preview)?;
                s.serialize_field("success", &true)?;
                s.end()
            }
            Self::Failed(f) => {
                let mut s = serializer.serialize_struct("ParseResult", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", &f.message)?;
                s.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ResumeProfile {
        let mut skills = SkillSet::new();
        skills.insert("programming", vec!["python".into(), "rust".into()]);
        skills.insert("databases", Vec::new());
        ResumeProfile {
            name: "Jane Doe".into(),
            contact_info: ContactInfo::default(),
            skills,
            education: vec!["BSc Computer Science".into()],
            experience: ExperienceInfo::default(),
            text_length: 120,
            raw_text_preview: "Jane Doe".into(),
        }
    }

    #[test]
    fn test_sentinels_by_default() {
        let contact = ContactInfo::default();
        assert_eq!(contact.email, NOT_FOUND);
        assert_eq!(contact.phone, NOT_FOUND);
        assert_eq!(contact.linkedin, NOT_FOUND);
        assert_eq!(ExperienceInfo::default().years, NOT_SPECIFIED);
    }

    #[test]
    fn test_skill_set_omits_empty_categories() {
        let skills = profile().skills;
        assert_eq!(skills.len(), 1);
        assert!(skills.get("databases").is_none());
        assert_eq!(skills.skill_count(), 2);
    }

    #[test]
    fn test_skill_set_serializes_in_insertion_order() {
        let mut skills = SkillSet::new();
        skills.insert("web_development", vec!["react".into()]);
        skills.insert("devops", vec!["docker".into()]);
        skills.insert("data_science", vec!["pandas".into()]);

        let json = serde_json::to_string(&skills).unwrap();
        assert_eq!(
            json,
            r#"{"web_development":["react"],"devops":["docker"],"data_science":["pandas"]}"#
        );
    }

    #[test]
    fn test_parsed_shape() {
        let value = serde_json::to_value(ParseResult::Parsed(profile())).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["contact_info"]["email"], NOT_FOUND);
        assert_eq!(value["skills"]["programming"][1], "rust");
        assert_eq!(value["experience"]["years"], NOT_SPECIFIED);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failed_shape_has_only_error() {
        let err = Error::UnsupportedFormat(".txt".into());
        let result = ParseResult::failed(&err);
        let value = serde_json::to_value(&result).unwrap();

        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains(".txt"));
        assert_eq!(result.failure().unwrap().kind, ErrorKind::UnsupportedFormat);
        assert!(result.profile().is_none());
    }
}
