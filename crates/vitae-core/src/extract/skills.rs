use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::profile::SkillSet;

/// One taxonomy category and its canonical terms, in match order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyCategory {
    pub category: String,
    pub skills: Vec<String>,
}

/// Fixed, curated skill vocabulary. Category order and term order within a
/// category are preserved in every result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillTaxonomy {
    categories: Vec<TaxonomyCategory>,
}

const DEFAULT_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "python", "java", "javascript", "c++", "c#", "ruby", "go", "rust", "swift", "kotlin",
        ],
    ),
    (
        "web_development",
        &[
            "html", "css", "react", "angular", "vue", "django", "flask", "spring", "node.js",
            "express",
        ],
    ),
    (
        "databases",
        &[
            "mysql",
            "postgresql",
            "mongodb",
            "redis",
            "sqlite",
            "oracle",
            "cassandra",
        ],
    ),
    (
        "devops",
        &[
            "docker",
            "kubernetes",
            "jenkins",
            "aws",
            "azure",
            "gcp",
            "ci/cd",
            "terraform",
            "ansible",
        ],
    ),
    (
        "data_science",
        &[
            "machine learning",
            "deep learning",
            "nlp",
            "computer vision",
            "pandas",
            "numpy",
            "tensorflow",
            "pytorch",
            "scikit-learn",
        ],
    ),
    (
        "tools",
        &["git", "jira", "confluence", "linux", "bash", "powershell"],
    ),
];

impl SkillTaxonomy {
    pub fn new(categories: Vec<TaxonomyCategory>) -> Result<Self> {
        for (i, c) in categories.iter().enumerate() {
            if c.category.trim().is_empty() {
                return Err(Error::Config(format!("taxonomy category {i} has no name")));
            }
            if categories[..i].iter().any(|prev| prev.category == c.category) {
                return Err(Error::Config(format!(
                    "duplicate taxonomy category: {}",
                    c.category
                )));
            }
        }
        Ok(Self { categories })
    }

    /// JSON list of `{"category": ..., "skills": [...]}` objects.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let categories: Vec<TaxonomyCategory> = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::new(categories)
    }

    pub fn categories(&self) -> &[TaxonomyCategory] {
        &self.categories
    }

    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self {
            categories: DEFAULT_TAXONOMY
                .iter()
                .map(|(category, skills)| TaxonomyCategory {
                    category: (*category).to_string(),
                    skills: skills.iter().map(|s| (*s).to_string()).collect(),
                })
                .collect(),
        }
    }
}

struct TermPattern {
    term: String,
    regex: Regex,
}

/// Whole-word pattern for a literal term. A `\b` anchor only works next to
/// a word character, so edges that end in a symbol (`c++`, `c#`) are
/// anchored on "start/end of text or a non-word character" instead.
fn term_pattern(term: &str) -> Result<Regex> {
    let lower = term.to_lowercase();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let head = if lower.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        r"(?:^|\W)"
    };
    let tail = if lower.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        r"(?:\W|$)"
    };

    Ok(Regex::new(&format!("{head}{}{tail}", regex::escape(&lower)))?)
}

/// Compiled matcher over a [`SkillTaxonomy`].
pub struct SkillMatcher {
    taxonomy: SkillTaxonomy,
    patterns: Vec<(String, Vec<TermPattern>)>,
}

impl SkillMatcher {
    pub fn new(taxonomy: SkillTaxonomy) -> Result<Self> {
        let patterns = taxonomy
            .categories
            .iter()
            .map(|c| {
                let terms = c
                    .skills
                    .iter()
                    .map(|term| {
                        Ok(TermPattern {
                            term: term.clone(),
                            regex: term_pattern(term)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((c.category.clone(), terms))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { taxonomy, patterns })
    }

    pub const fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Case-insensitive whole-word matches. Each term is reported once no
    /// matter how often it occurs, in taxonomy order.
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        let mut skills = SkillSet::new();
        if text.is_empty() {
            return skills;
        }
        let lower = text.to_lowercase();

        for (category, terms) in &self.patterns {
            let matched: Vec<String> = terms
                .iter()
                .filter(|t| t.regex.is_match(&lower))
                .map(|t| t.term.clone())
                .collect();
            skills.insert(category.clone(), matched);
        }

        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(SkillTaxonomy::default()).unwrap()
    }

    #[test]
    fn test_taxonomy_order_not_text_order() {
        let skills = matcher().extract_skills("Rust and Python and Java");
        assert_eq!(
            skills.get("programming").unwrap(),
            &["python".to_string(), "java".to_string(), "rust".to_string()]
        );
    }

    #[test]
    fn test_repeated_term_once() {
        let skills = matcher().extract_skills("docker docker DOCKER");
        assert_eq!(skills.get("devops").unwrap(), &["docker".to_string()]);
    }

    #[test]
    fn test_whole_word_only() {
        let skills = matcher().extract_skills("javascript expert, going places");
        let programming = skills.get("programming").unwrap();
        assert_eq!(programming, &["javascript".to_string()]);
        assert!(!programming.contains(&"java".to_string()));
        assert!(!programming.contains(&"go".to_string()));
    }

    #[test]
    fn test_symbols_match_literally() {
        let skills = matcher().extract_skills("C++, C# and Node.js; CI/CD with Jenkins");
        assert_eq!(
            skills.get("programming").unwrap(),
            &["c++".to_string(), "c#".to_string()]
        );
        assert_eq!(skills.get("web_development").unwrap(), &["node.js".to_string()]);
        assert_eq!(
            skills.get("devops").unwrap(),
            &["jenkins".to_string(), "ci/cd".to_string()]
        );
    }

    #[test]
    fn test_escaped_dot_is_not_wildcard() {
        let skills = matcher().extract_skills("nodexjs");
        assert!(skills.get("web_development").is_none());
    }

    #[test]
    fn test_multi_word_terms() {
        let skills = matcher().extract_skills("Applied Machine Learning and computer vision");
        assert_eq!(
            skills.get("data_science").unwrap(),
            &["machine learning".to_string(), "computer vision".to_string()]
        );
    }

    #[test]
    fn test_no_match_is_empty_set() {
        let skills = matcher().extract_skills("Gardening, pottery, and sailing");
        assert!(skills.is_empty());
        assert_eq!(serde_json::to_string(&skills).unwrap(), "{}");
    }

    #[test]
    fn test_category_order_follows_taxonomy() {
        let skills = matcher().extract_skills("git, docker, react, python");
        let order: Vec<&str> = skills.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["programming", "web_development", "devops", "tools"]);
    }

    #[test]
    fn test_custom_taxonomy_rejects_duplicates() {
        let cat = TaxonomyCategory {
            category: "x".into(),
            skills: vec!["a".into()],
        };
        assert!(SkillTaxonomy::new(vec![cat.clone(), cat]).is_err());
    }

    #[test]
    fn test_load_taxonomy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.json");
        std::fs::write(
            &path,
            r#"[{"category": "soft_skills", "skills": ["leadership", "mentoring"]}]"#,
        )
        .unwrap();

        let taxonomy = SkillTaxonomy::load(&path).unwrap();
        let skills = SkillMatcher::new(taxonomy)
            .unwrap()
            .extract_skills("Mentoring junior engineers");
        assert_eq!(skills.get("soft_skills").unwrap(), &["mentoring".to_string()]);
    }

    #[test]
    fn test_default_taxonomy_size() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.categories().len(), 6);
        assert_eq!(taxonomy.term_count(), 51);
    }
}
