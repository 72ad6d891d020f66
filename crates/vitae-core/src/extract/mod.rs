//! Field extractors. Each one reads normalized text and depends on no other
//! extractor's output.

mod contact;
mod education;
mod experience;
mod name;
mod skills;

pub use contact::extract_contact;
pub use education::{
    extract_education, extract_education_with, EDUCATION_KEYWORDS, MAX_EDUCATION_ENTRIES,
};
pub use experience::{
    extract_companies, extract_experience, extract_years, MAX_COMPANIES,
};
pub use name::{extract_name, extract_name_within, NAME_WINDOW_CHARS};
pub use skills::{SkillMatcher, SkillTaxonomy, TaxonomyCategory};
