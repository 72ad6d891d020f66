#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]

pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod ner;
pub mod profile;
pub mod report;

pub use config::ParserConfig;
pub use context::ParserContext;
pub use entity::{EntityLabel, EntitySpan};
pub use error::{Error, ErrorKind, Result};
pub use extract::{SkillMatcher, SkillTaxonomy, TaxonomyCategory};
pub use ingest::{
    BatchEntry, BatchParseResult, DocumentFormat, DocumentLoader, DocumentSource, RawDocument,
    ResumeParser, TextLoader,
};
pub use ner::{EntityRecognizer, GazetteerModel, GazetteerRecognizer, StaticRecognizer, Stopwords};
pub use profile::{
    ContactInfo, ExperienceInfo, ParseFailure, ParseResult, ResumeProfile, SkillCategory,
    SkillSet, NOT_FOUND, NOT_SPECIFIED,
};
pub use report::{display_category, skill_rows, skills_csv, summary_report, SkillRow};
