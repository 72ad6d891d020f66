use std::process::ExitCode;

use anyhow::Result;
use console::style;
use vitae_core::{display_category, SkillTaxonomy};

use super::ParserOptions;

pub fn run(options: &ParserOptions) -> Result<ExitCode> {
    let config = options.resolve()?;
    let taxonomy = match &config.taxonomy_path {
        Some(path) => SkillTaxonomy::load(path)?,
        None => SkillTaxonomy::default(),
    };

    for category in taxonomy.categories() {
        println!(
            "{}: {}",
            display_category(&category.category),
            category.skills.join(", ")
        );
    }

    eprintln!(
        "{} {} categories, {} skills",
        style("●").blue(),
        taxonomy.categories().len(),
        taxonomy.term_count()
    );
    Ok(ExitCode::SUCCESS)
}
