pub mod batch;
pub mod parse;
pub mod skills;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vitae_core::{ParserConfig, ParserContext, ResumeParser};

#[derive(Parser)]
#[command(
    name = "vitae",
    about = "Parse PDF and DOCX resumes into structured profiles",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub options: ParserOptions,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one resume and print its profile
    Parse {
        /// PDF or DOCX file
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Parse several resumes and print a JSON array of results
    Batch {
        /// Files, or directories with --dir
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Treat each path as a directory and parse every file in it
        #[arg(long)]
        dir: bool,
        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
    /// List the skill taxonomy in use
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    /// Human-readable summary report
    Text,
    /// Matched skills as Category,Skill rows
    Csv,
}

/// Options shared by every command. Precedence: flags, then `VITAE_*`
/// environment variables, then the config file, then defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct ParserOptions {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Entity-recognition model (JSON lexicon)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,
    /// Fail instead of falling back to the bundled model
    #[arg(long = "no-bundled-model", global = true)]
    pub no_bundled_model: bool,
    /// Stopword list, one word per line
    #[arg(long, global = true)]
    pub stopwords: Option<PathBuf>,
    /// Skill taxonomy (JSON list of {category, skills})
    #[arg(long, global = true)]
    pub taxonomy: Option<PathBuf>,
}

impl ParserOptions {
    pub fn resolve(&self) -> vitae_core::Result<ParserConfig> {
        let base = match &self.config {
            Some(path) => ParserConfig::load(path)?,
            None => ParserConfig::default(),
        };
        let mut config = base.with_env();

        if let Some(path) = &self.model {
            config.model_path = Some(path.clone());
        }
        if self.no_bundled_model {
            config.allow_bundled_model = false;
        }
        if let Some(path) = &self.stopwords {
            config.stopwords_path = Some(path.clone());
        }
        if let Some(path) = &self.taxonomy {
            config.taxonomy_path = Some(path.clone());
        }
        Ok(config)
    }

    /// Resolves the configuration and provisions a parser around it.
    pub fn parser(&self) -> vitae_core::Result<ResumeParser> {
        let config = self.resolve()?;
        let context = ParserContext::provision(&config)?;
        Ok(ResumeParser::new(context))
    }
}
