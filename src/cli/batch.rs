use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use console::style;
use vitae_core::{BatchParseResult, ParseResult, RawDocument};

use super::parse::to_json;
use super::ParserOptions;

pub async fn run(
    options: &ParserOptions,
    paths: &[PathBuf],
    dir: bool,
    pretty: bool,
) -> Result<ExitCode> {
    let batch = match options.parser() {
        Ok(parser) if dir => {
            let mut batch = BatchParseResult::new();
            for path in paths {
                let found = parser
                    .parse_directory(path)
                    .await
                    .with_context(|| format!("reading directory {}", path.display()))?;
                batch.entries.extend(found.entries);
            }
            batch
        }
        Ok(parser) => parser.parse_files(paths).await,
        Err(e) => {
            // Nothing can be parsed, but every input still gets a result.
            let mut batch = BatchParseResult::new();
            for path in paths {
                batch.add(
                    RawDocument::from_path(path.clone()).label(),
                    ParseResult::failed(&e),
                );
            }
            batch
        }
    };

    println!("{}", to_json(&batch, pretty)?);

    eprintln!(
        "{} {} parsed, {} failed",
        style("●").blue(),
        style(batch.success_count()).green(),
        style(batch.failure_count()).red()
    );

    if batch.failure_count() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
