use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use console::style;
use vitae_core::{skills_csv, summary_report, ParseResult};

use super::{OutputFormat, ParserOptions};

pub async fn run(
    options: &ParserOptions,
    file: &Path,
    format: OutputFormat,
    pretty: bool,
) -> Result<ExitCode> {
    let result = match options.parser() {
        Ok(parser) => parser.parse_file(file).await,
        Err(e) => ParseResult::failed(&e),
    };

    match (format, result.profile()) {
        (OutputFormat::Json, _) => println!("{}", to_json(&result, pretty)?),
        (OutputFormat::Text, Some(profile)) => print!("{}", summary_report(profile)),
        (OutputFormat::Csv, Some(profile)) => print!("{}", skills_csv(&profile.skills)),
        (_, None) => {}
    }

    if let Some(message) = result.error() {
        if format != OutputFormat::Json {
            eprintln!("{} {}", style("✗").red(), message);
        }
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
