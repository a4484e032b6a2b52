//! SRL to SFTL conversion command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::output::read_lines;
use crate::services::ConversionService;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Convert an SRL file-transfer script into an SFTL HAScript
#[derive(Debug, Clone, Args)]
pub struct SrlArgs {
    /// SRL script to convert
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (".sftl" is appended when missing)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output a summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not print the converted script
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct SrlResponse {
    input: String,
    output: String,
    directives: usize,
    sftl: String,
}

impl SrlArgs {
    /// Execute the srl command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        let lines = read_lines(&self.input).map_err(|e| CliError::io(format!("{e:#}")))?;
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.srl.default_output.clone());

        let result = ConversionService::convert_srl(&lines, Some(&output))?;
        let written = result.path.unwrap_or(output);

        if self.json {
            return print_json(&SrlResponse {
                input: self.input.display().to_string(),
                output: written.display().to_string(),
                directives: result.directives,
                sftl: result.text,
            });
        }

        if !self.quiet {
            print!("{}", result.text);
        }
        println!(
            "✓ SFTL script written: {} ({} transfers)",
            written.display(),
            result.directives
        );

        Ok(())
    }
}
