//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::keymap::UnmappedKeyPolicy;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the configuration file location
    Path,
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default policy for unmapped vendor keys (drop or pass-through)
    #[arg(long, value_name = "POLICY")]
    unmapped: Option<String>,

    /// Default output file for keymap conversion
    #[arg(long, value_name = "FILE")]
    keymap_output: Option<PathBuf>,

    /// Default output file for SRL conversion
    #[arg(long, value_name = "FILE")]
    sftl_output: Option<PathBuf>,

    /// Header lines to skip in PCOMM keymap files
    #[arg(long, value_name = "N")]
    header_lines: Option<usize>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {}", e)))?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.unmapped.is_none()
            && self.keymap_output.is_none()
            && self.sftl_output.is_none()
            && self.header_lines.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --unmapped, --keymap-output, --sftl-output, or --header-lines",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(policy) = &self.unmapped {
            config.keymap.unmapped_keys = policy
                .parse::<UnmappedKeyPolicy>()
                .map_err(CliError::validation)?;
        }
        if let Some(path) = &self.keymap_output {
            config.keymap.default_output.clone_from(path);
        }
        if let Some(path) = &self.sftl_output {
            config.srl.default_output.clone_from(path);
        }
        if let Some(lines) = self.header_lines {
            config.keymap.header_lines = lines;
        }

        config.validate().map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {}", e)))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("MigEmulator Configuration");
    println!("=========================");
    println!();

    println!("Keymap:");
    println!("  Default Output: {}", config.keymap.default_output.display());
    println!("  Unmapped Keys:  {}", config.keymap.unmapped_keys);
    println!("  Header Lines:   {}", config.keymap.header_lines);
    println!();

    println!("SRL:");
    println!("  Default Output: {}", config.srl.default_output.display());
    println!();
}
