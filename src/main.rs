//! MigEmulator - PCOMM to ZIE migration converters
//!
//! Merges PCOMM keymaps with the ZIE baseline and converts SRL file-transfer
//! scripts into SFTL HAScript macros.

use clap::{Parser, Subcommand};
use migemulator::cli::{BaselineArgs, CliResult, ConfigArgs, ExitCode, KeymapArgs, SrlArgs};
use migemulator::constants::APP_BINARY_NAME;
use migemulator::logging::init_tracing;

/// MigEmulator - PCOMM to ZIE migration converters
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge a PCOMM keymap into a ZIE .kmp file
    Keymap(KeymapArgs),
    /// Convert an SRL script into an SFTL HAScript
    Srl(SrlArgs),
    /// List the embedded baseline keymap
    Baseline(BaselineArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Keymap(args) => args.execute(),
            Self::Srl(args) => args.execute(),
            Self::Baseline(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let code = match cli.command.execute() {
        Ok(()) => ExitCode::Success as i32,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code()
        }
    };
    std::process::exit(code);
}
