//! MigEmulator Web Server Binary
//!
//! This binary starts the MigEmulator web server that exposes the keymap and
//! SRL converters as a JSON API.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, writes into the current directory)
//! migemulator-web
//!
//! # Specify port and workspace
//! migemulator-web --port 8080 --workspace ~/migration
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use migemulator::config::Config;
use migemulator::logging::init_tracing;
use migemulator::web;

/// MigEmulator Web Server - JSON API for the converters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory converted files are written to (defaults to the current directory)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(if args.verbose { "debug" } else { "info" });

    let config = Config::load().unwrap_or_default();

    let workspace_root = match args.workspace {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    if !workspace_root.exists() {
        std::fs::create_dir_all(&workspace_root).context(format!(
            "Failed to create workspace directory: {}",
            workspace_root.display()
        ))?;
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, workspace_root, addr).await
}
