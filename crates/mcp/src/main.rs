use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use filekeeper_core::Config;
use filekeeper_mcp::McpServer;

#[derive(Parser)]
#[command(name = "filekeeper-mcp")]
#[command(version)]
#[command(about = "MCP server for listing, searching, organizing and reading files")]
struct Cli {
    #[arg(short, long, env = "FILEKEEPER_CONFIG", help = "JSON config with rules, read_limit and on_conflict")]
    config: Option<PathBuf>,
    #[arg(long, help = "Log filter, overrides RUST_LOG (e.g. debug, filekeeper_core=trace)")]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let filter = level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    tracing::info!(
        rules = config.rules.organize.len(),
        read_limit = config.read_limit,
        on_conflict = ?config.on_conflict,
        "filekeeper-mcp starting"
    );

    let mut server = McpServer::with_config(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = server.handle_request(&line);
        if let Some(resp) = response {
            writeln!(stdout, "{}", resp)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
