//! Command-line inspector for evolution proposal feeds.
//!
//! # Responsibility
//! - Supply feed bytes (file or stdin) to `evolution_core`.
//! - Render decoded values for humans.

mod commands;
mod error;
mod render;
mod source;

use clap::Parser;
use commands::{run, Command};
use evolution_core::{default_log_level, init_logging};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "EVOLUTION_LOG_DIR";

#[derive(Debug, Parser)]
#[command(
    name = "evolution",
    version,
    about = "Decode and inspect a language evolution proposal feed"
)]
struct Cli {
    #[arg(long, global = true, help = "Log level: trace|debug|info|warn|error")]
    log_level: Option<String>,
    #[arg(
        long,
        global = true,
        env = LOG_DIR_ENV,
        help = "Absolute directory for rolling log files; logging is off when unset"
    )]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref().filter(|dir| !dir.trim().is_empty()) {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let stdout = std::io::stdout();
    match run(&cli.command, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
