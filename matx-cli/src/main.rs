//! Matx CLI
//!
//! Line-oriented front end for the matrix calculator. Reads one command
//! per line from stdin and prints the resulting notices to stdout:
//!
//! - `gen <rows> <cols> <elements...> [reg X]`: build and encode a matrix
//! - `id <n>`: fill the identity register
//! - `regs`: list registers
//! - `help [fn]`: list functions
//! - `quit` / `exit`
//! - anything else: evaluate as an expression, optional `reg<X>` suffix
//!
//! `matx encode <token>...` prints the cell encoding of each token.

mod clipboard;
mod config;
mod repl;

use clap::{Parser, Subcommand};
use config::MatxConfig;
use matx::Session;
use matx_core::RegisterProfile;
use repl::OutputFormat;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matx")]
#[command(about = "Register-based matrix calculator")]
#[command(version)]
struct Cli {
    /// Register layout (full, basic)
    #[arg(long, env = "MATX_PROFILE")]
    profile: Option<RegisterProfile>,

    /// Path to a matx.toml configuration file
    #[arg(long, env = "MATX_CONFIG")]
    config: Option<PathBuf>,

    /// Print encodings instead of copying them to the system clipboard
    #[arg(long, default_value = "false")]
    no_clipboard: bool,

    /// Print each notice as a JSON object
    #[arg(long, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical encoding of each cell token
    Encode {
        /// Cell tokens such as 3, sqrt2 or 1divsqrt3
        tokens: Vec<String>,
    },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("MATX_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    if let Some(Command::Encode { tokens }) = &cli.command {
        let mut out = io::stdout().lock();
        for token in tokens {
            if writeln!(out, "{}", matx::encode_cell(token)).is_err() {
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let config = match &cli.config {
        Some(path) => match MatxConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("matx: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => MatxConfig::default(),
    };
    let registers = config.register_set(cli.profile);
    info!(storable = ?registers.storable(), identity = ?registers.identity(), "registers configured");

    let mut session = Session::new(registers);
    if !cli.no_clipboard {
        match clipboard::SystemClipboard::open() {
            Ok(system) => session = session.with_clipboard(Box::new(system)),
            Err(reason) => warn!(%reason, "clipboard unavailable, printing encodings instead"),
        }
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let stdin = io::stdin();
    if stdin.is_terminal() && format == OutputFormat::Text {
        eprintln!("matx {} - type help for commands", env!("CARGO_PKG_VERSION"));
    }

    match repl::run(&mut session, stdin.lock(), io::stdout().lock(), format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("matx: {}", e);
            ExitCode::FAILURE
        }
    }
}
