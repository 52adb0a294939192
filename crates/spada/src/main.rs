//! spada: search Renaissance fencing treatises and their glossary.
//!
//! The binary loads the corpus named by `.spada.toml`, builds an in-memory index and runs
//! literal or regular-expression searches over it. Annotation display preferences and
//! saved searches persist in a small JSON key/value store.

#![warn(missing_docs)]

mod cli;

use std::{io, process::ExitCode};

use tracing_subscriber::EnvFilter;

use crate::cli::{
    args::{Commands, parse_cli},
    commands,
    context::CommandContext,
};

/// Environment variable holding the log filter. Falls back to `RUST_LOG`.
const LOG_ENV: &str = "SPADA_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = parse_cli();

    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx).await
}

/// Installs a stderr subscriber filtered by `SPADA_LOG` or `RUST_LOG`, `warn` by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
