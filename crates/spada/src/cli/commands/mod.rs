//! Command implementations and dispatch.

pub mod annotations;
pub mod check;
pub mod config;
pub mod glossary;
pub mod init;
pub mod saved;
pub mod search;
mod shared;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub async fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd).await,
        Commands::Glossary(cmd) => glossary::run(ctx, &cmd),
        Commands::Annotations(cmd) => annotations::run(ctx, &cmd),
        Commands::Saved(cmd) => saved::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
