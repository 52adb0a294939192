//! Implementation of `spada init`.

use std::{fs, path::PathBuf, process::ExitCode};

use spada_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};
use spada_highlight::Highlighter;

use crate::cli::{args::InitCommand, context::CommandContext, output::subheader};

/// Writes a commented-out `.spada.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let (path, template) = match target(ctx, cmd) {
        Ok(target) => target,
        Err(code) => return code,
    };

    if path.exists() && !cmd.force {
        eprintln!("error: {} already exists (use --force to overwrite)", path.display());
        return ExitCode::FAILURE;
    }
    if let Err(e) = fs::write(&path, &template) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    let highlighted = Highlighter::new().highlight_toml(&template);
    for line in highlighted.lines() {
        println!("   {line}");
    }
    ExitCode::SUCCESS
}

/// Picks the file to create and its template.
///
/// Running from the home directory writes the global config even without `--global`.
fn target(ctx: &CommandContext, cmd: &InitCommand) -> Result<(PathBuf, String), ExitCode> {
    let global = global_config_path();
    let in_home = global
        .as_deref()
        .and_then(|p| p.parent())
        .is_some_and(|home| home == ctx.cwd);

    if !(cmd.global || in_home) {
        return Ok((ctx.cwd.join(CONFIG_FILENAME), local_template()));
    }
    match global {
        Some(path) => Ok((path, global_template())),
        None => {
            eprintln!("error: home directory is unknown");
            Err(ExitCode::FAILURE)
        }
    }
}
