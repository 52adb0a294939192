//! Implementation of `spada check`.

use std::process::ExitCode;

use spada_config::discover_config_files;

use super::shared::{print_config_files, print_hints};
use crate::cli::{
    context::CommandContext,
    output::{dim, plural, subheader, success, warning},
};

/// Exit codes for `spada check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration and corpus are clean.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Something is usable but should be fixed.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// The corpus cannot be loaded.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration, loads the corpus and reports every problem found.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("spada init")
        );
        return exit_codes::OK;
    }
    print_config_files(&config_files, &ctx.cwd);

    let warnings = ctx.config.validate();
    let mut problems = warnings.len();

    if !ctx.config.corpus.is_empty() {
        let corpus = match ctx.corpus() {
            Ok(corpus) => corpus,
            Err(_) => return exit_codes::ERROR,
        };
        println!("{}", subheader("Corpus:"));
        println!(
            "   {} from {}",
            plural(corpus.sections.len(), "section"),
            plural(corpus.files.len(), "file")
        );
        println!("   {}", plural(corpus.glossary.len(), "glossary entry"));
        println!(
            "   {}",
            plural(corpus.annotations().count(), "annotated section")
        );
        println!();

        if !corpus.issues.is_empty() {
            println!(
                "{}",
                subheader(&format!("Annotation issues ({}):", corpus.issues.len()))
            );
            for issue in &corpus.issues {
                println!("   {}", warning(&issue.to_string()));
            }
            println!();
            problems += corpus.issues.len();
        }
    }

    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }

    if problems == 0 {
        println!("{}", success("No issues found."));
        exit_codes::OK
    } else {
        exit_codes::WARNINGS
    }
}
