//! Implementation of `spada status`.

use std::{path::Path, process::ExitCode};

use spada_config::{discover_config_files, format_path_for_display};
use spada_search::{IndexOptions, build_index};

use super::shared::{print_config_files, print_hints};
use crate::cli::{
    context::CommandContext,
    output::{dim, plural, subheader, warning},
};

/// Shows configuration files, corpus paths, index and storage statistics, and warnings.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("spada init")
        );
        return ExitCode::SUCCESS;
    }
    print_config_files(&config_files, &ctx.cwd);

    let base = ctx.config.config_root.clone();
    let corpus_settings = &ctx.config.corpus;
    println!("{}", subheader("Corpus:"));
    print_location("treatises", corpus_settings.treatises.as_deref(), base.as_deref());
    print_location("glossary", corpus_settings.glossary.as_deref(), base.as_deref());
    print_location(
        "annotations",
        corpus_settings.annotations.as_deref(),
        base.as_deref(),
    );
    println!();

    if !ctx.config.corpus.is_empty() {
        let options = IndexOptions {
            expand_glossary_terms: ctx.config.search.expand_glossary_terms,
        };
        let corpus = match ctx.corpus() {
            Ok(corpus) => corpus,
            Err(code) => return code,
        };
        let index = build_index(
            Some(corpus.sections.as_slice()),
            Some(&corpus.glossary),
            options,
        );
        println!("{}", subheader("Index:"));
        println!(
            "   {} from {} and {}",
            plural(index.len(), "record"),
            plural(corpus.sections.len(), "section"),
            plural(corpus.glossary.len(), "glossary entry")
        );
        println!("   {}", dim(&format!("fingerprint {}", index.fingerprint())));
        println!();
    }

    println!("{}", subheader("Storage:"));
    match ctx.store() {
        Ok(store) => {
            let limits = store.limits();
            let size = store.size();
            let percent = (size * 100).checked_div(limits.max_bytes).unwrap_or(100);
            match store.path() {
                Some(path) => println!("   {}", format_path_for_display(path, base.as_deref())),
                None => println!("   {}", dim("(in memory)")),
            }
            let usage = format!(
                "{} · {size} of {} bytes ({percent}%)",
                plural(store.len(), "entry"),
                limits.max_bytes
            );
            if store.is_full() {
                println!("   {}", warning(&usage));
            } else {
                println!("   {usage}");
            }
        }
        Err(_) => println!("   {}", warning("[unavailable]")),
    }
    println!();

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();
    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints one configured corpus path, flagging paths that do not exist.
fn print_location(name: &str, path: Option<&Path>, base: Option<&Path>) {
    let Some(path) = path else {
        println!("   {name} {}", dim("(not set)"));
        return;
    };
    let display = dim(&format!("-> {}", format_path_for_display(path, base)));
    if path.exists() {
        println!("   {name} {display}");
    } else {
        println!("   {name} {display} {}", warning("[missing]"));
    }
}
