//! Implementation of `spada search`.

use std::process::ExitCode;

use spada_config::SearchSettings;
use spada_search::{ContextConfig, SearchContext, SearchOptions, SearchOutcome, SkipReason};
use spada_storage::{SavedSearches, load_display_config};
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{DisplayMode, SearchReport, warning},
};

/// Searches the corpus and prints matching fields.
pub async fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    if let Err(code) = ctx.require_corpus(true) {
        return code;
    }

    let text = cmd.text();
    let options = search_options(&ctx.config.search, cmd);
    let context_config = ContextConfig::from_config(&ctx.config);
    let styles = match ctx.store() {
        Ok(store) => load_display_config(store).to_table(),
        Err(code) => return code,
    };
    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let search = SearchContext::new(context_config);
    let build = search.load_sources(Some(corpus.sections.clone()), Some(corpus.glossary.clone()));
    match build.await {
        Ok(Some(index)) => debug!(records = index.len(), "index ready"),
        Ok(None) => {
            eprintln!("error: index build was superseded");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: index build failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    match search.perform_search(&text, options).await {
        Ok(SearchOutcome::Completed { .. }) => {}
        Ok(SearchOutcome::Skipped(SkipReason::BlankQuery)) => {
            eprintln!("error: search query is empty");
            return ExitCode::FAILURE;
        }
        Ok(SearchOutcome::Skipped(reason)) => {
            eprintln!("error: search did not run ({reason:?})");
            return ExitCode::FAILURE;
        }
        Ok(SearchOutcome::Failed(e)) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: search task failed: {e}");
            return ExitCode::FAILURE;
        }
    }
    let Some(results) = search.results() else {
        eprintln!("error: search finished without results");
        return ExitCode::FAILURE;
    };

    let mode = if cmd.output.json {
        DisplayMode::Json
    } else if cmd.output.list {
        DisplayMode::List
    } else {
        DisplayMode::Full
    };
    let report = SearchReport {
        query: &text,
        options,
        results: &results,
        corpus,
        styles: &styles,
        limit: cmd.limit,
    };
    let code = report.print(mode);

    record_search(ctx, &text, cmd.save, matches!(mode, DisplayMode::Json));
    code
}

/// Configured defaults with command-line flags layered on top.
fn search_options(settings: &SearchSettings, cmd: &SearchCommand) -> SearchOptions {
    let mut options = SearchOptions::from_settings(settings);
    options.case_sensitive |= cmd.case_sensitive;
    options.whole_word |= cmd.whole_word;
    options.regex |= cmd.regex;
    options.include_variants |= cmd.variants;
    options.include_cross_language |= cmd.cross_language;
    if cmd.language.is_some() {
        options.language = cmd.language;
    }
    options
}

/// Saves the term when asked, otherwise bumps the usage of a matching saved search.
///
/// Storage problems are reported as warnings; the search itself already succeeded.
fn record_search(ctx: &mut CommandContext, text: &str, save: bool, quiet: bool) {
    let Ok(store) = ctx.store() else {
        return;
    };
    let mut saved = SavedSearches::load(store);
    let changed = if save {
        saved.save(text).is_some()
    } else {
        saved.record_use(text)
    };
    if !changed {
        return;
    }
    match saved.store(store) {
        Ok(outcome) => {
            if let Some(message) = outcome.warning {
                eprintln!("{}", warning(&format!("warning: {message}")));
            }
            if save && !quiet {
                println!("Saved search '{}'", text.trim());
            }
        }
        Err(e) => eprintln!("{}", warning(&format!("warning: could not save search: {e}"))),
    }
}
