//! Implementation of `spada saved`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use spada_storage::{SavedSearches, SetOutcome, StorageError};

use crate::cli::{
    args::{SavedCommand, SavedWhat},
    context::CommandContext,
    output::{dim, print_json, warning},
};

/// Lists, adds or removes saved searches.
pub fn run(ctx: &mut CommandContext, cmd: &SavedCommand) -> ExitCode {
    let store = match ctx.store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    let mut saved = SavedSearches::load(store);

    match &cmd.what {
        None => list(&saved, false),
        Some(SavedWhat::List { json }) => list(&saved, *json),
        Some(SavedWhat::Add { term }) => {
            let term = term.join(" ");
            let Some(entry) = saved.save(&term) else {
                eprintln!("error: search term is empty");
                return ExitCode::FAILURE;
            };
            let message = if entry.usage_count > 1 {
                format!("'{}' already saved, used {} times", entry.search_term, entry.usage_count)
            } else {
                format!("Saved search '{}'", entry.search_term)
            };
            finish(saved.store(store), &message)
        }
        Some(SavedWhat::Remove { id_or_term }) => {
            let Some(removed) = saved.remove(id_or_term) else {
                eprintln!("error: no saved search matches '{id_or_term}'");
                return ExitCode::FAILURE;
            };
            let message = format!("Removed saved search '{}'", removed.search_term);
            finish(saved.store(store), &message)
        }
    }
}

/// Prints saved searches, most recently used first.
fn list(saved: &SavedSearches, json: bool) -> ExitCode {
    let searches = saved.by_recency();
    if json {
        return print_json(&searches);
    }
    if searches.is_empty() {
        println!("{}", dim("No saved searches."));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Term", "Uses", "Last used", "Id"]);
    for search in searches {
        table.add_row(vec![
            Cell::new(&search.search_term),
            Cell::new(search.usage_count),
            Cell::new(search.last_used_at.format("%Y-%m-%d %H:%M")),
            Cell::new(search.id),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}

/// Reports the result of writing the list back.
fn finish(result: Result<SetOutcome, StorageError>, message: &str) -> ExitCode {
    match result {
        Ok(outcome) => {
            println!("{message}");
            if let Some(note) = outcome.warning {
                eprintln!("{}", warning(&format!("warning: {note}")));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to save searches: {e}");
            ExitCode::FAILURE
        }
    }
}
