//! Implementation of `spada glossary`.

use std::process::ExitCode;

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use spada_corpus::{Glossary, GlossaryEntry, Language};

use crate::cli::{
    args::GlossaryCommand,
    context::CommandContext,
    output::{dim, header, print_json, subheader},
};

/// One glossary entry in JSON output.
#[derive(Serialize)]
struct JsonEntry<'a> {
    /// Glossary key.
    key: &'a str,
    /// The entry.
    #[serde(flatten)]
    entry: &'a GlossaryEntry,
}

/// Lists glossary entries, grouped by category or filtered by text.
pub fn run(ctx: &mut CommandContext, cmd: &GlossaryCommand) -> ExitCode {
    if let Err(code) = ctx.require_corpus(true) {
        return code;
    }
    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };
    let glossary = &corpus.glossary;
    let entries = glossary.filter(cmd.filter.as_deref().unwrap_or_default(), cmd.language);

    if cmd.json {
        let json: Vec<JsonEntry<'_>> = entries
            .into_iter()
            .map(|(key, entry)| JsonEntry { key, entry })
            .collect();
        return print_json(&json);
    }

    if entries.is_empty() {
        println!("{}", dim("No glossary entries."));
        return ExitCode::SUCCESS;
    }

    let language = cmd.language.unwrap_or(Language::Fr);
    if cmd.filter.is_some() {
        print_table(&entries, language);
    } else {
        print_grouped(glossary, language);
    }
    ExitCode::SUCCESS
}

/// Prints filter results as a table.
fn print_table(entries: &[(&str, &GlossaryEntry)], language: Language) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Term", "Category", "Type", "Definition"]);
    for (_, entry) in entries {
        table.add_row(vec![
            Cell::new(&entry.term),
            Cell::new(&entry.category),
            Cell::new(&entry.kind),
            Cell::new(entry.definition.get(language).unwrap_or_default()),
        ]);
    }
    println!("{table}");
}

/// Prints every entry under its category and type.
fn print_grouped(glossary: &Glossary, language: Language) {
    for category in glossary.group_by_category() {
        println!("{}", header(&category.name));
        for group in &category.types {
            println!("  {}", subheader(&group.name));
            for key in &group.keys {
                let Some(entry) = glossary.get(key) else {
                    continue;
                };
                match entry.definition.get(language) {
                    Some(definition) => println!("    {}  {}", entry.term, dim(definition)),
                    None => println!("    {}", entry.term),
                }
            }
        }
        println!();
    }
}
