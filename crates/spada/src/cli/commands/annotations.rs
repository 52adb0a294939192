//! Implementation of `spada annotations`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use spada_annotation::{AnnotationFilter, AnnotationKind, DisplayConfig, hex_to_rgb};
use spada_storage::{load_display_config, save_display_config};

use crate::cli::{
    args::AnnotationsCommand,
    context::CommandContext,
    output::{dim, plural, print_json, subheader, swatch, warning},
};

/// One annotation kind in JSON output.
#[derive(Serialize)]
struct JsonKind<'a> {
    /// Stable key.
    kind: AnnotationKind,
    /// Display label.
    label: &'a str,
    /// Effective colour.
    color: &'a str,
    /// Whether the kind is shown.
    visible: bool,
}

/// A section selected by `--filter` in JSON output.
#[derive(Serialize)]
struct JsonSection<'a> {
    /// Section id.
    id: &'a str,
    /// Section title.
    title: &'a str,
}

/// Shows annotation display preferences, applying any requested changes first.
pub fn run(ctx: &mut CommandContext, cmd: &AnnotationsCommand) -> ExitCode {
    let display = match update_display(ctx, cmd) {
        Ok(display) => display,
        Err(code) => return code,
    };

    if !cmd.filter.is_empty() {
        return print_filtered(ctx, cmd);
    }

    let table = display.to_table();
    if cmd.json {
        let json: Vec<JsonKind<'_>> = table
            .iter()
            .map(|(kind, style)| JsonKind {
                kind,
                label: &style.label,
                color: display.color(kind),
                visible: style.visible,
            })
            .collect();
        return print_json(&json);
    }

    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);
    out.set_header(vec!["Kind", "Label", "Colour", "Visible"]);
    for (kind, style) in table.iter() {
        let color = display.color(kind);
        let rgb = hex_to_rgb(color);
        out.add_row(vec![
            Cell::new(kind.key()),
            Cell::new(&style.label),
            Cell::new(format!("{} {color}", swatch((rgb.r, rgb.g, rgb.b)))),
            Cell::new(if style.visible { "yes" } else { "no" }),
        ]);
    }
    println!("{out}");
    ExitCode::SUCCESS
}

/// Loads the stored preferences and persists any changes the command asks for.
fn update_display(
    ctx: &mut CommandContext,
    cmd: &AnnotationsCommand,
) -> Result<DisplayConfig, ExitCode> {
    let store = ctx.store()?;
    let mut display = load_display_config(store);
    if !cmd.modifies_display() {
        return Ok(display);
    }

    if cmd.reset {
        display.reset();
    }
    for (kind, color) in &cmd.set {
        display.set_color(*kind, color).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
    }
    for kind in &cmd.show {
        display.set_visible(*kind, true);
    }
    for kind in &cmd.hide {
        display.set_visible(*kind, false);
    }

    let outcome = save_display_config(store, &display).map_err(|e| {
        eprintln!("error: failed to save annotation settings: {e}");
        ExitCode::FAILURE
    })?;
    if let Some(message) = outcome.warning {
        eprintln!("{}", warning(&format!("warning: {message}")));
    }
    Ok(display)
}

/// Lists the sections whose annotations match every `--filter` kind.
fn print_filtered(ctx: &mut CommandContext, cmd: &AnnotationsCommand) -> ExitCode {
    if let Err(code) = ctx.require_corpus(true) {
        return code;
    }
    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let filter = cmd
        .filter
        .iter()
        .fold(AnnotationFilter::new(), |f, (kind, value)| {
            f.with(*kind, value.as_str())
        });
    let ids = filter.select(corpus.annotations());
    let sections: Vec<JsonSection<'_>> = corpus
        .sections
        .iter()
        .filter(|s| ids.contains(&s.id))
        .map(|s| JsonSection {
            id: &s.id,
            title: &s.title,
        })
        .collect();

    if cmd.json {
        return print_json(&sections);
    }
    if sections.is_empty() {
        println!("{}", dim("No annotated sections match."));
        return ExitCode::SUCCESS;
    }
    println!("{}", subheader(&plural(sections.len(), "section")));
    for section in &sections {
        println!("   {} {}", section.id, dim(section.title));
    }
    ExitCode::SUCCESS
}
