//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use serde::Serialize;
use spada_annotation::{AnnotationTable, SectionAnnotation, hex_to_rgb};
use spada_corpus::Corpus;
pub use spada_highlight::{dim, header, subheader, success, swatch, warning};
use spada_highlight::preview;
use spada_search::{SearchMatch, SearchOptions, SearchResultSet, SourceType};

/// JSON output for a search.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as typed.
    query: &'a str,
    /// Options the search ran with.
    options: SearchOptions,
    /// Number of matching records.
    total_matches: usize,
    /// Matches, possibly truncated to the requested limit.
    results: &'a [SearchMatch],
}

/// Rendering style for search results.
#[derive(Clone, Copy)]
pub enum DisplayMode {
    /// Title, preview and annotations.
    Full,
    /// One line per match.
    List,
    /// Pretty-printed JSON.
    Json,
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Everything needed to render one search's results.
pub struct SearchReport<'a> {
    /// The query as typed.
    pub query: &'a str,
    /// Options the search ran with.
    pub options: SearchOptions,
    /// The results.
    pub results: &'a SearchResultSet,
    /// Corpus the index was built from, for titles and annotations.
    pub corpus: &'a Corpus,
    /// Annotation styles; hidden kinds are not printed.
    pub styles: &'a AnnotationTable,
    /// Maximum matches to print.
    pub limit: Option<usize>,
}

impl SearchReport<'_> {
    /// Prints the report in the requested mode.
    pub fn print(&self, mode: DisplayMode) -> ExitCode {
        let shown = self.limit.map_or(self.results.len(), |n| n.min(self.results.len()));
        let matches = &self.results.matches()[..shown];

        match mode {
            DisplayMode::Json => print_json(&JsonSearchOutput {
                query: self.query,
                options: self.options,
                total_matches: self.results.len(),
                results: matches,
            }),
            DisplayMode::List => {
                for m in matches {
                    println!(
                        "{} {}",
                        m.record.id,
                        dim(&format!("({})", plural(m.match_ranges.len(), "match")))
                    );
                }
                self.print_truncation(shown);
                ExitCode::SUCCESS
            }
            DisplayMode::Full => {
                if matches.is_empty() {
                    println!("{}", dim("No matches."));
                    return ExitCode::SUCCESS;
                }
                println!(
                    "{}",
                    header(&format!(
                        "{} in {}",
                        plural(self.results.total_ranges(), "match"),
                        plural(self.results.len(), "field")
                    ))
                );
                println!();
                for m in matches {
                    self.print_match(m);
                }
                self.print_truncation(shown);
                ExitCode::SUCCESS
            }
        }
    }

    /// Prints one match with its source, preview and visible annotations.
    fn print_match(&self, m: &SearchMatch) {
        let record = &m.record;
        let origin = format!(
            "{}:{} · {}",
            record.source_type.as_str(),
            record.source_id,
            record.field
        );
        match record.source_type {
            SourceType::Treatise => {
                let title = self
                    .corpus
                    .section(&record.source_id)
                    .map_or(record.source_id.as_str(), |s| s.title.as_str());
                println!("{} {}", subheader(title), dim(&origin));
            }
            SourceType::Glossary => {
                let term = self
                    .corpus
                    .glossary
                    .get(&record.source_id)
                    .map_or(record.source_id.as_str(), |e| e.term.as_str());
                println!("{} {}", subheader(term), dim(&origin));
            }
        }

        let excerpt = preview(&single_line(&record.text), &m.match_ranges);
        println!("   {}", excerpt.to_terminal());

        if record.source_type == SourceType::Treatise
            && let Some(annotation) = self
                .corpus
                .section(&record.source_id)
                .and_then(|s| s.annotation.as_ref())
        {
            for line in annotation_lines(annotation, self.styles) {
                println!("   {line}");
            }
        }
        println!();
    }

    /// Notes how many matches the limit hid.
    fn print_truncation(&self, shown: usize) {
        let hidden = self.results.len() - shown;
        if hidden > 0 {
            println!("{}", dim(&format!("... {} not shown", plural(hidden, "match"))));
        }
    }
}

/// One line per visible annotation kind that has values: swatch, label and values.
pub fn annotation_lines(annotation: &SectionAnnotation, styles: &AnnotationTable) -> Vec<String> {
    styles
        .iter()
        .filter(|(_, style)| style.visible)
        .filter_map(|(kind, style)| {
            let values = annotation.values(kind);
            if values.is_empty() {
                return None;
            }
            let rgb = hex_to_rgb(&style.text_style.color);
            Some(format!(
                "{} {} {}",
                swatch((rgb.r, rgb.g, rgb.b)),
                dim(&format!("{}:", style.label)),
                values.join(", ")
            ))
        })
        .collect()
}

/// Replaces line breaks and tabs with spaces, keeping byte offsets intact.
fn single_line(text: &str) -> String {
    text.replace(['\n', '\r', '\t'], " ")
}

/// Formats a count with a naively pluralized noun.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else if noun.ends_with("ch") {
        format!("{count} {noun}es")
    } else if let Some(stem) = noun.strip_suffix('y') {
        format!("{count} {stem}ies")
    } else {
        format!("{count} {noun}s")
    }
}
