//! Clap argument definitions for the `spada` CLI.

use std::{env, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use spada_annotation::AnnotationKind;
use spada_corpus::Language;

/// Parses a `kind=value` pair such as `weapons=#0284c7` or `guards=Porta di Ferro`.
fn parse_assignment(s: &str) -> Result<(AnnotationKind, String), String> {
    let (kind, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=VALUE, got '{s}'"))?;
    let kind = kind.trim().parse().map_err(|e| format!("{e}"))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("missing value in '{s}'"));
    }
    Ok((kind, value.to_string()))
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "spada")]
#[command(about = "Search Renaissance fencing treatises and their glossary")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output one line per match
    #[arg(long, conflicts_with = "json")]
    pub list: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `spada search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search text; several words are joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Match with the original casing
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Only match whole words
    #[arg(short = 'w', long)]
    pub whole_word: bool,

    /// Treat the query as a regular expression
    #[arg(short = 'r', long)]
    pub regex: bool,

    /// Only search one language: it, fr or en
    #[arg(short = 'l', long = "lang")]
    pub language: Option<Language>,

    /// Also match plural forms (spada also finds spade)
    #[arg(long)]
    pub variants: bool,

    /// Also match the glossary term and translations of a glossary entry
    #[arg(short = 'x', long)]
    pub cross_language: bool,

    /// Maximum matches to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    /// Add the query to the saved searches
    #[arg(long)]
    pub save: bool,
}

impl SearchCommand {
    /// The query text as one string.
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for `spada glossary`.
#[derive(Args, Debug, Clone)]
pub struct GlossaryCommand {
    /// Only show entries whose term, category, type, definition or translation contains this text
    pub filter: Option<String>,

    /// Only look at definitions and translations in this language
    #[arg(short = 'l', long = "lang")]
    pub language: Option<Language>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `spada annotations`.
#[derive(Args, Debug, Clone)]
pub struct AnnotationsCommand {
    /// Set a colour, e.g. --set strikes=#ef4444 (repeatable)
    #[arg(long, value_name = "KIND=#HEX", value_parser = parse_assignment)]
    pub set: Vec<(AnnotationKind, String)>,

    /// Show annotations of a kind (repeatable)
    #[arg(long, value_name = "KIND")]
    pub show: Vec<AnnotationKind>,

    /// Hide annotations of a kind (repeatable)
    #[arg(long, value_name = "KIND")]
    pub hide: Vec<AnnotationKind>,

    /// Restore default colours and visibility before applying other changes
    #[arg(long)]
    pub reset: bool,

    /// List sections annotated with a value, e.g. --filter weapons="Spada sola" (repeatable)
    #[arg(long, value_name = "KIND=VALUE", value_parser = parse_assignment)]
    pub filter: Vec<(AnnotationKind, String)>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl AnnotationsCommand {
    /// Whether the command changes the display preferences.
    pub fn modifies_display(&self) -> bool {
        self.reset || !self.set.is_empty() || !self.show.is_empty() || !self.hide.is_empty()
    }
}

/// Arguments for `spada saved`.
#[derive(Args, Debug, Clone)]
pub struct SavedCommand {
    /// What to do; lists saved searches by default.
    #[command(subcommand)]
    pub what: Option<SavedWhat>,
}

/// Saved search operations.
#[derive(Subcommand, Debug, Clone)]
pub enum SavedWhat {
    /// List saved searches, most recently used first
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Save a search term
    Add {
        /// Search text; several words are joined with spaces
        #[arg(required = true)]
        term: Vec<String>,
    },
    /// Remove a saved search by id or term
    Remove {
        /// Saved search id or term
        id_or_term: String,
    },
}

/// Arguments for `spada init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.spada.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `spada` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search treatise sections and glossary entries
    #[command(after_help = "\
MATCHING:
  Queries match as literal text, ignoring case (É matches é).
  Use --regex for regular expressions.
  --variants adds plural forms, --cross-language adds glossary translations.

EXAMPLES:
  spada search mandritto
  spada search coda longa --lang fr
  spada search 'fend[ae]nte' --regex
  spada search épée --whole-word --list
  spada search porta di ferro --json
  spada search mandritto --variants --cross-language")]
    Search(SearchCommand),

    /// Browse the glossary
    Glossary(GlossaryCommand),

    /// Show or change how annotations are displayed
    Annotations(AnnotationsCommand),

    /// Manage saved searches
    Saved(SavedCommand),

    /// Validate configuration and corpus files
    Check,

    /// Show configuration, corpus and storage status
    Status,

    /// Show effective configuration settings
    Config,

    /// Initialize spada configuration in current directory
    Init(InitCommand),
}

/// Parses CLI arguments, printing hierarchical help for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_hierarchical_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints custom help with hierarchical subcommand display.
fn print_hierarchical_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: spada <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }

        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:12} {about}");

        for subsub in sub.get_subcommands() {
            let subname = subsub.get_name();
            if subname == "help" {
                continue;
            }
            let subabout = subsub
                .get_about()
                .map(|s| s.to_string())
                .unwrap_or_default();
            println!("    {subname:10} {subabout}");
        }
    }

    println!(
        "  {:<12} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -h, --help  Print help");
}
