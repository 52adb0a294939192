//! Helpers shared by `check` and `status`.

use std::path::{Path, PathBuf};

use spada_config::{ConfigWarning, format_path_for_display};

use crate::cli::output::{dim, subheader};

/// Prints the discovered config files, highest precedence first.
pub fn print_config_files(files: &[PathBuf], cwd: &Path) {
    println!("{}", subheader("Config files:"));
    for path in files {
        println!("   {}", format_path_for_display(path, Some(cwd)));
    }
    println!();
}

/// Prints one hint per kind of warning.
pub fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings.iter().map(hint).collect();
    hints.sort_unstable();
    hints.dedup();
    for hint in hints {
        println!("{}", dim(&format!("Hint: {hint}")));
    }
}

/// How to resolve a warning.
fn hint(warning: &ConfigWarning) -> &'static str {
    match warning {
        ConfigWarning::NoCorpusDefined => {
            "set [corpus] treatises and glossary paths in .spada.toml"
        }
        ConfigWarning::TreatiseDirMissing { .. } | ConfigWarning::GlossaryMissing { .. } => {
            "create the missing file or directory, or fix the path in [corpus]"
        }
        ConfigWarning::TreatiseDirNotDirectory { .. } => {
            "corpus.treatises must point to a directory of YAML files"
        }
        ConfigWarning::NoTreatiseFiles { .. } => {
            "check corpus.include patterns against the treatise directory"
        }
        ConfigWarning::AnnotationsMissing { .. } => {
            "remove corpus.annotations or create the annotations file"
        }
        ConfigWarning::UnknownLanguage { .. } => "search.language must be one of it, fr, en",
        ConfigWarning::WarningRatioOutOfRange { .. } => {
            "storage.warning_ratio must be greater than 0 and at most 1"
        }
    }
}
