//! Path resolution for configured locations.
//!
//! Resolves relative and tilde-prefixed paths to absolute paths. Unlike tree roots, corpus
//! files are not required to exist at load time; missing files surface as validation warnings.

use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/data`) - expanded to home directory
/// - Relative paths (`./data`, `../shared`) - resolved relative to `config_dir`
/// - Absolute paths - returned as-is
///
/// `.` and `..` components are collapsed lexically so the result does not depend on the
/// path existing.
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(&expanded)
    };

    Ok(normalize_lexically(&absolute))
}

/// Formats a path for display, relative to `base` when possible and with `~` for home.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base
        && path.starts_with(base)
        && let Some(relative) = pathdiff::diff_paths(path, base)
    {
        if relative.as_os_str().is_empty() {
            return ".".to_string();
        }
        return relative.display().to_string();
    }

    if let Some(dirs) = BaseDirs::new()
        && let Ok(rest) = path.strip_prefix(dirs.home_dir())
    {
        return Path::new("~").join(rest).display().to_string();
    }

    path.display().to_string()
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Collapses `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_path("./data/glossary.yaml", Path::new("/library")).unwrap();
        assert_eq!(resolved, PathBuf::from("/library/data/glossary.yaml"));
    }

    #[test]
    fn test_resolve_parent_path() {
        let resolved = resolve_path("../shared/treatises", Path::new("/library/marozzo")).unwrap();
        assert_eq!(resolved, PathBuf::from("/library/shared/treatises"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let resolved = resolve_path("/srv/data", Path::new("/library")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/data"));
    }

    #[test]
    fn test_resolve_tilde_path() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let resolved = resolve_path("~/spada/storage.json", Path::new("/library")).unwrap();
        assert_eq!(resolved, home.join("spada/storage.json"));
    }

    #[test]
    fn test_resolve_missing_path_is_ok() {
        let resolved = resolve_path("does/not/exist.yaml", Path::new("/nowhere")).unwrap();
        assert_eq!(resolved, PathBuf::from("/nowhere/does/not/exist.yaml"));
    }

    #[test]
    fn test_format_relative_to_base() {
        let display = format_path_for_display(
            Path::new("/library/data/glossary.yaml"),
            Some(Path::new("/library")),
        );
        assert_eq!(display, "data/glossary.yaml");
    }

    #[test]
    fn test_format_base_itself() {
        let display =
            format_path_for_display(Path::new("/library"), Some(Path::new("/library")));
        assert_eq!(display, ".");
    }

    #[test]
    fn test_format_home_uses_tilde() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let display = format_path_for_display(&home.join(".spada.toml"), None);
        assert_eq!(display, "~/.spada.toml");
    }
}
