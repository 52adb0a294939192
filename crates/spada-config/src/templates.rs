//! Starter files written by `spada init`.
//!
//! The templates under `templates/` are real TOML so they can be tested; they are
//! handed out commented out.

/// Project-level template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Template for `~/.spada.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Commented-out project config.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Commented-out global config.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every live line with `# `, leaving blanks and existing comments alone.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| match line {
            "" => "\n".to_owned(),
            l if l.starts_with('#') => format!("{l}\n"),
            l => format!("# {l}\n"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse::parse_config_str;

    #[test]
    fn local_template_parses_as_valid_config() {
        let result = parse_config_str(LOCAL_TEMPLATE, Path::new("config.toml"));
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
        let config = result.unwrap();
        assert!(config.corpus.is_some());
        assert!(config.search.is_some());
    }

    #[test]
    fn global_template_parses_as_valid_config() {
        let result = parse_config_str(GLOBAL_TEMPLATE, Path::new("config-global.toml"));
        assert!(result.is_ok(), "global template failed to parse: {result:?}");
        assert!(result.unwrap().storage.is_some());
    }

    #[test]
    fn commented_template_is_inert() {
        let commented = local_template();
        for line in commented.lines() {
            assert!(line.is_empty() || line.starts_with('#'), "live line: {line}");
        }
        let config = parse_config_str(&commented, Path::new("config.toml")).unwrap();
        assert!(config.corpus.is_none());
    }
}
