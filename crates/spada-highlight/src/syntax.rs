//! TOML highlighting for `spada config` and `spada init`.

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

use crate::colors;

/// Theme used for all output.
const THEME: EmbeddedThemeName = EmbeddedThemeName::Dracula;

/// Highlights configuration text with 24-bit terminal colors.
pub struct Highlighter {
    /// Language definitions.
    syntaxes: SyntaxSet,
    /// Embedded themes, decoded on first use.
    themes: EmbeddedLazyThemeSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Loads the bundled syntaxes and themes.
    pub fn new() -> Self {
        Self {
            syntaxes: extra_syntaxes(),
            themes: extra_themes(),
        }
    }

    /// Highlights `.spada.toml` content.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights `content` as the syntax named by a file extension or syntax name.
    ///
    /// Unknown syntaxes render as plain text. A line the highlighter rejects is emitted
    /// unstyled.
    pub fn highlight(&self, content: &str, syntax: &str) -> String {
        let mut lines = HighlightLines::new(self.find(syntax), self.themes.get(THEME));
        let mut out: String = LinesWithEndings::from(content)
            .map(|line| {
                let regions = lines
                    .highlight_line(line, &self.syntaxes)
                    .unwrap_or_else(|_| vec![(Style::default(), line)]);
                as_24_bit_terminal_escaped(&regions, false)
            })
            .collect();
        out.push_str(colors::RESET);
        out
    }

    /// Looks a syntax up by extension, then by name.
    fn find(&self, syntax: &str) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_extension(syntax)
            .or_else(|| self.syntaxes.find_syntax_by_name(syntax))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_gets_colored() {
        let out = Highlighter::new().highlight_toml("[search]\nwhole_word = true\n");
        assert!(out.contains("\x1b[38;2;"));
        assert!(out.ends_with(colors::RESET));
    }

    #[test]
    fn yaml_is_available() {
        let out = Highlighter::new().highlight("- id: marozzo-1-1\n", "yaml");
        assert!(out.contains("\x1b["));
        assert!(out.contains("marozzo-1-1"));
    }

    #[test]
    fn unknown_syntax_is_plain_text() {
        let out = Highlighter::new().highlight("plain words\n", "no-such-syntax");
        assert!(out.contains("plain words"));
    }
}
