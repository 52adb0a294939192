//! Case folding with offsets back into the original text.

/// Lower-cases every character independently.
///
/// Unlike [`str::to_lowercase`] this has no context-dependent rules, so folding a query
/// and folding a text that contains it produce aligned output.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Folded text that remembers where each original character went.
#[derive(Debug)]
pub struct FoldedText {
    /// The folded text.
    folded: String,
    /// `(folded offset, original offset)` at the start of every original character, plus
    /// the end of both texts. Both components are strictly increasing.
    bounds: Vec<(usize, usize)>,
}

impl FoldedText {
    /// Folds `text`.
    pub fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut bounds = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            bounds.push((folded.len(), offset));
            folded.extend(c.to_lowercase());
        }
        bounds.push((folded.len(), text.len()));
        Self { folded, bounds }
    }

    /// The folded text.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Maps a folded offset to the original text.
    ///
    /// Returns `None` when the offset falls inside the expansion of a single original
    /// character, since no original range corresponds to it.
    pub fn original_offset(&self, folded: usize) -> Option<usize> {
        self.bounds
            .binary_search_by_key(&folded, |&(f, _)| f)
            .ok()
            .map(|i| self.bounds[i].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_offsets_are_identity() {
        let text = FoldedText::new("Coda Longa");
        assert_eq!(text.as_str(), "coda longa");
        assert_eq!(text.original_offset(5), Some(5));
        assert_eq!(text.original_offset(10), Some(10));
    }

    #[test]
    fn accented_offsets_follow_original() {
        let text = FoldedText::new("ÉPÉE");
        assert_eq!(text.as_str(), "épée");
        assert_eq!(text.original_offset(2), Some(2));
        assert_eq!(text.original_offset(text.as_str().len()), Some("ÉPÉE".len()));
    }

    #[test]
    fn expanding_characters_hide_inner_offsets() {
        // U+0130 folds to "i" followed by a combining dot.
        let text = FoldedText::new("\u{130}x");
        assert_eq!(text.as_str(), "i\u{307}x");
        assert_eq!(text.original_offset(0), Some(0));
        assert_eq!(text.original_offset(1), None);
        assert_eq!(text.original_offset(3), Some(2));
    }
}
