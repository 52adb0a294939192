//! Short excerpts around the first match.

use std::ops::Range;

use crate::{mark_html, mark_terminal};

/// Bytes of context kept before the first match.
pub const PREVIEW_BEFORE: usize = 50;

/// Bytes of context kept after the first match.
pub const PREVIEW_AFTER: usize = 100;

/// Marker for cut text.
pub const ELLIPSIS: &str = "...";

/// An excerpt with its match ranges rebased onto the excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Excerpt, with [`ELLIPSIS`] on each side that was cut.
    pub text: String,
    /// Match ranges that fall in the excerpt, clipped and rebased.
    pub ranges: Vec<Range<usize>>,
}

impl Preview {
    /// The excerpt as HTML with marked matches.
    pub fn to_html(&self) -> String {
        mark_html(&self.text, &self.ranges)
    }

    /// The excerpt for a terminal with marked matches.
    pub fn to_terminal(&self) -> String {
        mark_terminal(&self.text, &self.ranges)
    }
}

/// Cuts an excerpt around the first range.
///
/// The window spans [`PREVIEW_BEFORE`] bytes before the first match to [`PREVIEW_AFTER`]
/// bytes after its end, widened to character boundaries. Without ranges the excerpt starts
/// at the beginning of the text.
pub fn preview(text: &str, ranges: &[Range<usize>]) -> Preview {
    let (first_start, first_end) = ranges
        .first()
        .map_or((0, 0), |r| (r.start.min(text.len()), r.end.min(text.len())));
    let start = floor_boundary(text, first_start.saturating_sub(PREVIEW_BEFORE));
    let end = ceil_boundary(text, first_end.saturating_add(PREVIEW_AFTER).min(text.len())).max(start);

    let mut excerpt = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        excerpt.push_str(ELLIPSIS);
    }
    let shift = excerpt.len();
    excerpt.push_str(&text[start..end]);
    if end < text.len() {
        excerpt.push_str(ELLIPSIS);
    }

    let rebased = ranges
        .iter()
        .filter(|r| r.start < end && r.end > start)
        .map(|r| (r.start.max(start) - start + shift)..(r.end.min(end) - start + shift))
        .filter(|r| !r.is_empty())
        .collect();

    Preview {
        text: excerpt,
        ranges: rebased,
    }
}

/// Largest character boundary at or before `index`.
fn floor_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest character boundary at or after `index`.
fn ceil_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
