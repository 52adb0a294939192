//! Wrapping match ranges in markup.

use std::{borrow::Cow, ops::Range};

use crate::colors;

/// Escapes `&`, `<`, `>`, `"` and `'` for HTML text and attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Renders `text` as HTML with every range wrapped in `<mark>`.
///
/// All text is escaped. Ranges must be sorted; ranges that overlap an earlier one, are
/// empty, or do not fall on character boundaries are ignored.
pub fn mark_html(text: &str, ranges: &[Range<usize>]) -> String {
    mark_with(text, ranges, "<mark>", "</mark>", escape_html)
}

/// Renders `text` for a terminal with every range in bold yellow.
///
/// Ranges are handled as in [`mark_html`].
pub fn mark_terminal(text: &str, ranges: &[Range<usize>]) -> String {
    let open = format!("{}{}", colors::BOLD, colors::YELLOW);
    mark_with(text, ranges, &open, colors::RESET, verbatim)
}

/// Leaves text unchanged.
fn verbatim(text: &str) -> Cow<'_, str> {
    Cow::Borrowed(text)
}

/// Interleaves text and marked spans.
fn mark_with(
    text: &str,
    ranges: &[Range<usize>],
    open: &str,
    close: &str,
    escape: fn(&str) -> Cow<'_, str>,
) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor || range.is_empty() {
            continue;
        }
        let (Some(before), Some(marked)) = (text.get(cursor..range.start), text.get(range.clone()))
        else {
            continue;
        };
        out.push_str(&escape(before));
        out.push_str(open);
        out.push_str(&escape(marked));
        out.push_str(close);
        cursor = range.end;
    }
    out.push_str(&escape(&text[cursor..]));
    out
}
