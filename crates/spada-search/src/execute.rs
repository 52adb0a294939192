//! Query execution.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::{
    Record, SearchError, SearchIndex, SearchQuery,
    fold::{FoldedText, fold_case},
};

/// A serializable byte range.
///
/// This is used in JSON output to represent match offsets within record text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    /// Byte offset into the record text.
    pub offset: usize,
    /// Length in bytes of the span.
    pub length: usize,
}

impl From<&Range<usize>> for ByteRange {
    fn from(range: &Range<usize>) -> Self {
        Self {
            offset: range.start,
            length: range.end.saturating_sub(range.start),
        }
    }
}

/// Serializes std byte ranges as [`ByteRange`] objects.
fn serialize_ranges<S>(ranges: &[Range<usize>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let byte_ranges: Vec<ByteRange> = ranges.iter().map(ByteRange::from).collect();
    byte_ranges.serialize(serializer)
}

/// A record with the ranges of its text that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// The matching record.
    pub record: Record,
    /// Non-empty, ascending, non-overlapping byte ranges into `record.text`.
    #[serde(serialize_with = "serialize_ranges")]
    pub match_ranges: Vec<Range<usize>>,
}

/// Matches in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResultSet {
    /// Matching records.
    matches: Vec<SearchMatch>,
}

impl SearchResultSet {
    /// Matches in index order.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Iterates over matches.
    pub fn iter(&self) -> impl Iterator<Item = &SearchMatch> {
        self.matches.iter()
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Total number of matched ranges across all records.
    pub fn total_ranges(&self) -> usize {
        self.matches.iter().map(|m| m.match_ranges.len()).sum()
    }
}

/// Compiled form of a query.
enum Matcher {
    /// Plain substrings, already folded when the search ignores case.
    Literal {
        /// The query first, then its variants and glossary equivalents.
        needles: Vec<String>,
        /// Whether to compare against folded text.
        fold: bool,
    },
    /// Regular expression.
    Pattern(Regex),
}

impl Matcher {
    /// Compiles a query. Glossary equivalents come from `index`.
    fn compile(query: &SearchQuery, index: &SearchIndex) -> Result<Self, SearchError> {
        let options = query.options;
        if options.regex {
            let regex = RegexBuilder::new(&query.normalized)
                .case_insensitive(!options.case_sensitive)
                .build()
                .map_err(|e| SearchError::InvalidPattern {
                    pattern: query.normalized.clone(),
                    source: e,
                })?;
            return Ok(Self::Pattern(regex));
        }

        let fold = !options.case_sensitive;
        let mut needles = vec![query.normalized.clone()];
        let equivalents: &[String] = if options.include_cross_language {
            index.equivalents(&query.normalized)
        } else {
            &[]
        };
        let extra = query.variants.iter().cloned().chain(
            equivalents
                .iter()
                .map(|term| if fold { fold_case(term) } else { term.clone() }),
        );
        for needle in extra {
            if !needle.is_empty() && !needles.contains(&needle) {
                needles.push(needle);
            }
        }
        Ok(Self::Literal { needles, fold })
    }

    /// Finds all non-overlapping matches in `text`, left to right.
    fn find_all(&self, text: &str, whole_word: bool) -> Vec<Range<usize>> {
        match self {
            Self::Literal {
                needles,
                fold: false,
            } => scan(text, needles, Some, text, whole_word),
            Self::Literal {
                needles,
                fold: true,
            } => {
                let folded = FoldedText::new(text);
                scan(
                    folded.as_str(),
                    needles,
                    |offset| folded.original_offset(offset),
                    text,
                    whole_word,
                )
            }
            Self::Pattern(regex) => regex
                .find_iter(text)
                .map(|m| m.range())
                .filter(|range| !range.is_empty())
                .filter(|range| !whole_word || is_word_bounded(text, range))
                .collect(),
        }
    }
}

/// The leftmost occurrence of any needle in `haystack[from..]`, preferring the longest
/// needle when several start at the same position.
fn next_hit(haystack: &str, needles: &[String], from: usize) -> Option<Range<usize>> {
    needles
        .iter()
        .filter_map(|needle| {
            let start = from + haystack[from..].find(needle.as_str())?;
            Some(start..start + needle.len())
        })
        .min_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)))
}

/// Scans `haystack` for the needles and maps each hit back to `original`.
///
/// A hit that cannot be mapped, or that is not word-bounded when required, is rejected and
/// scanning resumes one character after its start. An accepted hit resumes scanning at its
/// end.
fn scan(
    haystack: &str,
    needles: &[String],
    to_original: impl Fn(usize) -> Option<usize>,
    original: &str,
    whole_word: bool,
) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(hit) = next_hit(haystack, needles, from) {
        let mapped = to_original(hit.start)
            .zip(to_original(hit.end))
            .map(|(s, e)| s..e)
            .filter(|range| !whole_word || is_word_bounded(original, range));
        if let Some(range) = mapped {
            ranges.push(range);
            from = hit.end;
        } else {
            from = hit.start + haystack[hit.start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    ranges
}

/// Whether the characters around `range` are string edges or non-alphanumeric.
fn is_word_bounded(text: &str, range: &Range<usize>) -> bool {
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Runs a query against an index.
///
/// A blank query matches nothing. Records outside the language scope are skipped. A record
/// is included iff it has at least one match, and results keep index order. Fails only when
/// a regex query does not compile.
pub fn execute_search(
    index: &SearchIndex,
    query: &SearchQuery,
) -> Result<SearchResultSet, SearchError> {
    if query.is_empty() {
        return Ok(SearchResultSet::default());
    }
    let matcher = Matcher::compile(query, index)?;
    let options = query.options;

    let matches = index
        .records()
        .iter()
        .filter(|record| record.field.in_scope(options.language))
        .filter_map(|record| {
            let match_ranges = matcher.find_all(&record.text, options.whole_word);
            (!match_ranges.is_empty()).then(|| SearchMatch {
                record: record.clone(),
                match_ranges,
            })
        })
        .collect();

    Ok(SearchResultSet { matches })
}
