//! Glossary reference expansion.

use std::borrow::Cow;

use crate::Glossary;

/// Replaces `{term_key}` references with the display term of the glossary entry.
///
/// References to unknown keys, or to entries with an empty term, are kept verbatim. The
/// returned text is what readers see, so indexing it keeps search offsets aligned with
/// the displayed text.
///
/// ```
/// use spada_corpus::{Glossary, GlossaryEntry, expand_glossary_terms};
///
/// let glossary = Glossary::from_entries([(
///     "coda_longa_stretta".to_string(),
///     GlossaryEntry { term: "Coda Longa e Stretta".into(), ..Default::default() },
/// )]);
/// assert_eq!(
///     expand_glossary_terms("en {coda_longa_stretta}", &glossary),
///     "en Coda Longa e Stretta"
/// );
/// ```
pub fn expand_glossary_terms<'a>(text: &'a str, glossary: &Glossary) -> Cow<'a, str> {
    if !text.contains('{') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let (before, from_brace) = rest.split_at(open);
        out.push_str(before);
        let inner = &from_brace[1..];
        let Some(close) = inner.find('}') else {
            out.push_str(from_brace);
            rest = "";
            break;
        };
        let key = &inner[..close];
        match glossary.get(key).filter(|e| !key.is_empty() && !e.term.is_empty()) {
            Some(entry) => out.push_str(&entry.term),
            None => out.push_str(&from_brace[..close + 2]),
        }
        rest = &inner[close + 1..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}
