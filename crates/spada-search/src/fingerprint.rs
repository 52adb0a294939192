//! Corpus fingerprinting.
//!
//! The fingerprint identifies the exact set of indexed texts, so two indexes with the same
//! fingerprint answer every query identically. It changes whenever a record is added,
//! removed, moved or edited, or when the record layout version is bumped.

use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher24;

use crate::Record;

/// Record layout version. Bump this when the set of indexed fields changes.
const RECORD_LAYOUT_VERSION: u32 = 1;

/// Computes a fingerprint of indexed records and returns it as a hex string.
pub fn corpus_fingerprint(records: &[Record]) -> String {
    let mut hasher = SipHasher24::new();
    RECORD_LAYOUT_VERSION.hash(&mut hasher);
    records.len().hash(&mut hasher);
    for record in records {
        record.id.hash(&mut hasher);
        record.text.hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Field, SourceType};

    /// Builds a treatise record.
    fn record(id: &str, text: &str) -> Record {
        Record::new(SourceType::Treatise, id, Field::ContentFr, text.into())
    }

    #[test]
    fn same_records_produce_same_fingerprint() {
        let a = [record("a", "un"), record("b", "deux")];
        let b = [record("a", "un"), record("b", "deux")];
        assert_eq!(corpus_fingerprint(&a), corpus_fingerprint(&b));
    }

    #[test]
    fn edits_and_moves_change_fingerprint() {
        let base = [record("a", "un"), record("b", "deux")];
        let edited = [record("a", "un"), record("b", "trois")];
        let moved = [record("b", "deux"), record("a", "un")];
        assert_ne!(corpus_fingerprint(&base), corpus_fingerprint(&edited));
        assert_ne!(corpus_fingerprint(&base), corpus_fingerprint(&moved));
    }

    #[test]
    fn fingerprint_is_hex() {
        let fingerprint = corpus_fingerprint(&[]);
        assert_eq!(fingerprint.len(), 16);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
