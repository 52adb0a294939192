//! Saved search terms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{SetOutcome, StorageError, Store};

/// Storage key of the saved search list.
pub const SAVED_SEARCHES_KEY: &str = "spada:savedSearches";

/// Current format version of the saved search list.
pub const SAVED_SEARCHES_VERSION: u32 = 1;

/// Maximum number of saved searches; the least recently used are dropped first.
pub const MAX_SAVED_SEARCHES: usize = 100;

/// A saved search term with usage statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    /// Random identifier.
    pub id: Uuid,
    /// The saved term.
    pub search_term: String,
    /// When the term was first saved.
    pub created_at: DateTime<Utc>,
    /// When the term was last saved or used.
    pub last_used_at: DateTime<Utc>,
    /// How many times the term was saved or used.
    pub usage_count: u32,
}

/// The persisted list of saved searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearches {
    /// Format version.
    pub version: u32,
    /// Saved searches in insertion order.
    pub searches: Vec<SavedSearch>,
    /// Time of the last change.
    pub last_updated: DateTime<Utc>,
}

impl Default for SavedSearches {
    fn default() -> Self {
        Self {
            version: SAVED_SEARCHES_VERSION,
            searches: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

impl SavedSearches {
    /// Reads the list from the store. A missing or unreadable list is empty.
    pub fn load(store: &Store) -> Self {
        store.get_item(SAVED_SEARCHES_KEY).unwrap_or_default()
    }

    /// Writes the list to the store.
    pub fn store(&self, store: &mut Store) -> Result<SetOutcome, StorageError> {
        store.set_item(SAVED_SEARCHES_KEY, self)
    }

    /// Saves a term, or counts a use if it is already saved (ignoring case).
    ///
    /// Returns `None` for a blank term.
    pub fn save(&mut self, term: &str) -> Option<&SavedSearch> {
        self.save_at(term, Utc::now())
    }

    /// [`save`](Self::save) with an explicit clock.
    fn save_at(&mut self, term: &str, now: DateTime<Utc>) -> Option<&SavedSearch> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        let position = match self.position(term) {
            Some(position) => {
                self.bump(position, now);
                position
            }
            None => {
                self.searches.push(SavedSearch {
                    id: Uuid::new_v4(),
                    search_term: term.to_string(),
                    created_at: now,
                    last_used_at: now,
                    usage_count: 1,
                });
                self.last_updated = now;
                self.evict();
                self.position(term)?
            }
        };
        self.searches.get(position)
    }

    /// Counts a use of a saved term. Returns whether the term was saved.
    pub fn record_use(&mut self, term: &str) -> bool {
        let Some(position) = self.position(term.trim()) else {
            return false;
        };
        self.bump(position, Utc::now());
        true
    }

    /// Removes a saved search by id or term (ignoring case). Returns the removed entry.
    pub fn remove(&mut self, id_or_term: &str) -> Option<SavedSearch> {
        let needle = id_or_term.trim();
        let position = self
            .searches
            .iter()
            .position(|s| s.id.to_string() == needle)
            .or_else(|| self.position(needle))?;
        self.last_updated = Utc::now();
        Some(self.searches.remove(position))
    }

    /// Saved searches, most recently used first.
    pub fn by_recency(&self) -> Vec<&SavedSearch> {
        let mut searches: Vec<_> = self.searches.iter().collect();
        searches.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));
        searches
    }

    /// Number of saved searches.
    pub fn len(&self) -> usize {
        self.searches.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    /// Index of a term, ignoring case.
    fn position(&self, term: &str) -> Option<usize> {
        let wanted = term.to_lowercase();
        self.searches
            .iter()
            .position(|s| s.search_term.to_lowercase() == wanted)
    }

    /// Counts a use of the entry at `position`.
    fn bump(&mut self, position: usize, now: DateTime<Utc>) {
        if let Some(search) = self.searches.get_mut(position) {
            search.usage_count = search.usage_count.saturating_add(1);
            search.last_used_at = now;
            self.last_updated = now;
        }
    }

    /// Drops the least recently used entries beyond [`MAX_SAVED_SEARCHES`].
    fn evict(&mut self) {
        while self.searches.len() > MAX_SAVED_SEARCHES {
            let oldest = self
                .searches
                .iter()
                .enumerate()
                .min_by_key(|(_, s)| s.last_used_at)
                .map(|(i, _)| i);
            if let Some(i) = oldest {
                self.searches.remove(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::StoreLimits;

    #[test]
    fn saving_twice_counts_usage() {
        let mut saved = SavedSearches::default();
        let first = saved.save("Mandritto").unwrap().id;
        let again = saved.save("  mandritto ").unwrap();
        assert_eq!(again.id, first);
        assert_eq!(again.usage_count, 2);
        assert_eq!(again.search_term, "Mandritto");
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn blank_terms_are_ignored() {
        let mut saved = SavedSearches::default();
        assert!(saved.save("   ").is_none());
        assert!(saved.is_empty());
    }

    #[test]
    fn listing_is_by_recency() {
        let mut saved = SavedSearches::default();
        let t0 = Utc::now();
        saved.save_at("roverso", t0);
        saved.save_at("fendente", t0 + Duration::seconds(1));
        saved.save_at("ROVERSO", t0 + Duration::seconds(2));

        let terms: Vec<_> = saved
            .by_recency()
            .iter()
            .map(|s| s.search_term.as_str())
            .collect();
        assert_eq!(terms, vec!["roverso", "fendente"]);
    }

    #[test]
    fn record_use_and_remove() {
        let mut saved = SavedSearches::default();
        let id = saved.save("coda longa").unwrap().id;
        assert!(saved.record_use("Coda Longa"));
        assert!(!saved.record_use("porta di ferro"));
        assert_eq!(saved.searches[0].usage_count, 2);

        saved.save("fendente");
        assert_eq!(saved.remove(&id.to_string()).unwrap().search_term, "coda longa");
        assert_eq!(saved.remove("FENDENTE").unwrap().search_term, "fendente");
        assert!(saved.remove("fendente").is_none());
    }

    #[test]
    fn least_recent_is_evicted() {
        let mut saved = SavedSearches::default();
        let t0 = Utc::now();
        for i in 0..=MAX_SAVED_SEARCHES {
            saved.save_at(&format!("term {i}"), t0 + Duration::seconds(i64::try_from(i).unwrap()));
        }
        assert_eq!(saved.len(), MAX_SAVED_SEARCHES);
        assert!(saved.position("term 0").is_none());
        assert!(saved.position("term 100").is_some());
    }

    #[test]
    fn persisted_with_camel_case_keys() {
        let mut store = Store::in_memory(StoreLimits::default());
        let mut saved = SavedSearches::default();
        saved.save("mandritto");
        saved.store(&mut store).unwrap();

        let raw: serde_json::Value = store.get_item(SAVED_SEARCHES_KEY).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["searches"][0]["searchTerm"], "mandritto");
        assert_eq!(raw["searches"][0]["usageCount"], 1);
        assert!(raw["lastUpdated"].is_string());

        assert_eq!(SavedSearches::load(&store), saved);
    }
}
