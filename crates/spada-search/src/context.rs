//! Search orchestration.
//!
//! A [`SearchContext`] owns the current index, the last query and its results. Index builds
//! and searches run as tokio tasks whose handles are returned, so callers can await them or
//! drop them. State is published only by tasks that are still current: a build superseded by
//! newer sources, or a search whose index was invalidated, finishes without touching it.

use std::{collections::BTreeSet, future, sync::Arc, time::Duration};

use parking_lot::Mutex;
use spada_config::Config;
use spada_corpus::{Glossary, TreatiseSection};
use tokio::{
    task::{self, AbortHandle, JoinHandle},
    time,
};
use tracing::{debug, error};

use crate::{
    IndexOptions, SearchError, SearchIndex, SearchOptions, SearchQuery, SearchResultSet,
    build_index, execute_search,
};

/// Scheduling and build settings for a [`SearchContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextConfig {
    /// Delay before an index build starts.
    pub index_delay: Duration,
    /// Delay before a search runs.
    pub search_delay: Duration,
    /// Options passed to the index builder.
    pub index_options: IndexOptions,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            index_delay: Duration::from_millis(10),
            search_delay: Duration::from_millis(10),
            index_options: IndexOptions::default(),
        }
    }
}

impl ContextConfig {
    /// Reads the `[scheduling]` and `[search]` settings.
    pub fn from_config(config: &Config) -> Self {
        Self {
            index_delay: Duration::from_millis(config.scheduling.index_delay_ms),
            search_delay: Duration::from_millis(config.scheduling.search_delay_ms),
            index_options: IndexOptions {
                expand_glossary_terms: config.search.expand_glossary_terms,
            },
        }
    }
}

/// Coarse state of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No index is available.
    Idle,
    /// An index is available and no search is running.
    Indexed,
    /// At least one search is running.
    Searching,
}

/// Why a search did not run or did not publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The query text was blank.
    BlankQuery,
    /// No index has been built yet.
    NoIndex,
    /// The index was invalidated or the search cleared while it ran.
    Superseded,
}

/// Result of a search task.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Results were published.
    Completed {
        /// Number of matching records.
        matches: usize,
    },
    /// Nothing was searched or published.
    Skipped(SkipReason),
    /// The search failed. Previous results are kept.
    Failed(SearchError),
}

/// Mutable state shared with tasks.
#[derive(Debug, Default)]
struct ContextState {
    /// Current index.
    index: Option<Arc<SearchIndex>>,
    /// Bumped on every invalidation.
    epoch: u64,
    /// Last query that published results.
    last_query: Option<SearchQuery>,
    /// Results of `last_query`.
    results: Option<Arc<SearchResultSet>>,
    /// Ids of searches that may still publish.
    in_flight: BTreeSet<u64>,
    /// Id for the next search.
    next_search_id: u64,
    /// Build task that has not published yet.
    pending_build: Option<AbortHandle>,
}

/// Unregisters a search when its task ends, however it ends.
struct InFlightGuard {
    /// Shared state.
    state: Arc<Mutex<ContextState>>,
    /// Search id.
    id: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.lock().in_flight.remove(&self.id);
    }
}

/// Holds the search index and the latest results.
///
/// All methods that spawn tasks must be called from within a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    /// Shared state.
    state: Arc<Mutex<ContextState>>,
    /// Scheduling settings.
    config: ContextConfig,
}

impl SearchContext {
    /// Creates an idle context.
    pub fn new(config: ContextConfig) -> Self {
        Self {
            state: Arc::default(),
            config,
        }
    }

    /// Replaces the source data and schedules an index build.
    ///
    /// The context is invalidated immediately. The returned task resolves to the new index,
    /// or to `None` when newer sources replaced these before the build published.
    pub fn load_sources(
        &self,
        sections: Option<Vec<TreatiseSection>>,
        glossary: Option<Glossary>,
    ) -> JoinHandle<Option<Arc<SearchIndex>>> {
        self.invalidate();
        let epoch = self.state.lock().epoch;
        let state = Arc::clone(&self.state);
        let config = self.config;

        let handle = tokio::spawn(async move {
            defer(config.index_delay).await;
            let index = Arc::new(build_index(
                sections.as_deref(),
                glossary.as_ref(),
                config.index_options,
            ));
            let mut state = state.lock();
            if state.epoch != epoch {
                debug!("discarding index built from replaced sources");
                return None;
            }
            state.index = Some(Arc::clone(&index));
            state.pending_build = None;
            Some(index)
        });
        self.state.lock().pending_build = Some(handle.abort_handle());
        handle
    }

    /// Discards the index, the last query and its results.
    ///
    /// A pending build is aborted and running searches will not publish.
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.epoch += 1;
        state.index = None;
        state.last_query = None;
        state.results = None;
        state.in_flight.clear();
        if let Some(build) = state.pending_build.take() {
            build.abort();
        }
    }

    /// Schedules a search against the current index.
    ///
    /// [`is_searching`](Self::is_searching) is true as soon as this returns for a search that
    /// will run. Blank text and a missing index resolve to [`SearchOutcome::Skipped`] without
    /// changing any state. The handle may be dropped; the search still runs.
    pub fn perform_search(&self, text: &str, options: SearchOptions) -> JoinHandle<SearchOutcome> {
        let query = SearchQuery::new(text, options);
        if query.is_empty() {
            return tokio::spawn(future::ready(SearchOutcome::Skipped(SkipReason::BlankQuery)));
        }

        let (index, epoch, guard) = {
            let mut state = self.state.lock();
            let Some(index) = state.index.clone() else {
                return tokio::spawn(future::ready(SearchOutcome::Skipped(SkipReason::NoIndex)));
            };
            let id = state.next_search_id;
            state.next_search_id += 1;
            state.in_flight.insert(id);
            let guard = InFlightGuard {
                state: Arc::clone(&self.state),
                id,
            };
            (index, state.epoch, guard)
        };
        let state = Arc::clone(&self.state);
        let delay = self.config.search_delay;

        tokio::spawn(async move {
            defer(delay).await;
            let outcome = match execute_search(&index, &query) {
                Ok(results) => {
                    let mut state = state.lock();
                    if state.epoch != epoch || !state.in_flight.contains(&guard.id) {
                        return SearchOutcome::Skipped(SkipReason::Superseded);
                    }
                    let matches = results.len();
                    debug!(query = %query.raw, matches, "search completed");
                    state.last_query = Some(query);
                    state.results = Some(Arc::new(results));
                    SearchOutcome::Completed { matches }
                }
                Err(err) => {
                    error!(query = %query.raw, error = %err, "search failed");
                    SearchOutcome::Failed(err)
                }
            };
            drop(guard);
            outcome
        })
    }

    /// Forgets the last query and its results. The index is kept.
    ///
    /// Searches still running will not publish.
    pub fn clear_search(&self) {
        let mut state = self.state.lock();
        state.last_query = None;
        state.results = None;
        state.in_flight.clear();
    }

    /// The current index.
    pub fn index(&self) -> Option<Arc<SearchIndex>> {
        self.state.lock().index.clone()
    }

    /// The last query that published results.
    pub fn last_query(&self) -> Option<SearchQuery> {
        self.state.lock().last_query.clone()
    }

    /// Results of the last query.
    pub fn results(&self) -> Option<Arc<SearchResultSet>> {
        self.state.lock().results.clone()
    }

    /// Whether a search is running.
    pub fn is_searching(&self) -> bool {
        !self.state.lock().in_flight.is_empty()
    }

    /// Coarse state.
    pub fn state(&self) -> SearchState {
        let state = self.state.lock();
        if state.index.is_none() {
            SearchState::Idle
        } else if state.in_flight.is_empty() {
            SearchState::Indexed
        } else {
            SearchState::Searching
        }
    }
}

/// Waits for `delay`, or yields once when it is zero.
async fn defer(delay: Duration) {
    if delay.is_zero() {
        task::yield_now().await;
    } else {
        time::sleep(delay).await;
    }
}
