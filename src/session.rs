//! Cross-session search history
//!
//! The recent-query list is the only engine state that survives a session.
//! It lives in whatever durable key-value storage the caller has; the
//! engine sees it through the injected [`QueryHistoryStore`] with an
//! explicit load-at-start / save-on-update lifecycle. Updates are
//! read-modify-write of the whole list; last-writer-wins is fine for
//! single-user, single-device state.

use crate::error::HistoryError;

/// Maximum number of recent queries kept
pub const MAX_RECENT_QUERIES: usize = 5;

/// Durable storage for the recent-query list
pub trait QueryHistoryStore: Send {
    fn load(&self) -> Result<Vec<String>, HistoryError>;
    fn save(&mut self, queries: &[String]) -> Result<(), HistoryError>;
}

/// [`QueryHistoryStore`] that forgets everything when dropped
///
/// For tests and callers without durable storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryHistoryStore {
    queries: Vec<String>,
}

impl QueryHistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.queries.clone())
    }

    fn save(&mut self, queries: &[String]) -> Result<(), HistoryError> {
        self.queries = queries.to_vec();
        Ok(())
    }
}

/// One user's search session: current query plus recent-query history
///
/// The history is most-recent-first, deduplicated by exact string match
/// and capped at [`MAX_RECENT_QUERIES`] entries.
#[derive(Debug)]
pub struct SearchSession<S> {
    query: String,
    recent: Vec<String>,
    store: S,
}

impl<S: QueryHistoryStore> SearchSession<S> {
    /// Start a session, loading the persisted history once.
    pub fn load(store: S) -> Result<Self, HistoryError> {
        let mut recent = store.load()?;
        recent.truncate(MAX_RECENT_QUERIES);
        Ok(Self {
            query: String::new(),
            recent,
            store,
        })
    }

    /// The input as currently typed
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Recent queries, most recent first
    pub fn recent_queries(&self) -> &[String] {
        &self.recent
    }

    /// Record a term the user actually selected a result for.
    ///
    /// The term moves (or is inserted) to the front; an existing exact
    /// occurrence elsewhere in the list is removed, then the list is
    /// truncated to [`MAX_RECENT_QUERIES`]. The store is saved before
    /// returning; a save failure leaves the in-memory list updated.
    pub fn record(&mut self, term: &str) -> Result<(), HistoryError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }
        self.recent.retain(|q| q != term);
        self.recent.insert(0, term.to_string());
        self.recent.truncate(MAX_RECENT_QUERIES);
        self.store.save(&self.recent)
    }

    /// Remove a single remembered query (the little `x` next to each entry).
    pub fn remove(&mut self, term: &str) -> Result<(), HistoryError> {
        let before = self.recent.len();
        self.recent.retain(|q| q != term);
        if self.recent.len() == before {
            return Ok(());
        }
        self.store.save(&self.recent)
    }

    /// Forget the whole history, in memory and in the store.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.recent.clear();
        self.store.save(&self.recent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_dedups_and_promotes() {
        let mut session = SearchSession::load(MemoryHistoryStore::default()).unwrap();
        session.record("frango").unwrap();
        session.record("ovo").unwrap();
        session.record("frango").unwrap();
        assert_eq!(session.recent_queries(), ["frango", "ovo"]);
    }

    #[test]
    fn history_caps_at_five() {
        let mut session = SearchSession::load(MemoryHistoryStore::default()).unwrap();
        for term in ["a", "b", "c", "d", "e", "f"] {
            session.record(term).unwrap();
        }
        assert_eq!(session.recent_queries(), ["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn blank_terms_are_not_recorded() {
        let mut session = SearchSession::load(MemoryHistoryStore::default()).unwrap();
        session.record("   ").unwrap();
        assert!(session.recent_queries().is_empty());
    }

    #[test]
    fn history_round_trips_through_the_store() {
        let mut store = MemoryHistoryStore::default();
        store.save(&["bolo".to_string(), "salada".to_string()]).unwrap();

        let mut session = SearchSession::load(store).unwrap();
        assert_eq!(session.recent_queries(), ["bolo", "salada"]);

        session.remove("bolo").unwrap();
        assert_eq!(session.recent_queries(), ["salada"]);

        session.clear().unwrap();
        assert!(session.recent_queries().is_empty());
    }
}
