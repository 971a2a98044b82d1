//! Errors of the engine's external boundaries
//!
//! The engine itself has no fatal conditions: missing profiles, unknown
//! units and invalid quantities all degrade to defined fallback values.
//! Only the repository/nutrient-source boundary and the injected history
//! store can actually fail.

use thiserror::Error;

/// Failure reaching the repository or the nutrient source
///
/// Propagated to the caller as-is; the engine does not retry. A caller
/// will typically show cached or last-known data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("source timed out after {millis} ms")]
    Timeout { millis: u64 },
}

impl SourceError {
    /// Shorthand for [`SourceError::Unavailable`]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Failure of the injected query-history store
///
/// A failed save never corrupts the in-memory recent-query list; the
/// caller decides whether stale persistence matters.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),

    #[error("stored history is corrupt: {0}")]
    Corrupt(String),
}
