//! Provenance tracking: every scope key a jar has ever written to.

use crate::base::jarerror::JarError;
use dashmap::DashSet;
use std::sync::Arc;
use url::Url;

/// Append-only, concurrently writable set of scope keys.
///
/// Keys are never removed, even after the store expires or evicts the
/// cookie that produced them; querying a stale scope simply finds nothing.
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceTracker {
    keys: Arc<DashSet<String>>,
}

impl ProvenanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scope key. Idempotent.
    pub fn add(&self, key: String) {
        // Look up first so repeated writes to a known scope only take a read lock
        if self.keys.contains(&key) {
            return;
        }
        if self.keys.insert(key) {
            tracing::debug!(tracked = self.keys.len(), "new cookie scope tracked");
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Every tracked key parsed back into a URL, ordered by key.
    ///
    /// A key that no longer parses means the set was fed something other
    /// than a derived scope key; that is reported as
    /// [`JarError::ProvenanceCorruption`] instead of being skipped.
    pub fn snapshot(&self) -> Result<Vec<Url>, JarError> {
        let mut keys: Vec<String> = self.keys.iter().map(|k| k.key().clone()).collect();
        keys.sort_unstable();

        keys.into_iter()
            .map(|key| {
                Url::parse(&key).map_err(|e| {
                    tracing::error!(key = %key, error = %e, "tracked scope key is not a URL");
                    JarError::provenance_corruption(key.as_str(), e.to_string())
                })
            })
            .collect()
    }
}
