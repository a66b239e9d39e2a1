use crate::base::jarerror::JarError;
use crate::cookies::psl::SuffixTable;
use crate::cookies::record::CookieRecord;
use crate::cookies::store::CookieStore;
use crate::scope::config::ExportConfig;
use crate::scope::reconciler::{self, ExportMap};
use crate::scope::scopekey::scope_key;
use crate::scope::tracker::ProvenanceTracker;
use std::sync::Arc;
use url::Url;

/// A cookie store that remembers every scope written through it and can
/// export its whole content.
///
/// Reads and writes go straight to the wrapped store. Clones share both the
/// store and the set of tracked scopes, so one jar can back many concurrent
/// requests.
///
/// # Example
/// ```rust
/// use scopejar::cookies::monster::CookieMonster;
/// use scopejar::cookies::record::CookieRecord;
/// use scopejar::scope::scopejar::ScopeJar;
/// use std::sync::Arc;
/// use url::Url;
///
/// let jar = ScopeJar::new(Arc::new(CookieMonster::new()));
/// let url = Url::parse("https://example.com/")?;
/// jar.write(&url, &[CookieRecord::new("asdf", "1234")])?;
///
/// let export = jar.export()?;
/// let cookies = &export[&Url::parse("http://example.com/")?];
/// assert_eq!(cookies[0].name, "asdf");
/// assert_eq!(cookies[0].path.as_deref(), Some("/"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ScopeJar<S: ?Sized> {
    store: Arc<S>,
    tracker: ProvenanceTracker,
    config: ExportConfig,
}

impl<S: ?Sized> Clone for ScopeJar<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tracker: self.tracker.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: CookieStore + ?Sized> ScopeJar<S> {
    /// Wrap `store` with a fresh, empty set of tracked scopes.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ExportConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: ExportConfig) -> Self {
        Self {
            store,
            tracker: ProvenanceTracker::new(),
            config,
        }
    }

    /// Use `label` as the synthetic subdomain when probing for `Domain` cookies.
    pub fn with_probe_label(mut self, label: impl Into<String>) -> Self {
        self.config.probe_label = label.into();
        self
    }

    /// Use `table` to tell sites apart during export.
    pub fn with_suffix_table(mut self, table: Arc<dyn SuffixTable>) -> Self {
        self.config.suffix_table = table;
        self
    }

    /// Store `cookies` received from `url`, remembering the scope of each.
    ///
    /// Scopes are recorded before the store sees the cookies, so a store
    /// error never leaves a written cookie untracked. A cookie whose own
    /// `Domain` or `Path` cannot form a scope URL is forwarded but not
    /// tracked; a URL without a host fails the whole call before the store
    /// is touched.
    pub fn write(&self, url: &Url, cookies: &[CookieRecord]) -> Result<(), JarError> {
        let mut keys = Vec::with_capacity(cookies.len());
        for cookie in cookies {
            match scope_key(url, cookie) {
                Ok(key) => keys.push(key),
                Err(JarError::UntrackableScope { key, reason }) => {
                    tracing::warn!(cookie = %cookie.name, key = %key, reason = %reason, "not tracking cookie scope");
                }
                Err(e) => return Err(e),
            }
        }
        for key in keys {
            self.tracker.add(key);
        }
        self.store.write(url, cookies)
    }

    /// Cookies the store would send to `url`.
    pub fn read(&self, url: &Url) -> Result<Vec<CookieRecord>, JarError> {
        self.store.read(url)
    }

    /// Export every live cookie under the canonical URL of its scope.
    ///
    /// Writing each entry of the result into a fresh jar recreates an
    /// equivalent set of cookies. A tracked scope that no longer parses
    /// aborts the whole export with [`JarError::ProvenanceCorruption`].
    pub fn export(&self) -> Result<ExportMap, JarError> {
        let scopes = self.tracker.snapshot()?;
        reconciler::reconcile(&*self.store, scopes, &self.config)
    }

    /// Write every entry of an export into this jar.
    pub fn replay(&self, export: &ExportMap) -> Result<(), JarError> {
        for (url, cookies) in export {
            self.write(url, cookies)?;
        }
        Ok(())
    }

    /// Number of distinct scopes written through this jar.
    pub fn tracked_scopes(&self) -> usize {
        self.tracker.len()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: CookieStore + ?Sized> CookieStore for ScopeJar<S> {
    fn write(&self, url: &Url, cookies: &[CookieRecord]) -> Result<(), JarError> {
        ScopeJar::write(self, url, cookies)
    }

    fn read(&self, url: &Url) -> Result<Vec<CookieRecord>, JarError> {
        ScopeJar::read(self, url)
    }
}

impl<S: ?Sized> std::fmt::Debug for ScopeJar<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeJar")
            .field("tracked_scopes", &self.tracker.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
