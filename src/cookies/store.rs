//! The capability a cookie store must offer to be wrapped by
//! [`ScopeJar`](crate::scope::scopejar::ScopeJar).

use crate::base::jarerror::JarError;
use crate::cookies::record::CookieRecord;
use std::sync::Arc;
use url::Url;

/// An RFC 6265 cookie store.
///
/// The store owns attribute storage, domain and path matching, secure-scheme
/// gating and expiry. Implementations must be callable concurrently with
/// themselves.
pub trait CookieStore: Send + Sync {
    /// Store `cookies` as if they arrived in a response from `url`.
    fn write(&self, url: &Url, cookies: &[CookieRecord]) -> Result<(), JarError>;

    /// Cookies currently valid for a request to `url`.
    fn read(&self, url: &Url) -> Result<Vec<CookieRecord>, JarError>;
}

impl<S: CookieStore + ?Sized> CookieStore for Arc<S> {
    fn write(&self, url: &Url, cookies: &[CookieRecord]) -> Result<(), JarError> {
        (**self).write(url, cookies)
    }

    fn read(&self, url: &Url) -> Result<Vec<CookieRecord>, JarError> {
        (**self).read(url)
    }
}
