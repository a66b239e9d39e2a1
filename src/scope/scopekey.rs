//! Scope keys: the canonical string naming the scope a cookie was written to.
//!
//! A key is `http://` or `https://` (the cookie's `Secure` flag), followed by
//! the cookie domain and path. It doubles as a URL: parsing it back yields an
//! address at which the store will hand the cookie out again.

use crate::base::jarerror::JarError;
use crate::cookies::record::CookieRecord;
use url::Url;

/// Derive the scope key for `cookie` written in a response from `url`.
///
/// Fails with [`JarError::ScopeDerivation`] when `url` has no host or the
/// containing directory of its path cannot be resolved, and with
/// [`JarError::UntrackableScope`] when the cookie's own `Domain` or `Path`
/// does not survive a round trip through URL parsing. A key is only ever
/// returned if it parses back to exactly the domain and path it encodes.
pub fn scope_key(url: &Url, cookie: &CookieRecord) -> Result<String, JarError> {
    let scheme = if cookie.secure { "https://" } else { "http://" };

    let domain = match cookie.explicit_domain() {
        Some(domain) => domain,
        None => url
            .host_str()
            .ok_or_else(|| JarError::scope_derivation(url.as_str(), "URL has no host"))?,
    };
    let domain = domain.strip_prefix('.').unwrap_or(domain);

    let path = match cookie.explicit_path() {
        Some(path) => path.to_string(),
        None => default_path(url)?,
    };

    let key = format!("{scheme}{domain}{path}");
    let parsed =
        Url::parse(&key).map_err(|e| JarError::untrackable_scope(key.as_str(), e.to_string()))?;
    if !parsed
        .host_str()
        .is_some_and(|host| host.eq_ignore_ascii_case(domain))
    {
        return Err(JarError::untrackable_scope(key, "domain is not a URL host"));
    }
    if parsed.path() != path || parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(JarError::untrackable_scope(key, "path is not a URL path"));
    }

    Ok(key)
}

/// The "directory" of the request path (RFC 6265 5.1.4), without a
/// trailing slash unless it is the root.
fn default_path(url: &Url) -> Result<String, JarError> {
    let directory = url
        .join(".")
        .map_err(|e| JarError::scope_derivation(url.as_str(), e.to_string()))?;

    let mut path = directory.path().to_string();
    if path.is_empty() {
        path.push('/');
    }
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    Ok(path)
}
