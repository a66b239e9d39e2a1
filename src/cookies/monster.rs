use crate::base::jarerror::JarError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::psl;
use crate::cookies::record::CookieRecord;
use crate::cookies::store::CookieStore;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use url::{Host, Url};

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
/// Chromium uses 3300, but we use a slightly lower limit to keep memory usage predictable.
const MAX_COOKIES_TOTAL: usize = 3000;

/// In-memory RFC 6265 cookie jar.
/// Modeled after Chromium's `net::CookieMonster`.
///
/// Cloning is cheap and clones share the same cookies.
#[derive(Clone)]
pub struct CookieMonster {
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl Default for CookieMonster {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieMonster {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    pub fn set_canonical_cookie(&self, mut cookie: CanonicalCookie) {
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        // Replacing a cookie keeps the original creation time (RFC 6265 5.3 step 11)
        if let Some(old) = entry
            .iter()
            .find(|c| c.name == cookie.name && c.path == cookie.path)
        {
            cookie.creation_time = old.creation_time;
        }
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);

        // Enforce per-domain limit with LRU eviction
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            if let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            {
                entry.remove(oldest_idx);
            } else {
                break;
            }
        }

        entry.push(cookie);
        drop(entry); // Release lock before checking global count

        self.enforce_global_limit();
    }

    /// Remove the cookie identified by (name, domain, path), if present.
    pub fn delete_cookie(&self, name: &str, domain: &str, path: &str) -> bool {
        let Some(mut entry) = self.store.get_mut(domain) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|c| c.name != name || c.path != path);
        before != entry.len()
    }

    /// Enforce the global cookie limit by evicting oldest cookies.
    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > MAX_COOKIES_TOTAL {
            let mut oldest: Option<(String, usize, OffsetDateTime)> = None;

            for entry in self.store.iter() {
                let domain = entry.key().clone();
                for (idx, cookie) in entry.value().iter().enumerate() {
                    let dominated = oldest
                        .as_ref()
                        .is_some_and(|(_, _, oldest_time)| cookie.creation_time < *oldest_time);
                    if oldest.is_none() || dominated {
                        oldest = Some((domain.clone(), idx, cookie.creation_time));
                    }
                }
            }

            if let Some((domain, idx, _)) = oldest {
                if let Some(mut entry) = self.store.get_mut(&domain) {
                    if idx < entry.len() {
                        entry.remove(idx);
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Get cookies matching the URL with proper domain suffix matching.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let mut result = Vec::new();
        let host = url.host_str().unwrap_or("");
        let now = OffsetDateTime::now_utc();

        for domain in Self::get_matching_domains(host) {
            if let Some(entry) = self.store.get(&domain) {
                for cookie in entry.iter() {
                    if !Self::domain_matches(&cookie.domain, host, cookie.host_only) {
                        continue;
                    }

                    if !Self::path_matches(&cookie.path, url.path()) {
                        continue;
                    }

                    if cookie.secure && url.scheme() != "https" {
                        continue;
                    }

                    if cookie.is_expired(now) {
                        continue;
                    }

                    result.push(cookie.clone());
                }
            }
        }

        // Sort by path length (longest first) then creation time
        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    /// Resolve a caller-supplied record against the request URL.
    ///
    /// Returns `Ok(None)` when the cookie must be ignored, the way browsers
    /// silently drop cookies with a bad `Domain` attribute.
    fn canonicalize(
        url: &Url,
        record: &CookieRecord,
        now: OffsetDateTime,
    ) -> Result<Option<CanonicalCookie>, JarError> {
        let host = url.host_str().ok_or(JarError::InvalidUrl)?.to_lowercase();
        let is_ip = matches!(url.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)));

        let (domain, host_only) = match record.explicit_domain() {
            None => (host.clone(), true),
            Some(d) => {
                let d = d.trim_start_matches('.').to_lowercase();
                if is_ip {
                    if d != host {
                        tracing::warn!(cookie = %record.name, domain = %d, host = %host, "rejecting Domain attribute on IP host");
                        return Ok(None);
                    }
                    (d, true)
                } else if psl::is_public_suffix(&d) {
                    // A public suffix is only acceptable as the request host itself
                    if d != host {
                        tracing::warn!(cookie = %record.name, domain = %d, "rejecting cookie set on public suffix");
                        return Ok(None);
                    }
                    (d, true)
                } else if !psl::is_valid_cookie_domain(&d, &host) {
                    tracing::warn!(cookie = %record.name, domain = %d, host = %host, "rejecting cookie for foreign domain");
                    return Ok(None);
                } else {
                    (d, false)
                }
            }
        };

        let path = match record.explicit_path() {
            Some(p) => p.to_string(),
            None => default_path(url.path()),
        };

        let mut cookie = CanonicalCookie::new(
            record.name.clone(),
            record.value.clone(),
            domain,
            path,
            now,
            record.expires,
        );
        cookie.secure = record.secure;
        cookie.http_only = record.http_only;
        cookie.host_only = host_only;
        cookie.same_site = record.same_site;

        if let Err(e) = cookie.validate_prefix(url.scheme() == "https") {
            tracing::warn!(cookie = %record.name, error = %e, "rejecting cookie");
            return Ok(None);
        }

        Ok(Some(cookie))
    }

    /// Check if cookie domain matches request host.
    /// Implements RFC 6265 domain matching.
    fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
        if host_only {
            return cookie_domain.eq_ignore_ascii_case(request_host);
        }

        let cookie_domain = cookie_domain.trim_start_matches('.');

        if request_host.eq_ignore_ascii_case(cookie_domain) {
            return true;
        }

        if request_host.len() > cookie_domain.len() {
            let boundary = request_host.len() - cookie_domain.len();
            let suffix = &request_host[boundary..];
            if suffix.eq_ignore_ascii_case(cookie_domain) {
                return request_host.as_bytes()[boundary - 1] == b'.';
            }
        }

        false
    }

    /// Check if request path matches cookie path.
    /// Implements RFC 6265 path matching.
    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }

        if request_path.starts_with(cookie_path) {
            if cookie_path.ends_with('/') {
                return true;
            }
            return request_path.as_bytes().get(cookie_path.len()) == Some(&b'/');
        }

        false
    }

    /// Get all domains to check for a given host.
    /// Returns the host itself and all parent domains.
    fn get_matching_domains(host: &str) -> Vec<String> {
        let mut domains = vec![host.to_string()];

        // "foo.bar.example.com" also checks "bar.example.com" and "example.com"
        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }

        domains
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Iterate over all cookies.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}

impl CookieStore for CookieMonster {
    fn write(&self, url: &Url, cookies: &[CookieRecord]) -> Result<(), JarError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(JarError::DisallowedUrlScheme);
        }

        let now = OffsetDateTime::now_utc();
        for record in cookies {
            let Some(cookie) = Self::canonicalize(url, record, now)? else {
                continue;
            };

            // Writing an already expired cookie deletes it
            if cookie.is_expired(now) {
                self.delete_cookie(&cookie.name, &cookie.domain, &cookie.path);
                tracing::debug!(cookie = %cookie.name, domain = %cookie.domain, "expired cookie removed");
                continue;
            }

            self.set_canonical_cookie(cookie);
        }
        Ok(())
    }

    fn read(&self, url: &Url) -> Result<Vec<CookieRecord>, JarError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Ok(Vec::new());
        }

        Ok(self
            .get_cookies_for_url(url)
            .iter()
            .map(CanonicalCookie::to_record)
            .collect())
    }
}

/// RFC 6265 5.1.4 default-path: the request path up to, but not including,
/// its right-most `/`.
fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}
