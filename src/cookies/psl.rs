//! Public Suffix List (PSL) lookups.
//!
//! Used for two things: rejecting cookies set on public suffixes like
//! `.com` or `.co.uk`, and grouping exported cookies by registrable domain
//! (eTLD+1) so that unrelated sites never merge.
//!
//! Uses Mozilla's Public Suffix List via the `psl` crate. The lookup the
//! exporter uses sits behind [`SuffixTable`] so a different list can be
//! plugged in.

use psl::{List, Psl};

/// Lookup from host to effective registrable domain.
pub trait SuffixTable: Send + Sync {
    /// eTLD+1 for `host`, or `None` when the host has no registrable domain
    /// (it is itself a public suffix, an IP address, or unknown to the list).
    fn registrable_domain(&self, host: &str) -> Option<String>;
}

/// [`SuffixTable`] backed by the list compiled into the `psl` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MozillaSuffixList;

impl SuffixTable for MozillaSuffixList {
    fn registrable_domain(&self, host: &str) -> Option<String> {
        registrable_domain(host)
    }
}

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
/// Returns true if the domain itself is a public suffix.
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    if let Some(suffix) = List.suffix(domain_bytes) {
        suffix.as_bytes() == domain_bytes
    } else {
        false
    }
}

/// Get the registrable domain (eTLD+1) for a domain.
/// For "sub.example.com", returns "example.com".
/// For "com" (public suffix), returns None.
pub fn registrable_domain(domain: &str) -> Option<String> {
    let domain_lower = domain.to_lowercase();
    psl::domain(domain_lower.as_bytes())
        .and_then(|d| std::str::from_utf8(d.as_bytes()).ok())
        .map(|s| s.to_string())
}

/// Check if a cookie domain is valid for a given URL.
/// The cookie domain must be a suffix of the URL's host and
/// must not be a public suffix.
pub fn is_valid_cookie_domain(cookie_domain: &str, url_host: &str) -> bool {
    let cookie_domain = cookie_domain.strip_prefix('.').unwrap_or(cookie_domain);
    let cookie_domain_lower = cookie_domain.to_lowercase();
    let url_host_lower = url_host.to_lowercase();

    if is_public_suffix(&cookie_domain_lower) {
        return false;
    }

    if url_host_lower == cookie_domain_lower {
        return true;
    }

    url_host_lower.ends_with(&format!(".{}", cookie_domain_lower))
}
