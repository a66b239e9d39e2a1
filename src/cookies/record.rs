//! Cookie records exchanged with a [`CookieStore`](crate::cookies::store::CookieStore).

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// A cookie as written by a caller or as returned by a store query.
///
/// `domain`, `path` and `secure` describe the scope the record was written
/// with. Records read back from a store only describe what the store chose to
/// report for that query; [`ScopeJar::export`](crate::scope::scopejar::ScopeJar::export)
/// rebuilds the write-time scope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    /// `Domain` attribute. `None` makes the cookie host-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// `Path` attribute. `None` lets the store derive the default path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,
    #[serde(default)]
    pub same_site: SameSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SameSite {
    #[default]
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

impl CookieRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_expires(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Explicit, non-empty `Domain` attribute.
    pub fn explicit_domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }

    /// Explicit `Path` attribute. RFC 6265 §5.2.4 ignores a path that does
    /// not start with `/`, so such a path counts as absent.
    pub fn explicit_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| p.starts_with('/'))
    }

    /// Render as a `cookie::Cookie`, for callers that speak the `cookie` crate.
    pub fn to_cookie(&self) -> cookie::Cookie<'static> {
        let mut builder = cookie::Cookie::build((self.name.clone(), self.value.clone()));
        if let Some(domain) = self.explicit_domain() {
            builder = builder.domain(domain.to_string());
        }
        if let Some(path) = self.explicit_path() {
            builder = builder.path(path.to_string());
        }
        if self.secure {
            builder = builder.secure(true);
        }
        if self.http_only {
            builder = builder.http_only(true);
        }
        if let Some(expires) = self.expires {
            builder = builder.expires(expires);
        }
        builder = match self.same_site {
            SameSite::Unspecified => builder,
            SameSite::NoRestriction => builder.same_site(cookie::SameSite::None),
            SameSite::Lax => builder.same_site(cookie::SameSite::Lax),
            SameSite::Strict => builder.same_site(cookie::SameSite::Strict),
        };
        builder.build()
    }
}

/// Formats the record as a `Set-Cookie` header value.
impl fmt::Display for CookieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cookie())
    }
}
