use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum JarError {
    // URL Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Disallowed URL scheme")]
    DisallowedUrlScheme,

    // Cookie Errors
    #[error("Cookie prefix validation failed")]
    CookieInvalidPrefix,

    // Scope tracking errors, with context
    #[error("Cannot derive cookie scope for {url}: {reason}")]
    ScopeDerivation { url: String, reason: String },
    #[error("Tracked scope key {key:?} is not a URL: {reason}")]
    ProvenanceCorruption { key: String, reason: String },
    #[error("Cookie scope {key:?} cannot be tracked: {reason}")]
    UntrackableScope { key: String, reason: String },

    // Errors raised by an external cookie store
    #[error("Cookie store error: {message}")]
    Store { message: String },
}

impl JarError {
    pub fn as_i32(&self) -> i32 {
        match self {
            JarError::InvalidUrl => -300,
            JarError::DisallowedUrlScheme => -301,
            JarError::CookieInvalidPrefix => -10100,
            JarError::ScopeDerivation { .. } => -10110,
            JarError::ProvenanceCorruption { .. } => -10111,
            JarError::UntrackableScope { .. } => -10112,
            JarError::Store { .. } => -10120,
        }
    }

    /// Create a scope derivation error.
    pub fn scope_derivation(url: impl Into<String>, reason: impl Into<String>) -> Self {
        JarError::ScopeDerivation {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a provenance corruption error.
    pub fn provenance_corruption(key: impl Into<String>, reason: impl Into<String>) -> Self {
        JarError::ProvenanceCorruption {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for a cookie whose own attributes do not form a URL.
    pub fn untrackable_scope(key: impl Into<String>, reason: impl Into<String>) -> Self {
        JarError::UntrackableScope {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an error raised by a [`CookieStore`](crate::cookies::store::CookieStore)
    /// implementation that lives outside this crate.
    pub fn store(message: impl Into<String>) -> Self {
        JarError::Store {
            message: message.into(),
        }
    }

    /// Errors raised by scope tracking rather than by the store: a request URL
    /// that has no host (`data:` and the like), or a tracked key that no longer
    /// parses.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            JarError::ScopeDerivation { .. } | JarError::ProvenanceCorruption { .. }
        )
    }
}

impl From<url::ParseError> for JarError {
    fn from(_: url::ParseError) -> Self {
        JarError::InvalidUrl
    }
}
