use crate::base::jarerror::JarError;
use crate::cookies::record::{CookieRecord, SameSite};
use time::OffsetDateTime;

/// A cookie as held inside [`CookieMonster`](crate::cookies::monster::CookieMonster).
/// Modeled after Chromium's `net::CanonicalCookie`.
///
/// Unlike [`CookieRecord`], every scope attribute is resolved: `domain` is
/// always set and `host_only` says whether it came from the request host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub same_site: SameSite,
}

impl CanonicalCookie {
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            secure: false,
            http_only: false,
            host_only: true,
            same_site: SameSite::Unspecified,
        }
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        if let Some(expiry) = self.expiration_time {
            expiry < current_time
        } else {
            false // Session cookie
        }
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn validate_prefix(&self, secure_origin: bool) -> Result<(), JarError> {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return Err(JarError::CookieInvalidPrefix);
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return Err(JarError::CookieInvalidPrefix);
        }

        Ok(())
    }

    /// The record a store query reports for this cookie.
    ///
    /// Host-only cookies report no domain, like a `Set-Cookie` line without
    /// a `Domain` attribute.
    pub fn to_record(&self) -> CookieRecord {
        CookieRecord {
            name: self.name.clone(),
            value: self.value.clone(),
            domain: (!self.host_only).then(|| self.domain.clone()),
            path: Some(self.path.clone()),
            secure: self.secure,
            http_only: self.http_only,
            expires: self.expiration_time,
            same_site: self.same_site,
        }
    }
}
