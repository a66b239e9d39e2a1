//! # scopejar
//!
//! Export the full content of an RFC 6265 cookie store.
//!
//! A cookie store answers "which cookies apply to this URL", never "which
//! cookies exist, and under what scope". [`ScopeJar`](scope::scopejar::ScopeJar)
//! wraps any [`CookieStore`](cookies::store::CookieStore), remembers the scope
//! (scheme, domain, path) of every cookie written through it, and on export
//! re-queries those scopes to rebuild a minimal set of `(URL, cookie)` pairs.
//! Writing that set into a fresh jar recreates equivalent cookies.
//!
//! ## Quick Start
//!
//! ```rust
//! use scopejar::cookies::monster::CookieMonster;
//! use scopejar::cookies::record::CookieRecord;
//! use scopejar::scope::scopejar::ScopeJar;
//! use std::sync::Arc;
//! use url::Url;
//!
//! let jar = ScopeJar::new(Arc::new(CookieMonster::new()));
//! jar.write(
//!     &Url::parse("https://example.com/")?,
//!     &[CookieRecord::new("abcd", "1234").with_domain("example.com")],
//! )?;
//!
//! let restored = ScopeJar::new(Arc::new(CookieMonster::new()));
//! restored.replay(&jar.export()?)?;
//! assert_eq!(restored.export()?, jar.export()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie records, the store trait, and an in-memory store
//! - [`scope`] - Scope tracking and export reconciliation

pub mod base;
pub mod cookies;
pub mod scope;
