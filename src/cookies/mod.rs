//! Cookie records, the store interface, and a bundled in-memory store.
//!
//! | Chromium (C++) | scopejar (Rust) | Responsibility |
//! |----------------|-----------------|----------------|
//! | `net::CookieStore` | [`CookieStore`](store::CookieStore) | Read/write interface a jar wraps |
//! | `net::CookieMonster` | [`CookieMonster`](monster::CookieMonster) | In-memory RFC 6265 jar with LRU eviction |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Cookie as stored, scope fully resolved |
//! | - | [`CookieRecord`](record::CookieRecord) | Cookie as written or read by callers |
//! | `net::registry_controlled_domains` | [`psl`] | Public suffix lookups |
//!
//! # Reading and writing
//!
//! ```rust
//! use scopejar::cookies::monster::CookieMonster;
//! use scopejar::cookies::record::CookieRecord;
//! use scopejar::cookies::store::CookieStore;
//! use url::Url;
//!
//! let jar = CookieMonster::new();
//! let url = Url::parse("https://example.com/account/login")?;
//! jar.write(&url, &[CookieRecord::new("session", "abc").with_secure(true)])?;
//!
//! let sent = jar.read(&Url::parse("https://example.com/account/settings")?)?;
//! assert_eq!(sent.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod canonical_cookie;
pub mod monster;
pub mod psl;
pub mod record;
pub mod store;
