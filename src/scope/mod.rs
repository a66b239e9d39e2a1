//! Scope tracking and whole-jar export.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`scopekey`] | Derive the scope key of a written cookie |
//! | [`tracker`] | Remember every scope key ever written |
//! | [`reconciler`] | Query each scope and merge the answers into an [`ExportMap`](reconciler::ExportMap) |
//! | [`scopejar`] | [`ScopeJar`](scopejar::ScopeJar), the wrapper tying it together |
//! | [`config`] | [`ExportConfig`](config::ExportConfig) |

pub mod config;
pub mod reconciler;
pub mod scopejar;
pub mod scopekey;
pub mod tracker;
