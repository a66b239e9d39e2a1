//! Base types and error handling.
//!
//! - [`JarError`](jarerror::JarError): error codes shared by the scope
//!   tracker, the reconciler and the bundled cookie store.

pub mod jarerror;
