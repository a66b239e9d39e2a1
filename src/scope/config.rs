//! Export configuration.

use crate::cookies::psl::{MozillaSuffixList, SuffixTable};
use std::sync::Arc;

/// Label prepended to a scope's host to probe for `Domain` cookies.
pub const DEFAULT_PROBE_LABEL: &str = "sloppy";

/// Configuration options for [`ScopeJar`](crate::scope::scopejar::ScopeJar) exports.
#[derive(Clone)]
pub struct ExportConfig {
    /// Subdomain label used for the second query of every scope. Any label
    /// works as long as it is a valid DNS label; a cookie visible under it
    /// was written with a `Domain` attribute.
    pub probe_label: String,

    /// Public suffix lookup used to keep unrelated sites apart.
    pub suffix_table: Arc<dyn SuffixTable>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            probe_label: DEFAULT_PROBE_LABEL.to_string(),
            suffix_table: Arc::new(MozillaSuffixList),
        }
    }
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("probe_label", &self.probe_label)
            .finish_non_exhaustive()
    }
}
