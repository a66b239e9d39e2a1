//! Export reconciliation.
//!
//! A cookie store only answers "which cookies apply to this URL". To list
//! what it holds, every tracked scope is queried twice: once as-is, and
//! once under a synthetic subdomain of its host (the *probe*), which only
//! `Domain` cookies answer to. The same logical cookie usually shows up
//! many times across scopes, so observations are merged:
//!
//! 1. group by (name, value);
//! 2. split each group by registrable domain, so equal cookies of unrelated
//!    sites stay apart;
//! 3. keep the observation whose scope URL is shortest (ties: lexicographic
//!    order of the URL, then first seen);
//! 4. rebuild `Secure` and `Path` from that URL, and set `Domain` to its
//!    host only when the cookie was seen from two or more hosts.

use crate::base::jarerror::JarError;
use crate::cookies::psl::SuffixTable;
use crate::cookies::record::CookieRecord;
use crate::cookies::store::CookieStore;
use crate::scope::config::ExportConfig;
use std::collections::{BTreeMap, HashMap, HashSet};
use url::{Host, Url};

/// Canonical scope URL → cookies live at exactly that scope.
pub type ExportMap = BTreeMap<Url, Vec<CookieRecord>>;

/// One cookie returned by one store query.
#[derive(Debug)]
struct Observation {
    /// Scope the query was derived from.
    origin: Url,
    /// Host actually queried: the scope host or its probe.
    queried_host: String,
    /// Registrable domain of the scope host.
    site: String,
    cookie: CookieRecord,
}

/// Rebuild the scoped content of `store` from the tracked `scopes`.
///
/// Store errors are returned unchanged. Scopes that no longer match any
/// cookie contribute nothing.
pub fn reconcile<S: CookieStore + ?Sized>(
    store: &S,
    scopes: Vec<Url>,
    config: &ExportConfig,
) -> Result<ExportMap, JarError> {
    let scope_count = scopes.len();
    let mut by_name_value: HashMap<(String, String), Vec<Observation>> = HashMap::new();

    for mut origin in scopes {
        if origin.path().is_empty() {
            origin.set_path("/");
        }
        let host = origin
            .host_str()
            .ok_or_else(|| JarError::provenance_corruption(origin.as_str(), "scope has no host"))?
            .to_string();
        let site = registrable_site(config.suffix_table.as_ref(), &host);

        let mut queries = vec![(host.clone(), origin.clone())];
        if let Some(probe) = probe_url(&origin, &config.probe_label)? {
            queries.push((probe.host_str().unwrap_or_default().to_string(), probe));
        }

        for (queried_host, url) in queries {
            let cookies = store.read(&url)?;
            tracing::debug!(url = %url, count = cookies.len(), "queried cookie scope");

            for cookie in cookies {
                by_name_value
                    .entry((cookie.name.clone(), cookie.value.clone()))
                    .or_default()
                    .push(Observation {
                        origin: origin.clone(),
                        queried_host: queried_host.clone(),
                        site: site.clone(),
                        cookie,
                    });
            }
        }
    }

    let mut export = ExportMap::new();
    for observations in by_name_value.into_values() {
        let mut by_site: HashMap<String, Vec<Observation>> = HashMap::new();
        for observation in observations {
            by_site
                .entry(observation.site.clone())
                .or_default()
                .push(observation);
        }

        for partition in by_site.into_values() {
            if let Some((url, record)) = canonical_representative(partition) {
                export.entry(url).or_default().push(record);
            }
        }
    }

    for records in export.values_mut() {
        records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value)));
    }

    tracing::debug!(
        scopes = scope_count,
        urls = export.len(),
        cookies = export.values().map(Vec::len).sum::<usize>(),
        "cookie export reconciled"
    );

    Ok(export)
}

/// Pick the observation to emit for one logical cookie and rebuild its scope.
fn canonical_representative(partition: Vec<Observation>) -> Option<(Url, CookieRecord)> {
    let hosts: HashSet<&str> = partition.iter().map(|o| o.queried_host.as_str()).collect();
    let seen_from_many_hosts = hosts.len() > 1;

    // `min_by` keeps the first of equal elements
    let representative = partition.iter().min_by(|a, b| {
        let (a, b) = (a.origin.as_str(), b.origin.as_str());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    })?;

    let origin = representative.origin.clone();
    let mut record = representative.cookie.clone();
    record.secure = origin.scheme() == "https";
    record.path = Some(origin.path().to_string());
    record.domain = if seen_from_many_hosts {
        origin.host_str().map(str::to_string)
    } else {
        None
    };

    Some((origin, record))
}

/// Registrable domain of `host`, or the host itself when the table has none.
fn registrable_site(table: &dyn SuffixTable, host: &str) -> String {
    table.registrable_domain(host).unwrap_or_else(|| {
        tracing::debug!(host = %host, "no registrable domain, grouping by host");
        host.to_string()
    })
}

/// `origin` with `label` prepended to its host. IP hosts have no subdomains
/// and are not probed.
fn probe_url(origin: &Url, label: &str) -> Result<Option<Url>, JarError> {
    let Some(Host::Domain(host)) = origin.host() else {
        return Ok(None);
    };
    let mut probe = origin.clone();
    probe.set_host(Some(&format!("{label}.{host}")))?;
    Ok(Some(probe))
}
