/// Hostname rewriting for resolution paths
///
/// Consulted before a name is handed to ordinary resolution or certificate
/// verification. A registered alias is swapped for its onion address;
/// anything else passes through untouched.

use crate::registry::{get_singleton, AliasRegistry};
use onionalias_common::OnionAddress;
use std::borrow::Cow;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AliasResolver {
    registry: Arc<AliasRegistry>,
}

impl AliasResolver {
    pub fn new(registry: Arc<AliasRegistry>) -> Self {
        Self { registry }
    }

    /// Resolver backed by the process-wide registry
    pub fn global() -> Self {
        Self::new(get_singleton())
    }

    pub fn registry(&self) -> &Arc<AliasRegistry> {
        &self.registry
    }

    /// Find the target for `host`
    ///
    /// The host is tried exactly as given first. Only on a miss is it retried
    /// without surrounding whitespace and a trailing root dot.
    pub fn lookup(&self, host: &str) -> Option<OnionAddress> {
        if let Some(address) = self.registry.resolve(host) {
            return Some(address);
        }
        let normalized = normalize_host(host);
        if normalized.is_empty() || normalized == host {
            return None;
        }
        self.registry.resolve(normalized)
    }

    /// Replace `host` with its onion address if it is a registered alias
    pub fn rewrite_host<'a>(&self, host: &'a str) -> Cow<'a, str> {
        match self.lookup(host) {
            Some(address) => Cow::Owned(address.into()),
            None => Cow::Borrowed(host),
        }
    }
}

fn normalize_host(host: &str) -> &str {
    let host = host.trim();
    host.strip_suffix('.').unwrap_or(host)
}
