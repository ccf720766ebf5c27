/// Onion alias registry
///
/// Maps short aliases to full onion addresses. A single readers-writer lock
/// guards the whole map: lookups happen on every resolution attempt and run
/// in parallel under the shared lock, while provisioning writes are rare and
/// take the exclusive lock for one in-memory map operation.

use onionalias_common::{Alias, AliasError, OnionAddress};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, trace};

static REGISTRY: OnceLock<Arc<AliasRegistry>> = OnceLock::new();

/// Get the process-wide registry, creating it on first use
///
/// Every caller receives a handle to the same instance.
pub fn get_singleton() -> Arc<AliasRegistry> {
    get_or_create(&REGISTRY)
}

fn get_or_create(cell: &OnceLock<Arc<AliasRegistry>>) -> Arc<AliasRegistry> {
    cell.get_or_init(|| {
        debug!("Creating onion alias registry");
        Arc::new(AliasRegistry::new())
    })
    .clone()
}

/// Thread-safe alias -> onion address store
///
/// `parking_lot::RwLock` does not poison. Arguments are validated and turned
/// into owned values before the write lock is taken, so a critical section
/// only moves finished values into or out of the map.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    aliases: RwLock<HashMap<Alias, OnionAddress>>,
}

impl AliasRegistry {
    /// Create a standalone registry
    ///
    /// Resolution paths should use [`get_singleton`]; this is for callers
    /// that own a private instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the onion address registered for `alias`
    pub fn resolve(&self, alias: &str) -> Option<OnionAddress> {
        let found = self.aliases.read().get(alias).cloned();
        trace!("Alias lookup for {}: {}", alias, found.is_some());
        found
    }

    /// Register `alias`, replacing any previous address
    pub fn set(
        &self,
        alias: impl Into<String>,
        address: impl AsRef<str>,
    ) -> Result<(), AliasError> {
        let alias = Alias::new(alias)?;
        let address = OnionAddress::new(address)?;
        self.insert(alias, address);
        Ok(())
    }

    /// Register an already validated entry
    pub fn insert(&self, alias: Alias, address: OnionAddress) {
        debug!("Registering onion alias {} -> {}", alias, address);
        let previous = self.aliases.write().insert(alias, address);
        if let Some(previous) = previous {
            debug!("Replaced previous target {}", previous);
        }
    }

    /// Remove `alias`, returning whether it was present
    pub fn remove(&self, alias: &str) -> bool {
        let removed = self.aliases.write().remove(alias).is_some();
        if removed {
            debug!("Removed onion alias {}", alias);
        }
        removed
    }

    /// Remove every alias, returning how many were dropped
    pub fn clear(&self) -> usize {
        let removed = {
            let mut aliases = self.aliases.write();
            let count = aliases.len();
            aliases.clear();
            count
        };
        info!("Cleared {} onion aliases", removed);
        removed
    }

    /// Apply a batch of entries atomically
    ///
    /// Every entry is validated first. If any is malformed nothing is
    /// applied; otherwise all of them become visible under one write lock.
    pub fn load<I, A, B>(&self, entries: I) -> Result<usize, AliasError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: AsRef<str>,
    {
        let validated = entries
            .into_iter()
            .map(|(alias, address)| -> Result<(Alias, OnionAddress), AliasError> {
                let alias = Alias::new(alias)?;
                let address = OnionAddress::new(address).map_err(|_| {
                    AliasError::invalid_input(format!("empty onion address for alias {}", alias))
                })?;
                Ok((alias, address))
            })
            .collect::<Result<Vec<_>, AliasError>>()?;

        let count = validated.len();
        self.aliases.write().extend(validated);
        info!("Loaded {} onion aliases", count);
        Ok(count)
    }

    /// Snapshot of all entries, in no particular order
    pub fn list(&self) -> Vec<(Alias, OnionAddress)> {
        self.aliases
            .read()
            .iter()
            .map(|(alias, address)| (alias.clone(), address.clone()))
            .collect()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.read().contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.aliases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_bridge_scenario() {
        let registry = AliasRegistry::new();

        registry.set("bridge1", "abc123.onion").unwrap();
        assert_eq!(registry.resolve("bridge1").unwrap(), "abc123.onion");

        assert!(registry.remove("bridge1"));
        assert!(registry.resolve("bridge1").is_none());
    }

    #[test]
    fn test_unknown_alias_is_absent() {
        let registry = AliasRegistry::new();
        assert!(registry.resolve("never-set").is_none());
        assert!(!registry.contains("never-set"));
    }

    #[test]
    fn test_remove_twice() {
        let registry = AliasRegistry::new();
        registry.set("a", "x.onion").unwrap();
        registry.set("b", "y.onion").unwrap();

        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("b").unwrap(), "y.onion");
    }

    #[test]
    fn test_set_overwrites() {
        let registry = AliasRegistry::new();
        registry.set("a", "x.onion").unwrap();
        registry.set("a", "y.onion").unwrap();

        assert_eq!(registry.resolve("a").unwrap(), "y.onion");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_rejects_empty_input() {
        let registry = AliasRegistry::new();
        registry.set("alias", "before.onion").unwrap();

        let err = registry.set("", "addr").unwrap_err();
        assert!(matches!(err, AliasError::InvalidInput(_)));

        let err = registry.set("alias", "").unwrap_err();
        assert!(matches!(err, AliasError::InvalidInput(_)));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("alias").unwrap(), "before.onion");
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_clear() {
        let registry = AliasRegistry::new();
        registry.set("a", "x.onion").unwrap();
        registry.set("b", "y.onion").unwrap();

        assert_eq!(registry.clear(), 2);
        assert!(registry.is_empty());
        assert!(registry.resolve("a").is_none());
        assert_eq!(registry.clear(), 0);
    }

    #[test]
    fn test_list_snapshot() {
        let registry = AliasRegistry::new();
        registry.set("a", "x.onion").unwrap();
        registry.set("b", "y.onion").unwrap();

        let mut entries: Vec<(String, String)> = registry
            .list()
            .into_iter()
            .map(|(alias, address)| (alias.into(), address.into()))
            .collect();
        entries.sort();

        assert_eq!(
            entries,
            vec![
                ("a".to_string(), "x.onion".to_string()),
                ("b".to_string(), "y.onion".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_is_all_or_nothing() {
        let registry = AliasRegistry::new();
        registry.set("existing", "old.onion").unwrap();

        let err = registry
            .load(vec![("good", "x.onion"), ("bad", ""), ("existing", "new.onion")])
            .unwrap_err();
        assert!(matches!(err, AliasError::InvalidInput(_)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("existing").unwrap(), "old.onion");

        let count = registry
            .load(vec![("good", "x.onion"), ("existing", "new.onion")])
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(registry.resolve("existing").unwrap(), "new.onion");
        assert_eq!(registry.resolve("good").unwrap(), "x.onion");
    }

    #[test]
    fn test_singleton_shared_across_threads() {
        let alias = "singleton-identity.tor.onion";

        let writer = thread::spawn(move || {
            let registry = get_singleton();
            registry.set(alias, "shared.onion").unwrap();
            registry
        });
        let from_thread = writer.join().unwrap();

        let local = get_singleton();
        assert!(Arc::ptr_eq(&from_thread, &local));
        assert_eq!(local.resolve(alias).unwrap(), "shared.onion");

        assert!(local.remove(alias));
        assert!(from_thread.resolve(alias).is_none());
    }

    #[test]
    fn test_concurrent_first_access_yields_one_instance() {
        static CELL: OnceLock<Arc<AliasRegistry>> = OnceLock::new();
        let start = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let start = start.clone();
                thread::spawn(move || {
                    start.wait();
                    get_or_create(&CELL)
                })
            })
            .collect();
        let registries: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for registry in &registries[1..] {
            assert!(Arc::ptr_eq(&registries[0], registry));
        }
        assert!(Arc::ptr_eq(&registries[0], CELL.get().unwrap()));
        // 8 handles returned plus the one held by the cell
        assert_eq!(Arc::strong_count(&registries[0]), 9);
    }

    #[test]
    fn test_readers_never_observe_torn_values() {
        const READERS: usize = 4;

        let registry = Arc::new(AliasRegistry::new());
        let first = "a".repeat(56) + ".onion";
        let second = "b".repeat(56) + ".onion";
        let last = "final.onion".to_string();
        let done = Arc::new(AtomicBool::new(false));
        let observed = Arc::new(AtomicUsize::new(0));
        let start = Arc::new(Barrier::new(READERS + 1));

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let registry = registry.clone();
                let done = done.clone();
                let observed = observed.clone();
                let start = start.clone();
                let allowed = [first.clone(), second.clone(), last.clone()];
                thread::spawn(move || {
                    start.wait();
                    let mut seen = 0usize;
                    while !done.load(Ordering::Acquire) {
                        if let Some(address) = registry.resolve("hot") {
                            assert!(
                                allowed.iter().any(|a| a == address.as_str()),
                                "torn value observed: {}",
                                address
                            );
                            seen += 1;
                            observed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                    seen
                })
            })
            .collect();

        start.wait();
        let mut i = 0usize;
        // Keep writing until readers have actually seen values mid-churn.
        // A reader that finished early has panicked; stop and let join report it
        while (i < 2_000 || observed.load(Ordering::Relaxed) == 0)
            && !readers.iter().any(|r| r.is_finished())
        {
            let target = if i % 2 == 0 { &first } else { &second };
            registry.set("hot", target).unwrap();
            if i % 7 == 0 {
                registry.remove("hot");
            }
            i += 1;
            if i >= 2_000 {
                thread::yield_now();
            }
        }
        registry.set("hot", &last).unwrap();
        done.store(true, Ordering::Release);

        let total: usize = readers.into_iter().map(|r| r.join().unwrap()).sum();
        assert!(total > 0);

        assert_eq!(registry.resolve("hot").unwrap(), last.as_str());
    }

    proptest! {
        #[test]
        fn prop_set_then_resolve(alias in "\\PC{1,40}", address in "\\PC{1,80}") {
            let registry = AliasRegistry::new();
            registry.set(alias.clone(), &address).unwrap();
            let resolved = registry.resolve(&alias).unwrap();
            prop_assert_eq!(resolved.as_str(), address.as_str());
        }
    }
}
