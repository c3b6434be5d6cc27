use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::error::{GraphError, GraphResult};
use crate::optimizer::NetworkOptimizer;

pub const DEFAULT_NAMESPACE: &str = "default";

type SharedNetwork = Arc<RwLock<NetworkOptimizer>>;

/// Named networks, each behind its own single-writer/many-reader lock.
///
/// Queries on one network run concurrently under the read lock; mutation
/// takes the write lock, so no query ever observes a half-added edge.
#[derive(Clone, Default)]
pub struct NetworkRegistry {
    networks: Arc<RwLock<HashMap<String, SharedNetwork>>>,
}

impl NetworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Network for `namespace`, created empty on first use. An empty name
    /// selects the default namespace.
    pub fn network(&self, namespace: &str) -> GraphResult<SharedNetwork> {
        let ns = resolve(namespace);

        {
            let networks = self.networks.read().map_err(poisoned)?;
            if let Some(net) = networks.get(ns) {
                return Ok(Arc::clone(net));
            }
        }

        let mut networks = self.networks.write().map_err(poisoned)?;
        let net = networks.entry(ns.to_string()).or_insert_with(|| {
            info!(namespace = ns, "created network");
            Arc::new(RwLock::new(NetworkOptimizer::new()))
        });
        Ok(Arc::clone(net))
    }

    /// Existing network for `namespace`. Never creates one.
    pub fn lookup(&self, namespace: &str) -> GraphResult<SharedNetwork> {
        let ns = resolve(namespace);
        let networks = self.networks.read().map_err(poisoned)?;
        networks
            .get(ns)
            .map(Arc::clone)
            .ok_or_else(|| GraphError::UnknownNamespace(ns.to_string()))
    }

    /// Run a query under the network's read lock. The namespace must
    /// already exist.
    pub fn read<F, T>(&self, namespace: &str, f: F) -> GraphResult<T>
    where
        F: FnOnce(&NetworkOptimizer) -> GraphResult<T>,
    {
        let net = self.lookup(namespace)?;
        let guard: RwLockReadGuard<'_, NetworkOptimizer> = net.read().map_err(poisoned)?;
        f(&guard)
    }

    /// Run a mutation under the network's write lock, creating the network
    /// on first use.
    pub fn write<F, T>(&self, namespace: &str, f: F) -> GraphResult<T>
    where
        F: FnOnce(&mut NetworkOptimizer) -> GraphResult<T>,
    {
        let net = self.network(namespace)?;
        let mut guard: RwLockWriteGuard<'_, NetworkOptimizer> = net.write().map_err(poisoned)?;
        f(&mut guard)
    }

    /// Sorted namespace names.
    pub fn namespaces(&self) -> GraphResult<Vec<String>> {
        let networks = self.networks.read().map_err(poisoned)?;
        let mut names: Vec<String> = networks.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Forget a network. Returns `false` if it did not exist. Holders of an
    /// `Arc` from [`network`](Self::network) keep their copy.
    pub fn remove(&self, namespace: &str) -> GraphResult<bool> {
        let ns = resolve(namespace);
        let mut networks = self.networks.write().map_err(poisoned)?;
        let removed = networks.remove(ns).is_some();
        if removed {
            info!(namespace = ns, "dropped network");
        }
        Ok(removed)
    }
}

/// An empty name selects the default namespace.
fn resolve(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> GraphError {
    GraphError::Poisoned(e.to_string())
}
