//! Cache of configured clients, one per base address.
//!
//! A [`ClientRegistry`] is created once at startup and shared by reference
//! (`Arc<ClientRegistry>`) with every service that talks HTTP. It is not a
//! global: two registries never share clients.
//!
//! Lookups take a read lock; construction happens under the write lock with a
//! second lookup first, so concurrent first requests for the same address all
//! receive the same instance. Clients already handed out stay valid after
//! [`ClientRegistry::clear_cache`]; only future lookups rebuild.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::{HttpClient, NetworkConfig, TransportError};

/// Address-keyed cache of [`HttpClient`] instances.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    config: NetworkConfig,
    clients: RwLock<HashMap<String, Arc<HttpClient>>>,
}

impl ClientRegistry {
    /// Creates an empty registry using [`NetworkConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose clients are all built with `config`.
    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            config,
            clients: RwLock::default(),
        }
    }

    /// Configuration applied to every client this registry builds.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Returns the client for `address`, building and caching it on first use.
    ///
    /// The key is the address exactly as given. An address that is not an
    /// absolute `http(s)` URL fails with [`TransportError::InvalidBaseUrl`]
    /// and leaves the cache untouched.
    pub fn get_client(&self, address: &str) -> Result<Arc<HttpClient>, TransportError> {
        if let Some(client) = self.read().get(address) {
            trace!(base_url = address, client_id = %client.id(), "client cache hit");
            return Ok(Arc::clone(client));
        }

        let mut clients = self.write();
        if let Some(client) = clients.get(address) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(HttpClient::new(address, &self.config)?);
        debug!(base_url = address, client_id = %client.id(), "created HTTP client");
        clients.insert(address.to_string(), Arc::clone(&client));
        Ok(client)
    }

    /// Drops every cached client.
    pub fn clear_cache(&self) {
        let mut clients = self.write();
        debug!(evicted = clients.len(), "clearing client cache");
        clients.clear();
    }

    /// Number of cached clients.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no client is cached.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map only ever holds fully built `Arc`s, so a panic while a guard was
    // held cannot leave it inconsistent; recover from poisoning.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<HttpClient>>> {
        self.clients.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<HttpClient>>> {
        self.clients.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    const API: &str = "https://api.example.com/";
    const OTHER: &str = "https://other.example.com/";

    #[test]
    fn repeated_lookup_returns_the_cached_instance() {
        let registry = ClientRegistry::new();
        let first = registry.get_client(API).unwrap();
        let second = registry.get_client(API).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_addresses_get_distinct_clients() {
        let registry = ClientRegistry::new();
        let a = registry.get_client(API).unwrap();
        let b = registry.get_client(OTHER).unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn clear_cache_forces_a_rebuild_but_keeps_old_handles_usable() {
        let registry = ClientRegistry::new();
        let before = registry.get_client(API).unwrap();

        registry.clear_cache();
        assert!(registry.is_empty());

        let after = registry.get_client(API).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_ne!(before.id(), after.id());
        assert_eq!(before.base_url().as_str(), API);
    }

    #[test]
    fn invalid_address_is_not_cached() {
        let registry = ClientRegistry::new();
        let err = registry.get_client("no scheme here").unwrap_err();

        assert!(matches!(err, TransportError::InvalidBaseUrl { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn clients_use_the_registry_config() {
        let config = NetworkConfig::default().with_connect_timeout(Duration::from_secs(3));
        let registry = ClientRegistry::with_config(config.clone());
        registry.get_client(API).unwrap();

        assert_eq!(registry.config(), &config);
    }

    #[test]
    fn concurrent_first_lookups_share_one_instance() {
        let registry = Arc::new(ClientRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.get_client(API).unwrap())
            })
            .collect();

        let clients: Vec<Arc<HttpClient>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(clients.iter().all(|c| Arc::ptr_eq(c, &clients[0])));
        assert_eq!(registry.len(), 1);
    }
}
