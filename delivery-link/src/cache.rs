//! The per-response resource cache.

use delivery_types::{Link, Resource, SharedResource};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Decoded resources of one response, keyed by `"<type>_<id>"`.
///
/// One slot per (type, id): adding a resource whose key is already present
/// replaces the earlier one. There is no eviction; the whole cache is
/// discarded after churn.
#[derive(Default)]
pub struct DataCache {
    resources: HashMap<String, SharedResource>,
}

impl DataCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a resource under the key derived from its sys block.
    ///
    /// Returns `false` (and stores nothing) for resource types that cannot
    /// be the target of a link.
    pub fn add(&mut self, resource: SharedResource) -> bool {
        match resource.cache_key() {
            Some(key) => {
                self.add_with_key(key, resource);
                true
            }
            None => {
                trace!("Not caching unlinkable {} resource {}", resource.resource_type(), resource.id());
                false
            }
        }
    }

    /// Stores a resource under an explicit key.
    pub fn add_with_key(&mut self, key: impl Into<String>, resource: SharedResource) {
        let key = key.into();
        if self.resources.insert(key.clone(), resource).is_some() {
            trace!("Replaced cached resource {}", key);
        }
    }

    /// Looks up a resource by cache key.
    pub fn lookup(&self, key: &str) -> Option<SharedResource> {
        self.resources.get(key).cloned()
    }

    /// Looks up the target of a link.
    pub fn lookup_link(&self, link: &Link) -> Option<SharedResource> {
        self.lookup(&link.cache_key())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns all cache keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

impl fmt::Debug for DataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("DataCache").field("keys", &keys).finish()
    }
}
