//! Deferred resolution of links against the response cache.
//!
//! While a response is decoded, resources register a callback per link
//! field. Targets may appear later in the same response (or in its
//! `includes`), so nothing is resolved at registration time. Once every
//! resource is cached, [`LinkResolver::churn`] runs every callback exactly
//! once and resets the resolver for the next response.

use crate::DataCache;
use delivery_types::{Link, SharedResource};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Callback for a single link: receives the target, or `None` when the
/// target was never cached.
pub type SingleCallback = Box<dyn FnOnce(Option<SharedResource>)>;

/// Callback for an ordered list of links: receives the cached targets in
/// link order. Uncached members are dropped, so the list may be shorter
/// than the links registered.
pub type ListCallback = Box<dyn FnOnce(Vec<SharedResource>)>;

/// Identity under which pending callbacks are grouped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolutionKey {
    /// Cache key of a single link.
    Single(String),
    /// Cache keys of a link list, in order.
    List(Vec<String>),
}

/// Outcome counters of one [`LinkResolver::churn`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChurnSummary {
    /// Single-link keys whose target was cached.
    pub resolved_links: usize,
    /// Single-link keys whose target was never cached.
    pub unresolved_links: usize,
    /// Link-list keys delivered (always delivered, possibly shortened).
    pub resolved_lists: usize,
    /// List members dropped because their target was never cached.
    pub dropped_list_members: usize,
    pub callbacks_invoked: usize,
}

/// Records link callbacks during decode and resolves them in one pass.
///
/// Scoped to one decode session at a time; reusable across sessions since
/// [`churn`](Self::churn) leaves it empty.
#[derive(Default)]
pub struct LinkResolver {
    cache: DataCache,
    singles: BTreeMap<String, Vec<SingleCallback>>,
    lists: BTreeMap<Vec<String>, Vec<ListCallback>>,
}

impl LinkResolver {
    /// Creates a resolver with an empty cache and no pending callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `callback` to receive the target of `link` at churn time.
    ///
    /// Several callbacks may wait on the same link; all of them are invoked.
    pub fn register_single<F>(&mut self, link: &Link, callback: F)
    where
        F: FnOnce(Option<SharedResource>) + 'static,
    {
        self.singles
            .entry(link.cache_key())
            .or_default()
            .push(Box::new(callback));
    }

    /// Queues `callback` to receive the targets of `links`, in order, at
    /// churn time.
    pub fn register_list<F>(&mut self, links: &[Link], callback: F)
    where
        F: FnOnce(Vec<SharedResource>) + 'static,
    {
        let keys = links.iter().map(Link::cache_key).collect();
        self.lists.entry(keys).or_default().push(Box::new(callback));
    }

    /// Adds a decoded resource to the session cache. See [`DataCache::add`].
    pub fn add(&mut self, resource: SharedResource) -> bool {
        self.cache.add(resource)
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut DataCache {
        &mut self.cache
    }

    /// Number of distinct keys with pending callbacks.
    pub fn pending_len(&self) -> usize {
        self.singles.len() + self.lists.len()
    }

    /// Keys with pending callbacks: single links first, each group in key
    /// order.
    pub fn pending_keys(&self) -> Vec<ResolutionKey> {
        self.singles
            .keys()
            .cloned()
            .map(ResolutionKey::Single)
            .chain(self.lists.keys().cloned().map(ResolutionKey::List))
            .collect()
    }

    /// Drops every pending callback and cached resource without invoking
    /// anything. Used when a decode session is abandoned halfway.
    pub fn reset(&mut self) {
        let dropped = self.pending_len();
        self.singles.clear();
        self.lists.clear();
        self.cache = DataCache::new();
        if dropped > 0 {
            debug!("Reset resolver with {} pending keys", dropped);
        }
    }

    /// Resolves every pending callback against the cache, then clears the
    /// callback table and replaces the cache with an empty one.
    ///
    /// Never fails: unresolved single links deliver `None`, unresolved list
    /// members are skipped.
    pub fn churn(&mut self) -> ChurnSummary {
        let cache = std::mem::take(&mut self.cache);
        let singles = std::mem::take(&mut self.singles);
        let lists = std::mem::take(&mut self.lists);
        let mut summary = ChurnSummary::default();

        for (key, callbacks) in singles {
            let resolved = cache.lookup(&key);
            if resolved.is_some() {
                summary.resolved_links += 1;
            } else {
                debug!("Unresolved link {} ({} callbacks)", key, callbacks.len());
                summary.unresolved_links += 1;
            }
            for callback in callbacks {
                callback(resolved.clone());
                summary.callbacks_invoked += 1;
            }
        }

        for (keys, callbacks) in lists {
            let resolved: Vec<SharedResource> =
                keys.iter().filter_map(|key| cache.lookup(key)).collect();
            let dropped = keys.len() - resolved.len();
            if dropped > 0 {
                debug!("Dropped {} of {} unresolved links from list", dropped, keys.len());
            }
            summary.resolved_lists += 1;
            summary.dropped_list_members += dropped;
            for callback in callbacks {
                callback(resolved.clone());
                summary.callbacks_invoked += 1;
            }
        }

        debug!(
            "Churned {} cached resources: {} links resolved, {} unresolved, {} lists, {} callbacks",
            cache.len(),
            summary.resolved_links,
            summary.unresolved_links,
            summary.resolved_lists,
            summary.callbacks_invoked
        );
        summary
    }
}

impl fmt::Debug for LinkResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkResolver")
            .field("cache", &self.cache)
            .field("pending_keys", &self.pending_keys())
            .finish()
    }
}
