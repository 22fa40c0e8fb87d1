//! Per-view handles over the shared [`Store`].

use uuid::Uuid;

use crate::network::Endpoint;

use super::{MutationEntry, QueryView, Store};

/// Subscribes when the view mounts and fetches only on a cache miss.
#[derive(Debug)]
pub struct QuerySubscription {
    endpoint: Endpoint,
    mounted: bool,
}

impl QuerySubscription {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            mounted: false,
        }
    }

    /// Safe to call every frame.
    pub fn mount(&mut self, store: &mut Store) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        store.subscribe(&self.endpoint);
    }

    pub fn unmount(&mut self, store: &mut Store) {
        if self.mounted {
            self.mounted = false;
            store.unsubscribe(&self.endpoint);
        }
    }

    pub fn refetch(&self, store: &mut Store) -> Option<Uuid> {
        store.refetch(&self.endpoint)
    }

    pub fn state<'s>(&self, store: &'s Store) -> QueryView<'s> {
        store.query(&self.endpoint)
    }
}

/// Does nothing until triggered; every trigger forces a fetch.
#[derive(Debug)]
pub struct LazyQuery {
    endpoint: Endpoint,
    subscribed: bool,
}

impl LazyQuery {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            subscribed: false,
        }
    }

    pub fn trigger(&mut self, store: &mut Store) -> Option<Uuid> {
        if !self.subscribed {
            self.subscribed = true;
            store.add_subscriber(&self.endpoint);
        }
        store.refetch(&self.endpoint)
    }

    /// Uninitialized until the first trigger, even if another view filled the cache.
    pub fn state<'s>(&self, store: &'s Store) -> QueryView<'s> {
        if !self.subscribed {
            return QueryView::uninitialized();
        }
        store.query(&self.endpoint)
    }
}

/// Tracks the latest call of one mutation; older results are released.
#[derive(Debug, Default)]
pub struct MutationTrigger {
    latest: Option<Uuid>,
}

impl MutationTrigger {
    pub fn trigger(&mut self, store: &mut Store, endpoint: Endpoint) -> Option<Uuid> {
        let request_id = store.mutate(endpoint)?;
        if let Some(previous) = self.latest.replace(request_id) {
            store.remove_mutation(previous);
        }
        Some(request_id)
    }

    pub fn latest(&self) -> Option<Uuid> {
        self.latest
    }

    pub fn state<'s>(&self, store: &'s Store) -> Option<&'s MutationEntry> {
        self.latest.and_then(|request_id| store.mutation(request_id))
    }
}
