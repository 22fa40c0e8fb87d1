//! Single application state container: query cache, mutation results and tag invalidation.
//!
//! The store lives on the UI thread and is the only writer. It never performs I/O itself:
//! requests go to the worker as [`ApiCommand`]s and come back as [`ApiEvent`]s.

pub mod entry;
pub mod hooks;

use std::collections::HashMap;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::common::{ApiCommand, ApiEvent, ApiResponse};
use crate::error::ApiError;
use crate::network::{Endpoint, EndpointKind, QueryKey, Tag};

pub use entry::{MutationEntry, MutationStatus, QueryEntry, QueryStatus, QueryView};
pub use hooks::{LazyQuery, MutationTrigger, QuerySubscription};

pub struct Store {
    queries: HashMap<QueryKey, QueryEntry>,
    mutations: HashMap<Uuid, MutationEntry>,
    command_sender: mpsc::Sender<ApiCommand>,
}

impl Store {
    pub fn new(command_sender: mpsc::Sender<ApiCommand>) -> Self {
        Self {
            queries: HashMap::new(),
            mutations: HashMap::new(),
            command_sender,
        }
    }

    /// Registers a subscriber. Fetches unless the entry is in flight or was ever fulfilled.
    pub fn subscribe(&mut self, endpoint: &Endpoint) -> Option<Uuid> {
        self.add_subscriber(endpoint)?;
        let needs_fetch = self
            .query_entry(endpoint)
            .is_some_and(QueryEntry::needs_fetch_on_subscribe);
        if needs_fetch {
            return self.refetch(endpoint);
        }
        None
    }

    /// Registers a subscriber without fetching. Returns the entry's current status.
    pub fn add_subscriber(&mut self, endpoint: &Endpoint) -> Option<QueryStatus> {
        let key = query_key(endpoint)?;
        let entry = self
            .queries
            .entry(key)
            .or_insert_with(|| QueryEntry::new(endpoint.clone()));
        entry.subscribers += 1;
        Some(entry.status)
    }

    pub fn unsubscribe(&mut self, endpoint: &Endpoint) {
        let Some(key) = query_key(endpoint) else {
            return;
        };
        if let Some(entry) = self.queries.get_mut(&key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
        }
    }

    /// Forces a fetch. A request already in flight for the same key is reused.
    pub fn refetch(&mut self, endpoint: &Endpoint) -> Option<Uuid> {
        let key = query_key(endpoint)?;
        let entry = self
            .queries
            .entry(key.clone())
            .or_insert_with(|| QueryEntry::new(endpoint.clone()));

        if entry.status == QueryStatus::Pending {
            if let Some(request_id) = entry.request_id {
                log::debug!("{key} already in flight ({request_id})");
                return Some(request_id);
            }
        }

        let request_id = Uuid::new_v4();
        entry.begin(request_id);

        let command = ApiCommand {
            request_id,
            endpoint: endpoint.clone(),
        };
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to dispatch {key}: {err}");
            entry.settle(request_id, Err(dispatch_error(&err)));
        }

        Some(request_id)
    }

    /// Starts a mutation. Query endpoints are rejected with `None`.
    pub fn mutate(&mut self, endpoint: Endpoint) -> Option<Uuid> {
        if endpoint.kind() != EndpointKind::Mutation {
            log::warn!("{} is not a mutation", endpoint.name());
            return None;
        }

        let request_id = Uuid::new_v4();
        let mut entry = MutationEntry::pending(endpoint.clone());

        let command = ApiCommand {
            request_id,
            endpoint,
        };
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to dispatch mutation {request_id}: {err}");
            entry.settle(Err(dispatch_error(&err)));
        }

        self.mutations.insert(request_id, entry);
        Some(request_id)
    }

    pub fn remove_mutation(&mut self, request_id: Uuid) {
        self.mutations.remove(&request_id);
    }

    pub fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Settled {
                request_id,
                endpoint,
                result,
            } => match endpoint.kind() {
                EndpointKind::Query => self.settle_query(request_id, &endpoint, result),
                EndpointKind::Mutation => self.settle_mutation(request_id, &endpoint, result),
            },
        }
    }

    /// Applies everything the worker has sent so far without blocking.
    pub fn drain_events(&mut self, event_receiver: &mut mpsc::Receiver<ApiEvent>) -> usize {
        let mut applied = 0;
        while let Ok(event) = event_receiver.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn query(&self, endpoint: &Endpoint) -> QueryView<'_> {
        query_key(endpoint)
            .and_then(|key| self.queries.get(&key))
            .map(QueryView::from_entry)
            .unwrap_or_default()
    }

    pub fn query_entry(&self, endpoint: &Endpoint) -> Option<&QueryEntry> {
        query_key(endpoint).and_then(|key| self.queries.get(&key))
    }

    pub fn mutation(&self, request_id: Uuid) -> Option<&MutationEntry> {
        self.mutations.get(&request_id)
    }

    fn settle_query(
        &mut self,
        request_id: Uuid,
        endpoint: &Endpoint,
        result: Result<ApiResponse, ApiError>,
    ) {
        let Some(key) = endpoint.query_key() else {
            return;
        };
        match self.queries.get_mut(&key) {
            Some(entry) => entry.settle(request_id, result),
            None => log::debug!("Dropping response for evicted query {key}"),
        }
    }

    fn settle_mutation(
        &mut self,
        request_id: Uuid,
        endpoint: &Endpoint,
        result: Result<ApiResponse, ApiError>,
    ) {
        let succeeded = result.is_ok();
        match self.mutations.get_mut(&request_id) {
            Some(entry) => entry.settle(result),
            None => log::debug!("Dropping result for released mutation {request_id}"),
        }

        // Server state changed even if nobody watches the mutation any more.
        if succeeded {
            self.invalidate_tags(endpoint.invalidates());
        }
    }

    /// Refetches subscribed entries that provide one of `tags`; drops the rest.
    pub fn invalidate_tags(&mut self, tags: &[Tag]) {
        if tags.is_empty() {
            return;
        }

        let affected: Vec<QueryKey> = self
            .queries
            .iter()
            .filter(|(_, entry)| entry.provides_any(tags))
            .map(|(key, _)| key.clone())
            .collect();

        for key in affected {
            let Some(entry) = self.queries.get(&key) else {
                continue;
            };
            if entry.subscribers == 0 {
                log::debug!("Invalidated {key} has no subscribers; removing");
                self.queries.remove(&key);
            } else {
                log::debug!("Invalidated {key}; refetching");
                let endpoint = entry.endpoint.clone();
                self.refetch(&endpoint);
            }
        }
    }
}

fn query_key(endpoint: &Endpoint) -> Option<QueryKey> {
    let key = endpoint.query_key();
    if key.is_none() {
        log::warn!("{} is not a query", endpoint.name());
    }
    key
}

fn dispatch_error<T>(err: &mpsc::error::TrySendError<T>) -> ApiError {
    ApiError::Transport(format!("failed to dispatch request: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{HealthStatus, Message};

    fn store() -> (Store, mpsc::Receiver<ApiCommand>) {
        let (tx, rx) = mpsc::channel(16);
        (Store::new(tx), rx)
    }

    fn message(id: &str) -> ApiResponse {
        ApiResponse::Message(Message {
            id: id.to_string(),
            content: "Stay curious".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            user_id: None,
        })
    }

    fn health() -> ApiResponse {
        ApiResponse::Health(HealthStatus {
            status: "ok".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            service: None,
        })
    }

    fn settle(store: &mut Store, command: ApiCommand, result: Result<ApiResponse, ApiError>) {
        store.apply(ApiEvent::Settled {
            request_id: command.request_id,
            endpoint: command.endpoint,
            result,
        });
    }

    #[test]
    fn subscribe_fetches_once_then_hits_cache() {
        let (mut store, mut commands) = store();

        assert!(store.subscribe(&Endpoint::GetMessageOfTheDay).is_some());
        let command = commands.try_recv().unwrap();
        settle(&mut store, command, Ok(message("m-1")));

        assert!(store.subscribe(&Endpoint::GetMessageOfTheDay).is_none());
        assert!(commands.try_recv().is_err());
        assert_eq!(
            store.query_entry(&Endpoint::GetMessageOfTheDay).unwrap().subscribers,
            2
        );
    }

    #[test]
    fn resubscribe_after_error_fetches_again() {
        let (mut store, mut commands) = store();
        store.subscribe(&Endpoint::GetMessageOfTheDay);
        let command = commands.try_recv().unwrap();
        settle(&mut store, command, Err(ApiError::Transport("offline".into())));
        store.unsubscribe(&Endpoint::GetMessageOfTheDay);

        assert!(store.subscribe(&Endpoint::GetMessageOfTheDay).is_some());
        let retry = commands.try_recv().unwrap();
        assert_eq!(retry.endpoint, Endpoint::GetMessageOfTheDay);
    }

    #[test]
    fn subscribe_while_pending_sends_nothing() {
        let (mut store, mut commands) = store();
        store.subscribe(&Endpoint::GetHealthCheck);
        assert!(commands.try_recv().is_ok());

        assert!(store.subscribe(&Endpoint::GetHealthCheck).is_none());
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn refetch_while_pending_reuses_request() {
        let (mut store, mut commands) = store();

        let first = store.refetch(&Endpoint::GetHealthCheck).unwrap();
        let second = store.refetch(&Endpoint::GetHealthCheck).unwrap();

        assert_eq!(first, second);
        assert!(commands.try_recv().is_ok());
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn successful_create_refetches_subscribed_message_only() {
        let (mut store, mut commands) = store();
        store.subscribe(&Endpoint::GetMessageOfTheDay);
        let get = commands.try_recv().unwrap();
        settle(&mut store, get, Ok(message("m-1")));
        store.subscribe(&Endpoint::GetHealthCheck);
        let get_health = commands.try_recv().unwrap();
        settle(&mut store, get_health, Ok(health()));

        store.mutate(Endpoint::CreateMessageOfTheDay("new".into()));
        let create = commands.try_recv().unwrap();
        settle(&mut store, create, Ok(message("m-2")));

        let refetch = commands.try_recv().unwrap();
        assert_eq!(refetch.endpoint, Endpoint::GetMessageOfTheDay);
        assert!(commands.try_recv().is_err());
        assert!(store.query(&Endpoint::GetMessageOfTheDay).is_fetching());
        assert!(store.query(&Endpoint::GetHealthCheck).is_success());
    }

    #[test]
    fn successful_create_drops_unsubscribed_message() {
        let (mut store, mut commands) = store();
        store.refetch(&Endpoint::GetMessageOfTheDay);
        let get = commands.try_recv().unwrap();
        settle(&mut store, get, Ok(message("m-1")));

        store.mutate(Endpoint::CreateMessageOfTheDay("new".into()));
        let create = commands.try_recv().unwrap();
        settle(&mut store, create, Ok(message("m-2")));

        assert!(commands.try_recv().is_err());
        assert!(store.query_entry(&Endpoint::GetMessageOfTheDay).is_none());
        assert!(store.query(&Endpoint::GetMessageOfTheDay).is_uninitialized());
    }

    #[test]
    fn failed_create_invalidates_nothing() {
        let (mut store, mut commands) = store();
        store.subscribe(&Endpoint::GetMessageOfTheDay);
        let get = commands.try_recv().unwrap();
        settle(&mut store, get, Ok(message("m-1")));

        let id = store
            .mutate(Endpoint::CreateMessageOfTheDay("new".into()))
            .unwrap();
        let create = commands.try_recv().unwrap();
        settle(
            &mut store,
            create,
            Err(ApiError::Http {
                status: 500,
                body: "boom".into(),
            }),
        );

        assert!(commands.try_recv().is_err());
        let mutation = store.mutation(id).unwrap();
        assert_eq!(mutation.status, MutationStatus::Rejected);
        assert_eq!(mutation.error.as_ref().and_then(ApiError::status), Some(500));
    }

    #[test]
    fn closed_worker_rejects_instead_of_panicking() {
        let (mut store, commands) = store();
        drop(commands);

        store.refetch(&Endpoint::GetHealthCheck);
        let id = store
            .mutate(Endpoint::CreateMessageOfTheDay("x".into()))
            .unwrap();

        assert!(store.query(&Endpoint::GetHealthCheck).is_error());
        assert_eq!(store.mutation(id).unwrap().status, MutationStatus::Rejected);
    }

    #[test]
    fn mutate_refuses_queries() {
        let (mut store, mut commands) = store();

        assert!(store.mutate(Endpoint::GetHealthCheck).is_none());
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn drain_applies_all_buffered_events() {
        let (mut store, mut commands) = store();
        let (event_tx, mut event_rx) = mpsc::channel(4);
        store.refetch(&Endpoint::GetHealthCheck);
        let command = commands.try_recv().unwrap();

        event_tx
            .try_send(ApiEvent::Settled {
                request_id: command.request_id,
                endpoint: command.endpoint,
                result: Ok(health()),
            })
            .unwrap();

        assert_eq!(store.drain_events(&mut event_rx), 1);
        assert!(store.query(&Endpoint::GetHealthCheck).is_success());
    }
}
