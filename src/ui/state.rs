use uuid::Uuid;

use crate::common::{ApiResponse, HealthStatus, Message};
use crate::config::ViewKind;
use crate::network::Endpoint;
use crate::store::{LazyQuery, MutationStatus, MutationTrigger, QuerySubscription, Store};

/// What the message-of-the-day view shows this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotdPhase<'s> {
    Loading,
    Error,
    Ready(Option<&'s Message>),
}

/// View tự fetch khi mount.
#[derive(Debug)]
pub struct MotdViewState {
    query: QuerySubscription,
}

impl MotdViewState {
    pub fn new() -> Self {
        Self {
            query: QuerySubscription::new(Endpoint::GetMessageOfTheDay),
        }
    }

    pub fn mount(&mut self, store: &mut Store) {
        self.query.mount(store);
    }

    pub fn unmount(&mut self, store: &mut Store) {
        self.query.unmount(store);
    }

    pub fn refetch(&self, store: &mut Store) {
        self.query.refetch(store);
    }

    pub fn phase<'s>(&self, store: &'s Store) -> MotdPhase<'s> {
        let state = self.query.state(store);
        if state.is_loading() {
            MotdPhase::Loading
        } else if state.error.is_some() {
            MotdPhase::Error
        } else {
            MotdPhase::Ready(state.data.and_then(ApiResponse::as_message))
        }
    }
}

impl Default for MotdViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Trạng thái cục bộ của view demo ba endpoint.
#[derive(Debug)]
pub struct ApiDemoState {
    pub new_content: String,
    pub created_message: Option<Message>,
    pub show_health_data: bool,
    pub show_message_data: bool,
    health: LazyQuery,
    message: LazyQuery,
    create: MutationTrigger,
    /// Create request whose outcome has not been handled yet.
    awaiting_create: Option<Uuid>,
}

impl ApiDemoState {
    pub fn new() -> Self {
        Self {
            new_content: String::new(),
            created_message: None,
            show_health_data: false,
            show_message_data: false,
            health: LazyQuery::new(Endpoint::GetHealthCheck),
            message: LazyQuery::new(Endpoint::GetMessageOfTheDay),
            create: MutationTrigger::default(),
            awaiting_create: None,
        }
    }

    pub fn handle_health_check(&mut self, store: &mut Store) {
        self.health.trigger(store);
        self.show_health_data = true;
    }

    pub fn handle_get_message(&mut self, store: &mut Store) {
        self.message.trigger(store);
        self.show_message_data = true;
    }

    /// Blank input never reaches the network.
    pub fn handle_create_message(&mut self, store: &mut Store) -> Option<Uuid> {
        if !self.can_submit(store) {
            return None;
        }
        let endpoint = Endpoint::CreateMessageOfTheDay(self.new_content.clone());
        let request_id = self.create.trigger(store, endpoint)?;
        self.awaiting_create = Some(request_id);
        Some(request_id)
    }

    pub fn clear_health_data(&mut self) {
        self.show_health_data = false;
    }

    pub fn clear_message_data(&mut self) {
        self.show_message_data = false;
    }

    pub fn clear_created_message(&mut self) {
        self.created_message = None;
    }

    /// Handles the outcome of the pending create once the store has it.
    pub fn sync(&mut self, store: &mut Store) {
        let Some(request_id) = self.awaiting_create else {
            return;
        };
        let Some(entry) = store.mutation(request_id) else {
            self.awaiting_create = None;
            return;
        };

        let outcome = match entry.status {
            MutationStatus::Pending => return,
            MutationStatus::Fulfilled => Ok(entry
                .data
                .as_ref()
                .and_then(ApiResponse::as_message)
                .cloned()),
            MutationStatus::Rejected => Err(entry.error.clone()),
        };
        self.awaiting_create = None;

        match outcome {
            Ok(created) => {
                self.created_message = created;
                self.new_content.clear();
                self.handle_get_message(store);
            }
            Err(err) => {
                if let Some(err) = err {
                    log::error!("Failed to create message: {err}");
                }
                self.created_message = None;
            }
        }
    }

    pub fn can_submit(&self, store: &Store) -> bool {
        !self.create_loading(store) && !self.new_content.trim().is_empty()
    }

    pub fn health_loading(&self, store: &Store) -> bool {
        self.health.state(store).is_loading()
    }

    pub fn message_loading(&self, store: &Store) -> bool {
        self.message.state(store).is_loading()
    }

    pub fn create_loading(&self, store: &Store) -> bool {
        self.create
            .state(store)
            .is_some_and(|mutation| mutation.is_loading())
    }

    pub fn visible_health<'s>(&self, store: &'s Store) -> Option<&'s HealthStatus> {
        if !self.show_health_data {
            return None;
        }
        self.health
            .state(store)
            .data
            .and_then(ApiResponse::as_health)
    }

    pub fn visible_message<'s>(&self, store: &'s Store) -> Option<&'s Message> {
        if !self.show_message_data {
            return None;
        }
        self.message
            .state(store)
            .data
            .and_then(ApiResponse::as_message)
    }

    pub fn health_error(&self, store: &Store) -> Option<String> {
        self.health.state(store).error.map(error_text)
    }

    pub fn message_error(&self, store: &Store) -> Option<String> {
        self.message.state(store).error.map(error_text)
    }

    pub fn create_error(&self, store: &Store) -> Option<String> {
        self.create
            .state(store)
            .and_then(|mutation| mutation.error.as_ref())
            .map(error_text)
    }
}

impl Default for ApiDemoState {
    fn default() -> Self {
        Self::new()
    }
}

/// Hai view và view nào đang hiển thị.
#[derive(Debug)]
pub struct ViewState {
    pub active_view: ViewKind,
    pub motd: MotdViewState,
    pub demo: ApiDemoState,
}

impl ViewState {
    pub fn new(start_view: ViewKind) -> Self {
        Self {
            active_view: start_view,
            motd: MotdViewState::new(),
            demo: ApiDemoState::new(),
        }
    }

    /// Mounts the active view's subscription. Safe to call every frame.
    pub fn mount_active(&mut self, store: &mut Store) {
        if self.active_view == ViewKind::Motd {
            self.motd.mount(store);
        }
    }

    /// Leaving the MOTD view drops its subscription so invalidation can evict the entry.
    pub fn switch_to(&mut self, view: ViewKind, store: &mut Store) {
        if view == self.active_view {
            return;
        }
        if self.active_view == ViewKind::Motd {
            self.motd.unmount(store);
        }
        self.active_view = view;
        self.mount_active(store);
    }
}

fn error_text(err: &crate::error::ApiError) -> String {
    format!("Error: {}", err.display_json())
}
