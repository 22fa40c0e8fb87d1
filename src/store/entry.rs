use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::common::ApiResponse;
use crate::error::ApiError;
use crate::network::{Endpoint, Tag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStatus {
    #[default]
    Uninitialized,
    Pending,
    Fulfilled,
    Rejected,
}

/// One cached query result.
#[derive(Debug, Clone)]
pub struct QueryEntry {
    pub endpoint: Endpoint,
    pub status: QueryStatus,
    pub data: Option<ApiResponse>,
    pub error: Option<ApiError>,
    /// Request whose settlement ends `Pending`.
    pub request_id: Option<Uuid>,
    /// Set by every successful response; `None` means nothing was ever loaded.
    pub fulfilled_at: Option<DateTime<Utc>>,
    pub subscribers: usize,
}

impl QueryEntry {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            status: QueryStatus::Uninitialized,
            data: None,
            error: None,
            request_id: None,
            fulfilled_at: None,
            subscribers: 0,
        }
    }

    pub fn begin(&mut self, request_id: Uuid) {
        self.status = QueryStatus::Pending;
        self.request_id = Some(request_id);
    }

    /// Mọi response đều ghi đè dữ liệu (last response wins); chỉ request hiện tại mới kết thúc `Pending`.
    pub fn settle(&mut self, request_id: Uuid, result: Result<ApiResponse, ApiError>) {
        let is_current = self.request_id == Some(request_id);
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.fulfilled_at = Some(Utc::now());
                if is_current {
                    self.status = QueryStatus::Fulfilled;
                }
            }
            Err(err) => {
                self.error = Some(err);
                if is_current {
                    self.status = QueryStatus::Rejected;
                }
            }
        }
    }

    /// A new subscriber fetches unless a request is in flight or data was loaded before.
    pub fn needs_fetch_on_subscribe(&self) -> bool {
        self.status != QueryStatus::Pending && self.fulfilled_at.is_none()
    }

    pub fn provides_any(&self, tags: &[Tag]) -> bool {
        self.endpoint
            .provides()
            .iter()
            .any(|tag| tags.contains(tag))
    }
}

/// Read-only snapshot handed to views.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryView<'a> {
    pub status: QueryStatus,
    pub data: Option<&'a ApiResponse>,
    pub error: Option<&'a ApiError>,
}

impl<'a> QueryView<'a> {
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn from_entry(entry: &'a QueryEntry) -> Self {
        Self {
            status: entry.status,
            data: entry.data.as_ref(),
            error: entry.error.as_ref(),
        }
    }

    /// First load: pending with nothing to show yet.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending && self.data.is_none()
    }

    pub fn is_fetching(&self) -> bool {
        self.status == QueryStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Fulfilled
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Rejected
    }

    pub fn is_uninitialized(&self) -> bool {
        self.status == QueryStatus::Uninitialized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Pending,
    Fulfilled,
    Rejected,
}

/// Result of one mutation call, keyed by its request id in the store.
#[derive(Debug, Clone)]
pub struct MutationEntry {
    pub endpoint: Endpoint,
    pub status: MutationStatus,
    pub data: Option<ApiResponse>,
    pub error: Option<ApiError>,
}

impl MutationEntry {
    pub fn pending(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            status: MutationStatus::Pending,
            data: None,
            error: None,
        }
    }

    pub fn settle(&mut self, result: Result<ApiResponse, ApiError>) {
        match result {
            Ok(data) => {
                self.status = MutationStatus::Fulfilled;
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                self.status = MutationStatus::Rejected;
                self.data = None;
                self.error = Some(err);
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == MutationStatus::Pending
    }
}
