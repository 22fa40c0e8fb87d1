//! Khai báo ba endpoint của API và tag cache của chúng.

use std::fmt;

pub const HEALTH_PATH: &str = "health";
pub const MESSAGE_OF_THE_DAY_PATH: &str = "api/messageoftheday";

/// Cache tag category. Queries provide tags, mutations invalidate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    MessageOfTheDay,
    HealthCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    GetMessageOfTheDay,
    CreateMessageOfTheDay(String),
    GetHealthCheck,
}

/// Identity of one query cache entry: endpoint name plus serialized argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GetMessageOfTheDay => "getMessageOfTheDay",
            Endpoint::CreateMessageOfTheDay(_) => "createMessageOfTheDay",
            Endpoint::GetHealthCheck => "getHealthCheck",
        }
    }

    pub fn kind(&self) -> EndpointKind {
        match self {
            Endpoint::GetMessageOfTheDay | Endpoint::GetHealthCheck => EndpointKind::Query,
            Endpoint::CreateMessageOfTheDay(_) => EndpointKind::Mutation,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::GetMessageOfTheDay | Endpoint::CreateMessageOfTheDay(_) => {
                MESSAGE_OF_THE_DAY_PATH
            }
            Endpoint::GetHealthCheck => HEALTH_PATH,
        }
    }

    pub fn provides(&self) -> &'static [Tag] {
        match self {
            Endpoint::GetMessageOfTheDay => &[Tag::MessageOfTheDay],
            Endpoint::GetHealthCheck => &[Tag::HealthCheck],
            Endpoint::CreateMessageOfTheDay(_) => &[],
        }
    }

    pub fn invalidates(&self) -> &'static [Tag] {
        match self {
            Endpoint::CreateMessageOfTheDay(_) => &[Tag::MessageOfTheDay],
            Endpoint::GetMessageOfTheDay | Endpoint::GetHealthCheck => &[],
        }
    }

    /// `None` for mutations, which are tracked per request instead.
    pub fn query_key(&self) -> Option<QueryKey> {
        match self.kind() {
            // Query endpoints take no argument.
            EndpointKind::Query => Some(QueryKey(format!("{}(undefined)", self.name()))),
            EndpointKind::Mutation => None,
        }
    }
}

/// Nối base URL với path, không bị lặp `/`.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
