pub mod client;
pub mod endpoints;
pub mod worker;

pub use client::MotdApiClient;
pub use endpoints::{Endpoint, EndpointKind, QueryKey, Tag};
pub use worker::ApiWorker;
