//! Desktop client for a message-of-the-day HTTP API.

pub mod common;
pub mod config;
pub mod error;
pub mod network;
pub mod store;
pub mod ui;
