//! Clients for the platform REST API
//!
//! This module provides:
//! - Collaborator traits for events and guests, so the TUI can be driven
//!   by fakes in tests
//! - A reqwest implementation of both traits
//! - Error handling with status mapping

pub mod error;
pub mod events;
pub mod guests;
pub mod http;

use std::fmt;

use serde::Deserialize;

pub use error::ApiError;
pub use events::{EventRecord, EventsApi, CREATE_EVENT_PATH, LIST_EVENTS_PATH};
pub use guests::{participants_path, GuestRecord, GuestsApi, CREATE_GUEST_PATH};
pub use http::HttpApiClient;

/// Identifier that the platform sends as either a string or a number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Text(s) => f.write_str(s),
            IdValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Response body, wrapped in `{"data": ...}` or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}
