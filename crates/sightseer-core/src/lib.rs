#![deny(missing_docs)]
//! Sightseer core library.
//!
//! Transport-agnostic logic for attraction search: backend client, session
//! store, pagination and message rendering.

/// Attraction backend HTTP client.
pub mod api;
/// Event handling that turns searches and button presses into replies.
pub mod browser;
/// Configuration management.
pub mod config;
/// Attraction records returned by the backend.
pub mod models;
/// Paging over a stored result list.
pub mod pagination;
/// Per-conversation search state storage.
pub mod session;
/// Utility functions.
pub mod utils;
/// Message texts and inline button layouts.
pub mod view;

#[cfg(test)]
pub mod testing;

pub use browser::{AttractionBrowser, Reply};
pub use session::{ConversationId, InMemorySessionStore, SessionStore};
