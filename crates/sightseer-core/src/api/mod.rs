//! Attraction backend client
//!
//! Three calls are made against the backend: search by city, search around a
//! point, and fetch a single attraction. Failures are reported once and never
//! retried; the caller decides what to show the user.

mod client;
mod envelope;

pub use client::HttpAttractionClient;
pub use envelope::{decode_attraction_list, ListEnvelope};

use crate::models::{Attraction, AttractionDetail};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure, timeout or interrupted body
    #[error("Network error: {0}")]
    Network(String),
    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Short description of the response body
        message: String,
    },
    /// Response body did not match any known JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Interface to the attraction backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttractionApi: Send + Sync {
    /// Attractions located in `city`, in backend order.
    async fn search_by_city(&self, city: &str) -> Result<Vec<Attraction>, ApiError>;

    /// Attractions within `radius` of the given point, in backend order.
    async fn search_by_location(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Vec<Attraction>, ApiError>;

    /// Full record for one attraction.
    async fn attraction_detail(&self, id: i64) -> Result<AttractionDetail, ApiError>;
}
