//! Response envelopes for attraction lists.
//!
//! The backend wraps lists either in a dedicated `{"attractions": [...]}`
//! object or in the generic paged `{"results": [...]}` object. The dedicated
//! shape wins when both would match.

use super::ApiError;
use crate::models::Attraction;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct DedicatedEnvelope {
    attractions: Vec<Attraction>,
}

#[derive(Deserialize)]
struct PagedEnvelope {
    results: Vec<Attraction>,
}

/// Which envelope an attraction list arrived in.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope {
    /// `{"attractions": [...]}`
    Dedicated(Vec<Attraction>),
    /// `{"results": [...]}`
    Paged(Vec<Attraction>),
}

impl ListEnvelope {
    /// Decode `body`, trying the dedicated shape first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` when neither shape matches.
    pub fn decode(body: &str) -> Result<Self, ApiError> {
        let dedicated_err = match serde_json::from_str::<DedicatedEnvelope>(body) {
            Ok(envelope) => return Ok(Self::Dedicated(envelope.attractions)),
            Err(e) => e,
        };

        match serde_json::from_str::<PagedEnvelope>(body) {
            Ok(envelope) => Ok(Self::Paged(envelope.results)),
            Err(paged_err) => Err(ApiError::Decode(format!(
                "expected {{\"attractions\": [...]}} ({dedicated_err}) or {{\"results\": [...]}} ({paged_err})"
            ))),
        }
    }

    /// The attractions, whichever envelope carried them.
    #[must_use]
    pub fn into_attractions(self) -> Vec<Attraction> {
        match self {
            Self::Dedicated(list) | Self::Paged(list) => list,
        }
    }
}

/// Decode an attraction list from either supported envelope.
///
/// # Errors
///
/// Returns `ApiError::Decode` when the body matches neither envelope.
pub fn decode_attraction_list(body: &str) -> Result<Vec<Attraction>, ApiError> {
    let envelope = ListEnvelope::decode(body)?;
    if matches!(envelope, ListEnvelope::Paged(_)) {
        debug!("Attraction list decoded from paged envelope");
    }
    Ok(envelope.into_attractions())
}
