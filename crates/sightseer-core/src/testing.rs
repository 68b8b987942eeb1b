//! Testing helpers and mock utilities.
//!
//! Provides sample backend data and convenient constructors for mocked APIs.

use crate::api::{ApiError, MockAttractionApi};
use crate::models::{Attraction, AttractionDetail};

/// `count` attractions with ids `1..=count`; odd ids carry a rating.
#[must_use]
pub fn sample_attractions(count: usize) -> Vec<Attraction> {
    (1..=count)
        .map(|i| {
            let id = i64::try_from(i).unwrap_or(i64::MAX);
            Attraction {
                id,
                name: format!("Attraction {i}"),
                city: "Moscow".to_string(),
                address: format!("Street {i}"),
                description: format!("Description of attraction {i}"),
                rating: if i % 2 == 1 { 4.5 } else { 0.0 },
                main_photo_url: String::new(),
                latitude: 55.75,
                longitude: 37.61,
            }
        })
        .collect()
}

/// Detail record matching `sample_attractions` entry `id`.
#[must_use]
pub fn sample_detail(id: i64) -> AttractionDetail {
    AttractionDetail {
        id,
        name: format!("Attraction {id}"),
        city: "Moscow".to_string(),
        address: format!("Street {id}"),
        description: format!("Description of attraction {id}"),
        full_description: format!("Long description of attraction {id}"),
        working_hours: "09:00-18:00".to_string(),
        ..AttractionDetail::default()
    }
}

/// Create a mock API whose city search returns `count` sample attractions.
///
/// Location search and detail lookups are not expected; a test that needs them
/// adds its own expectations.
#[must_use]
pub fn mock_api_with_city_results(count: usize) -> MockAttractionApi {
    let mut mock = MockAttractionApi::new();
    mock.expect_search_by_city()
        .returning(move |_| Ok(sample_attractions(count)));
    mock
}

/// Create a mock API where every call fails with a network error.
#[must_use]
pub fn mock_api_offline() -> MockAttractionApi {
    let mut mock = MockAttractionApi::new();
    mock.expect_search_by_city()
        .returning(|_| Err(ApiError::Network("connection refused".to_string())));
    mock.expect_search_by_location()
        .returning(|_, _, _| Err(ApiError::Network("connection refused".to_string())));
    mock.expect_attraction_detail()
        .returning(|_| Err(ApiError::Network("connection refused".to_string())));
    mock
}
