//! Attraction records as returned by the backend.
//!
//! The backend is loose about its JSON: strings may be `null`, and decimal
//! fields (rating, coordinates) may arrive either as numbers or as strings.
//! Both are normalised here so the rest of the crate sees plain values.

use serde::{Deserialize, Deserializer, Serialize};

/// Short attraction record used in search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    /// Backend identifier, used to fetch the detail record.
    pub id: i64,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// City the attraction belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    /// Street address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Short description.
    #[serde(
        rename = "description_short",
        default,
        deserialize_with = "null_as_default"
    )]
    pub description: String,
    /// Average rating; zero means the attraction has not been rated.
    #[serde(rename = "average_rating", default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    /// URL of the main photo.
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_photo_url: String,
    /// Latitude in degrees.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: f64,
}

impl Attraction {
    /// Rating worth showing, if any.
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        visible_rating(self.rating)
    }
}

/// Full attraction record shown when the user opens an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttractionDetail {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// City the attraction belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    /// Street address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Short description.
    #[serde(
        rename = "description_short",
        default,
        deserialize_with = "null_as_default"
    )]
    pub description: String,
    /// Long description.
    #[serde(rename = "description", default, deserialize_with = "null_as_default")]
    pub full_description: String,
    /// Opening hours as free text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub working_hours: String,
    /// Contact phone.
    #[serde(rename = "phone_number", default, deserialize_with = "null_as_default")]
    pub phone: String,
    /// Website URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    /// Ticket price as free text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost: String,
    /// Average rating; zero means the attraction has not been rated.
    #[serde(rename = "average_rating", default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    /// URL of the main photo.
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_photo_url: String,
    /// Latitude in degrees.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: f64,
    /// Extra photo URLs.
    #[serde(
        rename = "additional_photos",
        default,
        deserialize_with = "null_as_default"
    )]
    pub photos: Vec<String>,
}

impl AttractionDetail {
    /// Rating worth showing, if any.
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        visible_rating(self.rating)
    }

    /// Long description when present, otherwise the short one.
    #[must_use]
    pub fn best_description(&self) -> &str {
        if self.full_description.trim().is_empty() {
            &self.description
        } else {
            &self.full_description
        }
    }
}

/// Body of the city search request.
#[derive(Debug, Clone, Serialize)]
pub struct CityRequest<'a> {
    /// City name as typed by the user.
    pub city: &'a str,
}

fn visible_rating(rating: f64) -> Option<f64> {
    (rating.is_finite() && rating > 0.0).then_some(rating)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Ok(n),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(NumberOrText::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
        None => Ok(0.0),
    }
}
