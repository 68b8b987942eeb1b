use super::{decode_attraction_list, ApiError, AttractionApi};
use crate::config::BackendSettings;
use crate::models::{Attraction, AttractionDetail, CityRequest};
use crate::utils::{clean_utf8, truncate_str};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Longest error body quoted in `ApiError::Status`.
const ERROR_BODY_MAX_CHARS: usize = 300;

/// `AttractionApi` implementation backed by `reqwest`.
#[derive(Clone)]
pub struct HttpAttractionClient {
    http: HttpClient,
    base_url: String,
}

impl HttpAttractionClient {
    /// Client for the backend described by `settings`.
    #[must_use]
    pub fn new(settings: &BackendSettings) -> Self {
        Self::with_base_url(
            settings.api_base(),
            Duration::from_secs(settings.http_timeout_secs),
        )
    }

    /// Client for `base_url` with the given per-request timeout.
    #[must_use]
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    timeout_secs = timeout.as_secs(),
                    "HTTP client builder failed, falling back to defaults without timeout: {e}"
                );
                HttpClient::new()
            });
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the request and returns the cleaned body of a successful response.
    async fn fetch(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = clean_utf8(&bytes).into_owned();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: describe_error_body(&body),
            });
        }

        debug!(status = status.as_u16(), bytes = bytes.len(), "Backend response received");
        Ok(body)
    }
}

/// Summarises an error body without echoing HTML error pages from proxies.
fn describe_error_body(body: &str) -> String {
    let trimmed = body.trim_start();
    let is_html = trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<HTML");

    if is_html {
        "server returned an HTML error page".to_string()
    } else if body.chars().count() > ERROR_BODY_MAX_CHARS {
        format!("{}... (truncated)", truncate_str(body, ERROR_BODY_MAX_CHARS))
    } else {
        body.to_string()
    }
}

#[async_trait]
impl AttractionApi for HttpAttractionClient {
    #[instrument(skip(self))]
    async fn search_by_city(&self, city: &str) -> Result<Vec<Attraction>, ApiError> {
        let url = format!("{}/cities/", self.base_url);
        let body = self
            .fetch(self.http.post(url).json(&CityRequest { city }))
            .await?;
        decode_attraction_list(&body)
    }

    #[instrument(skip(self))]
    async fn search_by_location(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Vec<Attraction>, ApiError> {
        let url = format!("{}/map/attractions/", self.base_url);
        let query = [
            ("lat", format!("{latitude:.6}")),
            ("lng", format!("{longitude:.6}")),
            ("radius", format!("{radius:.6}")),
        ];
        let body = self.fetch(self.http.get(url).query(&query)).await?;
        decode_attraction_list(&body)
    }

    #[instrument(skip(self))]
    async fn attraction_detail(&self, id: i64) -> Result<AttractionDetail, ApiError> {
        let url = format!("{}/attractions/{id}/", self.base_url);
        let body = self.fetch(self.http.get(url)).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client = HttpAttractionClient::with_base_url("http://api.local/v1/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://api.local/v1");
    }

    #[test]
    fn test_html_error_page_not_echoed() {
        let message = describe_error_body("<!DOCTYPE html><html><body>502</body></html>");
        assert_eq!(message, "server returned an HTML error page");
    }

    #[test]
    fn test_long_error_body_truncated() {
        let message = describe_error_body(&"e".repeat(1000));
        assert!(message.ends_with("... (truncated)"));
        assert!(message.len() < 400);
    }
}
