//! Location lookup against a Nominatim-compatible geocoder.

use super::ApiError;
use crate::config::Config;
use crate::models::Coordinates;

/// Resolves free-form place names to coordinates.
pub struct Geocoder {
    http: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, config.geocoder_url.value.clone())
    }

    /// Returns the coordinates of the best match for `location`.
    pub async fn lookup(&self, location: &str) -> Result<Coordinates, ApiError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ApiError::LocationRequired);
        }

        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(location)
        );
        tracing::debug!("Geocoding '{}'", location);

        let matches = self.search(&url).await.map_err(|e| match e {
            ApiError::ServerError { .. } | ApiError::HttpError(_) | ApiError::DecodeError(_) => {
                ApiError::GeocodeError(Box::new(e))
            }
            other => other,
        })?;

        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::LocationNotFound(location.to_string()))?;
        tracing::info!("Resolved '{}' to {},{}", location, first.lat, first.lon);
        Ok(first)
    }

    async fn search(&self, url: &str) -> Result<Vec<Coordinates>, ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::ServerError {
                status: response.status().as_u16(),
                message: format!("Geocoder returned {}", response.status()),
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn mock_geocoder() -> Router {
        Router::new().route(
            "/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("format").map(String::as_str), Some("json"));
                let body = match params.get("q").map(String::as_str) {
                    Some("Nairobi") => json!([
                        {"lat": "-1.2832533", "lon": "36.8172449", "display_name": "Nairobi, Kenya", "importance": 0.8},
                        {"lat": "-1.3", "lon": "36.9", "display_name": "Nairobi County, Kenya"}
                    ]),
                    Some("Kisumu & Lake Victoria") => json!([
                        {"lat": "-0.0917", "lon": "34.7680"}
                    ]),
                    _ => json!([]),
                };
                Json(body)
            }),
        )
    }

    async fn geocoder() -> Geocoder {
        let base_url = test_server::spawn(mock_geocoder()).await;
        Geocoder::new(reqwest::Client::new(), base_url)
    }

    #[tokio::test]
    async fn test_lookup_uses_first_match() {
        let geocoder = geocoder().await;

        let coords = geocoder.lookup("Nairobi").await.unwrap();
        assert_eq!(coords.lat, "-1.2832533");
        assert_eq!(coords.lon, "36.8172449");
        assert_eq!(coords.display_name.as_deref(), Some("Nairobi, Kenya"));
    }

    #[tokio::test]
    async fn test_lookup_encodes_query() {
        let geocoder = geocoder().await;

        let coords = geocoder.lookup("  Kisumu & Lake Victoria ").await.unwrap();
        assert_eq!(coords, Coordinates::new("-0.0917", "34.7680"));
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let geocoder = geocoder().await;

        let err = geocoder.lookup("Atlantis").await.unwrap_err();
        assert!(matches!(err, ApiError::LocationNotFound(_)));
        assert!(err.to_string().contains("Location not found"));
    }

    #[tokio::test]
    async fn test_blank_location_is_required() {
        let geocoder = geocoder().await;

        let err = geocoder.lookup("   ").await.unwrap_err();
        assert!(matches!(err, ApiError::LocationRequired));
    }

    #[tokio::test]
    async fn test_geocoder_failure_is_wrapped() {
        let app = Router::new().route(
            "/search",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(Value::Null)) }),
        );
        let base_url = test_server::spawn(app).await;
        let geocoder = Geocoder::new(reqwest::Client::new(), base_url);

        let err = geocoder.lookup("Nairobi").await.unwrap_err();
        assert!(matches!(err, ApiError::GeocodeError(_)));
        assert!(err.to_string().starts_with("Could not get coordinates:"));
    }
}
