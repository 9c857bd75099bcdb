//! Clients for the remote services the CLI talks to.

mod analysis;
mod auth;
mod error;
mod geocode;

pub use analysis::AnalysisClient;
pub use auth::AuthClient;
pub use error::ApiError;
pub use geocode::Geocoder;

use crate::config::Config;

/// Builds the HTTP client used for every request of a command.
pub fn http_client(config: &Config) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.value.clone())
        .build()
        .map_err(|e| ApiError::HttpError(e.to_string()))
}

/// Turns a non-success response into an [`ApiError::ServerError`].
///
/// Uses the `error` field of a JSON body when present, `default` otherwise.
async fn error_from_response(response: reqwest::Response, default: &str) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body["error"].as_str().unwrap_or(default).to_string(),
        Err(_) => default.to_string(),
    };
    tracing::debug!("Server responded {}: {}", status, message);
    ApiError::ServerError { status, message }
}
