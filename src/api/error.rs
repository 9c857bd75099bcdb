//! Error type shared by the remote service clients.

use crate::models::ImageError;
use crate::session::SessionError;

/// Errors that can occur talking to the auth, geocoding and analysis services.
#[derive(Debug)]
pub enum ApiError {
    /// Request could not be sent or the connection failed
    HttpError(String),
    /// Server answered with a non-success status
    ServerError { status: u16, message: String },
    /// Response body was not the expected JSON
    DecodeError(String),
    /// A required value was missing or malformed before any request was made
    InvalidInput(String),
    /// No stored token
    NotLoggedIn,
    /// Location string was empty
    LocationRequired,
    /// Geocoder returned no match
    LocationNotFound(String),
    /// Geocoder failed for another reason
    GeocodeError(Box<ApiError>),
    /// Selected file is unusable
    Image(ImageError),
    /// Session file could not be read or written
    Session(SessionError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::HttpError(e) => write!(f, "HTTP error: {}", e),
            ApiError::ServerError { message, .. } => write!(f, "{}", message),
            ApiError::DecodeError(e) => write!(f, "Unexpected response: {}", e),
            ApiError::InvalidInput(e) => write!(f, "{}", e),
            ApiError::NotLoggedIn => {
                write!(f, "Not logged in. Run 'cropbot auth login' first.")
            }
            ApiError::LocationRequired => write!(f, "Location is required"),
            ApiError::LocationNotFound(location) => {
                write!(f, "Location not found: {}", location)
            }
            ApiError::GeocodeError(e) => write!(f, "Could not get coordinates: {}", e),
            ApiError::Image(e) => write!(f, "{}", e),
            ApiError::Session(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::DecodeError(e.to_string())
        } else {
            ApiError::HttpError(e.to_string())
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(e: ImageError) -> Self {
        ApiError::Image(e)
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError::Session(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // main prefixes every message with "Error: "
    #[test]
    fn test_messages_do_not_repeat_error_prefix() {
        let errors = [
            ApiError::LocationRequired,
            ApiError::LocationNotFound("Atlantis".to_string()),
            ApiError::GeocodeError(Box::new(ApiError::HttpError("timed out".to_string()))),
            ApiError::NotLoggedIn,
        ];
        for err in errors {
            assert!(
                !err.to_string().to_lowercase().starts_with("error"),
                "{}",
                err
            );
        }
    }

    #[test]
    fn test_geocode_messages() {
        assert_eq!(
            ApiError::LocationNotFound("Atlantis".to_string()).to_string(),
            "Location not found: Atlantis"
        );
        assert_eq!(
            ApiError::GeocodeError(Box::new(ApiError::HttpError("timed out".to_string())))
                .to_string(),
            "Could not get coordinates: HTTP error: timed out"
        );
    }
}
