//! Client for the login, signup and password reset endpoints.

use email_address::EmailAddress;
use serde::Deserialize;

use super::{error_from_response, ApiError};
use crate::config::Config;
use crate::models::User;

/// Successful `POST /login` body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{"message": ...}` body
#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Auth service client.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, config.api_url.value.clone())
    }

    /// Exchanges credentials for a bearer token and the user's profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let email = require(email, "Email and password are required")?;
        require_present(password, "Email and password are required")?;
        validate_email(email)?;

        tracing::debug!("Logging in as {}", email);
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Auth failed").await);
        }

        let login: LoginResponse = response.json().await?;
        tracing::info!("Logged in as {}", login.user.email);
        Ok(login)
    }

    /// Creates an account. Does not log in.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<String, ApiError> {
        const REQUIRED: &str = "All fields (name, email, password) are required";
        let name = require(name, REQUIRED)?;
        let email = require(email, REQUIRED)?;
        require_present(password, REQUIRED)?;
        validate_email(email)?;

        tracing::debug!("Signing up {}", email);
        let response = self
            .http
            .post(format!("{}/signup", self.base_url))
            .json(&serde_json::json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Auth failed").await);
        }

        message_or(response, "Signup successful").await
    }

    /// Asks the service to e-mail a password reset token.
    pub async fn request_password_reset(&self, email: &str) -> Result<String, ApiError> {
        let email = require(email, "Email is required")?;
        validate_email(email)?;

        tracing::debug!("Requesting password reset for {}", email);
        let response = self
            .http
            .post(format!("{}/reset-password-request", self.base_url))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Request failed").await);
        }

        message_or(response, "Reset link sent").await
    }

    /// Sets a new password using the token from the reset e-mail.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        let token = require(token, "Reset token is required")?;
        require_present(new_password, "New password is required")?;

        let url = format!(
            "{}/reset-password-confirm/{}",
            self.base_url,
            urlencoding::encode(token)
        );
        tracing::debug!("Confirming password reset");
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "new_password": new_password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Reset failed").await);
        }

        message_or(response, "Password has been reset").await
    }
}

fn require<'a>(value: &'a str, message: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(message.to_string()));
    }
    Ok(trimmed)
}

/// Rejects blank values without altering them; passwords are sent verbatim.
fn require_present(value: &str, message: &str) -> Result<(), ApiError> {
    require(value, message).map(|_| ())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    EmailAddress::parse_with_options(email, Default::default())
        .map(|_| ())
        .map_err(|_| ApiError::InvalidInput(format!("Invalid email address: {}", email)))
}

async fn message_or(response: reqwest::Response, default: &str) -> Result<String, ApiError> {
    let body: MessageResponse = response.json().await?;
    Ok(body.message.unwrap_or_else(|| default.to_string()))
}
