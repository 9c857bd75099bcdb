//! Client for the image analysis endpoints.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::{error_from_response, ApiError};
use crate::config::Config;
use crate::models::{Coordinates, Diagnosis, ImageUpload};

/// Banner returned by `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Analysis service client.
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, config.api_url.value.clone())
    }

    /// Uploads `image` with the field location and returns the diagnosis.
    pub async fn analyze(
        &self,
        image: &ImageUpload,
        coords: &Coordinates,
        token: &str,
    ) -> Result<Diagnosis, ApiError> {
        let form = Form::new()
            .part("file", image_part(image).await?)
            .text("lat", coords.lat.clone())
            .text("lon", coords.lon.clone());

        tracing::debug!("Sending analyze request with file: {}", image.file_name());
        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Analysis failed").await);
        }

        let diagnosis: Diagnosis = response.json().await?;
        tracing::info!(
            "Analysis complete: disease={}, crop={}",
            diagnosis.disease_name.as_deref().unwrap_or("?"),
            diagnosis.crop_english_name.as_deref().unwrap_or("?")
        );
        Ok(diagnosis)
    }

    /// Runs the unauthenticated detection endpoint and returns its raw JSON.
    pub async fn detect(&self, image: &ImageUpload) -> Result<serde_json::Value, ApiError> {
        let form = Form::new().part("file", image_part(image).await?);

        tracing::debug!("Sending detection request with file: {}", image.file_name());
        let response = self
            .http
            .post(format!("{}/debug/test-disease", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Detection failed").await);
        }

        Ok(response.json().await?)
    }

    /// Fetches the service banner.
    pub async fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        let response = self.http.get(format!("{}/", self.base_url)).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, "Service unavailable").await);
        }
        Ok(response.json().await?)
    }
}

async fn image_part(image: &ImageUpload) -> Result<Part, ApiError> {
    let bytes = image.read().await?;
    Part::bytes(bytes)
        .file_name(image.file_name().to_string())
        .mime_str(image.mime())
        .map_err(|e| ApiError::InvalidInput(e.to_string()))
}
