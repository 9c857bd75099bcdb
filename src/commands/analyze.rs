//! Image analysis commands.

use clap::Args;
use std::path::PathBuf;

use super::prompt::prompt_with_default;
use super::OutputFormat;
use crate::api::{http_client, AnalysisClient, ApiError, Geocoder};
use crate::config::Config;
use crate::models::{Diagnosis, ImageUpload};
use crate::session::SessionStore;

const DEFAULT_LOCATION: &str = "Nairobi";

/// Geocodes the field location, then submits the image for diagnosis.
pub struct Analyzer {
    geocoder: Geocoder,
    analysis: AnalysisClient,
}

impl Analyzer {
    pub fn new(geocoder: Geocoder, analysis: AnalysisClient) -> Self {
        Self { geocoder, analysis }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let http = http_client(config)?;
        Ok(Self::new(
            Geocoder::from_config(http.clone(), config),
            AnalysisClient::from_config(http, config),
        ))
    }

    pub async fn run(
        &self,
        image: &ImageUpload,
        location: &str,
        token: &str,
    ) -> Result<Diagnosis, ApiError> {
        let coords = self.geocoder.lookup(location).await?;
        tracing::debug!("Using coordinates {}", coords);
        self.analysis.analyze(image, &coords, token).await
    }
}

/// Analyze a crop image for disease
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Image of the affected plant
    image: PathBuf,

    /// Where the crop is grown (e.g. "Nairobi"); prompted if omitted
    #[arg(long, short)]
    location: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl AnalyzeCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let image = ImageUpload::from_path(&self.image).map_err(ApiError::from)?;
        eprintln!("{}", image);

        let store = SessionStore::with_data_dir(&config.data_dir.value);
        let token = store.token()?.ok_or(ApiError::NotLoggedIn)?;

        let location = match &self.location {
            Some(location) => location.clone(),
            None => prompt_with_default("Enter location (e.g., Nairobi)", DEFAULT_LOCATION)?,
        };

        let analyzer = Analyzer::from_config(config)?;
        let diagnosis = analyzer.run(&image, &location, &token).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diagnosis)?),
            OutputFormat::Text => println!("{}", diagnosis),
        }
        Ok(())
    }
}

/// Run raw disease detection on an image (no login required)
#[derive(Debug, Args)]
pub struct DetectCommand {
    /// Image of the affected plant
    image: PathBuf,
}

impl DetectCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let image = ImageUpload::from_path(&self.image).map_err(ApiError::from)?;
        eprintln!("{}", image);

        let client = AnalysisClient::from_config(http_client(config)?, config);
        let raw = client.detect(&image).await?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
        Ok(())
    }
}

/// Check that the analysis service is reachable
#[derive(Debug, Args)]
pub struct PingCommand {}

impl PingCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let client = AnalysisClient::from_config(http_client(config)?, config);
        let info = client.service_info().await?;

        println!("{}", config.api_url.value);
        match info.version {
            Some(version) => println!("  {} (version {})", info.message, version),
            None => println!("  {}", info.message),
        }
        Ok(())
    }
}
