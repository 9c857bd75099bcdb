use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::{format_confidence, format_location_pair, format_temperature};

/// Temperature reported by the analysis service.
///
/// The service sends a number when the weather lookup had a reading and the
/// string `"Unknown"` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Celsius(f64),
    Text(String),
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Celsius(c) => write!(f, "{}", format_temperature(*c)),
            Temperature::Text(s) => match s.trim().parse::<f64>() {
                Ok(c) if c.is_finite() => write!(f, "{}", format_temperature(c)),
                _ => write!(f, "{}", s),
            },
        }
    }
}

/// Diagnosis returned by `POST /analyze`.
///
/// Every field is optional; the renderer substitutes a fallback for anything
/// the service left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(
        rename = "temperature_celsius",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_description: Option<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub control: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_english_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_scientific_name: Option<String>,
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Detected Crop")?;
        writeln!(f, "English Name: {}", or_unknown(&self.crop_english_name))?;
        writeln!(
            f,
            "Scientific Name: {}",
            or_unknown(&self.crop_scientific_name)
        )?;
        writeln!(f)?;

        heading(f, &format!("Disease: {}", or_unknown(&self.disease_name)))?;
        if let Some(description) = &self.disease_description {
            writeln!(f, "{}", description)?;
        }
        if let Some(confidence) = self.disease_confidence {
            writeln!(f, "Confidence: {}", format_confidence(confidence))?;
        }
        writeln!(f)?;

        heading(f, "Prevention")?;
        writeln!(
            f,
            "{}",
            join_or(&self.prevention, "No prevention tips available")
        )?;
        writeln!(f)?;

        heading(f, "Control/Cure")?;
        writeln!(f, "{}", join_or(&self.control, "No cure info available"))?;
        writeln!(f)?;

        heading(f, "Planting Recommendation")?;
        writeln!(f, "{}", or_unknown(&self.recommendation))?;
        writeln!(f)?;

        heading(f, "Weather Information")?;
        writeln!(f, "Weather: {}", or_unknown(&self.weather))?;
        match &self.temperature {
            Some(temp) => writeln!(f, "Temperature: {}", temp)?,
            None => writeln!(f, "Temperature: Unknown")?,
        }
        match &self.location {
            Some(location) => write!(f, "Location: {}", format_location_pair(location)),
            None => write!(f, "Location: Unknown"),
        }
    }
}
