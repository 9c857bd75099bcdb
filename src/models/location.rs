use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::format_location;

/// Coordinates resolved by the geocoder.
///
/// Latitude and longitude stay as the strings the geocoder returned so they
/// are forwarded to the analysis service untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: String,
    pub lon: String,
    /// Human-readable name of the match, when the geocoder provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Coordinates {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
            display_name: None,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_location(&self.lat, &self.lon))?;
        if let Some(name) = &self.display_name {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}
