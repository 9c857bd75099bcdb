//! Display helpers shared by the terminal renderers.

/// Formats a temperature in degrees Celsius with one decimal place.
pub fn format_temperature(celsius: f64) -> String {
    format!("{:.1}°C", celsius)
}

/// Formats a latitude/longitude pair with four decimal places each.
///
/// Values that do not parse as numbers are shown verbatim.
pub fn format_location(lat: &str, lon: &str) -> String {
    match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) => format!("{:.4}, {:.4}", lat, lon),
        _ => format!("{}, {}", lat, lon),
    }
}

/// Formats a `"lat,lon"` string as produced by the analysis service.
pub fn format_location_pair(location: &str) -> String {
    match location.split_once(',') {
        Some((lat, lon)) => format_location(lat, lon),
        None => location.to_string(),
    }
}

/// Formats a model confidence in the range 0..=1 as a percentage.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
