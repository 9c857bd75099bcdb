use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default base URL of the auth and analysis service
pub const DEFAULT_API_URL: &str = "https://mhenga-crop-bot.onrender.com";

/// Default base URL of the Nominatim geocoder
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the auth and analysis service
    pub api_url: ConfigValue<String>,
    /// Base URL of the geocoding service
    pub geocoder_url: ConfigValue<String>,
    /// Directory holding the session file
    pub data_dir: ConfigValue<PathBuf>,
    /// Per-request timeout in seconds
    pub timeout_secs: ConfigValue<u64>,
    /// User-Agent sent with every request
    pub user_agent: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    geocoder_url: Option<String>,
    data_dir: Option<PathBuf>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut geocoder_url =
            ConfigValue::new(DEFAULT_GEOCODER_URL.to_string(), ConfigSource::Default);
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut timeout_secs = ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default);
        let mut user_agent = ConfigValue::new(Self::default_user_agent(), ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(url) = file_config.geocoder_url {
                geocoder_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(secs) = file_config.timeout_secs {
                timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
            if let Some(agent) = file_config.user_agent {
                user_agent = ConfigValue::new(agent, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("CROPBOT_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("CROPBOT_GEOCODER_URL") {
            geocoder_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("CROPBOT_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(secs) = std::env::var("CROPBOT_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue("CROPBOT_TIMEOUT_SECS".to_string(), secs))?;
            timeout_secs = ConfigValue::new(secs, ConfigSource::Environment);
        }

        // Trailing slashes would double up when joining endpoint paths
        api_url.value = api_url.value.trim_end_matches('/').to_string();
        geocoder_url.value = geocoder_url.value.trim_end_matches('/').to_string();

        Ok(Self {
            api_url,
            geocoder_url,
            data_dir,
            timeout_secs,
            user_agent,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/cropbot/
    /// - macOS: ~/Library/Application Support/cropbot/
    /// - Windows: %APPDATA%/cropbot/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cropbot")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/cropbot/
    /// - macOS: ~/Library/Application Support/cropbot/
    /// - Windows: %APPDATA%/cropbot/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cropbot")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }

    fn default_user_agent() -> String {
        format!("cropbot/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Timeout applied to each outgoing request
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.value)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, DEFAULT_API_URL);
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.geocoder_url.value, DEFAULT_GEOCODER_URL);
        assert_eq!(config.timeout_secs.value, 30);
        assert!(config.user_agent.value.starts_with("cropbot/"));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_url: http://127.0.0.1:5000/").unwrap();
        writeln!(file, "data_dir: /custom/data").unwrap();
        writeln!(file, "timeout_secs: 5").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.api_url.value, "http://127.0.0.1:5000");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/data"));
        assert_eq!(config.timeout_secs.value, 5);
        assert_eq!(config.geocoder_url.source, ConfigSource::Default);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_dir_resolved_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "data_dir: state\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("state"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "api_url: http://fromfile\n").unwrap();

        std::env::set_var("CROPBOT_API_URL", "http://fromenv");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, "http://fromenv");
        assert_eq!(config.api_url.source, ConfigSource::Environment);

        std::env::remove_var("CROPBOT_API_URL");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
