use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DirectoryError, Result};
use crate::pipeline::ingestion::CsvFileSource;
use crate::pipeline::processing::quality_gate::QualityGateConfig;

pub const DEFAULT_CONFIG_PATH: &str = "directory.toml";

pub const ENV_CSV_PATH: &str = "HOSPITAL_CSV_PATH";
pub const ENV_CSV_DELIMITER: &str = "HOSPITAL_CSV_DELIMITER";
pub const ENV_HOST: &str = "HOSPITAL_HOST";
pub const ENV_PORT: &str = "HOSPITAL_PORT";
pub const ENV_METRICS_PORT: &str = "HOSPITAL_METRICS_PORT";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub classifier: QualityGateConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataConfig {
    pub csv_path: PathBuf,
    pub delimiter: char,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/hospital_directory.csv"),
            delimiter: ',',
        }
    }
}

impl DataConfig {
    /// The configured CSV file as a row source. The delimiter must be one ASCII byte.
    pub fn source(&self) -> Result<CsvFileSource> {
        if !self.delimiter.is_ascii() {
            return Err(DirectoryError::Config(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(CsvFileSource::new(&self.csv_path).with_delimiter(self.delimiter as u8))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9898,
        }
    }
}

impl Config {
    /// Loads defaults, then `path` (or `directory.toml` if present), then
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DirectoryError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies overrides from `lookup` (the process environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup(ENV_CSV_PATH) {
            self.data.csv_path = PathBuf::from(path);
        }
        if let Some(delimiter) = lookup(ENV_CSV_DELIMITER) {
            self.data.delimiter = parse_delimiter(&delimiter)?;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = parse_port(ENV_PORT, &port)?;
        }
        if let Some(port) = lookup(ENV_METRICS_PORT) {
            self.metrics.port = parse_port(ENV_METRICS_PORT, &port)?;
            self.metrics.enabled = true;
        }
        Ok(())
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| DirectoryError::Config(format!("{key} must be a port number, got '{value}'")))
}

/// Parses a one-character delimiter such as `;` or a tab.
pub fn parse_delimiter(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DirectoryError::Config(format!(
            "CSV delimiter must be one character, got '{value}'"
        ))),
    }
}
