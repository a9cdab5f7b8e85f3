use crate::filter::Combine;
use crate::level::LogLevel;
use crate::parser::{DEFAULT_CHUNK_LIMIT, LineParser, LogFormat, SAMPLE_LINES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Grammar used to parse input lines
    pub format: LogFormat,
    /// Characters per record before a message is split
    pub chunk_limit: usize,
    /// Quiet window before a filter request is evaluated
    pub debounce_ms: u64,
    /// Records shown on each side of a context window
    pub context_radius: usize,
    pub min_level: LogLevel,
    pub combine: Combine,
    /// Dataset used when no log file can be loaded
    pub sample_lines: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            debounce_ms: 800,
            context_radius: 250,
            min_level: LogLevel::Verbose,
            combine: Combine::default(),
            sample_lines: SAMPLE_LINES.iter().map(|line| line.to_string()).collect(),
        }
    }
}

impl ReaderConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn line_parser(&self) -> LineParser {
        LineParser::new(self.format).with_chunk_limit(self.chunk_limit)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_limit == 0 {
            return Err(ConfigError::Invalid(
                "chunk_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ReaderConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ReaderConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    let config = toml::from_str::<ReaderConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })?;
    config.validate()?;
    Ok(config)
}

pub fn default_config() -> &'static ReaderConfig {
    static DEFAULT_CONFIG: LazyLock<ReaderConfig> = LazyLock::new(ReaderConfig::default);
    &DEFAULT_CONFIG
}
