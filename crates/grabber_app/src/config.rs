//! Host configuration, read from an optional RON file.
//!
//! Every field has a default, so a missing file or a partial file is fine;
//! a file that exists but does not parse is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use grabber_core::{CoreSettings, DEFAULT_MIN_PAYLOAD_BYTES};
use grabber_engine::FetchSettings;
use grabber_logging::{parse_level, LogDestination, LogSettings};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub output_dir: PathBuf,
    pub min_payload_bytes: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base_url: fetch.base_url,
            output_dir: PathBuf::from("downloads"),
            min_payload_bytes: DEFAULT_MIN_PAYLOAD_BYTES,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(url) = &cli.api_base_url {
            self.api_base_url = url.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        self
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }

    pub fn core_settings(&self) -> CoreSettings {
        CoreSettings {
            min_payload_bytes: self.min_payload_bytes,
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        let level = parse_level(&self.log_level).unwrap_or_else(|| {
            eprintln!(
                "Warning: unknown log level {:?}, using info",
                self.log_level
            );
            LevelFilter::Info
        });
        let destination = match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        };
        LogSettings { destination, level }
    }
}
