//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{config_files, files, gate, http, timeouts};
use crate::core::error::{Result, SieveError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Per-request timeout for the validation probe
    #[serde(default, with = "duration_field")]
    pub timeout: Option<Duration>,

    /// Maximum number of validation calls in flight
    pub concurrency: Option<usize>,

    /// Files smaller than this many bytes are read into memory
    pub memory_threshold: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Follow symbolic links while walking directories
    pub follow_links: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS)),
            concurrency: Some(gate::DEFAULT_CAPACITY),
            memory_threshold: Some(files::DEFAULT_MEMORY_THRESHOLD),
            user_agent: None,
            follow_links: Some(false),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SieveError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| SieveError::TomlParsing {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load the first config file found in the current directory or its parents,
    /// falling back to defaults when there is none
    pub fn load_from_standard_locations() -> Result<Self> {
        match Self::standard_locations()
            .into_iter()
            .find(|candidate| candidate.is_file())
        {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn standard_locations() -> Vec<PathBuf> {
        (0..=config_files::PARENT_SEARCH_DEPTH)
            .map(|depth| {
                PathBuf::from(format!("{}{}", "../".repeat(depth), config_files::FILE_NAME))
            })
            .collect()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(threshold) = cli_config.memory_threshold {
            self.memory_threshold = Some(threshold);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.follow_links {
            self.follow_links = Some(true);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
            .unwrap_or(Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Capacity of the concurrency gate
    pub fn gate_capacity(&self) -> usize {
        self.concurrency.unwrap_or(gate::DEFAULT_CAPACITY)
    }

    /// Size threshold between the in-memory and streaming read paths
    pub fn memory_threshold_bytes(&self) -> u64 {
        self.memory_threshold
            .unwrap_or(files::DEFAULT_MEMORY_THRESHOLD)
    }

    pub fn user_agent_header(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(http::DEFAULT_USER_AGENT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(SieveError::Config(
                    "Timeout cannot be 0. Expected a positive duration such as '10s'.".to_string(),
                ));
            }
            if timeout > Duration::from_secs(timeouts::MAX_TIMEOUT_SECONDS) {
                return Err(SieveError::Config(format!(
                    "Timeout of {}s is extremely large (>24 hours). Consider using a smaller value.",
                    timeout.as_secs()
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(SieveError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > gate::MAX_CAPACITY {
                return Err(SieveError::Config(format!(
                    "Concurrency of {concurrency} exceeds the maximum of {}.",
                    gate::MAX_CAPACITY
                )));
            }
        }

        if let Some(0) = self.memory_threshold {
            return Err(SieveError::Config(
                "Memory threshold cannot be 0. Expected a positive number of bytes.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<Duration>,    // --timeout / -t
    pub concurrency: Option<usize>,   // --concurrency
    pub memory_threshold: Option<u64>, // --memory-threshold
    pub user_agent: Option<String>,   // --user-agent
    pub follow_links: bool,           // --follow-links
    pub quiet: bool,                  // --quiet
    pub verbose: bool,                // --verbose
    pub config_file: Option<String>,  // --config
    pub no_config: bool,              // --no-config
}

/// Parse a Go-style duration such as `300ms`, `10s` or `1m30s`.
///
/// A bare integer is read as whole seconds. Supported units are
/// `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`; fractional values
/// like `1.5s` are allowed.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(SieveError::InvalidDuration("empty duration".to_string()));
    }
    if let Ok(seconds) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(seconds));
    }

    let invalid =
        || SieveError::InvalidDuration(format!("'{raw}' (expected e.g. 500ms, 10s, 1m30s)"));
    let is_number_char = |c: char| c.is_ascii_digit() || c == '.';

    let mut total_nanos = 0f64;
    let mut rest = raw;
    while !rest.is_empty() {
        let number_len = rest.find(|c: char| !is_number_char(c)).unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest.find(is_number_char).unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            _ => return Err(invalid()),
        };
        total_nanos += value * nanos_per_unit;
        rest = &rest[unit_len..];
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

/// Accepts either an integer number of seconds or a duration string in TOML.
mod duration_field {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Seconds(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawDuration>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawDuration::Seconds(secs)) => Ok(Some(Duration::from_secs(secs))),
            Some(RawDuration::Text(text)) => super::parse_duration(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
