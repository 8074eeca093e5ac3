//! Configuration file loading and resolution.
//!
//! Loads configuration from:
//! - Linux: `~/.config/refdata/config.toml`
//! - macOS: `~/Library/Application Support/com.refdata.refdata/config.toml`
//! - Windows: `%APPDATA%/refdata/refdata/config/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. Environment variables
//! 2. Config file
//! 3. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `REFDATA_CONNECT_API_KEY`: Connect API key for the E&P service
//! - `REFDATA_ICONA_KEY`: ICONA key
//! - `REFDATA_TIMEOUT`: Per-request timeout in seconds
//! - `REFDATA_VIEW_CONCURRENCY`: Views fetched in parallel (1 = sequential)
//! - `REFDATA_CONFIG`: Override config file path

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::error::{RefDataError, Result};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable for the E&P Connect API key.
pub const ENV_CONNECT_API_KEY: &str = "REFDATA_CONNECT_API_KEY";
/// Environment variable for the ICONA key.
pub const ENV_ICONA_KEY: &str = "REFDATA_ICONA_KEY";
/// Environment variable for timeout in seconds.
pub const ENV_TIMEOUT: &str = "REFDATA_TIMEOUT";
/// Environment variable for view fetch concurrency.
pub const ENV_VIEW_CONCURRENCY: &str = "REFDATA_VIEW_CONCURRENCY";
/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "REFDATA_CONFIG";

const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;
const CONCURRENCY_RANGE: std::ops::RangeInclusive<usize> = 1..=16;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration after merging env vars and config file.
#[derive(Clone)]
pub struct ResolvedConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum view detail requests in flight.
    pub view_concurrency: usize,
    /// E&P Connect API key.
    pub connect_api_key: Option<String>,
    /// ICONA key.
    pub icona_key: Option<String>,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub timeout: ConfigSource,
    pub view_concurrency: ConfigSource,
    pub connect_api_key: ConfigSource,
    pub icona_key: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default (or absent).
    #[default]
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("ResolvedConfig")
            .field("timeout", &self.timeout)
            .field("view_concurrency", &self.view_concurrency)
            .field("connect_api_key", &redact(&self.connect_api_key))
            .field("icona_key", &redact(&self.icona_key))
            .field("sources", &self.sources)
            .finish()
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let general = GeneralConfig::default();
        Self {
            timeout: Duration::from_secs(general.timeout_seconds),
            view_concurrency: general.view_concurrency,
            connect_api_key: None,
            icona_key: None,
            sources: ConfigSources::default(),
        }
    }
}

impl ResolvedConfig {
    /// Resolve configuration from the process environment and the config
    /// file (`REFDATA_CONFIG` or the platform default path).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but is invalid
    /// - An environment override does not parse or is out of range
    pub fn resolve() -> Result<Self> {
        let config = match std::env::var(ENV_CONFIG) {
            Ok(path) if !path.trim().is_empty() => Config::load_from(Path::new(path.trim()))?,
            _ => Config::load()?,
        };
        Self::resolve_with(&config, |key| std::env::var(key).ok())
    }

    /// Resolve against an already loaded `config` and an arbitrary
    /// environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or an override from
    /// `env` does not parse or is out of range.
    pub fn resolve_with<F>(config: &Config, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        config.validate()?;

        let lookup = |key: &str| {
            env(key).and_then(|value| {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
        };

        let mut sources = ConfigSources::default();

        let timeout_seconds = Self::resolve_number(
            lookup(ENV_TIMEOUT),
            ENV_TIMEOUT,
            config.general.timeout_seconds,
            GeneralConfig::default().timeout_seconds,
            &TIMEOUT_RANGE,
            &mut sources.timeout,
        )?;
        let view_concurrency = Self::resolve_number(
            lookup(ENV_VIEW_CONCURRENCY),
            ENV_VIEW_CONCURRENCY,
            config.general.view_concurrency,
            GeneralConfig::default().view_concurrency,
            &CONCURRENCY_RANGE,
            &mut sources.view_concurrency,
        )?;
        let connect_api_key = Self::resolve_secret(
            lookup(ENV_CONNECT_API_KEY),
            config.credentials.connect_api_key.as_deref(),
            &mut sources.connect_api_key,
        );
        let icona_key = Self::resolve_secret(
            lookup(ENV_ICONA_KEY),
            config.credentials.icona_key.as_deref(),
            &mut sources.icona_key,
        );

        Ok(Self {
            timeout: Duration::from_secs(timeout_seconds),
            view_concurrency,
            connect_api_key,
            icona_key,
            sources,
        })
    }

    /// Env value if present (parsed and range checked), else the file value.
    fn resolve_number<T>(
        env_value: Option<String>,
        env_key: &str,
        file_value: T,
        default: T,
        range: &std::ops::RangeInclusive<T>,
        source: &mut ConfigSource,
    ) -> Result<T>
    where
        T: std::str::FromStr + PartialOrd + PartialEq + Copy + fmt::Display,
    {
        if let Some(raw) = env_value {
            let parsed = raw.parse::<T>().ok().filter(|v| range.contains(v));
            return match parsed {
                Some(value) => {
                    *source = ConfigSource::Env;
                    Ok(value)
                }
                None => Err(RefDataError::ConfigInvalid {
                    key: env_key.to_string(),
                    value: raw,
                    message: format!(
                        "must be a whole number between {} and {}",
                        range.start(),
                        range.end()
                    ),
                }),
            };
        }

        *source = if file_value == default {
            ConfigSource::Default
        } else {
            ConfigSource::ConfigFile
        };
        Ok(file_value)
    }

    fn resolve_secret(
        env_value: Option<String>,
        file_value: Option<&str>,
        source: &mut ConfigSource,
    ) -> Option<String> {
        if let Some(value) = env_value {
            *source = ConfigSource::Env;
            return Some(value);
        }

        match file_value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => {
                *source = ConfigSource::ConfigFile;
                Some(value.to_string())
            }
            None => {
                *source = ConfigSource::Default;
                None
            }
        }
    }
}

// =============================================================================
// Config File
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Vendor keys.
    pub credentials: CredentialsConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum view detail requests in flight.
    pub view_concurrency: usize,
    /// Default log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
}

/// Vendor keys.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Connect API key for the E&P service.
    pub connect_api_key: Option<String>,
    /// ICONA key.
    pub icona_key: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("connect_api_key", &self.connect_api_key.as_ref().map(|_| "<redacted>"))
            .field("icona_key", &self.icona_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            view_concurrency: 1,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error only if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::ConfigParse`] if the file exists but is not
    /// valid TOML for this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| RefDataError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RefDataError::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content)?;
        tracing::debug!(?path, "Config file saved");
        Ok(())
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        AppPaths::new().config_file()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::ConfigInvalid`] when the timeout is outside
    /// 1-300 seconds, the view concurrency outside 1-16, or the log level
    /// unknown.
    pub fn validate(&self) -> Result<()> {
        if !TIMEOUT_RANGE.contains(&self.general.timeout_seconds) {
            return Err(RefDataError::ConfigInvalid {
                key: "general.timeout_seconds".to_string(),
                value: self.general.timeout_seconds.to_string(),
                message: "Timeout must be between 1 and 300 seconds".to_string(),
            });
        }

        if !CONCURRENCY_RANGE.contains(&self.general.view_concurrency) {
            return Err(RefDataError::ConfigInvalid {
                key: "general.view_concurrency".to_string(),
                value: self.general.view_concurrency.to_string(),
                message: "View concurrency must be between 1 and 16".to_string(),
            });
        }

        if let Some(level) = &self.general.log_level
            && crate::core::logging::parse_level(level).is_none()
        {
            return Err(RefDataError::ConfigInvalid {
                key: "general.log_level".to_string(),
                value: level.clone(),
                message: "Valid levels: error, warn, info, debug, trace".to_string(),
            });
        }

        Ok(())
    }
}
