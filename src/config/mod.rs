//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::Path, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::cache::CacheConfig;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "foglio";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// CLI overrides, flattened into the binary's argument surface. Env-backed
/// flags mirror the file keys so headless deployments need no config file.
#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Override the API base URL, e.g. <https://blog.example.com/api>
    #[arg(long = "site", env = "FOGLIO_SITE_URL", value_name = "URL")]
    pub site: Option<String>,

    /// Path to a file containing the API token (takes precedence over env).
    #[arg(long = "token-file", env = "FOGLIO_TOKEN_FILE", value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// API token; hidden from help so tokens stay in env or token files
    /// rather than shell history.
    #[arg(long = "token", hide = true, env = "FOGLIO_TOKEN")]
    pub token: Option<String>,

    /// Override the request timeout.
    #[arg(long = "timeout-seconds", value_name = "SECONDS")]
    pub timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Toggle the read cache.
    #[arg(
        long = "cache-enable",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub cache_enable: Option<bool>,

    /// Override the cache entry lifetime in milliseconds.
    #[arg(long = "cache-ttl-ms", value_name = "MILLIS")]
    pub cache_ttl_ms: Option<u64>,

    /// Override the maximum number of cached payloads.
    #[arg(long = "cache-entry-limit", value_name = "COUNT")]
    pub cache_entry_limit: Option<usize>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheConfig,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: String,
        source: std::io::Error,
    },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(config_file: Option<&Path>, overrides: &SettingsOverrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOGLIO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);
    Settings::from_raw(raw)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    cache: RawCacheSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
    token: Option<String>,
    token_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCacheSettings {
    enable: Option<bool>,
    ttl_ms: Option<u64>,
    entry_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(site) = overrides.site.as_ref() {
            self.api.base_url = Some(site.clone());
        }
        if let Some(path) = overrides.token_file.as_ref() {
            self.api.token_file = Some(path.clone());
        }
        if let Some(token) = overrides.token.as_ref() {
            self.api.token = Some(token.clone());
        }
        if let Some(seconds) = overrides.timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(enable) = overrides.cache_enable {
            self.cache.enable = Some(enable);
        }
        if let Some(ttl) = overrides.cache_ttl_ms {
            self.cache.ttl_ms = Some(ttl);
        }
        if let Some(limit) = overrides.cache_entry_limit {
            self.cache.entry_limit = Some(limit);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            cache,
            logging,
        } = raw;

        let api = build_api_settings(api)?;
        let cache = build_cache_settings(cache)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            api,
            cache,
            logging,
        })
    }
}

fn build_api_settings(raw: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let base_url = raw
        .base_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            LoadError::invalid(
                "api.base_url",
                "value is required (set --site or FOGLIO_SITE_URL)",
            )
        })?;

    let timeout_seconds = raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
    if timeout_seconds == 0 {
        return Err(LoadError::invalid(
            "api.timeout_seconds",
            "value must be greater than zero",
        ));
    }

    // A token file, when present, wins over an inline token.
    let token = match raw.token_file {
        Some(path) => {
            let contents =
                std::fs::read_to_string(&path).map_err(|source| LoadError::TokenFile {
                    path: path.display().to_string(),
                    source,
                })?;
            let trimmed = contents.trim();
            if trimmed.is_empty() {
                return Err(LoadError::invalid("api.token_file", "token file is empty"));
            }
            Some(trimmed.to_string())
        }
        None => raw.token.filter(|token| !token.trim().is_empty()),
    };

    Ok(ApiSettings {
        base_url,
        timeout: Duration::from_secs(timeout_seconds),
        token,
    })
}

fn build_cache_settings(raw: RawCacheSettings) -> Result<CacheConfig, LoadError> {
    let defaults = CacheConfig::default();
    let ttl_ms = raw.ttl_ms.unwrap_or(defaults.ttl_ms);
    if ttl_ms == 0 {
        return Err(LoadError::invalid(
            "cache.ttl_ms",
            "value must be greater than zero",
        ));
    }

    Ok(CacheConfig {
        enable: raw.enable.unwrap_or(defaults.enable),
        ttl_ms,
        entry_limit: raw.entry_limit.unwrap_or(defaults.entry_limit),
    })
}

fn build_logging_settings(raw: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match raw.level.as_deref() {
        Some(value) => LevelFilter::from_str(value.trim()).map_err(|_| {
            LoadError::invalid("logging.level", format!("unrecognized level `{value}`"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if raw.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}
