//! Client configuration.
//!
//! # Responsibility
//! - Hold the task service location, request timeout and display locale.
//! - Read overrides from `NOTES_*` environment variables.
//!
//! # Invariants
//! - `base_url` always ends with `/` so endpoint paths join beneath it.
//! - Invalid overrides are rejected, never silently replaced by defaults.

use crate::date::{Locale, LocaleError};
use reqwest::Url;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Emulator loopback address of the development task service.
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:8080/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "NOTES_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NOTES_API_TIMEOUT_SECS";
pub const ENV_LOCALE: &str = "NOTES_LOCALE";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl { value: String, message: String },
    InvalidTimeout(String),
    InvalidLocale(LocaleError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { value, message } => {
                write!(f, "invalid base url `{value}`: {message}")
            }
            Self::InvalidTimeout(value) => {
                write!(f, "invalid timeout `{value}`; expected whole seconds > 0")
            }
            Self::InvalidLocale(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLocale(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LocaleError> for ConfigError {
    fn from(value: LocaleError) -> Self {
        Self::InvalidLocale(value)
    }
}

/// Settings for talking to the task service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub locale: Locale,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: DEFAULT_TIMEOUT,
            locale: Locale::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a config for `base_url` with default timeout and locale.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Builds a config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = non_blank(lookup(ENV_BASE_URL)) {
            config.base_url = parse_base_url(&value)?;
        }
        if let Some(value) = non_blank(lookup(ENV_TIMEOUT_SECS)) {
            config.timeout = parse_timeout(&value)?;
        }
        if let Some(value) = non_blank(lookup(ENV_LOCALE)) {
            config.locale = value.parse::<Locale>()?;
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|err| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            message: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}
