//! Configuration (layered: defaults < settings file < env < command line).
//!
//! Every layer is a [`MentorSettings`] with optional fields; layers are
//! merged with [`MentorSettings::merge`] and turned into a validated
//! [`MentorConfig`] by [`MentorSettings::resolve`]. Resolution fails fast when
//! no API key is present.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bon::Builder;
use serde::Deserialize;

use crate::error::MentorError;
use crate::types::GenerationSettings;
use crate::util::retry::RetryPolicy;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "PHYSICS_MENTOR_BASE_URL";
pub const MODEL_ENV: &str = "PHYSICS_MENTOR_MODEL";
pub const OUTPUT_DIR_ENV: &str = "PHYSICS_MENTOR_OUTPUT_DIR";
pub const TIMEOUT_ENV: &str = "PHYSICS_MENTOR_TIMEOUT_SECS";
pub const MAX_ROUND_TRIPS_ENV: &str = "PHYSICS_MENTOR_MAX_ROUND_TRIPS";
pub const RETRY_ATTEMPTS_ENV: &str = "PHYSICS_MENTOR_RETRY_ATTEMPTS";
pub const TEMPERATURE_ENV: &str = "PHYSICS_MENTOR_TEMPERATURE";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_ROUND_TRIPS: usize = 10;

/// One configuration layer. Unset fields defer to lower layers.
#[derive(Clone, Default, PartialEq, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct MentorSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub max_round_trips: Option<usize>,
    pub retry_attempts: Option<u32>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl MentorSettings {
    /// Parse a TOML settings document.
    pub fn from_toml_str(text: &str) -> Result<Self, MentorError> {
        toml::from_str(text)
            .map_err(|e| MentorError::Configuration(format!("invalid settings file: {e}")))
    }

    /// Load a TOML settings file.
    pub fn load(path: &Path) -> Result<Self, MentorError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MentorError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Read the environment layer, loading `.env` first if present.
    pub fn from_env() -> Result<Self, MentorError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the environment layer through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MentorError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_key: get(API_KEY_ENV),
            base_url: get(BASE_URL_ENV),
            model: get(MODEL_ENV),
            output_dir: get(OUTPUT_DIR_ENV).map(PathBuf::from),
            timeout_secs: parse_var(TIMEOUT_ENV, get(TIMEOUT_ENV))?,
            max_round_trips: parse_var(MAX_ROUND_TRIPS_ENV, get(MAX_ROUND_TRIPS_ENV))?,
            retry_attempts: parse_var(RETRY_ATTEMPTS_ENV, get(RETRY_ATTEMPTS_ENV))?,
            temperature: parse_var(TEMPERATURE_ENV, get(TEMPERATURE_ENV))?,
            max_tokens: None,
        })
    }

    /// Overlay `higher` on top of `self`; set fields in `higher` win.
    pub fn merge(self, higher: MentorSettings) -> MentorSettings {
        MentorSettings {
            api_key: higher.api_key.or(self.api_key),
            base_url: higher.base_url.or(self.base_url),
            model: higher.model.or(self.model),
            output_dir: higher.output_dir.or(self.output_dir),
            timeout_secs: higher.timeout_secs.or(self.timeout_secs),
            max_round_trips: higher.max_round_trips.or(self.max_round_trips),
            retry_attempts: higher.retry_attempts.or(self.retry_attempts),
            temperature: higher.temperature.or(self.temperature),
            max_tokens: higher.max_tokens.or(self.max_tokens),
        }
    }

    /// Apply defaults and validate.
    pub fn resolve(self) -> Result<MentorConfig, MentorError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                MentorError::Configuration(format!(
                    "{API_KEY_ENV} is not set. Please ensure it is defined in your environment or .env file."
                ))
            })?;

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(MentorError::Configuration(
                "timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(MentorConfig {
            endpoint: EndpointConfig {
                base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            output_dir: self.output_dir.unwrap_or_else(default_output_dir),
            max_round_trips: self
                .max_round_trips
                .unwrap_or(DEFAULT_MAX_ROUND_TRIPS)
                .max(1),
            retry: RetryPolicy::default().with_max_attempts(self.retry_attempts.unwrap_or(1)),
            generation: GenerationSettings {
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            },
        })
    }
}

impl fmt::Debug for MentorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MentorSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("output_dir", &self.output_dir)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_round_trips", &self.max_round_trips)
            .field("retry_attempts", &self.retry_attempts)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: Option<String>) -> Result<Option<T>, MentorError>
where
    T::Err: fmt::Display,
{
    value
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| MentorError::Configuration(format!("{key}={v:?}: {e}")))
        })
        .transpose()
}

/// The user's Desktop, falling back to `<home>/Desktop`, then the working directory.
pub fn default_output_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| {
            dirs.desktop_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dirs.home_dir().join("Desktop"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Remote endpoint connection details.
#[derive(Clone, PartialEq)]
pub struct EndpointConfig {
    pub base_url: String,
    pub model: String,
    api_key: String,
    pub request_timeout: Duration,
}

impl EndpointConfig {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            request_timeout,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"..")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Fully resolved process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MentorConfig {
    pub endpoint: EndpointConfig,
    pub output_dir: PathBuf,
    pub max_round_trips: usize,
    pub retry: RetryPolicy,
    pub generation: GenerationSettings,
}
