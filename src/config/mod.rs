//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `CVMATCH_*` environment variables (the remote
//! credential is read from `OPENAI_API_KEY`). The resulting [`Config`] is resolved once at
//! process start and handed to each component, so tests can build one directly.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_ENCODER_NAME, DEFAULT_MAX_RETRIES, DEFAULT_MODEL_DIR,
    DEFAULT_REMOTE_MODEL, DEFAULT_REMOTE_RATIO, DEFAULT_RETRY_DELAY, ENV_API_KEY,
};
use crate::embedding::{DevicePreference, EncoderConfig};
use crate::remote::{RemoteConfig, RetryPolicy};

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Preferred local model directory. Default: `./models/latest`.
    pub model_dir: Option<PathBuf>,

    /// Pretrained encoder used when `model_dir` does not resolve.
    pub encoder_name: String,

    /// Compute device preference. Default: CPU.
    pub device: DevicePreference,

    /// Use the lexical stub encoder instead of a model.
    pub stub_encoder: bool,

    /// Encoder batch size. Default: `32`.
    pub batch_size: usize,

    /// Remote API credential. The remote scorer is disabled without it.
    pub api_key: Option<String>,

    /// Remote chat model. Default: `gpt-3.5-turbo`.
    pub remote_model: String,

    /// OpenAI-compatible endpoint override.
    pub remote_api_base: Option<String>,

    /// Probability of attempting the remote scorer in hybrid mode. Default: `1.0`.
    pub remote_ratio: f64,

    /// Remote attempts per call. Default: `3`.
    pub max_retries: u32,

    /// Base delay between remote attempts (scaled by attempt number). Default: 1s.
    pub retry_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: Some(PathBuf::from(DEFAULT_MODEL_DIR)),
            encoder_name: DEFAULT_ENCODER_NAME.to_string(),
            device: DevicePreference::Cpu,
            stub_encoder: false,
            batch_size: DEFAULT_BATCH_SIZE,
            api_key: None,
            remote_model: DEFAULT_REMOTE_MODEL.to_string(),
            remote_api_base: None,
            remote_ratio: DEFAULT_REMOTE_RATIO,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl Config {
    const ENV_MODEL_DIR: &'static str = "CVMATCH_MODEL_DIR";
    const ENV_ENCODER: &'static str = "CVMATCH_ENCODER";
    const ENV_DEVICE: &'static str = "CVMATCH_DEVICE";
    const ENV_STUB_ENCODER: &'static str = "CVMATCH_STUB_ENCODER";
    const ENV_BATCH_SIZE: &'static str = "CVMATCH_BATCH_SIZE";
    const ENV_REMOTE_MODEL: &'static str = "CVMATCH_REMOTE_MODEL";
    const ENV_REMOTE_API_BASE: &'static str = "CVMATCH_REMOTE_API_BASE";
    const ENV_REMOTE_RATIO: &'static str = "CVMATCH_REMOTE_RATIO";
    const ENV_MAX_RETRIES: &'static str = "CVMATCH_MAX_RETRIES";
    const ENV_RETRY_DELAY_MS: &'static str = "CVMATCH_RETRY_DELAY_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_dir = match env::var(Self::ENV_MODEL_DIR) {
            Ok(_) => Self::parse_optional_string_from_env(Self::ENV_MODEL_DIR).map(PathBuf::from),
            Err(_) => defaults.model_dir,
        };
        let encoder_name = Self::parse_optional_string_from_env(Self::ENV_ENCODER)
            .unwrap_or(defaults.encoder_name);
        let device = match Self::parse_optional_string_from_env(Self::ENV_DEVICE) {
            Some(value) => DevicePreference::from_str(&value)
                .map_err(|_| ConfigError::InvalidDevice { value })?,
            None => defaults.device,
        };
        let stub_encoder = Self::parse_flag_from_env(Self::ENV_STUB_ENCODER);
        let batch_size = Self::parse_number_from_env(Self::ENV_BATCH_SIZE, defaults.batch_size)?;
        let api_key = Self::parse_optional_string_from_env(ENV_API_KEY);
        let remote_model = Self::parse_optional_string_from_env(Self::ENV_REMOTE_MODEL)
            .unwrap_or(defaults.remote_model);
        let remote_api_base = Self::parse_optional_string_from_env(Self::ENV_REMOTE_API_BASE);
        let remote_ratio =
            Self::parse_number_from_env(Self::ENV_REMOTE_RATIO, defaults.remote_ratio)?;
        let max_retries = Self::parse_number_from_env(Self::ENV_MAX_RETRIES, defaults.max_retries)?;
        let retry_delay_ms = Self::parse_number_from_env(
            Self::ENV_RETRY_DELAY_MS,
            defaults.retry_delay.as_millis() as u64,
        )?;

        Ok(Self {
            model_dir,
            encoder_name,
            device,
            stub_encoder,
            batch_size,
            api_key,
            remote_model,
            remote_api_base,
            remote_ratio,
            max_retries,
            retry_delay: Duration::from_millis(retry_delay_ms),
        })
    }

    /// Validates basic invariants.
    ///
    /// The model directory is not checked here; a missing directory falls back to
    /// the pretrained encoder at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.remote_ratio) {
            return Err(ConfigError::InvalidRatio {
                value: self.remote_ratio,
            });
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }

        if self.encoder_name.trim().is_empty() {
            return Err(ConfigError::EmptyEncoderName);
        }

        Ok(())
    }

    /// Returns `true` if a remote credential is configured.
    pub fn remote_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Builds the encoder configuration.
    pub fn encoder_config(&self) -> EncoderConfig {
        if self.stub_encoder {
            return EncoderConfig::stub();
        }

        EncoderConfig {
            model_dir: self.model_dir.clone(),
            encoder_name: self.encoder_name.clone(),
            device: self.device,
            batch_size: self.batch_size,
            ..EncoderConfig::default()
        }
    }

    /// Builds the remote scorer configuration.
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            api_key: self.api_key.clone(),
            model: self.remote_model.clone(),
            api_base: self.remote_api_base.clone(),
            retry: RetryPolicy::new(self.max_retries, self.retry_delay),
            ..RemoteConfig::default()
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_flag_from_env(var_name: &str) -> bool {
        Self::parse_optional_string_from_env(var_name)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidNumber {
                name: var_name,
                reason: e.to_string(),
                value,
            }),
            None => Ok(default),
        }
    }
}
