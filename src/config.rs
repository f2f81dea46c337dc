//! Process-wide settings for the generation service.
//!
//! Resolved once at startup and handed to [`crate::generation::ReportService`]
//! explicitly; nothing else in the crate reads the environment.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

const API_KEY_VARS: [&str; 2] = ["API_KEY", "VITE_API_KEY"];
const MODEL_VAR: &str = "AUDIT_MODEL";
const TEMPERATURE_VAR: &str = "AUDIT_TEMPERATURE";
const WEB_SEARCH_VAR: &str = "AUDIT_WEB_SEARCH";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("System configuration error: API key missing")]
    MissingApiKey,
    #[error("Invalid temperature {value:?}: expected a number in [0, 2]")]
    InvalidTemperature { value: String },
    #[error("Invalid boolean {value:?} for {var}")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub enable_web_search: bool,
}

impl fmt::Debug for AnalystConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalystConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("enable_web_search", &self.enable_web_search)
            .finish()
    }
}

impl AnalystConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            enable_web_search: true,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Bundlers substitute unset variables with the literal "undefined".
        let api_key = API_KEY_VARS
            .into_iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.trim().is_empty() && value != "undefined")
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Some(model) = lookup(MODEL_VAR).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }

        if let Some(raw) = lookup(TEMPERATURE_VAR) {
            config.temperature = parse_temperature(&raw)?;
        }

        if let Some(raw) = lookup(WEB_SEARCH_VAR) {
            config.enable_web_search = parse_flag(WEB_SEARCH_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let invalid = || ConfigError::InvalidTemperature {
        value: raw.to_string(),
    };
    let value: f32 = raw.trim().parse().map_err(|_| invalid())?;
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid());
    }
    Ok(value)
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}
