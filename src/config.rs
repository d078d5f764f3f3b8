//! Configuration types.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

/// Model used when `TRIP_PLANNER_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Gemini REST base URL used when `TRIP_PLANNER_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Secrets file consulted when `GEMINI_API_KEY` is not set.
pub const DEFAULT_SECRETS_PATH: &str = ".streamlit/secrets.toml";

/// Planner configuration.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Gemini API key. Never logged.
    pub api_key: SecretString,
    /// Model name, e.g. "gemini-2.0-flash".
    pub model: String,
    /// Base URL of the generative language API (no trailing slash).
    pub base_url: String,
    /// Assistant message appended after the last answer, before generation.
    /// `None` appends nothing.
    pub final_prompt: Option<String>,
    /// If set, the HTTP surface listens on this port.
    pub http_port: Option<u16>,
}

/// On-disk secrets file: `[api]` table with a `key` entry.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    api: Option<ApiSecrets>,
}

#[derive(Debug, Deserialize)]
struct ApiSecrets {
    key: Option<String>,
}

impl PlannerConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secrets_path = var("TRIP_PLANNER_SECRETS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH));

        let api_key = match var("GEMINI_API_KEY") {
            Some(key) => SecretString::from(key),
            None => load_secrets_file(&secrets_path)?.ok_or_else(|| {
                ConfigError::MissingRequired {
                    key: "GEMINI_API_KEY".to_string(),
                    hint: format!(
                        "Set the environment variable or add [api] key = \"...\" to {}",
                        secrets_path.display()
                    ),
                }
            })?,
        };

        let http_port = match var("TRIP_PLANNER_HTTP_PORT") {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: "TRIP_PLANNER_HTTP_PORT".to_string(),
                    message: format!("{raw:?}: {e}"),
                }
            })?),
            None => None,
        };

        Ok(Self {
            api_key,
            model: var("TRIP_PLANNER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: var("TRIP_PLANNER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            final_prompt: var("TRIP_PLANNER_FINAL_PROMPT"),
            http_port,
        })
    }
}

/// Read the API key from a TOML secrets file.
///
/// A missing file or a file without `[api] key` yields `Ok(None)`; an
/// unreadable or malformed file is an error.
pub fn load_secrets_file(path: &Path) -> Result<Option<SecretString>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    let parsed: SecretsFile = toml::from_str(&raw)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

    Ok(parsed
        .api
        .and_then(|api| api.key)
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from))
}
