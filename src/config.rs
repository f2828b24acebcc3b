//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::model::{DEFAULT_ANALYSIS_MODEL, DEFAULT_GENERATION_MODEL};
use crate::pipeline::TransformationMode;

/// Environment variables checked for the Gemini key, in order.
pub const GEMINI_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default values used when the matching CLI flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Gemini endpoint settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Transformation mode.
    pub mode: TransformationMode,
    /// Model used to describe the style image.
    pub analysis_model: String,
    /// Model used to generate the final image.
    pub generation_model: String,
    /// Output format.
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: TransformationMode::Realistic,
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            format: "png".to_string(),
        }
    }
}

/// Gemini endpoint settings.
#[derive(Debug, Default, Deserialize)]
pub struct GeminiConfig {
    /// API root override, e.g. for a proxy.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl GeminiConfig {
    /// The request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring environment variables.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        self.gemini_key_from(|var| std::env::var(var).ok())
    }

    fn gemini_key_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        GEMINI_KEY_VARS
            .iter()
            .find_map(|var| lookup(var).filter(|v| !v.trim().is_empty()))
            .or_else(|| self.keys.gemini.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `STYLEFUSION_CONFIG` environment variable
/// 3. `~/.config/stylefusion/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("STYLEFUSION_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/stylefusion/config.toml")
    } else {
        PathBuf::from("stylefusion.toml")
    }
}
