// src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::error::ConfigError;

/// Value shipped in the sample settings file; treated the same as a missing key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GOOGLE_API_KEY";
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Run-wide settings, loaded once at startup and passed by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub google_api_key: Option<String>,
    pub model: String,
    /// Per-request timeout for generation calls. Unbounded when absent.
    pub request_timeout_secs: Option<u64>,
    pub start_year: u32,
    pub end_year: u32,
    pub context_dir: PathBuf,
    pub output_dir: PathBuf,
    pub input_folders: Vec<PathBuf>,
    pub harvest: Vec<HarvestTarget>,
}

/// An investor-relations page whose PDF links are downloaded into `folder`.
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestTarget {
    pub company: String,
    pub url: String,
    pub folder: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            google_api_key: None,
            model: "gemini-1.5-flash-latest".to_string(),
            request_timeout_secs: None,
            start_year: 2024,
            end_year: 2030,
            context_dir: PathBuf::from("contexts"),
            output_dir: PathBuf::from("summaries"),
            input_folders: ["airbnb", "alphabet", "apple", "nvidia", "tesla"]
                .iter()
                .map(|c| PathBuf::from(format!("pdf_downloads_{}", c)))
                .collect(),
            harvest: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file. A missing file falls back to defaults
    /// with a warning; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw).map_err(|message| ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Settings file '{}' not found, using defaults", path.display());
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                tracing::debug!("Using API key from {} environment variable", API_KEY_ENV);
                settings.google_api_key = Some(key);
            }
        }

        Ok(settings)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Returns the API key only if it is set to something other than the placeholder.
    pub fn api_key(&self) -> Option<&str> {
        self.google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != API_KEY_PLACEHOLDER)
    }

    /// Emits the single startup warning for settings that will make every
    /// generation call fail. Never stops the run.
    pub fn warn_if_incomplete(&self, settings_path: &Path) {
        if self.api_key().is_none() {
            tracing::warn!(
                "'google_api_key' not found or is a placeholder in '{}'. Generation calls will fail.",
                settings_path.display()
            );
        }
        if self.start_year > self.end_year {
            tracing::warn!(
                "Year window {}-{} is inverted; no documents will be selected",
                self.start_year,
                self.end_year
            );
        }
    }
}
