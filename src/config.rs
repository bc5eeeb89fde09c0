// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Result, TranslatorError};
use crate::gesture::DEFAULT_PINCH_THRESHOLD;
use crate::smoothing::DEFAULT_WINDOW_SIZE;

/// How hands detected in the same frame share smoothing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingScope {
    /// Every hand feeds one window and one last-confirmed label.
    #[default]
    Shared,
    /// One window and one last-confirmed label per hand side.
    PerHand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Stable confidence must be strictly above this to confirm a phrase.
    #[serde(default = "default_confirm_threshold")]
    pub confirm_threshold: f64,
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold: f64,
    /// Transcript entries kept before the oldest are dropped.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub smoothing_scope: SmoothingScope,
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
}

fn default_window_size() -> usize { DEFAULT_WINDOW_SIZE }
fn default_confirm_threshold() -> f64 { 0.7 }
fn default_pinch_threshold() -> f64 { DEFAULT_PINCH_THRESHOLD }
fn default_history_limit() -> usize { 50 }

fn default_output_directory() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.join("MedSign")))
        .unwrap_or_else(|| PathBuf::from("./output"))
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            confirm_threshold: default_confirm_threshold(),
            pinch_threshold: default_pinch_threshold(),
            history_limit: default_history_limit(),
            smoothing_scope: SmoothingScope::default(),
            output_directory: default_output_directory(),
        }
    }
}

impl TranslatorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TranslatorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Falls back to defaults when the file is missing or unusable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config from {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(TranslatorError::InvalidConfig(
                "window_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confirm_threshold) {
            return Err(TranslatorError::InvalidConfig(format!(
                "confirm_threshold must be within [0, 1], got {}",
                self.confirm_threshold
            )));
        }
        if self.pinch_threshold.is_nan() || self.pinch_threshold <= 0.0 {
            return Err(TranslatorError::InvalidConfig(format!(
                "pinch_threshold must be positive, got {}",
                self.pinch_threshold
            )));
        }
        if self.history_limit == 0 {
            return Err(TranslatorError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
