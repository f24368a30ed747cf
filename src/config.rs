//! Configuration for the scaler window, history log and scaling service.
//!
//! The settings part of [`ScalerConfig`] can be read from a YAML file,
//! `~/.axis-scaler/config.yaml` by default. Every field is optional there.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Endpoint the gRPC client talks to when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8001";

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

/// How the calculation history is stored and shown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Key of the durable record holding the history.
    pub storage_key: String,
    /// Maximum number of retained entries; older ones are evicted.
    pub max_entries: usize,
    /// Maximum number of rows the history table renders.
    pub display_rows: usize,
    /// Directory for the file store. `None` = `~/.axis-scaler`.
    pub dir: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_key: "scaling_history".to_string(),
            max_entries: 100,
            display_rows: 50,
            dir: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scaling service
// ─────────────────────────────────────────────────────────────────────────────

/// Which scaling service the calculator calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Remote gRPC endpoint. `None` uses the in-process engine.
    /// Only honoured when built with the `grpc` feature.
    pub endpoint: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// ScalerConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `title`          | Native window title |
/// | `window_size`    | Initial inner window size in points |
/// | `history`        | Storage key, cap and display limit of the history |
/// | `service`        | Local engine or remote endpoint |
/// | `native_options` | Optional eframe options (not read from YAML) |
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub history: HistoryConfig,
    pub service: ServiceConfig,
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
}

impl Clone for ScalerConfig {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            window_size: self.window_size,
            history: self.history.clone(),
            service: self.service.clone(),
            native_options: self.native_options.clone(),
        }
    }
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            title: "Scaling Range".to_string(),
            window_size: [620.0, 560.0],
            history: HistoryConfig::default(),
            service: ServiceConfig::default(),
            native_options: None,
        }
    }
}

impl ScalerConfig {
    /// `~/.axis-scaler/config.yaml`, if `HOME` is set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".axis-scaler").join("config.yaml"))
    }

    /// Parse a config from YAML text.
    pub fn from_yaml(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a config from a YAML file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_yaml(&s)
    }

    /// Load the default config file. `Ok(None)` if it does not exist.
    pub fn load_from_default_path() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path).map(Some),
            _ => Ok(None),
        }
    }
}
